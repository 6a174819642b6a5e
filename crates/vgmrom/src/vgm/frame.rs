//! PSG frame construction: diffs `PsgState` against the last emitted
//! state and packs the changed registers into a nibble-packed byte
//! sequence.

use crate::chip::PsgState;

const TONE_0_BIT: u8 = 0x01;
const TONE_1_BIT: u8 = 0x02;
const TONE_2_BIT: u8 = 0x04;
const NOISE_BIT: u8 = 0x08;
const VOLUME_0_BIT: u8 = 0x10;
const VOLUME_1_BIT: u8 = 0x20;
const VOLUME_2_BIT: u8 = 0x40;
const VOLUME_3_BIT: u8 = 0x80;

/// Builds nibble-packed PSG delta frames, one per tick.
///
/// Frame layout: one header byte of presence flags (`tone0`, `tone1`,
/// `tone2`, `noise`, `volume0..3`, low bit first in that order),
/// followed by the changed registers' nibbles packed two-per-byte, low
/// nibble first. Tone registers contribute 3 nibbles each (low 4 bits,
/// next 4 bits, top 2 bits); noise and each volume contribute 1 nibble.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    previous: PsgState,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the delta frame for `current` against the last state this
    /// builder saw, then adopt `current` as the new baseline.
    pub fn build_frame(&mut self, current: &PsgState) -> Vec<u8> {
        let mut header = 0u8;
        let mut nibbles: Vec<u8> = Vec::with_capacity(12);

        if current.t0 != self.previous.t0 {
            header |= TONE_0_BIT;
            push_tone_nibbles(&mut nibbles, current.t0);
        }
        if current.t1 != self.previous.t1 {
            header |= TONE_1_BIT;
            push_tone_nibbles(&mut nibbles, current.t1);
        }
        if current.t2 != self.previous.t2 {
            header |= TONE_2_BIT;
            push_tone_nibbles(&mut nibbles, current.t2);
        }
        if current.n != self.previous.n {
            header |= NOISE_BIT;
            nibbles.push(current.n & 0x0f);
        }
        if current.v0 != self.previous.v0 {
            header |= VOLUME_0_BIT;
            nibbles.push(current.v0 & 0x0f);
        }
        if current.v1 != self.previous.v1 {
            header |= VOLUME_1_BIT;
            nibbles.push(current.v1 & 0x0f);
        }
        if current.v2 != self.previous.v2 {
            header |= VOLUME_2_BIT;
            nibbles.push(current.v2 & 0x0f);
        }
        if current.v3 != self.previous.v3 {
            header |= VOLUME_3_BIT;
            nibbles.push(current.v3 & 0x0f);
        }

        let mut frame = Vec::with_capacity(1 + nibbles.len().div_ceil(2));
        frame.push(header);
        for pair in nibbles.chunks(2) {
            let low = pair[0] & 0x0f;
            let high = pair.get(1).map(|n| (n & 0x0f) << 4).unwrap_or(0);
            frame.push(low | high);
        }

        self.previous = *current;
        frame
    }
}

fn push_tone_nibbles(nibbles: &mut Vec<u8>, tone: u16) {
    nibbles.push((tone & 0x00f) as u8);
    nibbles.push(((tone & 0x0f0) >> 4) as u8);
    nibbles.push(((tone & 0x300) >> 8) as u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_changes_produces_the_zero_header_frame() {
        let mut builder = FrameBuilder::new();
        let frame = builder.build_frame(&PsgState::new());
        assert_eq!(frame, vec![0x00]);
    }

    #[test]
    fn tone0_change_packs_three_nibbles_into_two_bytes() {
        let mut builder = FrameBuilder::new();
        let mut state = PsgState::new();
        state.t0 = 0x155;
        let frame = builder.build_frame(&state);
        assert_eq!(frame, vec![TONE_0_BIT, 0x55, 0x01]);
    }

    #[test]
    fn single_volume_change_is_one_padded_byte() {
        let mut builder = FrameBuilder::new();
        let mut state = PsgState::new();
        state.v0 = 0x0a;
        let frame = builder.build_frame(&state);
        assert_eq!(frame, vec![VOLUME_0_BIT, 0x0a]);
    }

    #[test]
    fn second_call_diffs_against_first_call_not_initial_zero() {
        let mut builder = FrameBuilder::new();
        let mut state = PsgState::new();
        state.v0 = 5;
        builder.build_frame(&state);
        // unchanged from the previous call: no presence flags at all
        let frame = builder.build_frame(&state);
        assert_eq!(frame, vec![0x00]);
    }
}
