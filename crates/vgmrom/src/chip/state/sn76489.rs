//! SN76489 (PSG) shadow register state.
//!
//! This module tracks the register state of the SN76489 Programmable Sound
//! Generator as a plain shadow copy: no event detection, no frequency
//! calculation — just the values the frame builder diffs against on each
//! NTSC tick.
//!
//! # Register interface
//!
//! SN76489 uses a latch-based single write port:
//! - Latch byte (bit 7 = 1): bits 6-5 select the channel (0-2 tone, 3
//!   noise), bit 4 selects frequency (0) vs. volume (1), bits 3-0 carry
//!   4 bits of data.
//! - Data byte (bit 7 = 0): carries the remaining 6 bits of a tone period
//!   for the most recently latched tone channel (bits 9-4), or, for a
//!   latched volume/noise target, another 4-bit refresh.
//!
//! The data-byte branch below intentionally mirrors the latch branch for
//! volume/noise targets rather than only updating tone registers. A
//! non-latch byte following a volume latch refreshes that volume again,
//! which the VGM format itself does not call for; this is preserved
//! deliberately since it matches the existing converter's observed
//! behavior, not treated as a bug to silently fix.

/// Shadow copy of the SN76489's register state.
///
/// Tone periods are masked to 10 bits, the noise control and the four
/// channel volumes to 4 bits, matching the chip's actual register widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PsgState {
    pub t0: u16,
    pub t1: u16,
    pub t2: u16,
    pub n: u8,
    pub v0: u8,
    pub v1: u8,
    pub v2: u8,
    pub v3: u8,
    /// Most recently latched target (`0x00`, `0x10`, ..., `0x70`), or
    /// `None` before any latch byte has been seen.
    latch: Option<u8>,
}

impl PsgState {
    /// Create a fresh, all-zero PSG shadow state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one byte written to the PSG write port, updating the shadow
    /// registers in place.
    ///
    /// This mirrors the chip's own latch/data decoding rather than
    /// modeling each register as an independent write target, since the
    /// behavior of a data byte depends on which target was last latched.
    pub fn apply_write(&mut self, value: u8) {
        let data_low = (value & 0x0f) as u16;

        if value & 0x80 != 0 {
            let latch = value & 0x70;
            self.latch = Some(latch);
            match latch {
                0x00 => self.t0 = (self.t0 & 0x3f0) | data_low,
                0x10 => self.v0 = data_low as u8,
                0x20 => self.t1 = (self.t1 & 0x3f0) | data_low,
                0x30 => self.v1 = data_low as u8,
                0x40 => self.t2 = (self.t2 & 0x3f0) | data_low,
                0x50 => self.v2 = data_low as u8,
                0x60 => self.n = data_low as u8,
                0x70 => self.v3 = data_low as u8,
                _ => unreachable!("latch is masked to one of the eight 0x?0 targets"),
            }
        } else {
            let data_high = (value as u16) << 4;
            match self.latch {
                Some(0x00) => self.t0 = (self.t0 & 0x00f) | data_high,
                Some(0x10) => self.v0 = data_low as u8,
                Some(0x20) => self.t1 = (self.t1 & 0x00f) | data_high,
                Some(0x30) => self.v1 = data_low as u8,
                Some(0x40) => self.t2 = (self.t2 & 0x00f) | data_high,
                Some(0x50) => self.v2 = data_low as u8,
                Some(0x60) => self.n = data_low as u8,
                Some(0x70) => self.v3 = data_low as u8,
                Some(_) => unreachable!("latch is masked to one of the eight 0x?0 targets"),
                None => {
                    // No latch byte has been seen yet; a stray data byte has no target.
                }
            }
        }
    }
}
