//! Ties the PSG shadow state, frame builder, frame pool, and index
//! stream together into the single per-tick pipeline the dispatcher
//! drives.

use crate::chip::PsgState;
use crate::vgm::frame::FrameBuilder;
use crate::vgm::index::{IndexStream, IndexWord};
use crate::vgm::pool::FramePool;

#[derive(Debug, Clone, Default)]
pub struct PsgTrack {
    state: PsgState,
    frame_builder: FrameBuilder,
    pool: FramePool,
    index: IndexStream,
}

impl PsgTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_write(&mut self, value: u8) {
        self.state.apply_write(value);
    }

    /// Emit the frame for `frame_delay` ticks. A delay of zero is a
    /// no-op: there is nothing to attribute to a tick that never
    /// elapsed.
    pub fn flush(&mut self, frame_delay: u32) {
        if frame_delay == 0 {
            return;
        }
        let frame = self.frame_builder.build_frame(&self.state);
        let offset = self.pool.register(&frame);
        self.index.push(frame_delay, offset as u16);
    }

    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    pub fn index_words(&self) -> &[IndexWord] {
        self.index.words()
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }
}
