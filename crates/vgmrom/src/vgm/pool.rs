//! Frame pool: a byte-addressable store of unique PSG frames, deduped by
//! exact content match.

/// Maximum addressable offset (12-bit pool addressing in `IndexWord`).
pub const MAX_POOL_SIZE: usize = 0x1000;

/// Concatenated unique PSG frames plus a dedup index over them.
///
/// Offset 0 always holds the reserved all-zero frame (`[0x00]`), used
/// implicitly by delay-only index entries.
#[derive(Debug, Clone)]
pub struct FramePool {
    data: Vec<u8>,
    registered: Vec<(usize, usize)>,
}

impl FramePool {
    pub fn new() -> Self {
        Self {
            data: vec![0x00],
            registered: vec![(0, 1)],
        }
    }

    /// Register `frame`, returning its pool offset. Reuses an existing
    /// offset when an identical frame (same length, same bytes) is
    /// already present.
    pub fn register(&mut self, frame: &[u8]) -> usize {
        for &(offset, len) in &self.registered {
            if len == frame.len() && &self.data[offset..offset + len] == frame {
                return offset;
            }
        }

        if self.data.len() >= 0x0fff {
            eprintln!(
                "warning: frame pool too large to index (0x{:x} bytes)",
                self.data.len()
            );
        }

        let offset = self.data.len();
        self.data.extend_from_slice(frame);
        self.registered.push((offset, frame.len()));
        offset
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for FramePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserves_the_zero_frame_at_offset_zero() {
        let pool = FramePool::new();
        assert_eq!(pool.bytes(), &[0x00]);
        assert_eq!(pool.register(&[0x00]), 0);
    }

    #[test]
    fn registers_a_new_frame_after_the_zero_frame() {
        let mut pool = FramePool::new();
        let offset = pool.register(&[0x01, 0x55]);
        assert_eq!(offset, 1);
        assert_eq!(pool.bytes(), &[0x00, 0x01, 0x55]);
    }

    #[test]
    fn reuses_offset_for_an_identical_frame() {
        let mut pool = FramePool::new();
        let first = pool.register(&[0x01, 0x55]);
        let second = pool.register(&[0x01, 0x55]);
        assert_eq!(first, second);
        assert_eq!(pool.bytes().len(), 3);
    }

    #[test]
    fn distinguishes_frames_by_exact_length_not_just_prefix() {
        let mut pool = FramePool::new();
        let short = pool.register(&[0x01]);
        let long = pool.register(&[0x01, 0x55]);
        assert_ne!(short, long);
    }
}
