//! VGM-to-firmware-stream pipeline: header parsing, the PSG and FM
//! per-tick tracks, index compression, and the command dispatcher that
//! ties them together.
pub mod compress;
pub mod convert;
pub mod emit;
pub mod fm;
pub mod frame;
pub mod header;
pub mod index;
pub mod pool;
pub mod psg;
pub mod reader;

pub use compress::{CompressedIndexWord, CompressedLoopAnchors};
pub use convert::{ConvertError, ConvertOutput, LoopAnchors, convert, convert_reader};
pub use fm::FmWord;
pub use header::{VgmHeader, parse_header};
pub use index::IndexWord;
pub use reader::read_vgm_bytes;
