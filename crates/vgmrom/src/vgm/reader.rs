//! Reads a VGM/VGZ byte stream into a plain, uncompressed buffer.
//!
//! Gzip detection is by magic bytes only, not by file extension or path:
//! callers may hand this a file, a pipe, or stdin, and the same sniffing
//! applies uniformly.

use std::io::Read;

use flate2::read::GzDecoder;

use crate::vgm::convert::ConvertError;

const VGM_MAGIC: &[u8; 4] = b"Vgm ";
const GZIP_MAGIC: &[u8; 3] = &[0x1f, 0x8b, 0x08];

/// Largest uncompressed VGM this crate will attempt to process.
pub const MAX_INPUT_SIZE: usize = 512 * 1024;

/// Read `reader` fully, transparently decompressing it if it starts with
/// the gzip magic, and return the raw `"Vgm "`-prefixed bytes.
///
/// Fatal conditions: the underlying read fails, the (possibly
/// decompressed) buffer does not start with the VGM ident, or its size
/// exceeds [`MAX_INPUT_SIZE`].
pub fn read_vgm_bytes<R: Read>(mut reader: R) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(ConvertError::Io)?;

    let bytes = if buf.len() >= 4 && &buf[0..4] == VGM_MAGIC {
        buf
    } else if buf.len() >= 3 && &buf[0..3] == GZIP_MAGIC {
        let mut decoder = GzDecoder::new(&buf[..]);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(ConvertError::Io)?;
        if decompressed.len() < 4 || &decompressed[0..4] != VGM_MAGIC {
            return Err(ConvertError::BadMagic);
        }
        decompressed
    } else {
        return Err(ConvertError::BadMagic);
    };

    if bytes.len() > MAX_INPUT_SIZE {
        return Err(ConvertError::Oversize {
            size: bytes.len(),
            limit: MAX_INPUT_SIZE,
        });
    }

    Ok(bytes)
}
