//! VGM header field extraction.
//!
//! Only the handful of fields the converter actually consumes are parsed
//! here — this is not a general-purpose VGM header decoder.

use crate::binutil::{ParseError, read_u32_le_at};

/// The header fields the converter needs, plus the two derived byte
/// offsets (`data_start`, `loop_abs`) the dispatcher walks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VgmHeader {
    pub version: u32,
    pub psg_clock: u32,
    pub rate: u32,
    /// Absolute offset of the first command byte.
    pub data_start: usize,
    /// Absolute offset of the loop point, if the file declares one.
    pub loop_abs: Option<usize>,
}

/// Parse the fixed-position header fields out of a complete VGM buffer.
///
/// `bytes` must already be the raw, uncompressed VGM file (gzip, if any,
/// has been stripped by the reader) with a valid `"Vgm "` ident.
pub fn parse_header(bytes: &[u8]) -> Result<VgmHeader, ParseError> {
    if bytes.len() < 4 {
        return Err(ParseError::OffsetOutOfRange {
            offset: 0,
            needed: 4,
            available: bytes.len(),
            context: Some("ident".to_string()),
        });
    }
    let mut ident = [0u8; 4];
    ident.copy_from_slice(&bytes[0..4]);
    if &ident != b"Vgm " {
        return Err(ParseError::InvalidIdent(ident));
    }

    let version = read_u32_le_at(bytes, 0x08)?;
    let psg_clock = read_u32_le_at(bytes, 0x0c)?;
    let loop_offset_field = read_u32_le_at(bytes, 0x1c)?;
    let rate = read_u32_le_at(bytes, 0x24)?;
    let data_offset_field = read_u32_le_at(bytes, 0x34)?;

    let loop_abs = if loop_offset_field != 0 {
        Some(0x1c + loop_offset_field as usize)
    } else {
        None
    };
    let data_start = if data_offset_field != 0 {
        0x34 + data_offset_field as usize
    } else {
        0x40
    };

    Ok(VgmHeader {
        version,
        psg_clock,
        rate,
        data_start,
        loop_abs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header() -> Vec<u8> {
        let mut buf = vec![0u8; 0x40];
        buf[0..4].copy_from_slice(b"Vgm ");
        buf[0x08..0x0c].copy_from_slice(&0x0171u32.to_le_bytes());
        buf[0x0c..0x10].copy_from_slice(&3_579_545u32.to_le_bytes());
        buf[0x24..0x28].copy_from_slice(&44100u32.to_le_bytes());
        buf
    }

    #[test]
    fn defaults_data_start_to_0x40_when_field_is_zero() {
        let buf = minimal_header();
        let header = parse_header(&buf).unwrap();
        assert_eq!(header.data_start, 0x40);
        assert_eq!(header.loop_abs, None);
    }

    #[test]
    fn computes_data_start_relative_to_its_own_field() {
        let mut buf = minimal_header();
        buf[0x34..0x38].copy_from_slice(&0x0cu32.to_le_bytes());
        let header = parse_header(&buf).unwrap();
        assert_eq!(header.data_start, 0x40);
    }

    #[test]
    fn computes_loop_abs_relative_to_its_own_field() {
        let mut buf = minimal_header();
        buf[0x1c..0x20].copy_from_slice(&0x20u32.to_le_bytes());
        let header = parse_header(&buf).unwrap();
        assert_eq!(header.loop_abs, Some(0x3c));
    }

    #[test]
    fn rejects_bad_ident() {
        let mut buf = minimal_header();
        buf[0..4].copy_from_slice(b"Nope");
        assert!(matches!(
            parse_header(&buf),
            Err(ParseError::InvalidIdent(_))
        ));
    }
}
