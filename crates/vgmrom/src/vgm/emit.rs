//! Writes a `ConvertOutput` out as a C header-style text artifact: the
//! three data arrays plus the loop constants the target firmware reads
//! at startup.

use std::io::{self, Write};

use crate::vgm::convert::ConvertOutput;

/// Write `output` to `w` as a sequence of `#define` constants and byte/
/// word array literals.
///
/// Loop fields that were never set (the file has no loop point) are
/// emitted as `0`, matching a player that treats a zero-length loop
/// region as "do not loop".
pub fn emit<W: Write>(output: &ConvertOutput, mut w: W) -> io::Result<()> {
    writeln!(w, "#define FRAME_DATA_SIZE {}", output.frame_data.len())?;
    writeln!(w, "#define INDEX_DATA_SIZE {}", output.index_data.len())?;
    writeln!(w, "#define FM_DATA_SIZE {}", output.fm_data.len())?;
    writeln!(w, "#define TOTAL_SIZE {}", output.total_size())?;
    writeln!(w)?;

    writeln!(
        w,
        "#define LOOP_FRAME_INDEX_INNER {}",
        output.anchors.inner.unwrap_or(0)
    )?;
    writeln!(
        w,
        "#define LOOP_FRAME_INDEX_OUTER {}",
        output.anchors.outer.unwrap_or(0)
    )?;
    writeln!(
        w,
        "#define LOOP_FRAME_SEGMENT_END {}",
        output.anchors.segment_end.unwrap_or(0)
    )?;
    writeln!(w, "#define END_FRAME_INDEX {}", output.index_data.len())?;
    writeln!(
        w,
        "#define FM_LOOP_FRAME_INDEX {}",
        output.anchors.fm_index.unwrap_or(0)
    )?;
    writeln!(w, "#define FM_LOOP_END {}", output.fm_data.len())?;
    writeln!(w)?;

    write_byte_array(&mut w, "frame_data", &output.frame_data)?;
    writeln!(w)?;
    write_word_array(
        &mut w,
        "index_data",
        output.index_data.iter().map(|word| word.to_raw()),
        output.index_data.len(),
    )?;
    writeln!(w)?;
    write_word_array(
        &mut w,
        "fm_data",
        output.fm_data.iter().map(|word| word.to_raw()),
        output.fm_data.len(),
    )?;

    Ok(())
}

fn write_byte_array<W: Write>(w: &mut W, name: &str, bytes: &[u8]) -> io::Result<()> {
    writeln!(w, "const unsigned char {name}[] = {{")?;
    for row in bytes.chunks(16) {
        let line: Vec<String> = row.iter().map(|b| format!("0x{b:02x}")).collect();
        writeln!(w, "    {},", line.join(", "))?;
    }
    writeln!(w, "}};")
}

fn write_word_array<W: Write>(
    w: &mut W,
    name: &str,
    words: impl Iterator<Item = u16>,
    len: usize,
) -> io::Result<()> {
    writeln!(w, "const unsigned short {name}[] = {{")?;
    let words: Vec<u16> = words.collect();
    debug_assert_eq!(words.len(), len);
    for row in words.chunks(8) {
        let line: Vec<String> = row.iter().map(|w| format!("0x{w:04x}")).collect();
        writeln!(w, "    {},", line.join(", "))?;
    }
    writeln!(w, "}};")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vgm::compress::CompressedIndexWord;
    use crate::vgm::convert::LoopAnchors;
    use crate::vgm::fm::FmWord;

    #[test]
    fn emits_array_bodies_and_size_defines() {
        let output = ConvertOutput {
            frame_data: vec![0x00, 0x01, 0x55, 0x01],
            index_data: vec![CompressedIndexWord::from_raw(0x0001)],
            fm_data: vec![FmWord::from_raw(0x106d)],
            anchors: LoopAnchors::default(),
        };

        let mut buf = Vec::new();
        emit(&output, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("#define FRAME_DATA_SIZE 4"));
        assert!(text.contains("#define INDEX_DATA_SIZE 1"));
        assert!(text.contains("#define LOOP_FRAME_INDEX_OUTER 0"));
        assert!(text.contains("#define END_FRAME_INDEX 1"));
        assert!(text.contains("#define FM_LOOP_END 1"));
        assert!(text.contains("const unsigned char frame_data[] = {"));
        assert!(text.contains("0x00, 0x01, 0x55, 0x01,"));
        assert!(text.contains("const unsigned short index_data[] = {"));
        assert!(text.contains("0x0001,"));
    }

    #[test]
    fn loop_anchors_pass_through_when_present() {
        let output = ConvertOutput {
            frame_data: vec![],
            index_data: vec![],
            fm_data: vec![],
            anchors: LoopAnchors {
                vgm_offset: Some(0x40),
                index_position: Some(2),
                outer: Some(4),
                inner: Some(1),
                segment_end: Some(3),
                fm_index: Some(0),
            },
        };

        let mut buf = Vec::new();
        emit(&output, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("#define LOOP_FRAME_INDEX_OUTER 4"));
        assert!(text.contains("#define LOOP_FRAME_INDEX_INNER 1"));
        assert!(text.contains("#define LOOP_FRAME_SEGMENT_END 3"));
        assert!(text.contains("#define FM_LOOP_FRAME_INDEX 0"));
    }

    #[test]
    fn empty_arrays_still_produce_valid_braces() {
        let output = ConvertOutput {
            frame_data: vec![],
            index_data: vec![],
            fm_data: vec![],
            anchors: LoopAnchors::default(),
        };
        let mut buf = Vec::new();
        emit(&output, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("const unsigned char frame_data[] = {\n}"));
    }
}
