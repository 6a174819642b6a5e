//! The command dispatcher and top-level `convert` entry point: walks
//! the VGM command stream, drives the PSG/FM tracks, and assembles the
//! final compressed artifact.

use std::fmt;
use std::io::Read;

use crate::binutil::{ParseError, read_u16_le_at};
use crate::vgm::compress::{self, CompressedIndexWord};
use crate::vgm::fm::{FmTrack, FmWord};
use crate::vgm::header::{VgmHeader, parse_header};
use crate::vgm::psg::PsgTrack;
use crate::vgm::reader::read_vgm_bytes;

/// One NTSC tick, in 44.1 kHz sample units.
const SAMPLES_PER_FRAME: u32 = 735;

/// Projected output above this size may not fit the target firmware's
/// program memory; see [`ConvertOutput::total_size`].
const FIRMWARE_BUDGET: usize = 8192 - 724;

/// Fatal conversion failures: the batch tool aborts with one of these
/// reported to stderr and a non-zero exit.
#[derive(Debug)]
pub enum ConvertError {
    Io(std::io::Error),
    BadMagic,
    Oversize { size: usize, limit: usize },
    Header(ParseError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io(err) => write!(f, "I/O error: {err}"),
            ConvertError::BadMagic => write!(f, "not a VGM file"),
            ConvertError::Oversize { size, limit } => {
                write!(f, "input too large: {size} bytes (limit {limit})")
            }
            ConvertError::Header(err) => write!(f, "invalid VGM header: {err}"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// The loop point carried through every pipeline stage: the raw VGM
/// byte offset, its position in the uncompressed index stream, the
/// compressed-stream resume triple, and its position in the FM stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopAnchors {
    pub vgm_offset: Option<usize>,
    pub index_position: Option<usize>,
    pub outer: Option<usize>,
    pub inner: Option<usize>,
    pub segment_end: Option<usize>,
    pub fm_index: Option<usize>,
}

/// The four arrays and loop constants the output emitter writes out.
pub struct ConvertOutput {
    pub frame_data: Vec<u8>,
    pub index_data: Vec<CompressedIndexWord>,
    pub fm_data: Vec<FmWord>,
    pub anchors: LoopAnchors,
}

impl ConvertOutput {
    /// Total projected output size in bytes: frame pool plus both
    /// 16-bit-word streams.
    pub fn total_size(&self) -> usize {
        self.frame_data.len() + self.index_data.len() * 2 + self.fm_data.len() * 2
    }
}

struct Converter {
    psg: PsgTrack,
    fm: FmTrack,
    samples_delay: u32,
    anchors: LoopAnchors,
}

impl Converter {
    fn new() -> Self {
        Self {
            psg: PsgTrack::new(),
            fm: FmTrack::new(),
            samples_delay: 0,
            anchors: LoopAnchors::default(),
        }
    }

    fn maybe_flush_psg(&mut self) {
        if self.samples_delay >= SAMPLES_PER_FRAME {
            let frame_delay = self.samples_delay / SAMPLES_PER_FRAME;
            self.samples_delay -= frame_delay * SAMPLES_PER_FRAME;
            self.psg.flush(frame_delay);
        }
    }

    fn maybe_flush_fm(&mut self) {
        if self.samples_delay >= SAMPLES_PER_FRAME {
            let frame_delay = self.samples_delay / SAMPLES_PER_FRAME;
            self.samples_delay -= frame_delay * SAMPLES_PER_FRAME;
            self.fm.flush(frame_delay);
        }
    }

    fn run(&mut self, bytes: &[u8], header: &VgmHeader) {
        let mut i = header.data_start;

        while i < bytes.len() {
            if Some(i) == header.loop_abs {
                self.anchors.index_position = Some(self.psg.index_len());
                self.anchors.fm_index = Some(self.fm.len());
            }

            let command = bytes[i];
            i += 1;

            match command {
                0x4f => {
                    i += 1; // Game Gear stereo byte, ignored
                }
                0x50 => {
                    self.maybe_flush_psg();
                    let Some(&data) = bytes.get(i) else { break };
                    i += 1;
                    self.psg.apply_write(data);
                }
                0x51 => {
                    self.maybe_flush_fm();
                    let (Some(&addr), Some(&data)) = (bytes.get(i), bytes.get(i + 1)) else {
                        break;
                    };
                    i += 2;
                    self.fm.apply_write(addr, data);
                }
                0x61 => {
                    let Ok(n) = read_u16_le_at(bytes, i) else {
                        break;
                    };
                    i += 2;
                    self.samples_delay += n as u32;
                }
                0x62 => self.samples_delay += 735,
                0x63 => self.samples_delay += 882,
                0x66 => break,
                0x70..=0x7f => self.samples_delay += 1 + (command & 0x0f) as u32,
                other => {
                    eprintln!("warning: unknown VGM command 0x{other:02x} at offset 0x{:x}", i - 1);
                }
            }
        }

        // Final flush: whatever delay remains is attributed to one last tick.
        let trailing = self.samples_delay / SAMPLES_PER_FRAME;
        self.psg.flush(trailing);
        self.fm.flush(trailing);
    }
}

/// Run the full conversion pipeline over an already-validated VGM
/// buffer (magic checked, gzip already stripped).
pub fn convert(bytes: &[u8]) -> Result<ConvertOutput, ConvertError> {
    let header = parse_header(bytes).map_err(ConvertError::Header)?;

    let mut converter = Converter::new();
    converter.anchors.vgm_offset = header.loop_abs;
    converter.run(bytes, &header);

    let compressed = compress::compress(converter.psg.index_words(), converter.anchors.index_position);
    converter.anchors.outer = compressed.anchors.outer;
    converter.anchors.inner = compressed.anchors.inner;
    converter.anchors.segment_end = compressed.anchors.segment_end;

    let output = ConvertOutput {
        frame_data: converter.psg.pool().bytes().to_vec(),
        index_data: compressed.words,
        fm_data: converter.fm.words().to_vec(),
        anchors: converter.anchors,
    };

    if output.total_size() >= FIRMWARE_BUDGET {
        eprintln!(
            "warning: projected output {} bytes may not fit the target firmware's program memory budget ({} bytes)",
            output.total_size(),
            FIRMWARE_BUDGET
        );
    }

    Ok(output)
}

/// Read a VGM/VGZ byte stream from `reader` and run the full conversion
/// pipeline over it.
pub fn convert_reader<R: Read>(reader: R) -> Result<ConvertOutput, ConvertError> {
    let bytes = read_vgm_bytes(reader)?;
    convert(&bytes)
}
