#![doc = include_str!("../README.md")]
//! vgmrom — compiles VGM sound logs for the SN76489 PSG and YM2413 FM
//! chip into a compact, reference-compressed bytestream sized for an
//! 8-bit microcontroller's program ROM.
//!
//! Key pieces:
//! - [`chip`] — shadow register state for the two target chips, used to
//!   diff successive writes into per-tick deltas.
//! - [`vgm::header`] — fixed-offset VGM header field extraction.
//! - [`vgm::reader`] — transparent gzip (`.vgz`) detection and decompression.
//! - [`vgm::frame`] / [`vgm::pool`] — nibble-packed PSG delta frames and
//!   their content-addressed dedup pool.
//! - [`vgm::index`] / [`vgm::compress`] — the uncompressed per-tick index
//!   stream and its greedy back-reference compression pass.
//! - [`vgm::fm`] — the parallel YM2413 delta word stream.
//! - [`vgm::convert`] — the command dispatcher tying all of the above
//!   together into a single [`convert`] call.
//! - [`vgm::emit`] — writes the result out as the array literals the
//!   firmware's build embeds.
//!
//! Example: convert a buffer already known to hold raw VGM bytes.
//!
//! ```rust
//! use vgmrom::convert;
//!
//! let mut vgm = vec![0u8; 0x40];
//! vgm[0..4].copy_from_slice(b"Vgm ");
//! vgm.extend_from_slice(&[0x66]); // immediate end of stream
//!
//! let output = convert(&vgm).expect("valid VGM header");
//! assert_eq!(output.frame_data, vec![0x00]); // reserved zero frame only
//! ```
mod binutil;
pub mod chip;
pub mod vgm;

pub use binutil::ParseError;
pub use chip::{PsgState, YmState};
pub use vgm::{ConvertError, ConvertOutput, LoopAnchors, convert, convert_reader};
