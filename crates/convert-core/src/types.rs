//! Core data types for conversion sessions
//!
//! Sample descriptors describe one side of a conversion (encoding class, bit
//! depth, sample rate, channel count). Sample buffers carry converted bytes
//! out of a session; ownership transfers to the caller.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Sample encoding class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleEncoding {
    /// Unsigned integer samples
    Unsigned,
    /// Signed integer samples
    Signed,
    /// IEEE floating point samples
    Float,
}

impl SampleEncoding {
    /// Short name used in format descriptions ("u", "s", "f")
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Unsigned => "u",
            Self::Signed => "s",
            Self::Float => "f",
        }
    }
}

/// Conversion direction a format is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Format of samples fed into the session
    Input,
    /// Format of samples produced by the session
    Output,
}

/// Tagged numeric format code: encoding class in the high byte, bit width in
/// the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatCode(pub u32);

impl FormatCode {
    /// Class tag for unsigned integer formats
    pub const CLASS_UNSIGNED: u32 = 0x0100;
    /// Class tag for signed integer formats
    pub const CLASS_SIGNED: u32 = 0x0200;
    /// Class tag for floating point formats
    pub const CLASS_FLOAT: u32 = 0x0300;

    /// Unsigned 8-bit
    pub const U8: FormatCode = FormatCode(Self::CLASS_UNSIGNED | 8);
    /// Signed 16-bit little-endian
    pub const S16: FormatCode = FormatCode(Self::CLASS_SIGNED | 16);
    /// Signed packed 24-bit little-endian (input only)
    pub const S24: FormatCode = FormatCode(Self::CLASS_SIGNED | 24);
    /// Signed 32-bit little-endian
    pub const S32: FormatCode = FormatCode(Self::CLASS_SIGNED | 32);
    /// 32-bit float little-endian
    pub const F32: FormatCode = FormatCode(Self::CLASS_FLOAT | 32);
    /// 64-bit float little-endian
    pub const F64: FormatCode = FormatCode(Self::CLASS_FLOAT | 64);

    /// Encoding class bits of this code
    pub fn class(&self) -> u32 {
        self.0 & 0xFF00
    }

    /// Bit width encoded in this code
    pub fn bit_depth(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Encoding class of this code, if the tag is known
    pub fn encoding(&self) -> Option<SampleEncoding> {
        match self.class() {
            Self::CLASS_UNSIGNED => Some(SampleEncoding::Unsigned),
            Self::CLASS_SIGNED => Some(SampleEncoding::Signed),
            Self::CLASS_FLOAT => Some(SampleEncoding::Float),
            _ => None,
        }
    }
}

/// One side of the creation input: a format code plus stream parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    /// Requested sample format
    pub format: FormatCode,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 for mono, 2 for stereo)
    pub channels: u8,
}

impl FormatRequest {
    /// Create a new format request
    pub fn new(format: FormatCode, sample_rate: u32, channels: u8) -> Self {
        Self {
            format,
            sample_rate,
            channels,
        }
    }
}

/// Resolved sample descriptor for one side of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDescriptor {
    /// Sample encoding class
    pub encoding: SampleEncoding,
    /// Bits per sample (8, 16, 32 or 64; never 24 — packed 24-bit input is
    /// widened to a 32-bit signed container before it reaches the engine)
    pub bit_depth: u8,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 for mono, 2 for stereo)
    pub channels: u8,
}

impl SampleDescriptor {
    /// Bytes occupied by a single sample of one channel
    pub fn bytes_per_sample(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Bytes occupied by one frame (one sample per channel)
    pub fn frame_bytes(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Human-readable description, e.g. "s16 @ 48000Hz, 2ch"
    pub fn description(&self) -> String {
        format!(
            "{}{} @ {}Hz, {}ch",
            self.encoding.prefix(),
            self.bit_depth,
            self.sample_rate,
            self.channels
        )
    }
}

/// A buffer of converted samples transferred to the caller
///
/// The byte region is owned by the caller once returned. A zero-length buffer
/// is a valid result and means "buffered, nothing emitted yet" for convert,
/// or "fully drained" for flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    /// Raw interleaved sample bytes
    pub data: Bytes,
    /// Number of frames (samples per channel) in the buffer
    pub frames: usize,
}

impl SampleBuffer {
    /// Create a buffer from raw bytes and the frame count they contain
    pub fn new(data: Bytes, frames: usize) -> Self {
        Self { data, frames }
    }

    /// An empty buffer (no frames emitted)
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            frames: 0,
        }
    }

    /// Length of the buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer contains no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
