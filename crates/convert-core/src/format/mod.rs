//! Format negotiation
//!
//! This module maps external format codes into internal sample descriptors
//! and rejects unsupported combinations. Packed 24-bit signed input is the
//! one special case: it is accepted on the input side only and substituted
//! by a 32-bit signed container, with the session expanding the raw bytes
//! before they reach the engine (see [`packed24`]).

pub mod packed24;

use crate::error::{ConvertError, Result};
use crate::types::{Direction, FormatCode, SampleDescriptor, SampleEncoding};

/// Outcome of resolving a requested format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFormat {
    /// Descriptor used to configure the resampling engine
    pub descriptor: SampleDescriptor,
    /// Whether raw input must be expanded from packed 24-bit first
    pub from_packed_24: bool,
}

/// Resolve an external format code, sample rate and channel count into the
/// descriptor used to initialize the resampling engine.
///
/// Accepted combinations are unsigned 8-bit, signed 16/24/32-bit and float
/// 32/64-bit, with 24-bit permitted only when `direction` is
/// [`Direction::Input`]. Channel counts other than 1 or 2 are rejected.
pub fn resolve(
    code: FormatCode,
    sample_rate: u32,
    channels: u8,
    direction: Direction,
) -> Result<ResolvedFormat> {
    if channels != 1 && channels != 2 {
        return Err(ConvertError::UnsupportedChannelCount { channels });
    }

    if sample_rate == 0 {
        return Err(ConvertError::unsupported_format(
            "sample rate must be positive",
        ));
    }

    let encoding = code.encoding().ok_or_else(|| {
        ConvertError::unsupported_format(format!("unknown format class in code {:#06x}", code.0))
    })?;

    let accepted = matches!(
        (encoding, code.bit_depth()),
        (SampleEncoding::Unsigned, 8)
            | (SampleEncoding::Signed, 16)
            | (SampleEncoding::Signed, 24)
            | (SampleEncoding::Signed, 32)
            | (SampleEncoding::Float, 32)
            | (SampleEncoding::Float, 64)
    );
    if !accepted {
        return Err(ConvertError::unsupported_format(format!(
            "{}{} is not a supported sample format",
            encoding.prefix(),
            code.bit_depth()
        )));
    }

    // The engine has no native 24-bit container. On the input side the
    // session repacks 3-byte samples into 4-byte signed ones; as an output
    // format 24-bit is rejected outright.
    if code.bit_depth() == 24 {
        if direction == Direction::Output {
            return Err(ConvertError::unsupported_format(
                "s24 is supported as an input format only",
            ));
        }
        return Ok(ResolvedFormat {
            descriptor: SampleDescriptor {
                encoding: SampleEncoding::Signed,
                bit_depth: 32,
                sample_rate,
                channels,
            },
            from_packed_24: true,
        });
    }

    Ok(ResolvedFormat {
        descriptor: SampleDescriptor {
            encoding,
            bit_depth: code.bit_depth(),
            sample_rate,
            channels,
        },
        from_packed_24: false,
    })
}
