//! # Streaming PCM conversion sessions
//!
//! `pcmstream-convert-core` converts interleaved raw audio between sample
//! formats, sample rates and channel counts, preserving sample ordering and
//! draining internally buffered samples at end-of-stream.
//!
//! This crate provides:
//!
//! - Format negotiation for unsigned/signed/float PCM at 8 to 64 bits
//! - Packed 24-bit input expansion into 32-bit containers
//! - A streaming [`ConversionSession`] with explicit flush-to-drain
//! - A pluggable [`engine::ResamplingEngine`] seam with a shipped
//!   linear-interpolation implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use pcmstream_convert_core::{ConversionSession, FormatCode, FormatRequest};
//!
//! // 16 kHz mono s16 down to 8 kHz mono s16
//! let mut session = ConversionSession::new(
//!     FormatRequest::new(FormatCode::S16, 16000, 1),
//!     FormatRequest::new(FormatCode::S16, 8000, 1),
//! )?;
//!
//! let input: Vec<u8> = (0i16..8).flat_map(|v| v.to_le_bytes()).collect();
//! let converted = session.convert(&input)?;
//! let drained = session.flush()?;
//! assert_eq!(converted.len() + drained.len(), input.len() / 2);
//! # Ok::<(), pcmstream_convert_core::ConvertError>(())
//! ```

// Error handling
pub mod error;

// Core types
pub mod types;

// Working modules
pub mod engine;
pub mod format;
pub mod session;

// Re-export common types
pub use error::{ConvertError, ErrorCategory, Result};
pub use format::{resolve, ResolvedFormat};
pub use session::ConversionSession;
pub use types::{
    Direction, FormatCode, FormatRequest, SampleBuffer, SampleDescriptor, SampleEncoding,
};
