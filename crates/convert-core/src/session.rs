//! Conversion session
//!
//! A [`ConversionSession`] owns one resampling engine and drives it call by
//! call: raw input bytes go in, a caller-owned [`SampleBuffer`] comes out.
//! The session computes frame counts from byte sizes, sizes the output buffer
//! from the engine's capacity query, and exposes flushing as a distinct
//! operation — a zero-length convert call is never treated as a flush
//! request.

use bytes::Bytes;
use tracing::{debug, info};

use crate::engine::{self, ResamplingEngine};
use crate::error::{ConvertError, Result};
use crate::format::{self, packed24};
use crate::types::{Direction, FormatRequest, SampleBuffer, SampleDescriptor};

/// A streaming PCM format and rate conversion session.
///
/// Created once for a pair of stream formats; descriptors are immutable for
/// the session's lifetime. Dropping the session releases the engine.
#[derive(Debug)]
pub struct ConversionSession {
    input: SampleDescriptor,
    output: SampleDescriptor,
    from_packed_24: bool,
    engine: Box<dyn ResamplingEngine>,
}

impl ConversionSession {
    /// Create a session converting from `src` to `dst`.
    ///
    /// Both formats are validated first; packed 24-bit input is accepted and
    /// handled by widening each sample before it reaches the engine. Engine
    /// initialization failure yields [`ConvertError::EngineInitFailed`] and
    /// no session.
    pub fn new(src: FormatRequest, dst: FormatRequest) -> Result<Self> {
        let resolved_src = format::resolve(src.format, src.sample_rate, src.channels, Direction::Input)?;
        let resolved_dst = format::resolve(dst.format, dst.sample_rate, dst.channels, Direction::Output)?;

        let engine = engine::create(&resolved_src.descriptor, &resolved_dst.descriptor)?;

        info!(
            input = %resolved_src.descriptor.description(),
            output = %resolved_dst.descriptor.description(),
            from_packed_24 = resolved_src.from_packed_24,
            "conversion session created"
        );

        Ok(Self {
            input: resolved_src.descriptor,
            output: resolved_dst.descriptor,
            from_packed_24: resolved_src.from_packed_24,
            engine,
        })
    }

    /// The engine-facing input descriptor (packed 24-bit input appears here
    /// as its 32-bit container).
    pub fn input_descriptor(&self) -> &SampleDescriptor {
        &self.input
    }

    /// The output descriptor.
    pub fn output_descriptor(&self) -> &SampleDescriptor {
        &self.output
    }

    /// Whether this session expands packed 24-bit input.
    pub fn from_packed_24(&self) -> bool {
        self.from_packed_24
    }

    /// Convert one chunk of interleaved input bytes.
    ///
    /// Returns a caller-owned buffer that may be empty: down-sampling can
    /// buffer input without emitting a complete output sample yet. An empty
    /// `input` is a valid zero-frame conversion, not a flush.
    pub fn convert(&mut self, input: &[u8]) -> Result<SampleBuffer> {
        let expanded;
        let input: &[u8] = if self.from_packed_24 {
            expanded = packed24::expand(input)?;
            &expanded
        } else {
            input
        };

        let frame_bytes = self.input.frame_bytes();
        if input.len() % frame_bytes != 0 {
            // A partial trailing frame is rejected, not silently dropped
            return Err(ConvertError::invalid_input_size(format!(
                "{} trailing bytes do not form a whole {}-byte frame",
                input.len() % frame_bytes,
                frame_bytes
            )));
        }
        let input_frames = input.len() / frame_bytes;

        let max_frames = self.engine.max_output_frames(input_frames);
        let mut output = self.allocate_output(max_frames)?;

        let frames = self.engine.convert(Some(input), &mut output)?;

        self.finish_buffer(output, frames)
    }

    /// Drain samples still held in the engine's delay buffer.
    ///
    /// Safe to call repeatedly: once drained (or if draining was never
    /// needed), further calls return an empty buffer.
    pub fn flush(&mut self) -> Result<SampleBuffer> {
        let max_frames = self.engine.max_output_frames(0);
        if max_frames == 0 {
            return Ok(SampleBuffer::empty());
        }

        let mut output = self.allocate_output(max_frames)?;
        let frames = self.engine.convert(None, &mut output)?;
        debug!(frames, "session flushed");

        self.finish_buffer(output, frames)
    }

    /// Allocate a zeroed output buffer for `frames` output frames.
    fn allocate_output(&self, frames: usize) -> Result<Vec<u8>> {
        let bytes = self.output_size(frames)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(bytes)
            .map_err(|_| ConvertError::AllocationFailed { bytes })?;
        buffer.resize(bytes, 0);
        Ok(buffer)
    }

    /// Byte size of `frames` output frames, checked against overflow.
    fn output_size(&self, frames: usize) -> Result<usize> {
        frames
            .checked_mul(self.output.frame_bytes())
            .ok_or_else(|| ConvertError::OutputSizeComputationFailed {
                details: format!(
                    "{} frames of {} overflow the byte size",
                    frames,
                    self.output.description()
                ),
            })
    }

    /// Truncate the output buffer to the frames actually produced and
    /// transfer ownership to the caller.
    fn finish_buffer(&self, mut output: Vec<u8>, frames: usize) -> Result<SampleBuffer> {
        let bytes = self.output_size(frames)?;
        output.truncate(bytes);
        Ok(SampleBuffer::new(Bytes::from(output), frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormatCode;

    fn request(format: FormatCode, sample_rate: u32, channels: u8) -> FormatRequest {
        FormatRequest::new(format, sample_rate, channels)
    }

    #[test]
    fn test_create_rejects_bad_output_format() {
        let err = ConversionSession::new(
            request(FormatCode::S16, 48000, 2),
            request(FormatCode::S24, 48000, 2),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_convert_rejects_partial_frame() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 2),
            request(FormatCode::S16, 8000, 2),
        )
        .unwrap();
        // 5 bytes: not a whole 4-byte stereo s16 frame
        let err = session.convert(&[0, 1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInputSize { .. }));
    }

    #[test]
    fn test_packed_24_session_reports_container_descriptor() {
        let session = ConversionSession::new(
            request(FormatCode::S24, 44100, 1),
            request(FormatCode::S32, 44100, 1),
        )
        .unwrap();
        assert!(session.from_packed_24());
        assert_eq!(session.input_descriptor().bit_depth, 32);
    }
}
