//! Resampling engine interface
//!
//! The conversion session delegates the actual rate/format conversion to a
//! resampling engine behind this trait. The engine keeps an internal delay
//! buffer between calls: input pushed during one convert call may only become
//! emittable during a later call, and a final drain step releases whatever is
//! still held at end-of-stream.

pub mod linear;
mod pcm;

use crate::error::Result;
use crate::types::SampleDescriptor;

/// Streaming engine converting interleaved samples between two descriptors.
///
/// One engine instance belongs to exactly one session and is mutated by every
/// convert call in strict call order. Dropping the engine releases all
/// internal buffers.
pub trait ResamplingEngine: Send + std::fmt::Debug {
    /// Maximum number of output frames obtainable from the internal delay
    /// buffer plus `incoming_frames` new input frames, at the configured rate
    /// ratio, rounding up.
    fn max_output_frames(&self, incoming_frames: usize) -> usize;

    /// Push input and convert into `output`, returning the number of frames
    /// written. `None` input performs a flush step draining the delay buffer.
    ///
    /// A return of zero frames is valid: down-sampling may buffer input
    /// without yet having a complete output sample.
    fn convert(&mut self, input: Option<&[u8]>, output: &mut [u8]) -> Result<usize>;
}

/// Create an engine for the given pair of resolved descriptors.
pub fn create(
    src: &SampleDescriptor,
    dst: &SampleDescriptor,
) -> Result<Box<dyn ResamplingEngine>> {
    let engine = linear::LinearEngine::new(src, dst)?;
    Ok(Box::new(engine))
}
