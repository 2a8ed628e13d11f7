//! Linear-interpolation resampling engine
//!
//! Streaming implementation of [`ResamplingEngine`](super::ResamplingEngine):
//! samples are decoded to `f64`, channel-converted, then rate-converted by
//! linear interpolation over the rational rate ratio. Input frames that a
//! future output sample still needs stay in the delay buffer; a flush step
//! drains them by holding the final frame.

use tracing::{debug, trace};

use super::{pcm, ResamplingEngine};
use crate::error::{ConvertError, Result};
use crate::types::{SampleDescriptor, SampleEncoding};

/// Streaming linear resampler with an explicit delay buffer.
#[derive(Debug)]
pub struct LinearEngine {
    src: SampleDescriptor,
    dst: SampleDescriptor,
    /// Reduced source rate (rate ratio denominator)
    ratio_src: u64,
    /// Reduced destination rate (rate ratio numerator)
    ratio_dst: u64,
    /// Whether encoding applies rectangular dither
    dither: bool,
    /// Interleaved frames (destination channel count) not yet fully consumed
    pending: Vec<f64>,
    /// Input-timeline index of the first pending frame
    base: u64,
    /// Total input frames received
    in_total: u64,
    /// Total output frames emitted
    out_total: u64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl LinearEngine {
    /// Create an engine for a pair of resolved descriptors.
    pub fn new(src: &SampleDescriptor, dst: &SampleDescriptor) -> Result<Self> {
        for desc in [src, dst] {
            let supported = matches!(
                (desc.encoding, desc.bit_depth),
                (SampleEncoding::Unsigned, 8)
                    | (SampleEncoding::Signed, 16)
                    | (SampleEncoding::Signed, 32)
                    | (SampleEncoding::Float, 32)
                    | (SampleEncoding::Float, 64)
            );
            if !supported {
                return Err(ConvertError::engine_init_failed(format!(
                    "no sample container for {}",
                    desc.description()
                )));
            }
            if desc.sample_rate == 0 || !(1..=2).contains(&desc.channels) {
                return Err(ConvertError::engine_init_failed(format!(
                    "invalid stream parameters in {}",
                    desc.description()
                )));
            }
        }

        let divisor = gcd(src.sample_rate as u64, dst.sample_rate as u64);
        let dither = pcm::effective_bits(src) > pcm::effective_bits(dst)
            && dst.encoding != SampleEncoding::Float;

        debug!(
            src = %src.description(),
            dst = %dst.description(),
            dither,
            "resampling engine initialized"
        );

        Ok(Self {
            src: *src,
            dst: *dst,
            ratio_src: src.sample_rate as u64 / divisor,
            ratio_dst: dst.sample_rate as u64 / divisor,
            dither,
            pending: Vec::new(),
            base: 0,
            in_total: 0,
            out_total: 0,
        })
    }

    /// Input frames currently held that no output frame has consumed yet.
    fn delay_frames(&self) -> u64 {
        let consumed = (self.out_total * self.ratio_src / self.ratio_dst).min(self.in_total);
        self.in_total - consumed
    }

    /// Decode raw input, convert channels, and append to the delay buffer.
    fn push_input(&mut self, bytes: &[u8]) -> Result<()> {
        let samples = pcm::decode(&self.src, bytes)?;
        let src_ch = self.src.channels as usize;
        if samples.len() % src_ch != 0 {
            return Err(ConvertError::conversion_failed(format!(
                "{} samples do not form whole {}-channel frames",
                samples.len(),
                src_ch
            )));
        }

        let frames = samples.len() / src_ch;
        match (self.src.channels, self.dst.channels) {
            (1, 2) => {
                // Mono to stereo: duplicate each sample
                self.pending.reserve(frames * 2);
                for &sample in &samples {
                    self.pending.push(sample);
                    self.pending.push(sample);
                }
            }
            (2, 1) => {
                // Stereo to mono: average left and right
                self.pending.reserve(frames);
                for pair in samples.chunks_exact(2) {
                    self.pending.push((pair[0] + pair[1]) * 0.5);
                }
            }
            _ => self.pending.extend_from_slice(&samples),
        }

        self.in_total += frames as u64;
        Ok(())
    }

    /// Emit every output frame currently computable. With `drain` set, frames
    /// whose interpolation partner has not arrived use the last held frame.
    fn emit(&mut self, output: &mut [u8], drain: bool) -> Result<usize> {
        let ch = self.dst.channels as usize;
        let mut emitted: Vec<f64> = Vec::new();
        let mut frames = 0u64;

        loop {
            let k = self.out_total + frames;
            let pos = k * self.ratio_src;
            let i = pos / self.ratio_dst;
            let frac_num = pos % self.ratio_dst;

            let last_needed = if frac_num == 0 { i } else { i + 1 };
            if drain {
                if i >= self.in_total {
                    break;
                }
            } else if last_needed >= self.in_total {
                break;
            }

            let idx = (i - self.base) as usize * ch;
            let frac = frac_num as f64 / self.ratio_dst as f64;
            for c in 0..ch {
                let s0 = self.pending[idx + c];
                let s1 = if frac_num == 0 || i + 1 >= self.in_total {
                    s0
                } else {
                    self.pending[idx + ch + c]
                };
                emitted.push(s0 + (s1 - s0) * frac);
            }
            frames += 1;
        }

        self.out_total += frames;

        // Frames before the next output position are never read again
        let new_base = (self.out_total * self.ratio_src / self.ratio_dst).min(self.in_total);
        self.pending.drain(..(new_base - self.base) as usize * ch);
        self.base = new_base;

        pcm::encode(&self.dst, &emitted, output, self.dither)?;
        trace!(frames, drain, delay = self.delay_frames(), "frames emitted");
        Ok(frames as usize)
    }
}

impl ResamplingEngine for LinearEngine {
    fn max_output_frames(&self, incoming_frames: usize) -> usize {
        let available = self.delay_frames() + incoming_frames as u64;
        (available * self.ratio_dst).div_ceil(self.ratio_src) as usize
    }

    fn convert(&mut self, input: Option<&[u8]>, output: &mut [u8]) -> Result<usize> {
        match input {
            Some(bytes) => {
                self.push_input(bytes)?;
                self.emit(output, false)
            }
            None => self.emit(output, true),
        }
    }
}
