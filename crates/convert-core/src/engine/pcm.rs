//! Raw PCM sample decoding and encoding
//!
//! Interleaved little-endian sample bytes are decoded into `f64` values in
//! [-1.0, 1.0) for processing and encoded back on the way out. Encoding into
//! an integer format with fewer effective bits than the source applies
//! rectangular dither before rounding.

use rand::Rng;

use crate::error::{ConvertError, Result};
use crate::types::{SampleDescriptor, SampleEncoding};

const SCALE_U8: f64 = 128.0;
const SCALE_S16: f64 = 32768.0;
const SCALE_S32: f64 = 2147483648.0;

/// Effective significant bits of a format, used to decide whether an
/// encode step narrows the signal.
pub fn effective_bits(desc: &SampleDescriptor) -> u8 {
    match (desc.encoding, desc.bit_depth) {
        (SampleEncoding::Float, 32) => 25,
        (SampleEncoding::Float, _) => 53,
        (_, bits) => bits,
    }
}

/// Decode interleaved sample bytes into normalized `f64` values.
pub fn decode(desc: &SampleDescriptor, bytes: &[u8]) -> Result<Vec<f64>> {
    let bps = desc.bytes_per_sample();
    if bytes.len() % bps != 0 {
        return Err(ConvertError::conversion_failed(format!(
            "input length {} is not a multiple of the {}-byte sample size",
            bytes.len(),
            bps
        )));
    }

    let mut samples = Vec::with_capacity(bytes.len() / bps);
    match (desc.encoding, desc.bit_depth) {
        (SampleEncoding::Unsigned, 8) => {
            for &b in bytes {
                samples.push((b as f64 - SCALE_U8) / SCALE_U8);
            }
        }
        (SampleEncoding::Signed, 16) => {
            for raw in bytes.chunks_exact(2) {
                let v = i16::from_le_bytes([raw[0], raw[1]]);
                samples.push(v as f64 / SCALE_S16);
            }
        }
        (SampleEncoding::Signed, 32) => {
            for raw in bytes.chunks_exact(4) {
                let v = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                samples.push(v as f64 / SCALE_S32);
            }
        }
        (SampleEncoding::Float, 32) => {
            for raw in bytes.chunks_exact(4) {
                samples.push(f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64);
            }
        }
        (SampleEncoding::Float, 64) => {
            for raw in bytes.chunks_exact(8) {
                let mut le = [0u8; 8];
                le.copy_from_slice(raw);
                samples.push(f64::from_le_bytes(le));
            }
        }
        (encoding, bits) => {
            return Err(ConvertError::conversion_failed(format!(
                "no decoder for {}{}",
                encoding.prefix(),
                bits
            )));
        }
    }

    Ok(samples)
}

/// Encode normalized `f64` samples into interleaved bytes, writing into the
/// front of `output`. With `dither` set, integer targets get rectangular
/// dither of one LSB peak-to-peak before rounding.
pub fn encode(
    desc: &SampleDescriptor,
    samples: &[f64],
    output: &mut [u8],
    dither: bool,
) -> Result<()> {
    let bps = desc.bytes_per_sample();
    let needed = samples.len() * bps;
    if output.len() < needed {
        return Err(ConvertError::conversion_failed(format!(
            "output capacity {} is below the {} bytes required",
            output.len(),
            needed
        )));
    }

    let mut rng = rand::thread_rng();
    let mut noise = |active: bool| -> f64 {
        if active {
            rng.gen_range(-0.5..0.5)
        } else {
            0.0
        }
    };

    match (desc.encoding, desc.bit_depth) {
        (SampleEncoding::Unsigned, 8) => {
            for (i, &v) in samples.iter().enumerate() {
                let scaled = (v * SCALE_U8 + SCALE_U8 + noise(dither)).round();
                output[i] = scaled.clamp(0.0, u8::MAX as f64) as u8;
            }
        }
        (SampleEncoding::Signed, 16) => {
            for (i, &v) in samples.iter().enumerate() {
                let scaled = (v * SCALE_S16 + noise(dither)).round();
                let sample = scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16;
                output[2 * i..2 * i + 2].copy_from_slice(&sample.to_le_bytes());
            }
        }
        (SampleEncoding::Signed, 32) => {
            for (i, &v) in samples.iter().enumerate() {
                let scaled = (v * SCALE_S32 + noise(dither)).round();
                let sample = scaled.clamp(i32::MIN as f64, i32::MAX as f64) as i32;
                output[4 * i..4 * i + 4].copy_from_slice(&sample.to_le_bytes());
            }
        }
        (SampleEncoding::Float, 32) => {
            for (i, &v) in samples.iter().enumerate() {
                output[4 * i..4 * i + 4].copy_from_slice(&(v as f32).to_le_bytes());
            }
        }
        (SampleEncoding::Float, 64) => {
            for (i, &v) in samples.iter().enumerate() {
                output[8 * i..8 * i + 8].copy_from_slice(&v.to_le_bytes());
            }
        }
        (encoding, bits) => {
            return Err(ConvertError::conversion_failed(format!(
                "no encoder for {}{}",
                encoding.prefix(),
                bits
            )));
        }
    }

    Ok(())
}
