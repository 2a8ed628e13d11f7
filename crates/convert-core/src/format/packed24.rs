//! Packed 24-bit sample expansion
//!
//! Packed 24-bit samples occupy three little-endian bytes each. The engine
//! works on 32-bit containers, so input is widened before resampling: the
//! top byte of each output sample replicates the sign bit of the packed
//! most-significant byte, shifted by one, matching the 24-to-32 bit-depth
//! widening convention of the destination container.

use crate::error::{ConvertError, Result};

/// Expand packed 24-bit little-endian samples into 32-bit containers.
///
/// The input length must be a multiple of 3; the output is a newly owned
/// buffer of exactly `4/3` the input length.
pub fn expand(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() % 3 != 0 {
        return Err(ConvertError::invalid_input_size(format!(
            "packed 24-bit input length {} is not divisible by 3",
            input.len()
        )));
    }

    let mut output = Vec::with_capacity(input.len() / 3 * 4);
    for group in input.chunks_exact(3) {
        let (b0, b1, b2) = (group[0], group[1], group[2]);
        output.push((b2 << 1) | (b1 >> 7));
        output.push(b0);
        output.push(b1);
        output.push(b2);
    }

    Ok(output)
}
