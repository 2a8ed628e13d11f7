//! Conversion session integration tests
//!
//! End-to-end coverage of session creation, streaming conversion with
//! flush-to-drain, packed 24-bit input handling, and error reporting.

use pcmstream_convert_core::{
    ConversionSession, ConvertError, ErrorCategory, FormatCode, FormatRequest, SampleBuffer,
};

fn request(format: FormatCode, sample_rate: u32, channels: u8) -> FormatRequest {
    FormatRequest::new(format, sample_rate, channels)
}

fn s16_frames(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn s16_values(buffer: &SampleBuffer) -> Vec<i16> {
    buffer
        .data
        .chunks_exact(2)
        .map(|raw| i16::from_le_bytes([raw[0], raw[1]]))
        .collect()
}

mod creation_tests {
    use super::*;

    #[test]
    fn test_session_for_all_supported_pairs() {
        let formats = [
            FormatCode::U8,
            FormatCode::S16,
            FormatCode::S32,
            FormatCode::F32,
            FormatCode::F64,
        ];
        for src in formats {
            for dst in formats {
                let session =
                    ConversionSession::new(request(src, 48000, 1), request(dst, 44100, 1));
                assert!(session.is_ok(), "{:?} -> {:?} should create", src, dst);
            }
        }
    }

    #[test]
    fn test_packed_24_accepted_as_input_only() {
        assert!(ConversionSession::new(
            request(FormatCode::S24, 48000, 2),
            request(FormatCode::S32, 48000, 2),
        )
        .is_ok());

        let err = ConversionSession::new(
            request(FormatCode::S16, 48000, 2),
            request(FormatCode::S24, 48000, 2),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
        assert_eq!(err.category(), ErrorCategory::Negotiation);
    }

    #[test]
    fn test_unsupported_channel_count_rejected() {
        let err = ConversionSession::new(
            request(FormatCode::S16, 48000, 6),
            request(FormatCode::S16, 48000, 2),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedChannelCount { channels: 6 }
        ));
    }
}

mod streaming_tests {
    use super::*;

    /// 48 kHz stereo fed in equal chunks whose total duration divides the
    /// 2:1 rate ratio exactly: the emitted byte total must equal half the
    /// input, with flush contributing whatever the convert calls still owed.
    #[test]
    fn test_downsample_48k_to_24k_stereo_totals() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 48000, 2),
            request(FormatCode::S16, 24000, 2),
        )
        .unwrap();

        let total_frames = 960i16;
        let mut emitted_bytes = 0usize;
        for chunk_start in (0..total_frames).step_by(96) {
            let mut frames = Vec::new();
            for i in chunk_start..chunk_start + 96 {
                frames.push(i);
                frames.push(-i);
            }
            let buffer = session.convert(&s16_frames(&frames)).unwrap();
            emitted_bytes += buffer.len();
        }

        let drained = session.flush().unwrap();
        let expected_total = total_frames as usize / 2 * 4;
        assert_eq!(emitted_bytes + drained.len(), expected_total);

        // repeat flushes stay empty once drained
        assert!(session.flush().unwrap().is_empty());
        assert!(session.flush().unwrap().is_empty());
    }

    #[test]
    fn test_downsample_output_is_even_input_frames() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 48000, 2),
            request(FormatCode::S16, 24000, 2),
        )
        .unwrap();

        let input = s16_frames(&[0, 0, 10, -10, 20, -20, 30, -30]);
        let buffer = session.convert(&input).unwrap();
        assert_eq!(s16_values(&buffer), vec![0, 0, 20, -20]);
    }

    #[test]
    fn test_upsample_drains_remainder_on_flush() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::S16, 16000, 1),
        )
        .unwrap();

        let total_frames = 100usize;
        let mut emitted_frames = 0usize;
        for chunk in (0..total_frames as i16).collect::<Vec<_>>().chunks(25) {
            let buffer = session.convert(&s16_frames(chunk)).unwrap();
            emitted_frames += buffer.frames;
        }

        let drained = session.flush().unwrap();
        assert!(!drained.is_empty(), "flush should drain the held frame");
        assert_eq!(emitted_frames + drained.frames, total_frames * 2);
    }

    #[test]
    fn test_zero_length_input_is_not_a_flush() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::S16, 16000, 1),
        )
        .unwrap();

        // an empty chunk before any data
        assert!(session.convert(&[]).unwrap().is_empty());

        let buffer = session.convert(&s16_frames(&[100, 200])).unwrap();
        let held_before = buffer.frames;

        // an empty chunk mid-stream emits nothing and drops nothing
        assert!(session.convert(&[]).unwrap().is_empty());

        let drained = session.flush().unwrap();
        assert_eq!(held_before + drained.frames, 4);
    }

    #[test]
    fn test_zero_output_convert_is_not_an_end_condition() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 48000, 1),
            request(FormatCode::S16, 8000, 1),
        )
        .unwrap();

        // 6:1 ratio: single frames mostly convert to nothing yet
        let mut total_frames = 0usize;
        for value in 0..12i16 {
            let buffer = session.convert(&s16_frames(&[value])).unwrap();
            total_frames += buffer.frames;
        }
        total_frames += session.flush().unwrap().frames;
        assert_eq!(total_frames, 2);
    }

    #[test]
    fn test_mono_to_stereo_duplicates_samples() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::S16, 8000, 2),
        )
        .unwrap();

        let buffer = session.convert(&s16_frames(&[100, -300])).unwrap();
        assert_eq!(s16_values(&buffer), vec![100, 100, -300, -300]);
    }

    #[test]
    fn test_stereo_to_mono_averages_channels() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 2),
            request(FormatCode::S16, 8000, 1),
        )
        .unwrap();

        let buffer = session.convert(&s16_frames(&[100, 200, 300, 400])).unwrap();
        assert_eq!(s16_values(&buffer), vec![150, 350]);
    }

    #[test]
    fn test_s16_to_f32_sample_values() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::F32, 8000, 1),
        )
        .unwrap();

        let buffer = session.convert(&s16_frames(&[16384, -32768])).unwrap();
        let values: Vec<f32> = buffer
            .data
            .chunks_exact(4)
            .map(|raw| f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
            .collect();
        assert_eq!(values, vec![0.5, -1.0]);
    }
}

mod packed_24_tests {
    use super::*;

    #[test]
    fn test_packed_24_expansion_reaches_output() {
        let mut session = ConversionSession::new(
            request(FormatCode::S24, 48000, 1),
            request(FormatCode::S32, 48000, 1),
        )
        .unwrap();

        let buffer = session.convert(&[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(buffer.frames, 1);
        assert_eq!(&buffer.data[..], &[0x06, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_packed_24_rejects_partial_sample() {
        let mut session = ConversionSession::new(
            request(FormatCode::S24, 48000, 1),
            request(FormatCode::S32, 48000, 1),
        )
        .unwrap();

        let err = session.convert(&[0x01, 0x02, 0x03, 0x04]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInputSize { .. }));
        assert_eq!(err.category(), ErrorCategory::Conversion);
    }

    #[test]
    fn test_packed_24_stereo_stream() {
        let mut session = ConversionSession::new(
            request(FormatCode::S24, 48000, 2),
            request(FormatCode::S32, 24000, 2),
        )
        .unwrap();

        // 4 stereo frames of packed samples, 6 bytes per frame
        let input: Vec<u8> = (0u8..24).collect();
        let converted = session.convert(&input).unwrap();
        let drained = session.flush().unwrap();
        assert_eq!(converted.frames + drained.frames, 2);
        assert_eq!((converted.len() + drained.len()) % 8, 0);
    }
}

mod flush_tests {
    use super::*;

    #[test]
    fn test_flush_before_any_input_is_empty() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 48000, 2),
            request(FormatCode::S16, 24000, 2),
        )
        .unwrap();
        assert!(session.flush().unwrap().is_empty());
    }

    #[test]
    fn test_flush_is_idempotent_after_drain() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::S16, 16000, 1),
        )
        .unwrap();

        session.convert(&s16_frames(&[1, 2, 3])).unwrap();
        let first = session.flush().unwrap();
        assert!(!first.is_empty());

        assert!(session.flush().unwrap().is_empty());
        assert!(session.flush().unwrap().is_empty());
    }

    #[test]
    fn test_convert_after_flush_continues_stream() {
        let mut session = ConversionSession::new(
            request(FormatCode::S16, 8000, 1),
            request(FormatCode::S16, 8000, 1),
        )
        .unwrap();

        session.convert(&s16_frames(&[1, 2])).unwrap();
        session.flush().unwrap();

        let buffer = session.convert(&s16_frames(&[3, 4])).unwrap();
        assert_eq!(s16_values(&buffer), vec![3, 4]);
    }
}
