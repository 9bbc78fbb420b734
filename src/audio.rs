//! Audio buffer types shared across the pipeline.
//!
//! Hush works on interleaved 16-bit signed little-endian PCM throughout.
//! [`AudioBuffer`] carries the bytes plus the metadata (rate, channels) that
//! raw bytes lack; [`Audio`] is the input/output union for the two call
//! shapes the pipeline supports (structured buffer vs. headerless bytes).

/// An owned audio recording: interleaved 16-bit LE PCM plus its metadata.
///
/// Ownership transfers stage-to-stage through the pipeline; no stage mutates
/// a caller-owned buffer in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    data: Vec<u8>,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    /// Wrap raw 16-bit LE PCM bytes with the metadata they lack.
    pub fn new(data: Vec<u8>, sample_rate: u32, channels: u16) -> Self {
        Self {
            data,
            sample_rate,
            channels,
        }
    }

    /// Build a buffer from decoded samples (interleaved when multi-channel).
    pub fn from_samples(samples: &[i16], sample_rate: u32, channels: u16) -> Self {
        let mut data = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            data.extend_from_slice(&s.to_le_bytes());
        }
        Self::new(data, sample_rate, channels)
    }

    /// The PCM payload without any container header.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the headerless PCM payload.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.data
    }

    /// Decode the payload into `i16` samples (interleaved when multi-channel).
    ///
    /// A trailing odd byte (possible only for hand-built raw buffers) is
    /// ignored here; the framer pads it with silence instead.
    pub fn samples(&self) -> Vec<i16> {
        self.data
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Recording length in milliseconds, rounded down.
    pub fn duration_ms(&self) -> u64 {
        let frame_width = 2 * self.channels as u64;
        if frame_width == 0 || self.sample_rate == 0 {
            return 0;
        }
        let frames = self.data.len() as u64 / frame_width;
        frames * 1000 / self.sample_rate as u64
    }
}

/// The two call shapes the pipeline accepts and returns.
///
/// The output representation mirrors the input representation: feed the
/// pipeline a structured buffer and you get a structured buffer back; feed
/// it headerless bytes and you get headerless bytes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audio {
    /// A structured buffer carrying its own rate and channel count.
    Buffer(AudioBuffer),

    /// Headerless PCM bytes; the rate must be supplied out-of-band.
    Raw(Vec<u8>),
}

impl Audio {
    /// Unwrap a structured result, if this is one.
    pub fn into_buffer(self) -> Option<AudioBuffer> {
        match self {
            Audio::Buffer(buf) => Some(buf),
            Audio::Raw(_) => None,
        }
    }

    /// Unwrap a raw-byte result, if this is one.
    pub fn into_raw(self) -> Option<Vec<u8>> {
        match self {
            Audio::Buffer(_) => None,
            Audio::Raw(bytes) => Some(bytes),
        }
    }
}

impl From<AudioBuffer> for Audio {
    fn from(buf: AudioBuffer) -> Self {
        Audio::Buffer(buf)
    }
}

impl From<Vec<u8>> for Audio {
    fn from(bytes: Vec<u8>) -> Self {
        Audio::Raw(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_round_trip_through_bytes() {
        let samples = vec![0i16, 1, -1, i16::MAX, i16::MIN];
        let buf = AudioBuffer::from_samples(&samples, 48_000, 1);
        assert_eq!(buf.samples(), samples);
        assert_eq!(buf.raw_data().len(), samples.len() * 2);
    }

    #[test]
    fn samples_ignores_trailing_odd_byte() {
        let buf = AudioBuffer::new(vec![0x01, 0x00, 0xff], 48_000, 1);
        assert_eq!(buf.samples(), vec![1]);
    }

    #[test]
    fn duration_accounts_for_rate_and_channels() {
        // 1 second of stereo at 16 kHz: 16000 frames * 2 channels * 2 bytes.
        let buf = AudioBuffer::new(vec![0; 16_000 * 4], 16_000, 2);
        assert_eq!(buf.duration_ms(), 1_000);
    }

    #[test]
    fn audio_union_unwraps_matching_variant_only() {
        let raw = Audio::from(vec![0u8; 4]);
        assert!(raw.clone().into_buffer().is_none());
        assert_eq!(raw.into_raw().unwrap().len(), 4);
    }
}
