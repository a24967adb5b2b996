//! Digital audio interface (DAI) descriptors and stream operations
//!
//! A codec describes what its DAI accepts with a static [`DaiDriver`] and
//! reacts to stream lifecycle events through [`DaiOps`]. Negotiation itself
//! (picking a rate/format both ends support) belongs to the host; the
//! descriptor only has to answer [`PcmStream::supports`].

use bitflags::bitflags;

use crate::audio_types::SampleRateHz;

// ---------------------------------------------------------------------------
// Sample formats
// ---------------------------------------------------------------------------

bitflags! {
    /// Set of PCM sample formats, one bit per format.
    ///
    /// Bit positions follow the ALSA `SNDRV_PCM_FORMAT_*` numbering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PcmFormats: u64 {
        /// Signed 8-bit.
        const S8 = 1 << 0;
        /// Unsigned 8-bit.
        const U8 = 1 << 1;
        /// Signed 16-bit little-endian.
        const S16_LE = 1 << 2;
        /// Signed 16-bit big-endian.
        const S16_BE = 1 << 3;
        /// Signed 24-bit little-endian in a 32-bit container.
        const S24_LE = 1 << 6;
        /// Signed 24-bit big-endian in a 32-bit container.
        const S24_BE = 1 << 7;
        /// Signed 32-bit little-endian.
        const S32_LE = 1 << 10;
        /// Signed 32-bit big-endian.
        const S32_BE = 1 << 11;
    }
}

/// A single negotiated PCM sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PcmFormat {
    /// Signed 8-bit.
    S8,
    /// Unsigned 8-bit.
    U8,
    /// Signed 16-bit little-endian.
    S16Le,
    /// Signed 16-bit big-endian.
    S16Be,
    /// Signed 24-bit little-endian (32-bit container).
    S24Le,
    /// Signed 24-bit big-endian (32-bit container).
    S24Be,
    /// Signed 32-bit little-endian.
    S32Le,
    /// Signed 32-bit big-endian.
    S32Be,
}

impl PcmFormat {
    /// The corresponding bit in a [`PcmFormats`] set.
    pub const fn mask(self) -> PcmFormats {
        match self {
            Self::S8 => PcmFormats::S8,
            Self::U8 => PcmFormats::U8,
            Self::S16Le => PcmFormats::S16_LE,
            Self::S16Be => PcmFormats::S16_BE,
            Self::S24Le => PcmFormats::S24_LE,
            Self::S24Be => PcmFormats::S24_BE,
            Self::S32Le => PcmFormats::S32_LE,
            Self::S32Be => PcmFormats::S32_BE,
        }
    }

    /// Bits occupied by one sample on the wire.
    pub const fn physical_width(self) -> u8 {
        match self {
            Self::S8 | Self::U8 => 8,
            Self::S16Le | Self::S16Be => 16,
            Self::S24Le | Self::S24Be | Self::S32Le | Self::S32Be => 32,
        }
    }
}

// ---------------------------------------------------------------------------
// Stream descriptors
// ---------------------------------------------------------------------------

/// Continuous sample-rate range, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateRange {
    /// Lowest accepted rate in Hz.
    pub min: u32,
    /// Highest accepted rate in Hz.
    pub max: u32,
}

impl RateRange {
    /// `true` if `hz` lies within the range.
    pub const fn contains(&self, hz: u32) -> bool {
        hz >= self.min && hz <= self.max
    }
}

/// Capabilities of one stream direction of a DAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmStream {
    /// Stream name shown to the host (e.g. `"Playback"`).
    pub stream_name: &'static str,
    /// Minimum channel count.
    pub channels_min: u8,
    /// Maximum channel count.
    pub channels_max: u8,
    /// Accepted sample rates.
    pub rates: RateRange,
    /// Accepted sample formats.
    pub formats: PcmFormats,
}

impl PcmStream {
    /// `true` if `params` fall within this stream's capabilities.
    pub fn supports(&self, params: &HwParams) -> bool {
        self.rates.contains(params.rate.get())
            && (self.channels_min..=self.channels_max).contains(&params.channels)
            && self.formats.contains(params.format.mask())
    }
}

/// Static description of a codec DAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaiDriver {
    /// DAI name.
    pub name: &'static str,
    /// Playback capabilities.
    pub playback: PcmStream,
}

// ---------------------------------------------------------------------------
// Negotiated parameters
// ---------------------------------------------------------------------------

/// Hardware parameters negotiated for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwParams {
    /// Sample rate.
    pub rate: SampleRateHz,
    /// Channel count.
    pub channels: u8,
    /// Sample format.
    pub format: PcmFormat,
}

/// Serial data framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiProtocol {
    /// Philips I²S.
    #[default]
    I2s,
    /// Right-justified.
    RightJ,
    /// Left-justified.
    LeftJ,
    /// DSP mode A (frame pulse one bit before data).
    DspA,
    /// DSP mode B (frame pulse aligned with data).
    DspB,
}

/// Bit clock / frame clock polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockInversion {
    /// Normal bit clock, normal frame.
    #[default]
    NormalBitNormalFrame,
    /// Normal bit clock, inverted frame.
    NormalBitInvertedFrame,
    /// Inverted bit clock, normal frame.
    InvertedBitNormalFrame,
    /// Inverted bit clock, inverted frame.
    InvertedBitInvertedFrame,
}

/// Which end drives bit and frame clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockProvider {
    /// The host (CPU side) provides both clocks; the codec is consumer.
    #[default]
    Host,
    /// The codec provides both clocks.
    Codec,
}

/// DAI format descriptor passed to [`DaiOps::set_fmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaiFormat {
    /// Data framing.
    pub protocol: DaiProtocol,
    /// Clock polarity.
    pub inversion: ClockInversion,
    /// Clock direction.
    pub provider: ClockProvider,
}

// ---------------------------------------------------------------------------
// Stream operations
// ---------------------------------------------------------------------------

/// Stream lifecycle callbacks a codec DAI implements.
///
/// All calls are synchronous and made by the host from its own thread of
/// control; ordering (e.g. mute around start/stop) is the host's policy.
pub trait DaiOps {
    /// Error type.
    type Error;

    /// Called before the first frame of a stream.
    fn startup(&mut self) -> Result<(), Self::Error>;

    /// Called once stream parameters are negotiated.
    fn hw_params(&mut self, params: &HwParams) -> Result<(), Self::Error>;

    /// Called with the DAI format chosen by the machine description.
    fn set_fmt(&mut self, fmt: DaiFormat) -> Result<(), Self::Error>;

    /// Mute (`true`) or unmute (`false`) the output.
    fn mute(&mut self, mute: bool) -> Result<(), Self::Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STEREO: PcmStream = PcmStream {
        stream_name: "Playback",
        channels_min: 2,
        channels_max: 2,
        rates: RateRange {
            min: 8_000,
            max: 192_000,
        },
        formats: PcmFormats::S16_LE.union(PcmFormats::S32_LE),
    };

    fn params(hz: u32, channels: u8, format: PcmFormat) -> HwParams {
        HwParams {
            rate: SampleRateHz::new(hz).unwrap(),
            channels,
            format,
        }
    }

    #[test]
    fn supports_matching_params() {
        assert!(STEREO.supports(&params(48_000, 2, PcmFormat::S16Le)));
        assert!(STEREO.supports(&params(192_000, 2, PcmFormat::S32Le)));
    }

    #[test]
    fn rejects_unsupported_format() {
        assert!(!STEREO.supports(&params(48_000, 2, PcmFormat::S24Le)));
    }

    #[test]
    fn rejects_mono() {
        assert!(!STEREO.supports(&params(48_000, 1, PcmFormat::S16Le)));
    }

    #[test]
    fn rejects_rate_above_range() {
        assert!(!STEREO.supports(&params(384_000, 2, PcmFormat::S16Le)));
    }

    #[test]
    fn format_masks_follow_alsa_numbering() {
        assert_eq!(PcmFormats::S16_LE.bits(), 1 << 2);
        assert_eq!(PcmFormats::S32_LE.bits(), 1 << 10);
        assert_eq!(PcmFormats::S32_BE.bits(), 1 << 11);
    }

    #[test]
    fn physical_width_of_24_bit_is_container_width() {
        assert_eq!(PcmFormat::S24Le.physical_width(), 32);
        assert_eq!(PcmFormat::S16Be.physical_width(), 16);
    }
}
