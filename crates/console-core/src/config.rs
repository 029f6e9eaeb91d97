//! Immutable machine configuration handed to every reset and iterate call.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{FM_VOICES, PSG_TONE_VOICES};

/// Console region reported to software through the version register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Japanese-market hardware.
    Domestic,
    /// Western-market hardware.
    #[default]
    Overseas,
}

/// Video standard, selecting clock rates and frame geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TvStandard {
    /// 60 Hz, 262 lines per frame.
    #[default]
    Ntsc,
    /// 50 Hz, 313 lines per frame.
    Pal,
}

/// Error returned when configuration text does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseConfigError {
    /// Text was not `overseas` or `domestic`.
    #[error("unknown region `{0}` (expected `overseas` or `domestic`)")]
    UnknownRegion(String),
    /// Text was not `ntsc` or `pal`.
    #[error("unknown tv standard `{0}` (expected `ntsc` or `pal`)")]
    UnknownTvStandard(String),
}

impl FromStr for Region {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overseas" => Ok(Self::Overseas),
            "domestic" => Ok(Self::Domestic),
            _ => Err(ParseConfigError::UnknownRegion(s.to_string())),
        }
    }
}

impl FromStr for TvStandard {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ntsc" => Ok(Self::Ntsc),
            "pal" => Ok(Self::Pal),
            _ => Err(ParseConfigError::UnknownTvStandard(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domestic => "domestic",
            Self::Overseas => "overseas",
        })
    }
}

impl fmt::Display for TvStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ntsc => "ntsc",
            Self::Pal => "pal",
        })
    }
}

/// Machine-wide toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneralConfig {
    /// Skips the one-pole output filter applied to FM audio.
    pub low_pass_filter_disabled: bool,
    /// Attaches the CD add-on: disc, PCM, CDDA and backup RAM paths become live.
    pub cd_add_on_enabled: bool,
}

/// Video display processor toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VdpConfig {
    /// Suppresses the sprite layer.
    pub sprites_disabled: bool,
    /// Suppresses the window plane.
    pub window_disabled: bool,
    /// Suppresses scroll planes A and B.
    pub planes_disabled: [bool; 2],
}

/// FM synthesiser toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FmConfig {
    /// Mutes individual FM channels.
    pub channels_disabled: [bool; FM_VOICES],
    /// Mutes the DAC that replaces channel 6 when enabled by software.
    pub dac_channel_disabled: bool,
}

/// PSG toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PsgConfig {
    /// Mutes individual tone channels.
    pub channels_disabled: [bool; PSG_TONE_VOICES],
    /// Mutes the noise channel.
    pub noise_disabled: bool,
}

/// Top-level immutable configuration for a core instance.
///
/// The default is an overseas NTSC console with every subsystem enabled and
/// no CD add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Console region.
    pub region: Region,
    /// Video standard.
    pub tv_standard: TvStandard,
    /// Machine-wide toggles.
    pub general: GeneralConfig,
    /// Video toggles.
    pub vdp: VdpConfig,
    /// FM toggles.
    pub fm: FmConfig,
    /// PSG toggles.
    pub psg: PsgConfig,
}
