//! Display size to provider width mapping.
//!
//! The flag CDN only serves a handful of widths. Similar on-screen sizes are
//! collapsed onto the same width tier so fewer distinct assets get requested.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::FlagError;

/// On-screen sizes the UI may request, in CSS pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySize {
    Px16,
    #[default]
    Px20,
    Px24,
    Px32,
    Px40,
    Px48,
    Px64,
}

impl DisplaySize {
    pub const ALL: [DisplaySize; 7] = [
        DisplaySize::Px16,
        DisplaySize::Px20,
        DisplaySize::Px24,
        DisplaySize::Px32,
        DisplaySize::Px40,
        DisplaySize::Px48,
        DisplaySize::Px64,
    ];

    pub fn px(self) -> u32 {
        match self {
            DisplaySize::Px16 => 16,
            DisplaySize::Px20 => 20,
            DisplaySize::Px24 => 24,
            DisplaySize::Px32 => 32,
            DisplaySize::Px40 => 40,
            DisplaySize::Px48 => 48,
            DisplaySize::Px64 => 64,
        }
    }

    /// Rendered height for a 4:3 flag at this width.
    pub fn height_px(self) -> u32 {
        self.px() * 3 / 4
    }
}

impl TryFrom<u32> for DisplaySize {
    type Error = FlagError;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        DisplaySize::ALL
            .into_iter()
            .find(|size| size.px() == px)
            .ok_or_else(|| FlagError::InvalidArgument(format!("unsupported display size: {px}px")))
    }
}

/// Accepts `"20"` as well as `"20px"`.
impl FromStr for DisplaySize {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
        let px: u32 = digits
            .parse()
            .map_err(|_| FlagError::InvalidArgument(format!("invalid display size: {s:?}")))?;
        DisplaySize::try_from(px)
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.px())
    }
}

impl Serialize for DisplaySize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.px())
    }
}

/// Image widths the flag CDN serves natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderWidth {
    W20,
    W40,
    W80,
    W160,
    W320,
    W640,
    W1280,
}

impl ProviderWidth {
    pub const ALL: [ProviderWidth; 7] = [
        ProviderWidth::W20,
        ProviderWidth::W40,
        ProviderWidth::W80,
        ProviderWidth::W160,
        ProviderWidth::W320,
        ProviderWidth::W640,
        ProviderWidth::W1280,
    ];

    pub fn px(self) -> u32 {
        match self {
            ProviderWidth::W20 => 20,
            ProviderWidth::W40 => 40,
            ProviderWidth::W80 => 80,
            ProviderWidth::W160 => 160,
            ProviderWidth::W320 => 320,
            ProviderWidth::W640 => 640,
            ProviderWidth::W1280 => 1280,
        }
    }

    /// Width requested for the 2x (high pixel density) variant.
    pub fn high_density_px(self) -> u32 {
        self.px() * 2
    }
}

impl TryFrom<u32> for ProviderWidth {
    type Error = FlagError;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        ProviderWidth::ALL
            .into_iter()
            .find(|width| width.px() == px)
            .ok_or_else(|| FlagError::InvalidArgument(format!("unsupported provider width: {px}")))
    }
}

impl fmt::Display for ProviderWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.px())
    }
}

impl Serialize for ProviderWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.px())
    }
}

/// Map a display size to the provider width tier it is fetched at.
pub fn resolve_width(size: DisplaySize) -> ProviderWidth {
    match size {
        DisplaySize::Px16 | DisplaySize::Px20 => ProviderWidth::W20,
        DisplaySize::Px24 | DisplaySize::Px32 => ProviderWidth::W40,
        DisplaySize::Px40 | DisplaySize::Px48 => ProviderWidth::W80,
        DisplaySize::Px64 => ProviderWidth::W160,
    }
}

/// Same as [`resolve_width`] for a raw pixel value.
///
/// Returns [`FlagError::InvalidArgument`] when `px` is not a supported display size.
pub fn resolve_width_px(px: u32) -> Result<ProviderWidth, FlagError> {
    DisplaySize::try_from(px).map(resolve_width)
}
