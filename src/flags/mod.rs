//! Flag images module - CDN-backed country flags for the UI.
//!
//! Resolves a country code and a display size into CDN image URLs and alt
//! text. Unknown or malformed codes fall back to a placeholder flag so the
//! layout never breaks; fetching the image is left to whoever renders it.

mod country;
mod resolver;
mod size;

pub use country::{normalize, Alpha2, NormalizedCountryCode, PLACEHOLDER_CODE};
pub use resolver::{FlagResolver, ImageReference, DEFAULT_CDN_BASE};
pub use size::{resolve_width, resolve_width_px, DisplaySize, ProviderWidth};

use serde::Serialize;
use thiserror::Error;

/// Errors from flag resolution.
///
/// Only contract violations end up here. Bad country codes never do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Render-ready flag: the resolved image plus how big to draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagImage {
    #[serde(flatten)]
    pub image: ImageReference,
    pub size: DisplaySize,
    /// On-screen height at a 4:3 aspect ratio
    pub height: u32,
    /// Cosmetic only; does not affect which image is requested.
    pub rounded: bool,
}

impl FlagImage {
    /// Render as an HTML `<img>` element.
    pub fn to_html(&self) -> String {
        let class = if self.rounded {
            "flag flag--rounded"
        } else {
            "flag"
        };
        format!(
            r#"<img src="{src}" srcset="{srcset}" alt="{alt}" width="{width}" height="{height}" loading="lazy" class="{class}">"#,
            src = escape_attr(&self.image.url),
            srcset = escape_attr(&self.image.srcset()),
            alt = escape_attr(&self.image.alt),
            width = self.size.px(),
            height = self.height,
        )
    }
}

/// Get the flag image for a country code at a display size.
///
/// Returns a `size` wide, 4:3 flag. Falls back to the placeholder flag for
/// unknown country codes.
pub fn flag_image(resolver: &FlagResolver, country_code: &str, size: DisplaySize, rounded: bool) -> FlagImage {
    FlagImage {
        image: resolver.resolve_for_display(country_code, size),
        size,
        height: size.height_px(),
        rounded,
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
