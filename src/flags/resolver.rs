//! Flag image reference resolution.
//!
//! Builds CDN URLs of the form `https://<host>/w<width>/<code>.png` plus a
//! 2x variant and alt text. Nothing here touches the network.

use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use super::country::{normalize, NormalizedCountryCode};
use super::size::{resolve_width, DisplaySize, ProviderWidth};
use super::FlagError;

pub const DEFAULT_CDN_BASE: &str = "https://flagcdn.com";

const UNKNOWN_ALT: &str = "Unknown country flag";

/// Everything the rendering layer needs to show one flag image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    /// Standard density image URL
    pub url: String,
    /// URL at twice the width, for high pixel density screens
    pub high_density_url: String,
    pub alt: String,
    /// Normalized code that went into the URLs
    pub code: String,
    pub width: ProviderWidth,
}

impl ImageReference {
    /// `srcset` attribute value pairing both URLs.
    pub fn srcset(&self) -> String {
        format!("{} 1x, {} 2x", self.url, self.high_density_url)
    }

    pub fn is_placeholder(&self) -> bool {
        normalize(&self.code).is_placeholder()
    }
}

/// Resolves country codes against one flag CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagResolver {
    base_url: String,
}

impl Default for FlagResolver {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CDN_BASE.to_string(),
        }
    }
}

impl FlagResolver {
    /// Create a resolver for the given CDN base URL (e.g. `https://flagcdn.com`).
    ///
    /// The base must be an `http` or `https` URL (scheme in any case) with a
    /// host and no credentials, query or fragment. Trailing slashes are
    /// dropped.
    pub fn new(base_url: &str) -> Result<Self, FlagError> {
        let invalid = |reason: &str| {
            FlagError::InvalidArgument(format!("CDN base {reason}: {:?}", base_url.trim()))
        };

        let url = Url::parse(base_url.trim()).map_err(|_| invalid("is not a URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("must be an http(s) URL"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("has no host"));
        }
        if !url.username().is_empty()
            || url.password().is_some()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(invalid("must not carry credentials, a query or a fragment"));
        }

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a country code at a provider width.
    ///
    /// Never fails: malformed codes resolve to the placeholder flag.
    pub fn resolve(&self, country_code: &str, width: ProviderWidth) -> ImageReference {
        let code = normalize(country_code);
        if code.is_placeholder() {
            debug!(input = %country_code, "Country code not resolvable, using placeholder flag");
        }

        ImageReference {
            url: self.url_for(code, width.px()),
            high_density_url: self.url_for(code, width.high_density_px()),
            alt: alt_text(code),
            code: code.as_str().to_string(),
            width,
        }
    }

    /// Like [`resolve`](Self::resolve) for a raw pixel width.
    ///
    /// Widths the CDN does not serve are a [`FlagError::InvalidArgument`].
    pub fn resolve_px(&self, country_code: &str, width_px: u32) -> Result<ImageReference, FlagError> {
        let width = ProviderWidth::try_from(width_px)?;
        Ok(self.resolve(country_code, width))
    }

    /// Resolve for an on-screen display size.
    pub fn resolve_for_display(&self, country_code: &str, size: DisplaySize) -> ImageReference {
        self.resolve(country_code, resolve_width(size))
    }

    fn url_for(&self, code: NormalizedCountryCode, width_px: u32) -> String {
        format!("{}/w{}/{}.png", self.base_url, width_px, code)
    }
}

fn alt_text(code: NormalizedCountryCode) -> String {
    if code.is_placeholder() {
        UNKNOWN_ALT.to_string()
    } else {
        format!("Flag of {}", code.display_code())
    }
}
