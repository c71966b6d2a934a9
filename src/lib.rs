//! flagkit: CDN-backed country flag resolution for web frontends.
//!
//! The core is [`flags`]: pure functions that turn a (possibly malformed)
//! country code and a display size into flag image URLs and alt text. The
//! remaining modules cover the developer tooling around it.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flags;
pub mod logging;
pub mod probe;
pub mod robots;

pub use error::AppError;
pub use flags::{
    flag_image, resolve_width, DisplaySize, FlagError, FlagImage, FlagResolver, ImageReference,
    ProviderWidth,
};
