//! Desktop embedding of the Echoes host.
//!
//! The platform-neutral pieces ([`files`], [`os`], [`toolbar_page`]) build
//! everywhere. The webview shell needs the `desktop` feature.

pub mod files;
pub mod os;
pub mod toolbar_page;

#[cfg(feature = "desktop")]
pub mod picker;
#[cfg(feature = "desktop")]
pub mod shell;
#[cfg(feature = "desktop")]
pub mod surface;
