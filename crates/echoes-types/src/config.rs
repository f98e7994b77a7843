//! Host configuration.
//!
//! The host has no configuration file, flags or environment variables: the
//! values here are compiled in and exposed as a typed struct so the embedder
//! and the tests read them from one place.

use serde::{Deserialize, Serialize};

use crate::error::{EchoesError, Result};
use crate::event::PickerRequest;

/// The remote web application loaded at startup.
pub const DEFAULT_ORIGIN: &str = "https://echoes.zeabur.app/";

/// Appended verbatim to the engine's default User-Agent. The remote origin
/// uses it for feature negotiation.
pub const USER_AGENT_SUFFIX: &str = " EchoesApp/1.0";

/// Capability flags applied to the rendering surface.
///
/// Caching is left to the engine's default policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Script execution.
    pub javascript: bool,
    /// Persistent local key-value storage (`localStorage`).
    pub dom_storage: bool,
    /// Honor the page's viewport meta tag and start zoomed out to fit.
    pub wide_viewport: bool,
    /// Built-in zoom controls and zoom hotkeys.
    pub zoom_controls: bool,
    /// Suffix appended to the default User-Agent.
    pub user_agent_suffix: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            javascript: true,
            dom_storage: true,
            wide_viewport: true,
            zoom_controls: false,
            user_agent_suffix: USER_AGENT_SUFFIX.to_string(),
        }
    }
}

impl SurfaceSettings {
    /// Compose the outgoing User-Agent from the engine default.
    pub fn user_agent(&self, default_ua: &str) -> String {
        format!("{default_ua}{}", self.user_agent_suffix)
    }
}

/// Bottom toolbar metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Toolbar height in logical pixels. Hiding translates it down by this much.
    pub height: f32,
    /// Scroll delta that must be exceeded (strictly) before the toolbar moves.
    pub hide_threshold: i32,
    /// Show/hide animation length.
    pub animation_ms: u32,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            height: 56.0,
            hide_threshold: 10,
            animation_ms: 300,
        }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// URL loaded into the surface at startup.
    pub origin: String,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub toolbar: ToolbarConfig,
    pub picker: PickerRequest,
    pub surface: SurfaceSettings,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            window_title: "Echoes".to_string(),
            window_width: 412,
            window_height: 915,
            toolbar: ToolbarConfig::default(),
            picker: PickerRequest::default(),
            surface: SurfaceSettings::default(),
        }
    }
}

impl HostConfig {
    /// Check the values the host relies on.
    pub fn validate(&self) -> Result<()> {
        let origin = url::Url::parse(&self.origin)?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(EchoesError::Config(format!(
                "origin must be http(s), got {}",
                origin.scheme()
            )));
        }
        if self.toolbar.hide_threshold < 0 {
            return Err(EchoesError::Config(format!(
                "negative toolbar threshold: {}",
                self.toolbar.hide_threshold
            )));
        }
        if self.toolbar.height.is_nan() || self.toolbar.height < 0.0 {
            return Err(EchoesError::Config(format!(
                "invalid toolbar height: {}",
                self.toolbar.height
            )));
        }
        Ok(())
    }
}
