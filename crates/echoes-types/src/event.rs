//! Event data flowing between the rendering surface, the OS and the host.
//!
//! Every embedder maps its native callbacks to these types. The host core
//! never sees raw webview or OS objects.

use serde::{Deserialize, Serialize};

/// An outbound navigation attempt from the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    /// Whether the navigation targets the top-level frame.
    pub is_main_frame: bool,
}

impl NavigationRequest {
    pub fn new(url: impl Into<String>, is_main_frame: bool) -> Self {
        Self {
            url: url.into(),
            is_main_frame,
        }
    }

    /// A top-level navigation.
    pub fn main_frame(url: impl Into<String>) -> Self {
        Self::new(url, true)
    }
}

/// A pair of vertical scroll offsets, consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub previous: i32,
    pub current: i32,
}

impl ScrollSample {
    pub fn new(previous: i32, current: i32) -> Self {
        Self { previous, current }
    }

    /// Positive when scrolling down the page.
    pub fn delta(&self) -> i32 {
        self.current.saturating_sub(self.previous)
    }
}

/// What the OS file picker is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerRequest {
    /// Only content that can be opened as a stream.
    pub openable: bool,
    /// MIME filter, e.g. `image/*`.
    pub mime_filter: String,
    pub allow_multiple: bool,
    /// Chooser title shown by the OS.
    pub title: String,
}

impl Default for PickerRequest {
    fn default() -> Self {
        Self {
            openable: true,
            mime_filter: "image/*".to_string(),
            allow_multiple: true,
            title: "Select images".to_string(),
        }
    }
}

/// Completion status reported by the OS picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// The user confirmed a selection.
    Ok,
    /// The user backed out, or the picker closed without a result.
    Cancelled,
}

/// Payload returned by the OS picker.
///
/// The OS reports a multi-item selection as a batch of clip items and a
/// single selection as one data URI. Both may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerData {
    pub clip_items: Option<Vec<String>>,
    pub data_uri: Option<String>,
}

/// The picker's answer, delivered once per launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResult {
    pub code: ResultCode,
    pub data: Option<PickerData>,
}

impl PickerResult {
    /// The user cancelled.
    pub fn cancelled() -> Self {
        Self {
            code: ResultCode::Cancelled,
            data: None,
        }
    }

    /// A single selected resource.
    pub fn single(uri: impl Into<String>) -> Self {
        Self {
            code: ResultCode::Ok,
            data: Some(PickerData {
                clip_items: None,
                data_uri: Some(uri.into()),
            }),
        }
    }

    /// A batch selection, in OS-reported order.
    pub fn multiple(uris: Vec<String>) -> Self {
        Self {
            code: ResultCode::Ok,
            data: Some(PickerData {
                clip_items: Some(uris),
                data_uri: None,
            }),
        }
    }
}
