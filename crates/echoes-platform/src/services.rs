//! Platform service traits.

use echoes_types::error::{EchoesError, Result};
use echoes_types::event::PickerRequest;

// ---------------------------------------------------------------------------
// Rendering surface
// ---------------------------------------------------------------------------

/// The embedded browser component, consumed as an opaque capability.
pub trait RenderingSurface {
    /// Load a URL as a top-level navigation.
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Reload the current page.
    fn reload(&mut self) -> Result<()>;

    /// Whether the surface's own history has a prior entry.
    fn can_go_back(&self) -> bool;

    /// Step back one entry in the surface's history.
    fn go_back(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// URL dispatch
// ---------------------------------------------------------------------------

/// The OS's generic "view this URI" facility.
pub trait UrlDispatcher {
    /// Hand `url` to whatever the OS has registered for its scheme.
    ///
    /// Fails when no handler exists.
    fn dispatch(&self, url: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// File picker
// ---------------------------------------------------------------------------

/// The system file picker.
///
/// `launch` returns as soon as the picker is shown. The selection arrives
/// later, on the event-dispatch thread, as a
/// [`PickerResult`](echoes_types::event::PickerResult).
pub trait FilePicker {
    fn launch(&mut self, request: &PickerRequest) -> Result<()>;
}

/// Picker for platforms without one. Every launch fails.
pub struct NoFilePicker;

impl FilePicker for NoFilePicker {
    fn launch(&mut self, _request: &PickerRequest) -> Result<()> {
        Err(EchoesError::Picker("no file picker on this platform".into()))
    }
}

// ---------------------------------------------------------------------------
// Toolbar animation
// ---------------------------------------------------------------------------

/// Moves the bottom toolbar. Fire-and-forget: a new call replaces whatever
/// animation is in flight.
pub trait ToolbarAnimator {
    /// Animate the toolbar's vertical translation to `translation_y` over
    /// `duration_ms`. `0.0` is the resting position.
    fn animate_to(&mut self, translation_y: f32, duration_ms: u32);
}

// ---------------------------------------------------------------------------
// Back action
// ---------------------------------------------------------------------------

/// The OS's default handling of the back action (usually: close or
/// background the host).
pub trait DefaultBackHandler {
    fn default_back(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_picker_always_fails() {
        let mut picker = NoFilePicker;
        let err = picker.launch(&PickerRequest::default()).unwrap_err();
        assert!(matches!(err, EchoesError::Picker(_)));
    }
}
