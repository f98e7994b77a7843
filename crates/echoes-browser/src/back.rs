//! Back-navigation delegate.
//!
//! The hardware/gesture back action walks the surface's own history first
//! and only falls through to the OS default once there is nothing left.

use echoes_platform::{DefaultBackHandler, RenderingSurface};

/// What a back action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Stepped back inside the surface; the event was consumed.
    NavigatedBack,
    /// Passed to the OS default handler.
    Delegated,
}

#[derive(Debug)]
pub struct BackNavigationDelegate {
    enabled: bool,
}

impl Default for BackNavigationDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl BackNavigationDelegate {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Whether back actions are currently intercepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Handle one back action. Evaluated fresh every time.
    ///
    /// Interception is switched off while the default handler runs so the
    /// action cannot loop back here, and switched on again afterwards.
    pub fn on_back_requested(
        &mut self,
        surface: &mut dyn RenderingSurface,
        fallback: &mut dyn DefaultBackHandler,
    ) -> BackOutcome {
        if self.enabled && surface.can_go_back() {
            if let Err(e) = surface.go_back() {
                log::warn!("surface back navigation failed: {e}");
            }
            return BackOutcome::NavigatedBack;
        }

        log::debug!("no surface history, delegating back action");
        self.enabled = false;
        fallback.default_back();
        self.enabled = true;
        BackOutcome::Delegated
    }
}
