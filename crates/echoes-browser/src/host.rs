//! The host: one rendering surface, one toolbar, one file bridge.
//!
//! [`BrowserHost`] owns the stateful handlers and is driven by the embedder
//! from its event-dispatch thread. Collaborators are passed per call so the
//! embedder keeps ownership of its webview and OS handles. Navigation
//! routing is stateless and registered separately, see [`crate::policy`].

use echoes_platform::{DefaultBackHandler, FilePicker, RenderingSurface, ToolbarAnimator};
use echoes_types::config::HostConfig;
use echoes_types::error::Result;
use echoes_types::event::{PickerResult, ScrollSample};
use echoes_ui::{ToolbarController, ToolbarVisibility};

use crate::back::{BackNavigationDelegate, BackOutcome};
use crate::bridge::{FileCallback, FileSelectionBridge};
use crate::scroll::ScrollTracker;

pub struct BrowserHost {
    config: HostConfig,
    toolbar: ToolbarController,
    scroll: ScrollTracker,
    files: FileSelectionBridge,
    back: BackNavigationDelegate,
}

impl BrowserHost {
    /// Build a host from a validated configuration.
    pub fn new(config: HostConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            toolbar: ToolbarController::new(&config.toolbar),
            scroll: ScrollTracker::new(),
            files: FileSelectionBridge::new(config.picker.clone()),
            back: BackNavigationDelegate::new(),
            config,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Point the surface at the configured origin.
    pub fn start(&mut self, surface: &mut dyn RenderingSurface) -> Result<()> {
        log::info!("loading origin {}", self.config.origin);
        surface.load_url(&self.config.origin)
    }

    /// Toolbar refresh button.
    pub fn refresh(&mut self, surface: &mut dyn RenderingSurface) {
        log::info!("refresh requested");
        if let Err(e) = surface.reload() {
            log::warn!("reload failed: {e}");
        }
    }

    /// A new document committed in the surface.
    pub fn on_page_navigated(&mut self) {
        self.scroll.reset();
    }

    // -- Toolbar --------------------------------------------------------

    pub fn toolbar_visibility(&self) -> ToolbarVisibility {
        self.toolbar.visibility()
    }

    /// Scroll change reported as a pair of offsets.
    pub fn on_scroll(&mut self, sample: ScrollSample, animator: &mut dyn ToolbarAnimator) {
        if let Some(cmd) = self.toolbar.on_sample(sample) {
            cmd.apply(animator);
        }
    }

    /// Scroll change reported as an absolute offset.
    pub fn on_scroll_offset(&mut self, offset: i32, animator: &mut dyn ToolbarAnimator) {
        let sample = self.scroll.sample(offset);
        self.on_scroll(sample, animator);
    }

    /// The toolbar was laid out at a new height.
    pub fn on_toolbar_resized(&mut self, height: f32, animator: &mut dyn ToolbarAnimator) {
        if let Some(cmd) = self.toolbar.set_height(height) {
            cmd.apply(animator);
        }
    }

    // -- Files ----------------------------------------------------------

    pub fn on_file_request(&mut self, callback: FileCallback, picker: &mut dyn FilePicker) -> bool {
        self.files.on_file_request(callback, picker)
    }

    pub fn on_picker_result(&mut self, result: PickerResult) {
        self.files.on_picker_result(result);
    }

    pub fn has_pending_file_request(&self) -> bool {
        self.files.has_pending()
    }

    // -- Back -----------------------------------------------------------

    pub fn on_back_requested(
        &mut self,
        surface: &mut dyn RenderingSurface,
        fallback: &mut dyn DefaultBackHandler,
    ) -> BackOutcome {
        self.back.on_back_requested(surface, fallback)
    }

    /// The hosting screen is going away.
    pub fn shutdown(&mut self) {
        self.files.release();
    }
}
