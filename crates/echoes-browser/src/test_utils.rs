//! Shared test utilities for the host layer.
//!
//! Recording implementations of every platform service, so tests can
//! assert on what the host asked the outside world to do.

use std::cell::RefCell;
use std::rc::Rc;

use echoes_platform::{
    DefaultBackHandler, FilePicker, RenderingSurface, ToolbarAnimator, UrlDispatcher,
};
use echoes_types::error::{EchoesError, Result};
use echoes_types::event::PickerRequest;

use crate::bridge::FileCallback;
use crate::nav::SessionHistory;

/// Surface with a fake history stack.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub loads: Vec<String>,
    pub reloads: usize,
    pub history_depth: usize,
    pub back_calls: usize,
    pub fail_back: bool,
    pub fail_reload: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(depth: usize) -> Self {
        Self {
            history_depth: depth,
            ..Self::default()
        }
    }
}

impl RenderingSurface for RecordingSurface {
    fn load_url(&mut self, url: &str) -> Result<()> {
        self.loads.push(url.to_string());
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        if self.fail_reload {
            return Err(EchoesError::Surface("reload failed".into()));
        }
        self.reloads += 1;
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.history_depth > 0
    }

    fn go_back(&mut self) -> Result<()> {
        self.back_calls += 1;
        if self.fail_back {
            return Err(EchoesError::Surface("back failed".into()));
        }
        self.history_depth = self.history_depth.saturating_sub(1);
        Ok(())
    }
}

/// Surface whose history is a [`SessionHistory`] fed like the desktop embedder does.
#[derive(Debug, Default)]
pub struct TrackedSurface {
    pub history: SessionHistory,
    pub back_calls: usize,
}

impl RenderingSurface for TrackedSurface {
    fn load_url(&mut self, url: &str) -> Result<()> {
        self.history.record(url);
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn go_back(&mut self) -> Result<()> {
        self.back_calls += 1;
        self.history
            .begin_back()
            .map(|_| ())
            .ok_or_else(|| EchoesError::Surface("no history".into()))
    }
}

/// Dispatcher recording every URL it was handed.
pub struct RecordingDispatcher {
    dispatched: RefCell<Vec<String>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self {
            dispatched: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    /// A dispatcher with no handler for anything.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched.borrow().clone()
    }
}

impl UrlDispatcher for RecordingDispatcher {
    fn dispatch(&self, url: &str) -> Result<()> {
        self.dispatched.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(EchoesError::Dispatch(format!("no activity for {url}")));
        }
        Ok(())
    }
}

/// Picker that records launches and optionally fails them.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    pub launches: Vec<PickerRequest>,
    pub fail: bool,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilePicker for ScriptedPicker {
    fn launch(&mut self, request: &PickerRequest) -> Result<()> {
        if self.fail {
            return Err(EchoesError::Picker("no picker installed".into()));
        }
        self.launches.push(request.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub calls: Vec<(f32, u32)>,
}

impl ToolbarAnimator for RecordingAnimator {
    fn animate_to(&mut self, translation_y: f32, duration_ms: u32) {
        self.calls.push((translation_y, duration_ms));
    }
}

#[derive(Debug, Default)]
pub struct CountingBackHandler {
    pub count: usize,
}

impl DefaultBackHandler for CountingBackHandler {
    fn default_back(&mut self) {
        self.count += 1;
    }
}

/// Collects file-request resolutions as `(request tag, uris)` in order.
#[derive(Clone, Default)]
pub struct ResolutionLog {
    entries: Rc<RefCell<Vec<(usize, Vec<String>)>>>,
}

impl ResolutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that logs its resolution under `tag`.
    pub fn callback(&self, tag: usize) -> FileCallback {
        let entries = Rc::clone(&self.entries);
        Box::new(move |uris| entries.borrow_mut().push((tag, uris)))
    }

    pub fn entries(&self) -> Vec<(usize, Vec<String>)> {
        self.entries.borrow().clone()
    }
}
