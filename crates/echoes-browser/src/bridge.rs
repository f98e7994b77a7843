//! File-selection bridge.
//!
//! Correlates "the page wants files" with "the picker came back". At most
//! one request is in flight; a new request first resolves the old one with
//! an empty list. Every stored callback is resolved exactly once, whether by
//! the picker result, by supersession, by a failed launch or by
//! [`FileSelectionBridge::release`].

use echoes_platform::FilePicker;
use echoes_types::event::{PickerRequest, PickerResult, ResultCode};

/// Completion callback of a page file input. Receives the selected resource
/// locators; an empty list means nothing was selected.
pub type FileCallback = Box<dyn FnOnce(Vec<String>)>;

/// The single in-flight request.
struct PendingFileRequest {
    id: u64,
    callback: FileCallback,
}

impl PendingFileRequest {
    fn resolve(self, uris: Vec<String>) {
        log::debug!("resolving file request #{} with {} item(s)", self.id, uris.len());
        (self.callback)(uris);
    }
}

pub struct FileSelectionBridge {
    request: PickerRequest,
    pending: Option<PendingFileRequest>,
    next_id: u64,
}

impl FileSelectionBridge {
    /// `request` is what the picker is launched with every time.
    pub fn new(request: PickerRequest) -> Self {
        Self {
            request,
            pending: None,
            next_id: 1,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The page activated a file input.
    ///
    /// Returns `true` when the picker is showing and `callback` will be
    /// resolved later, `false` when it was already resolved empty because
    /// the picker could not be launched.
    pub fn on_file_request(&mut self, callback: FileCallback, picker: &mut dyn FilePicker) -> bool {
        if let Some(stale) = self.pending.take() {
            log::info!("file request #{} superseded", stale.id);
            stale.resolve(Vec::new());
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(PendingFileRequest { id, callback });

        match picker.launch(&self.request) {
            Ok(()) => {
                log::info!("file picker launched for request #{id} ({})", self.request.mime_filter);
                true
            },
            Err(e) => {
                log::warn!("file picker launch failed for request #{id}: {e}");
                if let Some(pending) = self.pending.take() {
                    pending.resolve(Vec::new());
                }
                false
            },
        }
    }

    /// The picker finished or was cancelled.
    pub fn on_picker_result(&mut self, result: PickerResult) {
        let Some(pending) = self.pending.take() else {
            log::warn!("picker result with no outstanding request, ignored");
            return;
        };
        pending.resolve(selected_uris(result));
    }

    /// Resolve any outstanding request with an empty list. Called when the
    /// hosting screen goes away.
    pub fn release(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::info!("releasing file request #{} on shutdown", pending.id);
            pending.resolve(Vec::new());
        }
    }
}

impl Drop for FileSelectionBridge {
    fn drop(&mut self) {
        self.release();
    }
}

/// Locators in a picker result. Clip items win over the single data URI.
fn selected_uris(result: PickerResult) -> Vec<String> {
    if result.code != ResultCode::Ok {
        return Vec::new();
    }
    let Some(data) = result.data else {
        return Vec::new();
    };
    match (data.clip_items, data.data_uri) {
        (Some(items), _) => items,
        (None, Some(uri)) => vec![uri],
        (None, None) => Vec::new(),
    }
}
