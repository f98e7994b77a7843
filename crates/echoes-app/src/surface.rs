//! The content webview as a [`RenderingSurface`].

use std::borrow::Cow;

use echoes_browser::SessionHistory;
use echoes_browser::ipc::resolve_files_script;
use echoes_platform::RenderingSurface;
use echoes_types::error::{EchoesError, Result};
use wry::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};
use wry::http::{HeaderValue, Response, StatusCode};
use wry::{Rect, WebView};

use crate::files::PickedFiles;

fn surface_err(e: wry::Error) -> EchoesError {
    EchoesError::Surface(e.to_string())
}

/// Content webview plus the session history wry does not expose.
pub struct ContentSurface {
    webview: WebView,
    history: SessionHistory,
}

impl ContentSurface {
    pub fn new(webview: WebView) -> Self {
        Self {
            webview,
            history: SessionHistory::new(),
        }
    }

    /// A top-level load started.
    pub fn record(&mut self, url: &str) {
        self.history.record(url);
    }

    /// The page bridge reported its position in the origin's history.
    pub fn set_page_index(&mut self, index: u32) {
        self.history.set_page_index(index);
    }

    /// Complete page file request `id`.
    pub fn resolve_files(&self, id: u64, uris: &[String]) {
        if let Err(e) = self.webview.evaluate_script(&resolve_files_script(id, uris)) {
            log::warn!("could not deliver files for request {id}: {e}");
        }
    }

    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            log::warn!("content relayout failed: {e}");
        }
    }
}

impl RenderingSurface for ContentSurface {
    fn load_url(&mut self, url: &str) -> Result<()> {
        self.webview.load_url(url).map_err(surface_err)
    }

    fn reload(&mut self) -> Result<()> {
        self.webview.reload().map_err(surface_err)
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn go_back(&mut self) -> Result<()> {
        let step = self
            .history
            .begin_back()
            .ok_or_else(|| EchoesError::Surface("no history entry to go back to".into()))?;
        log::debug!("going back: {step:?}");
        self.webview
            .evaluate_script("history.back();")
            .map_err(surface_err)
    }
}

// ---------------------------------------------------------------------------
// echoes-file protocol
// ---------------------------------------------------------------------------

/// Response for a picked-file request path (`/<token>/<name>`).
pub fn picked_file_response(files: &PickedFiles, path: &str) -> Response<Cow<'static, [u8]>> {
    let (status, mime, body) = match files.read(path) {
        Ok((bytes, mime)) => (StatusCode::OK, mime, bytes),
        Err(e) => {
            log::warn!("picked file unavailable: {e}");
            (StatusCode::NOT_FOUND, "text/plain", Vec::new())
        },
    };

    let mut response = Response::new(Cow::Owned(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
