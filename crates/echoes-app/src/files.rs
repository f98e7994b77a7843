//! Picked-file registry.
//!
//! A page running on an https origin cannot read `file://` paths, so every
//! file the user picks is registered here and handed to the page as an
//! opaque locator under the `echoes-file` custom protocol. The protocol
//! handler serves the bytes back from this registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use echoes_types::error::{EchoesError, Result};
use echoes_types::event::PickerResult;
use url::Url;

/// Custom protocol name registered on the content webview.
pub const FILE_SCHEME: &str = "echoes-file";

/// Extensions offered for an `image/*` filter.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "avif", "heic", "heif",
];

/// Origin the webview exposes the custom protocol under.
///
/// WebView2 maps custom protocols onto `https://<name>.localhost`; WebKit
/// engines use the scheme directly.
pub fn scheme_base() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "https://echoes-file.localhost"
    }
    #[cfg(not(target_os = "windows"))]
    {
        "echoes-file://localhost"
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    paths: HashMap<u64, PathBuf>,
}

/// Shared between the event loop and the protocol handler threads.
#[derive(Debug, Clone, Default)]
pub struct PickedFiles {
    inner: Arc<Mutex<Registry>>,
}

impl PickedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and return its locator.
    pub fn register(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| EchoesError::Picker(format!("unusable file name: {}", path.display())))?;

        let token = {
            let mut reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            reg.next_token += 1;
            let token = reg.next_token;
            reg.paths.insert(token, path.to_path_buf());
            token
        };

        let mut url = Url::parse(&format!("{}/", scheme_base()))?;
        url.path_segments_mut()
            .map_err(|()| EchoesError::Picker("file scheme cannot carry a path".into()))?
            .pop_if_empty()
            .push(&token.to_string())
            .push(name);
        Ok(url.into())
    }

    /// Look up the file behind a request path of the form `/<token>/<name>`.
    pub fn lookup(&self, request_path: &str) -> Option<PathBuf> {
        let token: u64 = request_path
            .trim_start_matches('/')
            .split('/')
            .next()?
            .parse()
            .ok()?;
        let reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        reg.paths.get(&token).cloned()
    }

    /// Read a registered file. Returns the bytes and their MIME type.
    pub fn read(&self, request_path: &str) -> Result<(Vec<u8>, &'static str)> {
        let path = self
            .lookup(request_path)
            .ok_or_else(|| EchoesError::Picker(format!("unknown picked file: {request_path}")))?;
        let bytes = std::fs::read(&path)?;
        Ok((bytes, mime_for_path(&path)))
    }

    /// Turn a picker answer into a [`PickerResult`]. `None` means cancelled.
    ///
    /// Files that cannot be registered are skipped.
    pub fn selection_result(&self, paths: Option<Vec<PathBuf>>, multiple: bool) -> PickerResult {
        let Some(paths) = paths else {
            return PickerResult::cancelled();
        };
        let uris: Vec<String> = paths
            .iter()
            .filter_map(|p| match self.register(p) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    log::warn!("skipping picked file: {e}");
                    None
                },
            })
            .collect();

        match (multiple, uris.as_slice()) {
            (false, [single]) => PickerResult::single(single.clone()),
            _ => PickerResult::multiple(uris),
        }
    }
}

/// Numbers picker launches.
///
/// Dialogs are not modal, so a superseded dialog can still answer. Only the
/// answer to the latest launch may reach the file bridge.
#[derive(Debug, Default)]
pub struct PickerLaunches {
    current: u64,
}

impl PickerLaunches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a launch and return its number.
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, launch: u64) -> bool {
        launch == self.current
    }
}

/// File-dialog extensions for a MIME filter. Empty means "no filter".
pub fn extensions_for_mime(filter: &str) -> Vec<&'static str> {
    match filter {
        "image/*" => IMAGE_EXTENSIONS.to_vec(),
        "image/png" => vec!["png"],
        "image/jpeg" => vec!["jpg", "jpeg"],
        "image/gif" => vec!["gif"],
        "image/webp" => vec!["webp"],
        _ => Vec::new(),
    }
}

/// MIME type served for a picked file.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echoes_types::event::ResultCode;

    #[test]
    fn register_builds_encoded_locator() {
        let files = PickedFiles::new();
        let uri = files.register(Path::new("/tmp/my photo.png")).unwrap();
        assert_eq!(uri, format!("{}/1/my%20photo.png", scheme_base()));
    }

    #[test]
    fn tokens_are_unique() {
        let files = PickedFiles::new();
        let a = files.register(Path::new("/tmp/a.png")).unwrap();
        let b = files.register(Path::new("/tmp/a.png")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_by_request_path() {
        let files = PickedFiles::new();
        files.register(Path::new("/tmp/a.png")).unwrap();
        assert_eq!(files.lookup("/1/a.png"), Some(PathBuf::from("/tmp/a.png")));
        assert_eq!(files.lookup("/2/a.png"), None);
        assert_eq!(files.lookup("/nope"), None);
    }

    #[test]
    fn read_serves_bytes_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.JPG");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let files = PickedFiles::new();
        files.register(&path).unwrap();
        let (bytes, mime) = files.read("/1/pic.JPG").unwrap();
        assert_eq!(bytes, b"\xff\xd8\xff");
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn read_unknown_token_fails() {
        let files = PickedFiles::new();
        assert!(matches!(files.read("/9/x.png"), Err(EchoesError::Picker(_))));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let files = PickedFiles::new();
        files.register(Path::new("/definitely/not/here.png")).unwrap();
        assert!(matches!(files.read("/1/here.png"), Err(EchoesError::Io(_))));
    }

    #[test]
    fn cancelled_selection() {
        let files = PickedFiles::new();
        assert_eq!(files.selection_result(None, true), PickerResult::cancelled());
    }

    #[test]
    fn multi_selection_keeps_order() {
        let files = PickedFiles::new();
        let result = files.selection_result(
            Some(vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")]),
            true,
        );
        assert_eq!(result.code, ResultCode::Ok);
        let items = result.data.unwrap().clip_items.unwrap();
        assert!(items[0].ends_with("/1/a.png"));
        assert!(items[1].ends_with("/2/b.png"));
    }

    #[test]
    fn single_selection_uses_data_uri() {
        let files = PickedFiles::new();
        let result = files.selection_result(Some(vec![PathBuf::from("/tmp/a.png")]), false);
        let data = result.data.unwrap();
        assert!(data.clip_items.is_none());
        assert!(data.data_uri.unwrap().ends_with("/1/a.png"));
    }

    #[test]
    fn only_latest_launch_is_current() {
        let mut launches = PickerLaunches::new();
        let first = launches.begin();
        assert!(launches.is_current(first));
        let second = launches.begin();
        assert!(!launches.is_current(first));
        assert!(launches.is_current(second));
    }

    #[test]
    fn superseded_dialog_answer_does_not_resolve_newer_request() {
        use echoes_browser::FileSelectionBridge;
        use echoes_platform::{FilePicker, PickerRequest};
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Default)]
        struct CountingPicker {
            launches: PickerLaunches,
            opened: Vec<u64>,
        }

        impl FilePicker for CountingPicker {
            fn launch(&mut self, _request: &PickerRequest) -> Result<()> {
                self.opened.push(self.launches.begin());
                Ok(())
            }
        }

        let resolved: Rc<RefCell<Vec<(usize, Vec<String>)>>> = Rc::default();
        let callback = |tag: usize| {
            let resolved = Rc::clone(&resolved);
            Box::new(move |uris: Vec<String>| resolved.borrow_mut().push((tag, uris)))
        };

        let mut bridge = FileSelectionBridge::new(PickerRequest::default());
        let mut picker = CountingPicker::default();
        bridge.on_file_request(callback(0), &mut picker);
        bridge.on_file_request(callback(1), &mut picker);

        // Both dialogs answer, the older one first.
        let answers = [
            (picker.opened[0], "from-dialog-1"),
            (picker.opened[1], "from-dialog-2"),
        ];
        for (launch, uri) in answers {
            if picker.launches.is_current(launch) {
                bridge.on_picker_result(PickerResult::single(uri));
            }
        }

        assert_eq!(
            *resolved.borrow(),
            vec![(0, vec![]), (1, vec!["from-dialog-2".to_string()])]
        );
    }

    #[test]
    fn image_filter_extensions() {
        assert!(extensions_for_mime("image/*").contains(&"png"));
        assert_eq!(extensions_for_mime("image/jpeg"), vec!["jpg", "jpeg"]);
        assert!(extensions_for_mime("*/*").is_empty());
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }
}
