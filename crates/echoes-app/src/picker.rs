//! System file picker backed by `rfd`.
//!
//! The dialog runs on its own thread so the event loop keeps painting. The
//! answer is posted back to the loop as [`UserEvent::PickerResult`], tagged
//! with the launch it belongs to.

use std::path::PathBuf;

use echoes_platform::{FilePicker, PickerRequest};
use echoes_types::error::{EchoesError, Result};
use rfd::AsyncFileDialog;
use tao::event_loop::EventLoopProxy;

use crate::files::{PickedFiles, PickerLaunches, extensions_for_mime};
use crate::shell::UserEvent;

pub struct DesktopPicker {
    proxy: EventLoopProxy<UserEvent>,
    files: PickedFiles,
    launches: PickerLaunches,
    page_multiple: bool,
}

impl DesktopPicker {
    pub fn new(proxy: EventLoopProxy<UserEvent>, files: PickedFiles) -> Self {
        Self {
            proxy,
            files,
            launches: PickerLaunches::new(),
            page_multiple: true,
        }
    }

    /// Whether the file input that triggered the next launch accepts several files.
    pub fn set_page_multiple(&mut self, multiple: bool) {
        self.page_multiple = multiple;
    }

    /// Whether `launch` is the dialog the bridge is waiting for.
    pub fn is_current(&self, launch: u64) -> bool {
        self.launches.is_current(launch)
    }
}

impl FilePicker for DesktopPicker {
    fn launch(&mut self, request: &PickerRequest) -> Result<()> {
        if !request.openable {
            return Err(EchoesError::Picker("only openable files are supported".into()));
        }
        let multiple = request.allow_multiple && self.page_multiple;

        let title = request.title.clone();
        let filter = request.mime_filter.clone();
        let extensions = extensions_for_mime(&filter);

        let launch = self.launches.begin();
        let proxy = self.proxy.clone();
        let files = self.files.clone();
        std::thread::Builder::new()
            .name("echoes-picker".into())
            .spawn(move || {
                let mut dialog = AsyncFileDialog::new().set_title(title);
                if !extensions.is_empty() {
                    dialog = dialog.add_filter(filter, extensions.as_slice());
                }
                let picked: Option<Vec<PathBuf>> = pollster::block_on(async move {
                    if multiple {
                        dialog
                            .pick_files()
                            .await
                            .map(|handles| handles.iter().map(|h| h.path().to_path_buf()).collect())
                    } else {
                        dialog
                            .pick_file()
                            .await
                            .map(|h| vec![h.path().to_path_buf()])
                    }
                });
                let result = files.selection_result(picked, multiple);
                if proxy.send_event(UserEvent::PickerResult { launch, result }).is_err() {
                    log::warn!("event loop closed before the picker answered");
                }
            })
            .map_err(|e| EchoesError::Picker(format!("cannot start picker thread: {e}")))?;

        log::info!("file picker #{launch} opened: {}", request.title);
        Ok(())
    }
}
