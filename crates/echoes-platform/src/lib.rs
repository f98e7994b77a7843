//! Service traits the host core drives.
//!
//! The rendering engine, the OS URL dispatcher, the system file picker and
//! the toolbar animation are external collaborators. Each is a trait here so
//! the core can be exercised without a webview.

pub mod services;

pub use echoes_types::event::PickerRequest;
pub use services::{
    DefaultBackHandler, FilePicker, NoFilePicker, RenderingSurface, ToolbarAnimator,
    UrlDispatcher,
};
