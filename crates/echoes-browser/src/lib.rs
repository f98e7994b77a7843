//! Browser-host integration layer.
//!
//! Event bridges between the embedded rendering surface and the OS:
//! navigation routing ([`policy`]), the scroll-driven toolbar
//! ([`BrowserHost::on_scroll`]), the one-shot file-selection handoff
//! ([`bridge`]) and back-action delegation ([`back`]). Everything runs on
//! the embedder's event-dispatch thread; nothing here locks.

pub mod back;
pub mod bridge;
pub mod host;
pub mod ipc;
pub mod nav;
pub mod policy;
pub mod scroll;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use back::{BackNavigationDelegate, BackOutcome};
pub use bridge::{FileCallback, FileSelectionBridge};
pub use host::BrowserHost;
pub use ipc::{PAGE_BRIDGE_JS, PageMessage};
pub use nav::{BackStep, SessionHistory};
pub use policy::{NavigationDecision, decide, route};
pub use scroll::ScrollTracker;
