//! Native chrome for the Echoes host: the hideable bottom toolbar.

pub mod animation;
pub mod toolbar;

pub use toolbar::{ToolbarCommand, ToolbarController, ToolbarTrack, ToolbarVisibility};
