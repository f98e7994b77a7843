//! Foundation types for the Echoes host shell.
//!
//! This crate contains the embedder-agnostic types shared by all Echoes
//! crates: the error enum, the fixed host configuration, and the event
//! data that flows from the rendering surface into the host.

pub mod config;
pub mod error;
pub mod event;
