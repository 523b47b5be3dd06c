//! Artifact loading for the fitted scaler/classifier pair.
//!
//! The pair is read once at startup; any failure degrades the service
//! instead of aborting it.

pub mod demo;
pub mod fs_store;
