//! Export core modules shared by the CLI and embedding callers.

#[cfg(feature = "excel")]
pub mod excel_core;
