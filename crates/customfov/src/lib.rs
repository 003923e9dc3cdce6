//! # customfov
//!
//! CustomFOV plugin DLL. Hooks the game's camera functions on process
//! attach and rescales every camera update with `customfov-core`.

pub mod logging;

#[cfg(target_os = "windows")]
mod backend;
#[cfg(target_os = "windows")]
mod entry;
#[cfg(target_os = "windows")]
mod runtime;
#[cfg(target_os = "windows")]
mod version;
