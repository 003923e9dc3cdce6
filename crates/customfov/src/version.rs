use std::ffi::{CStr, c_char};

use anyhow::{Context, Result, bail};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::core::{s, w};

/// Read the game version string published by the mod loader.
///
/// `loader.dll` exports `GameVersion` as a `const char*` variable.
pub fn game_version() -> Result<String> {
    // SAFETY: plain module lookup, no reference count is taken.
    let loader = unsafe { GetModuleHandleW(w!("loader.dll")) }
        .context("loader.dll is not loaded")?;
    // SAFETY: `loader` is a live module handle.
    let symbol = unsafe { GetProcAddress(loader, s!("GameVersion")) }
        .context("loader.dll does not export GameVersion")?;

    let slot = symbol as usize as *const *const c_char;
    // SAFETY: the export is a `const char*` set up before plugins load.
    let version = unsafe { *slot };
    if version.is_null() {
        bail!("GameVersion is not set");
    }
    // SAFETY: the loader stores a NUL-terminated string.
    let version = unsafe { CStr::from_ptr(version) };
    Ok(version.to_string_lossy().into_owned())
}
