//! DLL entry point

use std::ffi::c_void;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};
use windows::Win32::Foundation::{BOOL, FALSE, HINSTANCE, TRUE};
use windows::Win32::System::SystemServices::{DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH};

use crate::{logging, runtime, version};

fn attach_plugin() -> Result<()> {
    let version = version::game_version()?;
    runtime::start(&version)
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DllMain(_module: HINSTANCE, reason: u32, _reserved: *mut c_void) -> BOOL {
    match reason {
        DLL_PROCESS_ATTACH => {
            if let Err(e) = logging::init(Path::new(logging::LOG_FILE)) {
                eprintln!("CustomFOV: {:#}", e);
            }
            info!("Attaching plugin...");
            if let Err(e) = attach_plugin() {
                error!("{:#}", e);
                return FALSE;
            }
            info!("Success!");
        }
        DLL_PROCESS_DETACH => {
            runtime::stop();
            info!("Plugin detached.");
        }
        _ => {}
    }
    TRUE
}
