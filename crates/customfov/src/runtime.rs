//! Process-wide plugin state and the detour functions

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use customfov_core::{Attached, CameraDetours, CameraHooks, HostMemory, InlineHook, Plugin, attach};
use tracing::{error, info};

use crate::backend::{RetourBackend, RetourHook};

type InitCameraFn = unsafe extern "C" fn(camera: usize, camera_id: i32);
type UpdateCameraFn =
    unsafe extern "C" fn(camera: usize, view_param: usize, interp_param: usize, param4: f32);

struct Runtime {
    plugin: Plugin,
    hooks: CameraHooks<RetourHook>,
}

// The game calls both camera functions from its main thread only.
static RUNTIME: Mutex<Option<Runtime>> = Mutex::new(None);

static INIT_CAMERA_ORIGINAL: AtomicUsize = AtomicUsize::new(0);
static UPDATE_CAMERA_ORIGINAL: AtomicUsize = AtomicUsize::new(0);

fn lock_runtime() -> MutexGuard<'static, Option<Runtime>> {
    RUNTIME.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn refresh_config() {
    if let Some(runtime) = lock_runtime().as_mut() {
        runtime.plugin.refresh_config();
    }
}

fn apply_camera_update(camera: usize) {
    if let Some(runtime) = lock_runtime().as_mut() {
        // SAFETY: `camera` is the live camera object the game just updated.
        let mut memory = unsafe { HostMemory::new() };
        if let Err(e) = runtime.plugin.on_camera_update(&mut memory, camera as u64) {
            error!("Camera update failed: {}", e);
        }
    }
}

unsafe extern "C" fn init_camera_detour(camera: usize, camera_id: i32) {
    refresh_config();
    let original = INIT_CAMERA_ORIGINAL.load(Ordering::Acquire);
    // SAFETY: published from the trampoline before the hook was enabled.
    let original = unsafe { mem::transmute::<usize, InitCameraFn>(original) };
    unsafe { original(camera, camera_id) };
    apply_camera_update(camera);
}

unsafe extern "C" fn update_camera_detour(
    camera: usize,
    view_param: usize,
    interp_param: usize,
    param4: f32,
) {
    refresh_config();
    let original = UPDATE_CAMERA_ORIGINAL.load(Ordering::Acquire);
    // SAFETY: published from the trampoline before the hook was enabled.
    let original = unsafe { mem::transmute::<usize, UpdateCameraFn>(original) };
    unsafe { original(camera, view_param, interp_param, param4) };
    apply_camera_update(camera);
}

/// Verify and hook both camera functions, then start adjusting
pub fn start(version: &str) -> Result<()> {
    let detours = CameraDetours {
        init_camera: init_camera_detour as *const (),
        update_camera: update_camera_detour as *const (),
    };
    // SAFETY: code reads only touch the verified target addresses.
    let memory = unsafe { HostMemory::new() };
    let mut backend = RetourBackend;

    // SAFETY: the detours above mirror the game's function signatures.
    let Attached { plugin, mut hooks } =
        unsafe { attach(version, &mut backend, &memory, detours) }
            .context("Failed to prepare camera hooks")?;

    INIT_CAMERA_ORIGINAL.store(hooks.init_camera.original() as usize, Ordering::Release);
    UPDATE_CAMERA_ORIGINAL.store(hooks.update_camera.original() as usize, Ordering::Release);

    let mut runtime = lock_runtime();
    hooks.enable_all().context("Failed to enable camera hooks")?;
    *runtime = Some(Runtime { plugin, hooks });
    Ok(())
}

/// Remove the hooks; best effort
pub fn stop() {
    if let Some(mut runtime) = lock_runtime().take() {
        runtime.hooks.remove_all();
        info!("Last camera context: {}", runtime.plugin.state().context);
    }
}
