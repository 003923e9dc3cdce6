//! Per-update camera pipeline and plugin attach

use std::path::PathBuf;

use tracing::{debug, info};

use crate::camera::{CameraId, CameraSnapshot, ClassifierState, describe_adjustment};
use crate::config::{ConfigStore, ReloadOutcome, UserConfig};
use crate::error::{Error, Result};
use crate::hook::{
    CameraDetours, CameraHooks, HookBackend, HostProfile, InlineHook, install_camera_hooks,
};
use crate::memory::layout::camera;
use crate::memory::{ReadMemory, WriteMemory};

/// One applied camera update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUpdate {
    pub state: ClassifierState,
    pub old: CameraSnapshot,
    pub new: CameraSnapshot,
}

/// Plugin state threaded through every hooked camera call
#[derive(Debug)]
pub struct Plugin {
    store: ConfigStore,
    state: ClassifierState,
}

impl Plugin {
    pub fn new<P: Into<PathBuf>>(config_path: P) -> Self {
        Self {
            store: ConfigStore::new(config_path),
            state: ClassifierState::new(),
        }
    }

    pub fn config(&self) -> &UserConfig {
        self.store.config()
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    pub fn refresh_config(&mut self) -> ReloadOutcome {
        self.store.reload()
    }

    /// Rescale the view params of the camera object at `camera` in place.
    ///
    /// Must run after the game's own camera function so the values read are
    /// the vanilla ones for this frame.
    pub fn on_camera_update<M: WriteMemory + ?Sized>(
        &mut self,
        memory: &mut M,
        camera: u64,
    ) -> Result<CameraUpdate> {
        if camera == 0 {
            return Err(Error::NullAddress);
        }
        let view_params = camera + camera::VIEW_PARAMS;
        let old = CameraSnapshot::read(&*memory, view_params)?;
        let camera_id = CameraId(memory.read_u32(camera + camera::CAMERA_ID)?);

        self.state = self.state.update(camera_id);
        let new = old.adjust(&self.state, self.store.config());
        debug!("{}", describe_adjustment(&self.state, &old, &new));
        new.write(memory, view_params)?;

        Ok(CameraUpdate {
            state: self.state,
            old,
            new,
        })
    }
}

/// Plugin state plus the hooks that feed it
pub struct Attached<H: InlineHook> {
    pub plugin: Plugin,
    pub hooks: CameraHooks<H>,
}

/// Resolve the host profile for `version` and prepare hooks for both
/// camera functions.
///
/// The hooks come back inactive: publish the trampolines where the detours
/// can find them, then call [`CameraHooks::enable_all`].
///
/// # Safety
///
/// See [`install_camera_hooks`]; `memory` must be able to read the code at
/// the profile's target addresses.
pub unsafe fn attach<B, R>(
    version: &str,
    backend: &mut B,
    memory: &R,
    detours: CameraDetours,
) -> Result<Attached<B::Hook>>
where
    B: HookBackend,
    R: ReadMemory + ?Sized,
{
    let profile = HostProfile::detect(version)?;
    info!("Game version {} (config: {})", version, profile.config_path);

    // SAFETY: forwarded to the caller.
    let hooks = unsafe { install_camera_hooks(backend, memory, &profile.targets, detours)? };

    let mut plugin = Plugin::new(profile.config_path);
    plugin.refresh_config();

    Ok(Attached { plugin, hooks })
}
