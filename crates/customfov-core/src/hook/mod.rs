//! Hook installation for the camera functions
//!
//! The actual code patching is done by a [`HookBackend`] supplied by the
//! plugin. This module only decides what gets hooked and verifies it first.

mod signature;
mod targets;

pub use signature::{FunctionSignature, format_pattern, matches_pattern, parse_pattern};
pub use targets::{CAMERA_TARGETS_421810, CameraTargets, HostProfile};

use std::fmt;

use strum::{Display, IntoStaticStr};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum HookTarget {
    InitCamera,
    UpdateCamera,
}

/// An inline hook created by a [`HookBackend`]
pub trait InlineHook {
    /// Entry point that runs the unpatched function
    fn original(&self) -> *const ();

    /// Start redirecting the target to the detour
    fn enable(&mut self) -> std::result::Result<(), String>;

    /// Restore the original function
    fn remove(&mut self) -> std::result::Result<(), String>;
}

/// Creates inline hooks redirecting a function to a detour
pub trait HookBackend {
    type Hook: InlineHook;
    type Error: fmt::Display;

    /// Prepare a hook of `target` that jumps to `detour`. The hook stays
    /// inactive until [`InlineHook::enable`] is called.
    ///
    /// # Safety
    ///
    /// `target` must be the entry of a function whose signature matches
    /// `detour`'s, and no thread may be executing its first bytes.
    unsafe fn create(
        &mut self,
        target: u64,
        detour: *const (),
    ) -> std::result::Result<Self::Hook, Self::Error>;
}

/// Detour entry points for both camera functions
#[derive(Debug, Clone, Copy)]
pub struct CameraDetours {
    pub init_camera: *const (),
    pub update_camera: *const (),
}

pub struct CameraHooks<H: InlineHook> {
    pub targets: CameraTargets,
    pub init_camera: H,
    pub update_camera: H,
}

impl<H: InlineHook> CameraHooks<H> {
    fn each_mut(&mut self) -> [(&FunctionSignature, &mut H); 2] {
        [
            (&self.targets.init_camera, &mut self.init_camera),
            (&self.targets.update_camera, &mut self.update_camera),
        ]
    }

    /// Activate both hooks.
    ///
    /// If the second one fails the first stays active.
    pub fn enable_all(&mut self) -> Result<()> {
        for (signature, hook) in self.each_mut() {
            debug!("Enabling hook for {}", signature.target);
            hook.enable().map_err(|reason| {
                let err = Error::HookInstall {
                    target: signature.target,
                    address: signature.address,
                    reason,
                };
                error!("{}", err);
                err
            })?;
        }
        Ok(())
    }

    /// Remove both hooks; failures are logged and otherwise ignored
    pub fn remove_all(&mut self) {
        info!("Resetting hooks...");
        for (signature, hook) in self.each_mut() {
            if let Err(reason) = hook.remove() {
                error!("Failed to remove hook for {}: {}", signature.target, reason);
            }
        }
    }
}

/// Verify both targets, then create (inactive) hooks for them.
///
/// Nothing is created unless both signatures match.
///
/// # Safety
///
/// `detours` must hold functions with the same ABI and argument lists as the
/// game functions described by `targets`.
pub unsafe fn install_camera_hooks<B, R>(
    backend: &mut B,
    memory: &R,
    targets: &CameraTargets,
    detours: CameraDetours,
) -> Result<CameraHooks<B::Hook>>
where
    B: HookBackend,
    R: ReadMemory + ?Sized,
{
    for signature in targets.iter() {
        signature.verify(memory)?;
    }

    // SAFETY: signatures verified above; detour ABI is the caller's contract.
    let init_camera = unsafe { create_hook(backend, &targets.init_camera, detours.init_camera)? };
    let update_camera =
        unsafe { create_hook(backend, &targets.update_camera, detours.update_camera)? };

    Ok(CameraHooks {
        targets: *targets,
        init_camera,
        update_camera,
    })
}

unsafe fn create_hook<B: HookBackend>(
    backend: &mut B,
    signature: &FunctionSignature,
    detour: *const (),
) -> Result<B::Hook> {
    debug!(
        "Creating hook for {} at {:#x}",
        signature.target, signature.address
    );
    // SAFETY: forwarded from `install_camera_hooks`.
    unsafe { backend.create(signature.address, detour) }.map_err(|e| {
        let err = Error::HookInstall {
            target: signature.target,
            address: signature.address,
            reason: e.to_string(),
        };
        error!("{}", err);
        err
    })
}


#[cfg(test)]
mod tests {
    use super::fake::FakeBackend;
    use super::*;
    use crate::memory::{MockMemory, MockMemoryBuilder};

    const TARGETS: CameraTargets = CameraTargets {
        init_camera: FunctionSignature {
            target: HookTarget::InitCamera,
            address: 0x1000,
            pattern: "48 89 5C",
        },
        update_camera: FunctionSignature {
            target: HookTarget::UpdateCamera,
            address: 0x1010,
            pattern: "48 81 EC",
        },
    };

    const DETOURS: CameraDetours = CameraDetours {
        init_camera: 0xA000 as *const (),
        update_camera: 0xB000 as *const (),
    };

    fn code(update_bytes: &[u8]) -> MockMemory {
        MockMemoryBuilder::new()
            .base(0x1000)
            .with_bytes_at(0x00, &[0x48, 0x89, 0x5C])
            .with_bytes_at(0x10, update_bytes)
            .build()
    }

    #[test]
    fn test_install_hooks_both_targets() {
        let mut backend = FakeBackend::default();
        let hooks =
            unsafe { install_camera_hooks(&mut backend, &code(&[0x48, 0x81, 0xEC]), &TARGETS, DETOURS) }
                .unwrap();
        assert_eq!(backend.created, vec![0x1000, 0x1010]);
        assert_eq!(hooks.init_camera.detour, 0xA000);
        assert_eq!(hooks.update_camera.original() as usize, 0x1010);
        assert!(!hooks.init_camera.enabled && !hooks.update_camera.enabled);
    }

    #[test]
    fn test_enable_all_activates_both() {
        let mut backend = FakeBackend::default();
        let mut hooks =
            unsafe { install_camera_hooks(&mut backend, &code(&[0x48, 0x81, 0xEC]), &TARGETS, DETOURS) }
                .unwrap();
        hooks.enable_all().unwrap();
        assert!(hooks.init_camera.enabled && hooks.update_camera.enabled);
    }

    #[test]
    fn test_enable_failure_names_target() {
        let mut backend = FakeBackend::default();
        let mut hooks =
            unsafe { install_camera_hooks(&mut backend, &code(&[0x48, 0x81, 0xEC]), &TARGETS, DETOURS) }
                .unwrap();
        hooks.update_camera.fail_enable = true;
        match hooks.enable_all() {
            Err(Error::HookInstall {
                target, address, ..
            }) => {
                assert_eq!(target, HookTarget::UpdateCamera);
                assert_eq!(address, 0x1010);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(hooks.init_camera.enabled);
    }

    #[test]
    fn test_signature_mismatch_installs_nothing() {
        let mut backend = FakeBackend::default();
        let result =
            unsafe { install_camera_hooks(&mut backend, &code(&[0xCC, 0xCC, 0xCC]), &TARGETS, DETOURS) };
        assert!(matches!(
            result,
            Err(Error::SignatureMismatch {
                target: HookTarget::UpdateCamera,
                ..
            })
        ));
        assert!(backend.created.is_empty());
    }

    #[test]
    fn test_backend_failure_is_reported() {
        let mut backend = FakeBackend {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let result =
            unsafe { install_camera_hooks(&mut backend, &code(&[0x48, 0x81, 0xEC]), &TARGETS, DETOURS) };
        match result {
            Err(Error::HookInstall { target, reason, .. }) => {
                assert_eq!(target, HookTarget::UpdateCamera);
                assert_eq!(reason, "not enough space");
            }
            _ => panic!("expected hook install failure"),
        }
    }

    #[test]
    fn test_remove_all_is_best_effort() {
        let mut backend = FakeBackend::default();
        let mut hooks =
            unsafe { install_camera_hooks(&mut backend, &code(&[0x48, 0x81, 0xEC]), &TARGETS, DETOURS) }
                .unwrap();
        hooks.init_camera.fail_remove = true;
        hooks.remove_all();
        assert!(!hooks.init_camera.removed);
        assert!(hooks.update_camera.removed);
    }

    #[test]
    fn test_target_names() {
        assert_eq!(HookTarget::InitCamera.to_string(), "init_camera");
        assert_eq!(HookTarget::UpdateCamera.to_string(), "update_camera");
    }
}
