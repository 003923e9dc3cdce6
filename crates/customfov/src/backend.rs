//! Inline hooking backed by `retour`

use customfov_core::{HookBackend, InlineHook};
use retour::RawDetour;

#[derive(Debug, Default)]
pub struct RetourBackend;

pub struct RetourHook(RawDetour);

// SAFETY: the detour only holds addresses of process-global code and its
// trampoline; it is created, enabled and removed under the runtime lock.
unsafe impl Send for RetourHook {}

impl InlineHook for RetourHook {
    fn original(&self) -> *const () {
        self.0.trampoline() as *const ()
    }

    fn enable(&mut self) -> Result<(), String> {
        // SAFETY: the target's bytes were verified against its signature.
        unsafe { self.0.enable() }.map_err(|e| e.to_string())
    }

    fn remove(&mut self) -> Result<(), String> {
        if !self.0.is_enabled() {
            return Ok(());
        }
        // SAFETY: restores the bytes saved when the detour was created.
        unsafe { self.0.disable() }.map_err(|e| e.to_string())
    }
}

impl HookBackend for RetourBackend {
    type Hook = RetourHook;
    type Error = retour::Error;

    unsafe fn create(&mut self, target: u64, detour: *const ()) -> Result<RetourHook, retour::Error> {
        // SAFETY: forwarded from the caller.
        let detour = unsafe { RawDetour::new(target as usize as *const (), detour)? };
        Ok(RetourHook(detour))
    }
}
