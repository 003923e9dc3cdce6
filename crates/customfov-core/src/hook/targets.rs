use crate::error::{Error, Result};
use crate::hook::{FunctionSignature, HookTarget};

/// Hook targets of build 421810
pub const CAMERA_TARGETS_421810: CameraTargets = CameraTargets {
    init_camera: FunctionSignature {
        target: HookTarget::InitCamera,
        address: 0x1_41FA_0FE0,
        pattern: "48 89 5C 24 08 48 89 74 24 10 57 48 83 EC 20",
    },
    update_camera: FunctionSignature {
        target: HookTarget::UpdateCamera,
        address: 0x1_41FA_6BE0,
        pattern: "48 89 5C 24 10 48 89 74 24 18 57 48 81 EC 90 00 00 00 48 8B D9",
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraTargets {
    pub init_camera: FunctionSignature,
    pub update_camera: FunctionSignature,
}

impl CameraTargets {
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        [&self.init_camera, &self.update_camera].into_iter()
    }
}

/// Per-version paths and hook targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    /// Config file, relative to the game directory
    pub config_path: &'static str,
    pub targets: CameraTargets,
}

impl HostProfile {
    /// Select the profile for a game version string (e.g. "421810")
    pub fn detect(version: &str) -> Result<Self> {
        let config_path = if version.starts_with("314") {
            "ICE/ntPC/plugins/CustomFOV.toml"
        } else if version.starts_with("421") {
            "nativePC/plugins/CustomFOV.toml"
        } else {
            return Err(Error::UnsupportedVersion(version.to_string()));
        };

        Ok(Self {
            config_path,
            targets: CAMERA_TARGETS_421810,
        })
    }
}
