//! # customfov-core
//!
//! Core library for the CustomFOV camera plugin.
//!
//! This crate provides:
//! - Camera context classification (hub, room, quest) from camera ids
//! - Ratio-preserving rescale of FOV, distance, height and shift
//! - User configuration with inheritance and live reload
//! - Game memory accessors and byte-signature verification
//! - Hook installation over a pluggable hooking backend

pub mod camera;
pub mod config;
pub mod error;
pub mod hook;
pub mod memory;
pub mod plugin;

pub use camera::{
    BaselineParams, CameraId, CameraSnapshot, ClassifierState, Context, classify,
    describe_adjustment,
};
pub use config::{ConfigStore, ReloadOutcome, Settings, UserConfig};
pub use error::{Error, Result};
pub use hook::{
    CAMERA_TARGETS_421810, CameraDetours, CameraHooks, CameraTargets, FunctionSignature,
    HookBackend, HookTarget, HostProfile, InlineHook, install_camera_hooks,
};
pub use memory::{HostMemory, ReadMemory, WriteMemory};
pub use plugin::{Attached, CameraUpdate, Plugin, attach};
