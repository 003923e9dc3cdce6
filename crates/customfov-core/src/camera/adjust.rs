use std::fmt::Write as _;

use crate::camera::params::{fov_from_proj_scale, proj_scale_from_fov};
use crate::camera::{BaselineParams, CameraId, CameraSnapshot, ClassifierState, Context};
use crate::config::UserConfig;

impl CameraSnapshot {
    /// Rescale the game's camera parameters according to the user config.
    ///
    /// FOV keeps its deviation from the context baseline (cutscene kicks,
    /// zooms) as a ratio in projection-scale space, re-centered on the
    /// configured FOV. Distance and height are scaled directly.
    pub fn adjust(&self, state: &ClassifierState, config: &UserConfig) -> Self {
        if state.camera_id == CameraId::SURVEYOR_SET {
            return *self;
        }

        let settings = config.get_settings(state.context);
        let baseline = BaselineParams::for_context(state.context);

        let current_ratio = proj_scale_from_fov(self.fov) / proj_scale_from_fov(baseline.fov);
        let adjusted_fov = fov_from_proj_scale(proj_scale_from_fov(settings.fov) * current_ratio);

        let disable_shift = config.disable_room_shift && state.context == Context::Room;

        Self {
            fov: adjusted_fov.round(),
            distance: (self.distance * settings.distance).round(),
            height: (self.height * settings.height).round(),
            shift: if disable_shift { 0.0 } else { self.shift },
        }
    }
}

/// Build the per-update diagnostic line, e.g.
/// `quest   0 fov 53 > 60, distance 380 > 456, height 180, shift 0`
pub fn describe_adjustment(
    state: &ClassifierState,
    old: &CameraSnapshot,
    new: &CameraSnapshot,
) -> String {
    let fields = [
        ("fov", old.fov, new.fov),
        ("distance", old.distance, new.distance),
        ("height", old.height, new.height),
        ("shift", old.shift, new.shift),
    ];

    let mut line = format!("{} {:>3} ", state.context, state.camera_id);
    for (i, (name, old_value, new_value)) in fields.into_iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        let _ = write!(line, "{name} {old_value:.0}");
        if old_value != new_value {
            let _ = write!(line, " > {new_value:.0}");
        }
    }
    line
}
