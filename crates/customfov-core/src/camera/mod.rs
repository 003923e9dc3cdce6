//! Camera context classification and view parameter rescaling

mod adjust;
mod context;
mod params;

pub use adjust::describe_adjustment;
pub use context::{CameraId, ClassifierState, Context, classify};
pub use params::{BaselineParams, CameraSnapshot, fov_from_proj_scale, proj_scale_from_fov};
