use std::f32::consts::PI;

use crate::camera::Context;
use crate::error::Result;
use crate::memory::layout::view_params;
use crate::memory::{ReadMemory, WriteMemory};

/// Camera view parameters as read from the view params record.
///
/// `distance` is kept positive here; the game stores it negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub shift: f32,
    pub height: f32,
    pub distance: f32,
    pub fov: f32,
}

impl CameraSnapshot {
    /// Read a snapshot from the view params record at `address`
    pub fn read<R: ReadMemory + ?Sized>(memory: &R, address: u64) -> Result<Self> {
        let mut raw = [0u8; view_params::SPAN];
        memory.read_into(address, &mut raw)?;
        let field = |offset: u64| {
            let start = offset as usize;
            let mut word = [0u8; 4];
            word.copy_from_slice(&raw[start..start + 4]);
            f32::from_le_bytes(word)
        };

        Ok(Self {
            shift: field(view_params::SHIFT),
            height: field(view_params::HEIGHT),
            distance: -field(view_params::DISTANCE),
            fov: field(view_params::FOV),
        })
    }

    /// Write the snapshot back to the view params record at `address`.
    ///
    /// Only the four fields are touched; surrounding bytes are left as is.
    pub fn write<W: WriteMemory + ?Sized>(&self, memory: &mut W, address: u64) -> Result<()> {
        memory.write_f32(address + view_params::SHIFT, self.shift)?;
        memory.write_f32(address + view_params::HEIGHT, self.height)?;
        memory.write_f32(address + view_params::DISTANCE, -self.distance)?;
        memory.write_f32(address + view_params::FOV, self.fov)?;
        Ok(())
    }
}

/// Unmodified game camera parameters for a context
pub struct BaselineParams;

impl BaselineParams {
    pub const HUB: CameraSnapshot = CameraSnapshot {
        fov: 53.0,
        distance: 350.0,
        height: 170.0,
        shift: 0.0,
    };

    pub const ROOM: CameraSnapshot = CameraSnapshot {
        fov: 51.0,
        distance: 260.0,
        height: 160.0,
        shift: -50.0,
    };

    pub const QUEST: CameraSnapshot = CameraSnapshot {
        fov: 53.0,
        distance: 380.0,
        height: 180.0,
        shift: 0.0,
    };

    pub fn for_context(context: Context) -> CameraSnapshot {
        match context {
            Context::Hub => Self::HUB,
            Context::Room => Self::ROOM,
            Context::Quest => Self::QUEST,
        }
    }
}

/// `tan` of the half angle; FOV changes compose multiplicatively here
pub fn proj_scale_from_fov(fov: f32) -> f32 {
    (PI / 360.0 * fov).tan()
}

pub fn fov_from_proj_scale(proj_scale: f32) -> f32 {
    360.0 / PI * proj_scale.atan()
}
