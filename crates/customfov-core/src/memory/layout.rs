//! Memory layout constants for the game's camera structures
//!
//! All offsets are specific to the supported game build. Constants are
//! organized by structure type.

/// Memory layout constants for the player camera object
pub mod camera {
    /// Start of the view params record inside the camera object
    pub const VIEW_PARAMS: u64 = 0x5D0;

    /// Camera id (u32) selecting the active camera preset
    pub const CAMERA_ID: u64 = 0x13B8;
}

/// Memory layout constants for the view params record
pub mod view_params {
    /// Word size (4 bytes / 32-bit float)
    pub const WORD: u64 = 4;

    pub const SHIFT: u64 = 0x10;
    pub const HEIGHT: u64 = SHIFT + WORD;
    /// Stored negated by the game
    pub const DISTANCE: u64 = SHIFT + WORD * 2;
    /// Vertical field of view in degrees
    pub const FOV: u64 = 0x20;

    /// Bytes covered from the start of the record up to the end of FOV
    pub const SPAN: usize = (FOV + WORD) as usize;
}
