use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

/// Kind of scene the camera is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Context {
    Hub,
    Room,
    Quest,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Camera preset id written by the game into the camera object.
///
/// Ids are opaque; only the named ones below carry meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CameraId(pub u32);

impl CameraId {
    pub const NORMAL: Self = Self(0);
    pub const SPRINT: Self = Self(3);

    pub const COMBAT: Self = Self(83);

    pub const BASE_HUB: Self = Self(85);
    pub const BASE_HUB_SPRINT: Self = Self(86);

    pub const LIVING_QUARTERS: Self = Self(118);
    pub const PRIVATE_QUARTERS: Self = Self(119);
    pub const PRIVATE_SUITE: Self = Self(120);

    /// Photo mode camera; never adjusted
    pub const SURVEYOR_SET: Self = Self(147);

    pub const SELIANA: Self = Self(252);
    pub const SELIANA_SPRINT: Self = Self(253);
    pub const SELIANA_HUB: Self = Self(254);
    pub const SELIANA_HUB_SPRINT: Self = Self(255);
    pub const SELIANA_ROOM: Self = Self(256);

    pub fn sets_hub_context(self) -> bool {
        HUB_CAMERA_IDS.contains(&self)
    }

    pub fn sets_room_context(self) -> bool {
        ROOM_CAMERA_IDS.contains(&self)
    }

    pub fn sets_quest_context(self) -> bool {
        QUEST_CAMERA_IDS.contains(&self)
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for CameraId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

const HUB_CAMERA_IDS: [CameraId; 6] = [
    CameraId::BASE_HUB,
    CameraId::BASE_HUB_SPRINT,
    CameraId::SELIANA,
    CameraId::SELIANA_SPRINT,
    CameraId::SELIANA_HUB,
    CameraId::SELIANA_HUB_SPRINT,
];

const ROOM_CAMERA_IDS: [CameraId; 4] = [
    CameraId::LIVING_QUARTERS,
    CameraId::PRIVATE_QUARTERS,
    CameraId::PRIVATE_SUITE,
    CameraId::SELIANA_ROOM,
];

const QUEST_CAMERA_IDS: [CameraId; 3] = [CameraId::NORMAL, CameraId::SPRINT, CameraId::COMBAT];

/// Derive the context after observing `camera_id`.
///
/// Ids outside every set leave `previous` in place. Sets are checked
/// hub, room, quest; a later match wins.
pub fn classify(previous: Context, camera_id: CameraId) -> Context {
    let mut context = previous;
    if camera_id.sets_hub_context() {
        context = Context::Hub;
    }
    if camera_id.sets_room_context() {
        context = Context::Room;
    }
    if camera_id.sets_quest_context() {
        context = Context::Quest;
    }
    context
}

/// Sticky camera context together with the last observed raw id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierState {
    pub context: Context,
    pub camera_id: CameraId,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self {
            context: Context::Quest,
            camera_id: CameraId::NORMAL,
        }
    }

    /// Transition on a newly observed camera id
    pub fn update(self, camera_id: CameraId) -> Self {
        Self {
            context: classify(self.context, camera_id),
            camera_id,
        }
    }
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self::new()
    }
}
