use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Identifies one screen × activity × virtual desktop combination.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurfaceId {
    pub screen: u32,
    pub activity: u32,
    pub desktop: u32,
}

impl SurfaceId {
    pub const fn new(screen: u32, activity: u32, desktop: u32) -> SurfaceId {
        SurfaceId { screen, activity, desktop }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.screen, self.activity, self.desktop)
    }
}

/// The unit layouts are selected and applied per.
///
/// Surfaces are plain values handed out by the host; the engine never keeps one
/// around longer than a single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: SurfaceId,
    /// Ignored surfaces never tile; they always resolve to the floating layout.
    pub ignore: bool,
    pub working_area: Rect,
}

impl Surface {
    pub fn new(id: SurfaceId, working_area: Rect) -> Surface {
        Surface { id, ignore: false, working_area }
    }

    pub fn ignored(mut self) -> Surface {
        self.ignore = true;
        self
    }

    pub fn screen(&self) -> u32 { self.id.screen }
}
