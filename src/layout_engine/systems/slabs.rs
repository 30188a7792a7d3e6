use crate::common::config::Settings;
use crate::layout_engine::systems::{LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;

const CAPACITY: usize = 3;
/// With three slabs the first one is this much taller than the others.
const FIRST_SLAB_BONUS: f64 = 1.5;

/// Full-width slabs stacked from the bottom up, for portrait monitors.
#[derive(Debug, Clone)]
pub struct SlabsLayout {
    gap: f64,
}

impl SlabsLayout {
    pub fn new(settings: &Settings) -> SlabsLayout { SlabsLayout { gap: settings.tile_gap() } }
}

impl WindowsLayout for SlabsLayout {
    fn id(&self) -> LayoutId { LayoutId::Slabs }

    fn name(&self) -> &'static str { "Slabs Layout" }

    fn icon(&self) -> &'static str { "mosaic-slabs" }

    fn capacity(&self) -> Option<usize> { Some(CAPACITY) }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        if tileables.is_empty() {
            return;
        }

        let count = tileables.len().min(CAPACITY);
        let mut size = (area.height - count.saturating_sub(1) as f64 * self.gap) / count as f64;
        let mut first = size;
        if count > 2 {
            first *= FIRST_SLAB_BONUS;
            size = (area.height - first - count as f64 * self.gap) / (count - 1) as f64;
        }

        let mut pos = 0.0;
        for (i, tile) in tileables.iter_mut().enumerate() {
            if i < count {
                let current = if i == 0 { first } else { size };
                tile.set_state(WindowState::Tiled);
                tile.geometry = Rect::new(area.x, area.max_y() - (pos + current), area.width, current);
                pos += self.gap + current;
            } else {
                tile.set_state(WindowState::TiledAfloat);
                tile.geometry = area;
            }
        }
    }
}
