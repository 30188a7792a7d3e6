use crate::common::config::Settings;
use crate::common::util::clip;
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout, position_of};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const CAPACITY: usize = 4;
const MAX_PROPORTION: f64 = 0.8;

/// Up to four windows in the quadrants of the area, clockwise from the top
/// left. Windows past the fourth float in place.
#[derive(Debug, Clone)]
pub struct QuarterLayout {
    /// Height share of the top-left quadrant.
    lhsplit: f64,
    /// Height share of the top-right quadrant.
    rhsplit: f64,
    /// Width share of the left column.
    vsplit: f64,
    gap: f64,
}

impl QuarterLayout {
    pub fn new(settings: &Settings) -> QuarterLayout {
        QuarterLayout {
            lhsplit: 0.5,
            rhsplit: 0.5,
            vsplit: 0.5,
            gap: settings.tile_gap(),
        }
    }
}

/// Moves a split so that the border at `floor(length * split)` shifts by
/// `delta` pixels.
fn moved_split(split: f64, length: f64, delta: f64) -> f64 {
    ((length * split).floor() + delta) / length
}

impl WindowsLayout for QuarterLayout {
    fn id(&self) -> LayoutId { LayoutId::Quarter }

    fn name(&self) -> &'static str { "Quarter Layout" }

    fn icon(&self) -> &'static str { "mosaic-quarter" }

    fn capacity(&self) -> Option<usize> { Some(CAPACITY) }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ADJUST }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        for (i, tile) in tileables.iter_mut().enumerate() {
            tile.set_state(if i < CAPACITY { WindowState::Tiled } else { WindowState::TiledAfloat });
        }

        let n = tileables.len();
        if n == 0 {
            return;
        }
        if n == 1 {
            tileables[0].geometry = area;
            return;
        }

        let gap1 = (self.gap / 2.0).floor();
        let gap2 = self.gap - gap1;

        let left_width = (area.width * self.vsplit).floor();
        let right_width = area.width - left_width;
        let right_x = area.x + left_width;

        if n == 2 {
            tileables[0].geometry = Rect::new(area.x, area.y, left_width, area.height).gap(0.0, gap1, 0.0, 0.0);
            tileables[1].geometry = Rect::new(right_x, area.y, right_width, area.height).gap(gap2, 0.0, 0.0, 0.0);
            return;
        }

        let right_top_height = (area.height * self.rhsplit).floor();
        let right_bottom_height = area.height - right_top_height;
        let right_bottom_y = area.y + right_top_height;
        tileables[1].geometry =
            Rect::new(right_x, area.y, right_width, right_top_height).gap(gap2, 0.0, 0.0, gap1);
        tileables[2].geometry = Rect::new(right_x, right_bottom_y, right_width, right_bottom_height)
            .gap(gap2, 0.0, gap2, 0.0);

        if n == 3 {
            tileables[0].geometry = Rect::new(area.x, area.y, left_width, area.height).gap(0.0, gap1, 0.0, 0.0);
            return;
        }

        let left_top_height = (area.height * self.lhsplit).floor();
        let left_bottom_height = area.height - left_top_height;
        let left_bottom_y = area.y + left_top_height;
        tileables[0].geometry =
            Rect::new(area.x, area.y, left_width, left_top_height).gap(0.0, gap1, 0.0, gap1);
        tileables[3].geometry = Rect::new(area.x, left_bottom_y, left_width, left_bottom_height)
            .gap(0.0, gap2, gap2, 0.0);
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: WindowId,
        delta: RectDelta,
    ) {
        let n = tiles.len();
        if n <= 1 || n > CAPACITY {
            return;
        }
        let Some(idx) = position_of(tiles, basis) else {
            return;
        };

        match idx {
            0 | 3 if delta.east != 0.0 => {
                self.vsplit = moved_split(self.vsplit, area.width, delta.east);
            }
            1 | 2 if delta.west != 0.0 => {
                self.vsplit = moved_split(self.vsplit, area.width, -delta.west);
            }
            _ => {}
        }

        if n == 4 {
            if idx == 0 && delta.south != 0.0 {
                self.lhsplit = moved_split(self.lhsplit, area.height, delta.south);
            }
            if idx == 3 && delta.north != 0.0 {
                self.lhsplit = moved_split(self.lhsplit, area.height, -delta.north);
            }
        }

        if n >= 3 {
            if idx == 1 && delta.south != 0.0 {
                self.rhsplit = moved_split(self.rhsplit, area.height, delta.south);
            }
            if idx == 2 && delta.north != 0.0 {
                self.rhsplit = moved_split(self.rhsplit, area.height, -delta.north);
            }
        }

        let min = 1.0 - MAX_PROPORTION;
        self.vsplit = clip(self.vsplit, min, MAX_PROPORTION);
        self.lhsplit = clip(self.lhsplit, min, MAX_PROPORTION);
        self.rhsplit = clip(self.rhsplit, min, MAX_PROPORTION);
    }
}
