use crate::common::config::{MAX_MASTER_COUNT, Settings};
use crate::common::util::{clip, partition_by_sizes, slide};
use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::systems::{
    LayoutCapabilities, LayoutId, WindowsLayout, position_of, reweight_tiles, stack_tiles,
};
use crate::layout_engine::utils::{adjust_area_half_weights, adjust_area_weights, split_area_half_weighted, split_area_weighted};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const MIN_MASTER_RATIO: f64 = 0.2;
const MAX_MASTER_RATIO: f64 = 0.75;

/// Masters in the middle column, the rest alternating between a right and a
/// left stack. Falls back to one or two columns when there are few windows.
#[derive(Debug, Clone)]
pub struct ThreeColumnLayout {
    master_ratio: f64,
    master_count: usize,
    gap: f64,
}

impl ThreeColumnLayout {
    pub fn new(settings: &Settings) -> ThreeColumnLayout {
        ThreeColumnLayout {
            master_ratio: 0.6,
            master_count: 1,
            gap: settings.tile_gap(),
        }
    }

    pub fn master_ratio(&self) -> f64 { self.master_ratio }

    fn right_stack_len(&self, tiles: usize) -> usize { (tiles - self.master_count) / 2 }
}

impl WindowsLayout for ThreeColumnLayout {
    fn id(&self) -> LayoutId { LayoutId::ThreeColumn }

    fn name(&self) -> &'static str { "Three-Column Layout" }

    fn icon(&self) -> &'static str { "mosaic-column" }

    fn hint(&self) -> Option<String> { Some(self.master_count.to_string()) }

    fn capabilities(&self) -> LayoutCapabilities {
        LayoutCapabilities::ADJUST | LayoutCapabilities::ACTIONS
    }

    fn apply(&mut self, _: &mut dyn Controller, tiles: &mut [&mut EngineWindow], area: Rect) {
        for tile in tiles.iter_mut() {
            tile.set_state(WindowState::Tiled);
        }

        let n = tiles.len();
        let m = self.master_count;
        if n <= m {
            stack_tiles(tiles, area, self.gap, false);
        } else if n == m + 1 {
            let (master_area, stack_area) =
                split_area_half_weighted(area, self.master_ratio, self.gap, true);
            let (masters, stack) = tiles.split_at_mut(m);
            stack_tiles(masters, master_area, self.gap, false);
            stack[0].geometry = stack_area;
        } else {
            let stack_ratio = 1.0 - self.master_ratio;
            let group_areas = split_area_weighted(
                area,
                &[stack_ratio, self.master_ratio, stack_ratio],
                self.gap,
                true,
            );
            let rstack = self.right_stack_len(n);
            let mut groups = partition_by_sizes(tiles, &[m, rstack]).into_iter();
            let (Some(masters), Some(right), Some(left)) = (groups.next(), groups.next(), groups.next())
            else {
                return;
            };
            stack_tiles(left, group_areas[0], self.gap, false);
            stack_tiles(masters, group_areas[1], self.gap, false);
            stack_tiles(right, group_areas[2], self.gap, false);
        }
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: WindowId,
        delta: RectDelta,
    ) {
        let Some(idx) = position_of(tiles, basis) else {
            return;
        };

        let n = tiles.len();
        let m = self.master_count;
        if n <= m {
            reweight_tiles(tiles, area, self.gap, idx, delta, false);
        } else if n == m + 1 {
            let target = if idx < m { 0 } else { 1 };
            self.master_ratio =
                adjust_area_half_weights(area, self.master_ratio, self.gap, target, delta, true);
            if idx < m {
                reweight_tiles(&mut tiles[..n - 1], area, self.gap, idx, delta, false);
            }
        } else {
            // 0 = left stack, 1 = masters, 2 = right stack
            let group = if idx < m {
                1
            } else if idx < (m + n) / 2 {
                2
            } else {
                0
            };

            let stack_ratio = 1.0 - self.master_ratio;
            let ratios = adjust_area_weights(
                area,
                &[stack_ratio, self.master_ratio, stack_ratio],
                self.gap,
                group,
                delta,
                true,
            );
            let stack = if group == 0 { ratios[0] } else { ratios[2] };
            self.master_ratio = ratios[1] / (ratios[1] + stack);

            let rstack = self.right_stack_len(n);
            let (group_tiles, offset) = match group {
                1 => (&mut tiles[..m], 0),
                2 => (&mut tiles[m..m + rstack], m),
                _ => (&mut tiles[m + rstack..], m + rstack),
            };
            reweight_tiles(group_tiles, area, self.gap, idx - offset, delta, false);
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        match cmd {
            LayoutCommand::IncreaseMasterCount | LayoutCommand::DecreaseMasterCount => {
                let step = if *cmd == LayoutCommand::IncreaseMasterCount { 1 } else { -1 };
                self.master_count = clip(self.master_count as isize + step, 1, MAX_MASTER_COUNT as isize) as usize;
                return ActionResponse::ShowLayoutNotification;
            }
            LayoutCommand::DecreaseMasterSize => {
                self.master_ratio = clip(slide(self.master_ratio, -0.05), MIN_MASTER_RATIO, MAX_MASTER_RATIO);
            }
            LayoutCommand::IncreaseMasterSize => {
                self.master_ratio = clip(slide(self.master_ratio, 0.05), MIN_MASTER_RATIO, MAX_MASTER_RATIO);
            }
            _ => return ActionResponse::Unhandled,
        }
        ActionResponse::Handled
    }
}
