use crate::common::config::{MAX_MASTER_COUNT, Settings};
use crate::common::util::{clip, slide};
use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::systems::{
    LayoutCapabilities, LayoutId, WindowsLayout, position_of, reweight_tiles, stack_tiles,
};
use crate::layout_engine::utils::{adjust_area_half_weights, split_area_half_weighted};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const MIN_MASTER_RATIO: f64 = 0.2;
const MAX_MASTER_RATIO: f64 = 0.75;

/// Masters on top sharing a fixed share of the height, the rest in rows
/// below. Meant for portrait monitors.
#[derive(Debug, Clone)]
pub struct VerticalTileLayout {
    master_ratio: f64,
    master_count: usize,
    gap: f64,
}

impl VerticalTileLayout {
    pub fn new(settings: &Settings) -> VerticalTileLayout {
        VerticalTileLayout {
            master_ratio: 0.75,
            master_count: 1,
            gap: settings.tile_gap(),
        }
    }

    pub fn master_ratio(&self) -> f64 { self.master_ratio }
}

impl WindowsLayout for VerticalTileLayout {
    fn id(&self) -> LayoutId { LayoutId::VerticalTile }

    fn name(&self) -> &'static str { "Vertical Tile Layout" }

    fn icon(&self) -> &'static str { "mosaic-vertical-tile" }

    fn hint(&self) -> Option<String> { Some(self.master_count.to_string()) }

    fn capabilities(&self) -> LayoutCapabilities {
        LayoutCapabilities::ADJUST | LayoutCapabilities::ACTIONS
    }

    fn apply(&mut self, _: &mut dyn Controller, tiles: &mut [&mut EngineWindow], area: Rect) {
        for tile in tiles.iter_mut() {
            tile.set_state(WindowState::Tiled);
        }

        if tiles.len() <= self.master_count {
            stack_tiles(tiles, area, self.gap, false);
            return;
        }

        let (master_area, stack_area) =
            split_area_half_weighted(area, self.master_ratio, self.gap, false);
        let (masters, stack) = tiles.split_at_mut(self.master_count);
        stack_tiles(masters, master_area, self.gap, false);
        stack_tiles(stack, stack_area, self.gap, false);
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

        let m = self.master_count;
        if tiles.len() <= m {
            reweight_tiles(tiles, area, self.gap, idx, delta, false);
            return;
        }

        let group = if idx < m { 0 } else { 1 };
        self.master_ratio =
            adjust_area_half_weights(area, self.master_ratio, self.gap, group, delta, false);

        let (masters, stack) = tiles.split_at_mut(m);
        if group == 0 {
            reweight_tiles(masters, area, self.gap, idx, delta, false);
        } else {
            reweight_tiles(stack, area, self.gap, idx - m, delta, false);
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        match cmd {
            LayoutCommand::DecreaseMasterSize => {
                self.master_ratio = clip(slide(self.master_ratio, -0.05), MIN_MASTER_RATIO, MAX_MASTER_RATIO);
            }
            LayoutCommand::IncreaseMasterSize => {
                self.master_ratio = clip(slide(self.master_ratio, 0.05), MIN_MASTER_RATIO, MAX_MASTER_RATIO);
            }
            LayoutCommand::IncreaseMasterCount | LayoutCommand::DecreaseMasterCount => {
                let step = if *cmd == LayoutCommand::IncreaseMasterCount { 1 } else { -1 };
                self.master_count = clip(self.master_count as isize + step, 1, MAX_MASTER_COUNT as isize) as usize;
                return ActionResponse::ShowLayoutNotification;
            }
            _ => return ActionResponse::Unhandled,
        }
        ActionResponse::Handled
    }
}
