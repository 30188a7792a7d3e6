use crate::common::config::{MAX_MASTER_COUNT, Settings};
use crate::common::util::{clip, slide};
use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::parts::{HalfSplitLayoutPart, LayoutPart, RotateLayoutPart, StackLayoutPart};
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout, position_of};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const MIN_MASTER_RATIO: f64 = 0.2;
const MAX_MASTER_RATIO: f64 = 0.8;

type MasterStack = HalfSplitLayoutPart<RotateLayoutPart<StackLayoutPart>, StackLayoutPart>;

/// Master area on one side, everything else stacked on the other. Both the
/// whole arrangement and the master stack can be rotated independently.
#[derive(Debug, Clone)]
pub struct TileLayout {
    parts: RotateLayoutPart<MasterStack>,
}

impl TileLayout {
    pub fn new(settings: &Settings) -> TileLayout {
        let gap = settings.tile_gap();
        let mut master_stack = HalfSplitLayoutPart::new(
            RotateLayoutPart::new(StackLayoutPart::new(gap)),
            StackLayoutPart::new(gap),
        );
        master_stack.gap = gap;
        TileLayout { parts: RotateLayoutPart::new(master_stack) }
    }

    pub fn master_count(&self) -> usize { self.parts.inner.primary_size }

    pub fn master_ratio(&self) -> f64 { self.parts.inner.ratio }

    fn set_master_ratio(&mut self, step: f64) {
        let ratio = slide(self.parts.inner.ratio, step);
        self.parts.inner.ratio = clip(ratio, MIN_MASTER_RATIO, MAX_MASTER_RATIO);
    }
}

impl WindowsLayout for TileLayout {
    fn id(&self) -> LayoutId { LayoutId::Tile }

    fn name(&self) -> &'static str { "Tile Layout" }

    fn icon(&self) -> &'static str { "mosaic-tile" }

    fn hint(&self) -> Option<String> { Some(self.master_count().to_string()) }

    fn capabilities(&self) -> LayoutCapabilities {
        LayoutCapabilities::ADJUST | LayoutCapabilities::ACTIONS
    }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        for tile in tileables.iter_mut() {
            tile.set_state(WindowState::Tiled);
        }
        let geometries = self.parts.apply(area, tileables);
        for (tile, geometry) in tileables.iter_mut().zip(geometries) {
            tile.geometry = geometry;
        }
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: WindowId,
        delta: RectDelta,
    ) {
        if let Some(idx) = position_of(tiles, basis) {
            let _ = self.parts.adjust(area, tiles, idx, delta);
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        match cmd {
            LayoutCommand::DecreaseMasterSize => self.set_master_ratio(-0.05),
            LayoutCommand::IncreaseMasterSize => self.set_master_ratio(0.05),
            LayoutCommand::IncreaseMasterCount => {
                let master = &mut self.parts.inner.primary_size;
                *master = (*master + 1).min(MAX_MASTER_COUNT);
                return ActionResponse::ShowLayoutNotification;
            }
            LayoutCommand::DecreaseMasterCount => {
                let master = &mut self.parts.inner.primary_size;
                *master = master.saturating_sub(1);
                return ActionResponse::ShowLayoutNotification;
            }
            LayoutCommand::Rotate => self.parts.rotate(true),
            LayoutCommand::RotateReverse => self.parts.rotate(false),
            LayoutCommand::RotatePart => self.parts.inner.primary.rotate(true),
            _ => return ActionResponse::Unhandled,
        }
        ActionResponse::Handled
    }
}
