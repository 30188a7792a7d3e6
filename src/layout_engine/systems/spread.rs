use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const MIN_SPACE: f64 = 0.04;
const MAX_SPACE: f64 = 0.1;
const SPACE_STEP: f64 = 0.01;
/// Cards are never narrower than this share of the area.
const MIN_CARD_RATIO: f64 = 0.4;

/// Windows fanned out like a hand of cards, each peeking out from under the
/// next by `space` of the area width.
#[derive(Debug, Clone)]
pub struct SpreadLayout {
    space: f64,
}

impl Default for SpreadLayout {
    fn default() -> Self { SpreadLayout { space: 0.07 } }
}

impl WindowsLayout for SpreadLayout {
    fn id(&self) -> LayoutId { LayoutId::Spread }

    fn name(&self) -> &'static str { "Spread Layout" }

    fn icon(&self) -> &'static str { "mosaic-spread" }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ACTIONS }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        let space_width = (area.width * self.space).floor();
        let mut fanned = tileables.len();
        let mut card_width = area.width - space_width * fanned.saturating_sub(1) as f64;
        while card_width < area.width * MIN_CARD_RATIO && fanned > 0 {
            card_width += space_width;
            fanned -= 1;
        }

        for (i, tile) in tileables.iter_mut().enumerate() {
            tile.set_state(WindowState::Tiled);
            let offset = if i < fanned { space_width * (fanned - i - 1) as f64 } else { 0.0 };
            tile.geometry = Rect::new(area.x + offset, area.y, card_width, area.height);
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        match cmd {
            LayoutCommand::DecreaseMasterCount => {
                self.space = (self.space - SPACE_STEP).max(MIN_SPACE);
            }
            LayoutCommand::IncreaseMasterCount => {
                self.space = (self.space + SPACE_STEP).min(MAX_SPACE);
            }
            _ => return ActionResponse::Unhandled,
        }
        ActionResponse::Handled
    }
}
