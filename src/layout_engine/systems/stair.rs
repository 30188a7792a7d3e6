use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const MIN_SPACE: f64 = 16.0;
const MAX_SPACE: f64 = 160.0;
const SPACE_STEP: f64 = 8.0;

/// Windows stepped down and to the left, the first one at the top right.
#[derive(Debug, Clone)]
pub struct StairLayout {
    /// Step between windows, in pixels.
    space: f64,
}

impl Default for StairLayout {
    fn default() -> Self { StairLayout { space: 24.0 } }
}

impl WindowsLayout for StairLayout {
    fn id(&self) -> LayoutId { LayoutId::Stair }

    fn name(&self) -> &'static str { "Stair Layout" }

    fn icon(&self) -> &'static str { "mosaic-stair" }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ACTIONS }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        let len = tileables.len();
        for (i, tile) in tileables.iter_mut().enumerate() {
            tile.set_state(WindowState::Tiled);
            let dx = self.space * (len - i - 1) as f64;
            let dy = self.space * i as f64;
            tile.geometry = Rect::new(area.x + dx, area.y + dy, area.width - dx, area.height - dy);
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
