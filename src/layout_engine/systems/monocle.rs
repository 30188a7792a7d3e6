use std::time::Duration;

use crate::common::config::Settings;
use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::graph::Direction;
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::{Controller, DeferredTask};
use crate::sys::window::WindowId;

/// Delay before the windows behind the focused one are minimized.
pub const MINIMIZE_REST_DELAY: Duration = Duration::from_millis(50);

/// One window at a time, covering the whole area.
#[derive(Debug, Clone)]
pub struct MonocleLayout {
    maximize: bool,
    minimize_rest: bool,
}

impl MonocleLayout {
    pub fn new(settings: &Settings) -> MonocleLayout {
        MonocleLayout {
            maximize: settings.layout.monocle_maximize,
            minimize_rest: settings.layout.monocle_minimize_rest,
        }
    }
}

impl WindowsLayout for MonocleLayout {
    fn id(&self) -> LayoutId { LayoutId::Monocle }

    fn name(&self) -> &'static str { "Monocle Layout" }

    fn icon(&self) -> &'static str { "mosaic-monocle" }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ACTIONS }

    fn apply(&mut self, controller: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        let state = if self.maximize { WindowState::Maximized } else { WindowState::Tiled };
        for tile in tileables.iter_mut() {
            tile.set_state(state);
            tile.geometry = area;
        }

        if self.minimize_rest {
            controller.after(MINIMIZE_REST_DELAY, DeferredTask::MinimizeRest);
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        let step = match cmd {
            LayoutCommand::FocusPrev
            | LayoutCommand::MoveFocus(Direction::Up)
            | LayoutCommand::MoveFocus(Direction::Left) => -1,
            LayoutCommand::FocusNext
            | LayoutCommand::MoveFocus(Direction::Down)
            | LayoutCommand::MoveFocus(Direction::Right) => 1,
            _ => return ActionResponse::Unhandled,
        };
        ActionResponse::FocusOrder { step, include_hidden: self.minimize_rest }
    }
}
