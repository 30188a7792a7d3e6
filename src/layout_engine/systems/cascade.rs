use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::graph::CompassDirection;
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

const STEP_SIZE: f64 = 25.0;

/// Overlapping windows offset from each other towards `direction`.
#[derive(Debug, Clone, Default)]
pub struct CascadeLayout {
    direction: CompassDirection,
}

impl CascadeLayout {
    pub fn new(direction: CompassDirection) -> CascadeLayout { CascadeLayout { direction } }

    pub fn direction(&self) -> CompassDirection { self.direction }
}

impl WindowsLayout for CascadeLayout {
    fn id(&self) -> LayoutId { LayoutId::Cascade }

    fn name(&self) -> &'static str { "Cascade Layout" }

    fn icon(&self) -> &'static str { "mosaic-cascade" }

    fn hint(&self) -> Option<String> { Some(self.direction.to_string()) }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ACTIONS }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        let (vertical, horizontal) = self.direction.decompose();
        let shrink = STEP_SIZE * tileables.len().saturating_sub(1) as f64;

        let width = if horizontal != 0 { area.width - shrink } else { area.width };
        let height = if vertical != 0 { area.height - shrink } else { area.height };
        let mut x = if horizontal >= 0 { area.x } else { area.max_x() - width };
        let mut y = if vertical >= 0 { area.y } else { area.max_y() - height };

        for tile in tileables.iter_mut() {
            tile.set_state(WindowState::Tiled);
            tile.geometry = Rect::new(x, y, width, height);
            x += f64::from(horizontal) * STEP_SIZE;
            y += f64::from(vertical) * STEP_SIZE;
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, _: Option<WindowId>) -> ActionResponse {
        match cmd {
            LayoutCommand::IncreaseMasterCount => self.direction = self.direction.step(1),
            LayoutCommand::DecreaseMasterCount => self.direction = self.direction.step(-1),
            _ => return ActionResponse::Unhandled,
        }
        ActionResponse::ShowLayoutNotification
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::systems::test_support::*;

    fn arrange(layout: &mut CascadeLayout) -> Vec<Rect> {
        let mut ws = windows(3);
        let mut tiles: Vec<_> = ws.iter_mut().collect();
        layout.apply(&mut controller(), &mut tiles, Rect::new(0.0, 0.0, 1000.0, 800.0));
        geometries(&ws)
    }

    #[test]
    fn south_east_by_default() {
        let mut layout = CascadeLayout::default();
        assert_eq!(layout.hint().as_deref(), Some("SouthEast"));
        assert_eq!(
            arrange(&mut layout),
            vec![
                Rect::new(0.0, 0.0, 950.0, 750.0),
                Rect::new(25.0, 25.0, 950.0, 750.0),
                Rect::new(50.0, 50.0, 950.0, 750.0),
            ]
        );
    }

    #[test]
    fn north_west_starts_from_the_far_corner() {
        let mut layout = CascadeLayout::new(CompassDirection::NorthWest);
        assert_eq!(
            arrange(&mut layout),
            vec![
                Rect::new(50.0, 50.0, 950.0, 750.0),
                Rect::new(25.0, 25.0, 950.0, 750.0),
                Rect::new(0.0, 0.0, 950.0, 750.0),
            ]
        );
    }

    #[test]
    fn straight_directions_keep_the_other_axis() {
        let mut layout = CascadeLayout::new(CompassDirection::East);
        let geometry = arrange(&mut layout);
        assert_eq!(geometry[2], Rect::new(50.0, 0.0, 950.0, 800.0));
    }

    #[test]
    fn master_count_commands_turn_the_direction() {
        let mut layout = CascadeLayout::default();
        assert_eq!(
            layout.execute_action(&LayoutCommand::IncreaseMasterCount, None),
            ActionResponse::ShowLayoutNotification
        );
        assert_eq!(layout.direction(), CompassDirection::South);
        for _ in 0..6 {
            let _ = layout.execute_action(&LayoutCommand::DecreaseMasterCount, None);
        }
        assert_eq!(layout.direction(), CompassDirection::West);
    }
}
