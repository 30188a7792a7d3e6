use crate::layout_engine::systems::{LayoutId, WindowsLayout};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;

/// Leaves every window where the user put it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatingLayout;

impl WindowsLayout for FloatingLayout {
    fn id(&self) -> LayoutId { LayoutId::Floating }

    fn name(&self) -> &'static str { "Floating Layout" }

    fn icon(&self) -> &'static str { "mosaic-floating" }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], _: Rect) {
        for tile in tileables.iter_mut() {
            tile.set_state(WindowState::TiledAfloat);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_engine::systems::test_support::*;

    #[test]
    fn everything_floats_in_place() {
        let mut ws = windows(2);
        ws[0].geometry = Rect::new(5.0, 5.0, 50.0, 50.0);
        let mut tiles: Vec<_> = ws.iter_mut().collect();
        FloatingLayout.apply(&mut controller(), &mut tiles, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert!(ws.iter().all(|w| w.state() == WindowState::TiledAfloat));
        assert_eq!(ws[0].geometry, Rect::new(5.0, 5.0, 50.0, 50.0));
    }
}
