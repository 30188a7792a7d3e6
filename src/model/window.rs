use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::collections::HashMap;
use crate::common::config::Settings;
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::screen::{Surface, SurfaceId};
use crate::sys::window::{BackendWindow, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    /// Known to the host but not yet handed to the engine.
    Unmanaged,

    /// The host reports the window fullscreen; the engine keeps its hands off.
    NativeFullscreen,
    /// The host reports the window maximized.
    NativeMaximized,

    Floating,
    Maximized,
    Tiled,
    /// Tileable but placed like a floating window (layout overflow, Floating layout).
    TiledAfloat,
    /// Managed, waiting for the next arrange to pick Floating or Tiled.
    Undecided,
}

impl WindowState {
    pub fn is_tileable(self) -> bool {
        matches!(self, WindowState::Tiled | WindowState::Maximized | WindowState::TiledAfloat)
    }

    pub fn is_tiled(self) -> bool { matches!(self, WindowState::Tiled | WindowState::Maximized) }

    pub fn is_floating(self) -> bool {
        matches!(self, WindowState::Floating | WindowState::TiledAfloat)
    }
}

/// The engine's view of a window: a state machine plus the geometry the engine
/// wants the window to have.
#[derive(Debug)]
pub struct EngineWindow {
    id: WindowId,
    window: Box<dyn BackendWindow>,
    internal_state: WindowState,
    state_previously_asked_to_change_to: WindowState,
    should_commit_float: bool,
    weight_map: HashMap<SurfaceId, f64>,
    /// Target geometry, assigned by layouts.
    pub geometry: Rect,
    /// Last free-form geometry, restored whenever the window floats again.
    pub float_geometry: Rect,
    /// Logical time of the last focus, used to break ties between neighbours.
    pub timestamp: u64,
}

impl EngineWindow {
    pub fn new(window: Box<dyn BackendWindow>) -> EngineWindow {
        let geometry = window.geometry();
        let should_commit_float = window.should_float();
        EngineWindow {
            id: window.id(),
            window,
            internal_state: WindowState::Unmanaged,
            state_previously_asked_to_change_to: WindowState::Floating,
            should_commit_float,
            weight_map: HashMap::default(),
            geometry,
            float_geometry: geometry,
            timestamp: 0,
        }
    }

    pub fn id(&self) -> WindowId { self.id }

    pub fn window(&self) -> &dyn BackendWindow { self.window.as_ref() }

    /// What the host currently reports, as opposed to [`Self::geometry`].
    pub fn actual_geometry(&self) -> Rect { self.window.geometry() }

    pub fn should_float(&self) -> bool { self.window.should_float() }

    pub fn should_ignore(&self) -> bool { self.window.should_ignore() }

    pub fn shaded(&self) -> bool { self.window.shaded() }

    pub fn screen(&self) -> u32 { self.window.screen() }

    pub fn minimized(&self) -> bool { self.window.minimized() }

    pub fn set_minimized(&mut self, minimized: bool) { self.window.set_minimized(minimized) }

    pub fn surface(&self) -> Surface { self.window.surface() }

    pub fn set_surface(&mut self, surface: &Surface) { self.window.set_surface(surface) }

    pub fn visible_on(&self, surface: &Surface) -> bool { self.window.visible_on(surface) }

    pub fn on_surface(&self, surface: &Surface) -> bool { self.window.surface().id == surface.id }

    /// The effective state. Host-side fullscreen and maximize override
    /// whatever the engine last asked for.
    pub fn state(&self) -> WindowState {
        if self.window.full_screen() {
            WindowState::NativeFullscreen
        } else if self.window.maximized() {
            WindowState::NativeMaximized
        } else {
            self.internal_state
        }
    }

    pub fn set_state(&mut self, value: WindowState) {
        let current = self.state();
        self.state_previously_asked_to_change_to = current;

        if current == value {
            return;
        }

        if (current == WindowState::Unmanaged || current.is_tileable()) && value.is_floating() {
            self.should_commit_float = true;
        } else if current.is_floating() && value.is_tileable() {
            self.float_geometry = self.actual_geometry();
        }

        self.internal_state = value;
    }

    pub fn state_previously_asked_to_change_to(&self) -> WindowState {
        self.state_previously_asked_to_change_to
    }

    pub fn is_tileable(&self) -> bool { self.state().is_tileable() }

    pub fn is_tiled(&self) -> bool { self.state().is_tiled() }

    pub fn is_floating(&self) -> bool { self.state().is_floating() }

    /// Stacking weight on the window's current surface.
    pub fn weight(&self) -> f64 {
        self.weight_map.get(&self.window.surface().id).copied().unwrap_or(1.0)
    }

    pub fn set_weight(&mut self, weight: f64) {
        let surface = self.window.surface().id;
        self.weight_map.insert(surface, weight);
    }

    /// How far the host geometry has drifted from the target, per edge.
    pub fn geometry_delta(&self) -> RectDelta {
        RectDelta::from_rects(&self.geometry, &self.actual_geometry())
    }

    /// Pushes the geometry the current state calls for to the host.
    pub fn commit(&mut self, settings: &Settings) {
        match self.state() {
            WindowState::NativeMaximized => {
                let area = self.window.surface().working_area;
                self.window.commit(Some(area), None, None);
            }
            WindowState::NativeFullscreen => self.window.commit(None, None, None),
            WindowState::Floating | WindowState::TiledAfloat => {
                if !self.should_commit_float {
                    return;
                }
                self.window.commit(
                    Some(self.float_geometry),
                    Some(false),
                    Some(settings.keep_float_above),
                );
                self.should_commit_float = false;
            }
            WindowState::Maximized => self.window.commit(Some(self.geometry), Some(true), Some(false)),
            WindowState::Tiled => {
                self.window.commit(Some(self.geometry), Some(settings.no_tile_border), Some(false))
            }
            WindowState::Unmanaged | WindowState::Undecided => {}
        }
    }

    /// Moves the real window right away, bypassing state rules.
    pub fn force_set_geometry(&mut self, geometry: Rect) {
        self.window.commit(Some(geometry), None, None);
    }
}

impl fmt::Display for EngineWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window({}, {:?})", self.id, self.state())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sys::headless::HeadlessWindow;

    fn surface() -> Surface { Surface::new(SurfaceId::new(0, 0, 0), Rect::new(0.0, 0.0, 1000.0, 800.0)) }

    fn window(geometry: Rect) -> (HeadlessWindow, EngineWindow) {
        let handle = HeadlessWindow::new(1, &surface(), geometry);
        let window = EngineWindow::new(handle.boxed());
        (handle, window)
    }

    #[test]
    fn starts_unmanaged_and_floating_intent() {
        let (_, w) = window(Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(w.state(), WindowState::Unmanaged);
        assert_eq!(w.state_previously_asked_to_change_to(), WindowState::Floating);
        assert_eq!(w.float_geometry, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(w.weight(), 1.0);
    }

    #[test]
    fn host_overrides_win() {
        let (handle, mut w) = window(Rect::default());
        w.set_state(WindowState::Tiled);
        handle.update(|s| s.maximized = true);
        assert_eq!(w.state(), WindowState::NativeMaximized);
        handle.update(|s| s.full_screen = true);
        assert_eq!(w.state(), WindowState::NativeFullscreen);
        handle.update(|s| {
            s.full_screen = false;
            s.maximized = false;
        });
        assert_eq!(w.state(), WindowState::Tiled);
    }

    #[test]
    fn float_commit_is_pushed_once() {
        let settings = Settings::default();
        let (handle, mut w) = window(Rect::new(5.0, 5.0, 50.0, 50.0));
        w.set_state(WindowState::Floating);
        w.commit(&settings);
        w.commit(&settings);
        assert_eq!(handle.commits().len(), 1);
        assert_eq!(handle.commits()[0].keep_above, Some(true));
    }

    #[test]
    fn leaving_float_snapshots_actual_geometry() {
        let settings = Settings::default();
        let (handle, mut w) = window(Rect::new(0.0, 0.0, 10.0, 10.0));
        w.set_state(WindowState::Floating);
        handle.update(|s| s.geometry = Rect::new(30.0, 40.0, 200.0, 100.0));
        w.set_state(WindowState::Tiled);
        assert_eq!(w.float_geometry, Rect::new(30.0, 40.0, 200.0, 100.0));

        w.geometry = Rect::new(0.0, 0.0, 500.0, 800.0);
        w.commit(&settings);
        assert_eq!(handle.geometry(), Rect::new(0.0, 0.0, 500.0, 800.0));

        w.set_state(WindowState::Floating);
        w.commit(&settings);
        assert_eq!(handle.geometry(), Rect::new(30.0, 40.0, 200.0, 100.0));
    }

    #[test]
    fn same_state_is_noop_but_records_intent() {
        let (_, mut w) = window(Rect::default());
        w.set_state(WindowState::Tiled);
        w.set_state(WindowState::Tiled);
        assert_eq!(w.state_previously_asked_to_change_to(), WindowState::Tiled);
        assert_eq!(w.state(), WindowState::Tiled);
    }

    #[test]
    fn native_maximized_commits_working_area() {
        let settings = Settings::default();
        let (handle, mut w) = window(Rect::new(1.0, 1.0, 1.0, 1.0));
        handle.update(|s| s.maximized = true);
        w.commit(&settings);
        assert_eq!(handle.geometry(), surface().working_area);
    }

    #[test]
    fn weight_is_per_surface() {
        let (handle, mut w) = window(Rect::default());
        w.set_weight(2.5);
        assert_eq!(w.weight(), 2.5);
        handle.update(|s| s.surface = Surface::new(SurfaceId::new(0, 0, 1), Rect::default()));
        assert_eq!(w.weight(), 1.0);
    }

    #[test]
    fn geometry_delta_follows_drag() {
        let (handle, mut w) = window(Rect::default());
        w.geometry = Rect::new(100.0, 100.0, 200.0, 200.0);
        handle.update(|s| s.geometry = Rect::new(100.0, 100.0, 230.0, 200.0));
        assert_eq!(w.geometry_delta(), RectDelta::new(30.0, 0.0, 0.0, 0.0));
    }
}
