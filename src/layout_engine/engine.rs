use std::cmp::Reverse;

use tracing::{debug, trace, warn};

use super::command::{ActionResponse, LayoutCommand};
use super::graph::{CompassDirection, Direction};
use super::layout_store::LayoutStore;
use super::systems::{LayoutCapabilities, LayoutId, WindowsLayout, WindowsLayoutKind};
use crate::common::config::Settings;
use crate::common::util::wrap_index;
use crate::model::{EngineWindow, WindowState, WindowStore};
use crate::sys::geometry::{Rect, RectDelta, overlap};
use crate::sys::host::{Controller, DeferredTask};
use crate::sys::screen::Surface;
use crate::sys::window::{BackendWindow, WindowId};

/// Directional search accepts candidates this close to the nearest wall, so
/// gaps and rounding don't hide a neighbour.
pub const NEIGHBOR_TOLERANCE: f64 = 5.0;

/// A tile dragged further than this from its slot floats instead of snapping
/// back.
pub const DRAG_UNTILE_THRESHOLD: f64 = 30.0;

/// Keyboard resizes of tiles move one edge by this share of the working area.
const TILE_RESIZE_STEP: f64 = 0.03;
/// Keyboard resizes and moves of floating windows use this share.
const FLOAT_STEP: f64 = 0.05;
/// Inset applied to windows floated in bulk, so they visibly leave the grid.
const FLOAT_ALL_INSET: f64 = 4.0;

/// What the host reports happened. Everything except [`LayoutEvent::WindowAdded`]
/// refers to a window the engine already manages; unknown ids are ignored.
#[non_exhaustive]
#[derive(Debug)]
pub enum LayoutEvent {
    SurfaceUpdated,
    CurrentSurfaceChanged,
    WindowAdded(Box<dyn BackendWindow>),
    WindowRemoved(WindowId),
    /// A move by the user has finished.
    WindowMoveOver(WindowId),
    /// A live resize step.
    WindowResize(WindowId),
    WindowResizeOver(WindowId),
    WindowMaximizeChanged(WindowId),
    WindowGeometryChanged(WindowId),
    WindowUnminimized(WindowId),
    WindowFocused(WindowId),
    WindowShadeChanged(WindowId),
}

pub struct Engine<C: Controller> {
    controller: C,
    settings: Settings,
    layouts: LayoutStore,
    windows: WindowStore,
    /// Logical clock stamped onto windows as they gain focus.
    clock: u64,
}

impl<C: Controller> Engine<C> {
    pub fn new(controller: C, settings: Settings) -> Engine<C> {
        Engine {
            controller,
            layouts: LayoutStore::new(settings.clone()),
            settings,
            windows: WindowStore::new(),
            clock: 0,
        }
    }

    pub fn controller(&self) -> &C { &self.controller }

    pub fn controller_mut(&mut self) -> &mut C { &mut self.controller }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn windows(&self) -> &WindowStore { &self.windows }

    pub fn layouts(&self) -> &LayoutStore { &self.layouts }

    /// The focused window, if the engine manages it.
    pub fn current_window(&self) -> Option<WindowId> {
        self.controller.current_window().filter(|id| self.windows.contains(*id))
    }

    pub fn current_layout_on_current_surface(&mut self) -> &mut WindowsLayoutKind {
        let surface = self.controller.current_surface();
        self.layouts.current_layout(&surface)
    }

    pub fn handle_event(&mut self, event: LayoutEvent) {
        debug!(?event);
        match event {
            LayoutEvent::SurfaceUpdated
            | LayoutEvent::CurrentSurfaceChanged
            | LayoutEvent::WindowMaximizeChanged(_) => self.arrange(),
            LayoutEvent::WindowAdded(backend) => {
                let window = EngineWindow::new(backend);
                let id = window.id();
                self.manage(window);
                self.overflow_to_next_surface(id);
                self.arrange();
            }
            LayoutEvent::WindowRemoved(id) => {
                let _ = self.unmanage(id);
                if self.is_layout_monocle_and_minimize_rest() && self.current_window().is_none() {
                    debug!("focusing a minimized window in place of {id}");
                    self.focus_order(1, true);
                }
                self.arrange();
            }
            LayoutEvent::WindowMoveOver(id) => self.finish_move(id),
            LayoutEvent::WindowResize(id) => {
                if self.windows.get(id).is_some_and(|w| w.state() == WindowState::Tiled) {
                    self.adjust_layout(id);
                    self.arrange();
                }
            }
            LayoutEvent::WindowResizeOver(id) => {
                if self.windows.get(id).is_some_and(EngineWindow::is_tiled) {
                    self.adjust_layout(id);
                    self.arrange();
                }
            }
            LayoutEvent::WindowGeometryChanged(id) => self.enforce_size(id),
            LayoutEvent::WindowUnminimized(id) => {
                if self.windows.contains(id) {
                    self.controller.set_current_window(id);
                }
                self.arrange();
            }
            LayoutEvent::WindowFocused(id) => {
                self.clock += 1;
                let Some(window) = self.windows.get_mut(id) else {
                    return;
                };
                window.timestamp = self.clock;
                if self.is_layout_monocle_and_minimize_rest() {
                    self.minimize_others(id);
                }
            }
            LayoutEvent::WindowShadeChanged(id) => {
                let Some(window) = self.windows.get_mut(id) else {
                    return;
                };
                // Shaded windows break tile geometry once resized, so they
                // float until unshaded.
                if window.shaded() {
                    window.set_state(WindowState::Floating);
                } else {
                    let previous = window.state_previously_asked_to_change_to();
                    window.set_state(previous);
                }
                self.arrange();
            }
        }
    }

    /// Runs a user command, giving the active layout first refusal, then
    /// re-arranges.
    pub fn execute(&mut self, cmd: &LayoutCommand) {
        debug!(?cmd, "executing command");
        let current = self.current_window();
        let layout = self.current_layout_on_current_surface();
        let response = if layout.capabilities().contains(LayoutCapabilities::ACTIONS) {
            layout.execute_action(cmd, current)
        } else {
            ActionResponse::Unhandled
        };

        match response {
            ActionResponse::Unhandled => self.execute_default(cmd),
            ActionResponse::Handled => {}
            ActionResponse::ShowLayoutNotification => self.show_layout_notification(),
            ActionResponse::FocusOrder { step, include_hidden } => {
                self.focus_order(step, include_hidden)
            }
        }

        self.arrange();
    }

    fn execute_default(&mut self, cmd: &LayoutCommand) {
        let current = self.current_window();
        match *cmd {
            LayoutCommand::FocusNext => self.focus_order(1, false),
            LayoutCommand::FocusPrev => self.focus_order(-1, false),
            LayoutCommand::MoveFocus(dir) => self.focus_dir(dir),

            LayoutCommand::MoveNext | LayoutCommand::MovePrev => {
                let step = if *cmd == LayoutCommand::MoveNext { 1 } else { -1 };
                if let Some(window) = current {
                    self.swap_order(window, step);
                }
            }
            LayoutCommand::MoveWindow(dir) => self.swap_dir_or_move_float(dir),

            LayoutCommand::IncreaseWidth
            | LayoutCommand::DecreaseWidth
            | LayoutCommand::IncreaseHeight
            | LayoutCommand::DecreaseHeight => {
                let (dir, step) = match cmd {
                    LayoutCommand::IncreaseWidth => (CompassDirection::East, 1),
                    LayoutCommand::DecreaseWidth => (CompassDirection::East, -1),
                    LayoutCommand::IncreaseHeight => (CompassDirection::South, 1),
                    _ => (CompassDirection::South, -1),
                };
                if let Some(window) = current {
                    self.resize_window(window, dir, step);
                }
            }

            LayoutCommand::IncreaseMasterCount
            | LayoutCommand::DecreaseMasterCount
            | LayoutCommand::IncreaseMasterSize
            | LayoutCommand::DecreaseMasterSize => self.show_notification("No Master Area"),

            LayoutCommand::ToggleFloat => {
                if let Some(window) = current {
                    self.toggle_float(window);
                }
            }
            LayoutCommand::FloatAll => {
                let surface = self.controller.current_surface();
                self.float_all(&surface);
            }
            LayoutCommand::PushToMaster => {
                if let Some(window) = current {
                    self.set_master(window);
                }
            }

            LayoutCommand::NextLayout => self.cycle_layout(1),
            LayoutCommand::PrevLayout => self.cycle_layout(-1),
            LayoutCommand::ToggleLayout(id) => self.toggle_layout(id),

            LayoutCommand::Rotate | LayoutCommand::RotateReverse | LayoutCommand::RotatePart => {
                self.show_notification("Rotation Not Applicable")
            }

            LayoutCommand::SplitHorizontally | LayoutCommand::SplitVertically => {
                debug!(?cmd, "only the dynamic layout splits");
            }
        }
    }

    pub fn arrange(&mut self) {
        for surface in self.controller.screens() {
            self.arrange_screen(&surface);
        }
    }

    pub fn arrange_screen(&mut self, surface: &Surface) {
        let layout = self.layouts.current_layout(surface);
        let is_monocle = layout.is_monocle();
        let working_area = surface.working_area;
        let tiling_area = if self.settings.layout.monocle_maximize && is_monocle {
            working_area
        } else {
            self.settings.tiling_area(working_area)
        };

        for window in self.windows.visible_windows_on_mut(surface) {
            if window.state() == WindowState::Undecided {
                let state =
                    if window.should_float() { WindowState::Floating } else { WindowState::Tiled };
                window.set_state(state);
            }
        }

        let mut tileables = self.windows.visible_tileable_windows_on_mut(surface);
        let count = tileables.len();
        if self.settings.layout.maximize_sole_tile && count == 1 {
            tileables[0].set_state(WindowState::Maximized);
            tileables[0].geometry = working_area;
        } else if count > 0 {
            layout.apply(&mut self.controller, &mut tileables, tiling_area);
        }

        let ratio = self.settings.layout.limit_tile_width_ratio;
        if ratio > 0.0 && !is_monocle {
            let max_width = (working_area.height * ratio).floor();
            for tile in tileables.iter_mut().filter(|t| t.is_tiled()) {
                let g = tile.geometry;
                if g.width > max_width {
                    let x = g.x + ((g.width - max_width) / 2.0).floor();
                    tile.geometry = Rect::new(x, g.y, max_width, g.height);
                }
            }
        }
        drop(tileables);

        for window in self.windows.visible_windows_on_mut(surface) {
            window.commit(&self.settings);
        }
        debug!(surface = %surface.id, tiles = count, "arranged");
    }

    /// Takes ownership of a new window. Ignored windows are dropped.
    pub fn manage(&mut self, mut window: EngineWindow) {
        let id = window.id();
        if window.should_ignore() {
            debug!("ignoring window {id}");
            return;
        }
        if self.windows.contains(id) {
            warn!("window {id} is already managed");
            return;
        }

        // The next arrange decides between floating and tiling.
        window.set_state(WindowState::Undecided);

        if self.settings.new_window_as_master {
            self.windows.unshift(window);
        } else if let Some(current) = self.controller.current_window() {
            self.windows.insert_after(current, window);
            let layout = self.current_layout_on_current_surface();
            if layout.capabilities().contains(LayoutCapabilities::NEW_WINDOW) {
                layout.handle_new_window(current, id);
            }
        } else {
            self.windows.push(window);
        }
        debug!("managing window {id}");
    }

    pub fn unmanage(&mut self, id: WindowId) -> Option<EngineWindow> {
        let window = self.windows.remove(id);
        if window.is_some() {
            debug!("unmanaged window {id}");
        }
        window
    }

    /// Moves a freshly managed window to the next surface when it would push
    /// the current layout past its capacity.
    fn overflow_to_next_surface(&mut self, id: WindowId) {
        let surface = self.controller.current_surface();
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.should_float() || !window.visible_on(&surface) {
            return;
        }
        let Some(capacity) = self.layouts.current_layout(&surface).capacity() else {
            return;
        };
        // The newcomer is still undecided and not among the tiles yet.
        let tiles = self.windows.visible_tiled_windows_on(&surface).len();
        if tiles < capacity {
            return;
        }
        let Some(next) = self.controller.next_surface(&surface) else {
            return;
        };
        debug!("layout on {} is full, moving {id} to {}", surface.id, next.id);
        if let Some(window) = self.windows.get_mut(id) {
            window.set_surface(&next);
        }
        self.controller.set_current_surface(&next);
    }

    /// Finishes a drag: swaps with the tile under the window's centre, floats
    /// the window if it was dragged far away, or snaps it back.
    fn finish_move(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };

        if window.state() == WindowState::Tiled {
            let surface = self.controller.current_surface();
            let center = window.actual_geometry().center();
            let targets: Vec<WindowId> = self
                .windows
                .visible_tiled_windows_on(&surface)
                .into_iter()
                .filter(|t| t.id() != id && t.actual_geometry().includes_point(center))
                .map(EngineWindow::id)
                .collect();
            if let &[target] = targets.as_slice() {
                debug!("drag swapped {id} with {target}");
                self.windows.swap(id, target);
                self.arrange();
                return;
            }
        }

        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if self.settings.untile_by_dragging && window.state() == WindowState::Tiled {
            let actual = window.actual_geometry();
            let diff = actual.subtract(&window.geometry);
            if diff.x.hypot(diff.y) > DRAG_UNTILE_THRESHOLD {
                window.float_geometry = actual;
                window.set_state(WindowState::Floating);
                self.arrange();
                self.show_notification("Window Untiled");
                return;
            }
        }

        window.commit(&self.settings);
    }

    /// Feeds the difference between where `basis` was put and where the user
    /// dragged it back into the layout.
    pub fn adjust_layout(&mut self, basis: WindowId) {
        let Some(window) = self.windows.get(basis) else {
            return;
        };
        let surface = window.surface();
        let delta = window.geometry_delta();

        let layout = self.layouts.current_layout(&surface);
        if !layout.capabilities().contains(LayoutCapabilities::ADJUST) {
            return;
        }
        let area = self.settings.tiling_area(surface.working_area);
        let mut tiles = self.windows.visible_tiled_windows_on_mut(&surface);
        layout.adjust(area, &mut tiles, basis, delta);
    }

    pub fn resize_window(&mut self, id: WindowId, dir: CompassDirection, step: isize) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let state = window.state();
        if state.is_floating() {
            self.resize_float(id, dir, step);
        } else if state.is_tiled() {
            self.resize_tile(id, dir, step);
        }
    }

    pub fn resize_float(&mut self, id: WindowId, dir: CompassDirection, step: isize) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        let area = window.surface().working_area;
        let (v, h) = dir.decompose();
        let step = step as f64;

        let g = window.actual_geometry();
        let width = g.width + area.width * FLOAT_STEP * f64::from(h) * step;
        let height = g.height + area.height * FLOAT_STEP * f64::from(v) * step;
        window.force_set_geometry(Rect::new(g.x, g.y, width, height));
    }

    /// Grows or shrinks one edge of a tile. Growing towards a screen edge with
    /// no tile behind it shrinks the opposite edge instead.
    pub fn resize_tile(&mut self, id: WindowId, dir: CompassDirection, step: isize) {
        let Some(basis) = self.windows.get(id) else {
            return;
        };
        let surface = basis.surface();
        let geometry = basis.geometry;
        let tiles = self.windows.visible_tiled_windows_on(&surface);

        let mut dir = dir;
        let mut step = step as f64;
        match dir {
            CompassDirection::East if !tiles.iter().any(|t| t.geometry.x >= geometry.max_x()) => {
                dir = CompassDirection::West;
                step = -step;
            }
            CompassDirection::South if !tiles.iter().any(|t| t.geometry.y >= geometry.max_y()) => {
                dir = CompassDirection::North;
                step = -step;
            }
            _ => {}
        }

        let area = surface.working_area;
        let h = area.width * TILE_RESIZE_STEP * step;
        let v = area.height * TILE_RESIZE_STEP * step;
        let delta = match dir {
            CompassDirection::East => RectDelta::new(h, 0.0, 0.0, 0.0),
            CompassDirection::West => RectDelta::new(0.0, h, 0.0, 0.0),
            CompassDirection::South => RectDelta::new(0.0, 0.0, v, 0.0),
            CompassDirection::North => RectDelta::new(0.0, 0.0, 0.0, v),
            other => {
                debug!("tiles only resize along one axis, not {other}");
                return;
            }
        };

        let layout = self.layouts.current_layout(&surface);
        if !layout.capabilities().contains(LayoutCapabilities::ADJUST) {
            return;
        }
        let tiling_area = self.settings.tiling_area(area);
        let mut tileables = self.windows.visible_tileable_windows_on_mut(&surface);
        layout.adjust(tiling_area, &mut tileables, id, delta);
    }

    /// Pushes the target geometry again when the host moved a tile on its own.
    pub fn enforce_size(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.is_tiled() && window.actual_geometry() != window.geometry {
            window.commit(&self.settings);
        }
    }

    /// Focuses the window `step` places away in the order of the current
    /// surface. Minimized windows count only with `include_hidden`.
    pub fn focus_order(&mut self, step: isize, include_hidden: bool) {
        let surface = self.controller.current_surface();
        let candidates = if include_hidden {
            self.windows.all_windows_on(&surface)
        } else {
            self.windows.visible_windows_on(&surface)
        };
        let ids: Vec<WindowId> = candidates.into_iter().map(EngineWindow::id).collect();
        let Some(&first) = ids.first() else {
            return;
        };

        let position = self
            .current_window()
            .and_then(|current| ids.iter().position(|&id| id == current));
        let next = match position {
            Some(idx) => ids[wrap_index(idx as isize + step, ids.len())],
            None => first,
        };
        self.controller.set_current_window(next);
    }

    pub fn focus_dir(&mut self, dir: Direction) {
        let Some(current) = self.current_window() else {
            let surface = self.controller.current_surface();
            if let Some(first) = self.windows.visible_windows_on(&surface).first() {
                self.controller.set_current_window(first.id());
            }
            return;
        };

        if let Some(neighbor) = self.neighbor_by_direction(current, dir) {
            self.controller.set_current_window(neighbor);
        }
    }

    /// Moves `id` to the slot `step` places away among the visible windows of
    /// its surface.
    pub fn swap_order(&mut self, id: WindowId, step: isize) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let ids: Vec<WindowId> =
            self.windows.visible_windows_on(&window.surface()).into_iter().map(EngineWindow::id).collect();
        if ids.len() < 2 {
            return;
        }
        let Some(src) = ids.iter().position(|&w| w == id) else {
            return;
        };
        let dest = ids[wrap_index(src as isize + step, ids.len())];
        self.windows.move_window(id, dest, false);
    }

    pub fn swap_direction(&mut self, dir: Direction) {
        let Some(current) = self.current_window() else {
            let surface = self.controller.current_surface();
            let tiles = self.windows.visible_tiled_windows_on(&surface);
            if tiles.len() > 1 {
                let first = tiles[0].id();
                self.controller.set_current_window(first);
            }
            return;
        };

        if let Some(neighbor) = self.neighbor_by_direction(current, dir) {
            self.windows.swap(current, neighbor);
        }
    }

    pub fn move_float(&mut self, id: WindowId, dir: Direction) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        let area = window.surface().working_area;
        let (dx, dy) = match dir {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        };

        let g = window.actual_geometry();
        let x = g.x + area.width * FLOAT_STEP * dx;
        let y = g.y + area.height * FLOAT_STEP * dy;
        window.force_set_geometry(Rect::new(x, y, g.width, g.height));
    }

    pub fn swap_dir_or_move_float(&mut self, dir: Direction) {
        let Some(current) = self.current_window() else {
            return;
        };
        let Some(state) = self.windows.get(current).map(EngineWindow::state) else {
            return;
        };
        if state.is_floating() {
            self.move_float(current, dir);
        } else if state.is_tiled() {
            self.swap_direction(dir);
        }
    }

    pub fn toggle_float(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(id) {
            let state = if window.is_tileable() { WindowState::Floating } else { WindowState::Tiled };
            window.set_state(state);
        }
    }

    /// Tiles everything when at least half of the visible windows float,
    /// floats everything otherwise.
    pub fn float_all(&mut self, surface: &Surface) {
        let mut windows = self.windows.visible_windows_on_mut(surface);
        let floating = windows.iter().filter(|w| w.state() == WindowState::Floating).count();

        if (floating as f64) < windows.len() as f64 / 2.0 {
            for window in windows.iter_mut() {
                window.float_geometry = window.actual_geometry().gap(
                    FLOAT_ALL_INSET,
                    FLOAT_ALL_INSET,
                    FLOAT_ALL_INSET,
                    FLOAT_ALL_INSET,
                );
                window.set_state(WindowState::Floating);
            }
            self.controller.show_notification("Float All", None, None);
        } else {
            for window in windows.iter_mut() {
                window.set_state(WindowState::Tiled);
            }
            self.controller.show_notification("Tile All", None, None);
        }
    }

    pub fn set_master(&mut self, id: WindowId) { self.windows.put_window_to_master(id); }

    pub fn cycle_layout(&mut self, step: isize) {
        let surface = self.controller.current_surface();
        if self.layouts.cycle_layout(&surface, step).is_some() {
            self.after_layout_switch();
        }
    }

    pub fn toggle_layout(&mut self, id: LayoutId) {
        let surface = self.controller.current_surface();
        if self.layouts.toggle_layout(&surface, id).is_some() {
            self.after_layout_switch();
        }
    }

    fn after_layout_switch(&mut self) {
        self.show_layout_notification();
        if self.is_layout_monocle_and_minimize_rest() {
            if let Some(current) = self.current_window() {
                self.minimize_others(current);
            }
        }
    }

    /// Minimizes every other visible tile on the window's surface and screen.
    /// If the window is not one of those tiles, everything is restored
    /// instead.
    pub fn minimize_others(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let surface = window.surface();
        let screen = window.screen();
        let is_tile = self.windows.visible_tiled_windows_on(&surface).iter().any(|t| t.id() == id);

        for tile in self.windows.visible_tiled_windows_on_mut(&surface) {
            let minimize = is_tile && tile.screen() == screen && tile.id() != id;
            tile.set_minimized(minimize);
        }
    }

    pub fn is_layout_monocle_and_minimize_rest(&mut self) -> bool {
        self.settings.layout.monocle_minimize_rest
            && self.current_layout_on_current_surface().is_monocle()
    }

    /// Runs work a layout asked the host to schedule. The task re-checks that
    /// it still applies.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::MinimizeRest => {
                let Some(current) = self.current_window() else {
                    return;
                };
                if !self.windows.get(current).is_some_and(EngineWindow::is_tiled) {
                    return;
                }
                if self.is_layout_monocle_and_minimize_rest() {
                    self.minimize_others(current);
                }
            }
        }
    }

    pub fn show_notification(&mut self, text: &str) {
        self.controller.show_notification(text, None, None);
    }

    pub fn show_layout_notification(&mut self) {
        let surface = self.controller.current_surface();
        let layout = self.layouts.current_layout(&surface);
        let hint = layout.hint();
        self.controller.show_notification(layout.name(), Some(layout.icon()), hint.as_deref());
    }

    /// The closest visible tile in `dir` on the current surface, preferring
    /// the most recently focused one among equally close tiles.
    fn neighbor_by_direction(&self, basis: WindowId, dir: Direction) -> Option<WindowId> {
        let basis = self.windows.get(basis)?.geometry;
        let surface = self.controller.current_surface();
        let sign = if dir.is_forward() { 1.0 } else { -1.0 };
        let (cross_min, cross_max) = dir.cross_span(&basis);

        let candidates: Vec<&EngineWindow> = self
            .windows
            .visible_tiled_windows_on(&surface)
            .into_iter()
            .filter(|w| {
                let (min, max) = dir.cross_span(&w.geometry);
                dir.origin(&w.geometry) * sign > dir.origin(&basis) * sign
                    && overlap(cross_min, cross_max, min, max) > 0.0
            })
            .collect();
        if candidates.is_empty() {
            trace!("no neighbour {dir} of {basis}");
            return None;
        }

        let wall = candidates.iter().map(|w| dir.facing_edge(&w.geometry)).fold(
            if dir.is_forward() { f64::INFINITY } else { 0.0 },
            |wall, edge| if dir.is_forward() { wall.min(edge) } else { wall.max(edge) },
        );

        let neighbor = candidates
            .into_iter()
            .filter(|w| {
                let edge = dir.facing_edge(&w.geometry);
                if dir.is_forward() {
                    edge < wall + NEIGHBOR_TOLERANCE
                } else {
                    edge > wall - NEIGHBOR_TOLERANCE
                }
            })
            .min_by_key(|w| Reverse(w.timestamp))
            .map(EngineWindow::id);
        trace!(?neighbor, "neighbour {dir} of {basis}, wall at {wall}");
        neighbor
    }
}
