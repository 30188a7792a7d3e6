//! An in-memory host. Windows apply committed geometry immediately, which is
//! enough to drive the engine from tests and from the `mosaic` preview binary.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use super::geometry::Rect;
use super::host::{Controller, DeferredTask, Scheduler};
use super::screen::Surface;
use super::window::{BackendWindow, WindowId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub geometry: Option<Rect>,
    pub no_border: Option<bool>,
    pub keep_above: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub text: String,
    pub icon: Option<String>,
    pub hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeadlessWindowState {
    pub id: WindowId,
    pub geometry: Rect,
    pub should_float: bool,
    pub should_ignore: bool,
    pub full_screen: bool,
    pub maximized: bool,
    pub shaded: bool,
    pub minimized: bool,
    pub surface: Surface,
    pub commits: Vec<Commit>,
}

/// A window whose state is shared with every clone, so a test can keep a handle
/// and poke at the window after the engine has taken ownership of it.
#[derive(Debug, Clone)]
pub struct HeadlessWindow(Rc<RefCell<HeadlessWindowState>>);

impl HeadlessWindow {
    pub fn new(id: u64, surface: &Surface, geometry: Rect) -> Self {
        HeadlessWindow(Rc::new(RefCell::new(HeadlessWindowState {
            id: WindowId::new(id),
            geometry,
            should_float: false,
            should_ignore: false,
            full_screen: false,
            maximized: false,
            shaded: false,
            minimized: false,
            surface: surface.clone(),
            commits: Vec::new(),
        })))
    }

    pub fn floating(self) -> Self {
        self.0.borrow_mut().should_float = true;
        self
    }

    pub fn ignored(self) -> Self {
        self.0.borrow_mut().should_ignore = true;
        self
    }

    pub fn update(&self, f: impl FnOnce(&mut HeadlessWindowState)) { f(&mut self.0.borrow_mut()) }

    pub fn snapshot(&self) -> HeadlessWindowState { self.0.borrow().clone() }

    pub fn geometry(&self) -> Rect { self.0.borrow().geometry }

    pub fn commits(&self) -> Vec<Commit> { self.0.borrow().commits.clone() }

    pub fn boxed(&self) -> Box<dyn BackendWindow> { Box::new(self.clone()) }
}

impl BackendWindow for HeadlessWindow {
    fn id(&self) -> WindowId { self.0.borrow().id }

    fn geometry(&self) -> Rect { self.0.borrow().geometry }

    fn should_float(&self) -> bool { self.0.borrow().should_float }

    fn should_ignore(&self) -> bool { self.0.borrow().should_ignore }

    fn full_screen(&self) -> bool { self.0.borrow().full_screen }

    fn maximized(&self) -> bool { self.0.borrow().maximized }

    fn shaded(&self) -> bool { self.0.borrow().shaded }

    fn screen(&self) -> u32 { self.0.borrow().surface.screen() }

    fn minimized(&self) -> bool { self.0.borrow().minimized }

    fn set_minimized(&mut self, minimized: bool) { self.0.borrow_mut().minimized = minimized; }

    fn surface(&self) -> Surface { self.0.borrow().surface.clone() }

    fn set_surface(&mut self, surface: &Surface) { self.0.borrow_mut().surface = surface.clone(); }

    fn commit(&mut self, geometry: Option<Rect>, no_border: Option<bool>, keep_above: Option<bool>) {
        let mut state = self.0.borrow_mut();
        if let Some(geometry) = geometry {
            state.geometry = geometry;
        }
        state.commits.push(Commit { geometry, no_border, keep_above });
    }

    fn visible_on(&self, surface: &Surface) -> bool {
        let state = self.0.borrow();
        !state.minimized && state.surface.id == surface.id
    }
}

/// Records everything the engine asks of its host.
#[derive(Debug, Default)]
pub struct HeadlessController {
    pub screens: Vec<Surface>,
    pub current_surface: usize,
    pub current_window: Option<WindowId>,
    pub notifications: Vec<Notification>,
    pub deferred: Vec<(Duration, DeferredTask)>,
    /// Surfaces reachable through `next_surface` that are not on screen.
    pub spare_surfaces: Vec<Surface>,
}

impl HeadlessController {
    pub fn new(screens: Vec<Surface>) -> Self { Self { screens, ..Default::default() } }

    pub fn take_deferred(&mut self) -> Vec<DeferredTask> {
        self.deferred.drain(..).map(|(_, task)| task).collect()
    }

    pub fn last_notification(&self) -> Option<&Notification> { self.notifications.last() }
}

impl Scheduler for HeadlessController {
    fn after(&mut self, delay: Duration, task: DeferredTask) { self.deferred.push((delay, task)); }
}

impl Controller for HeadlessController {
    fn screens(&self) -> Vec<Surface> { self.screens.clone() }

    fn current_surface(&self) -> Surface {
        self.screens
            .get(self.current_surface)
            .or_else(|| self.spare_surfaces.first())
            .cloned()
            .unwrap_or_else(|| Surface::new(Default::default(), Rect::default()))
    }

    fn set_current_surface(&mut self, surface: &Surface) {
        if let Some(idx) = self.screens.iter().position(|s| s.id == surface.id) {
            self.current_surface = idx;
        } else {
            // Bring the surface on screen in place of the current one.
            let idx = self.current_surface.min(self.screens.len().saturating_sub(1));
            if self.screens.is_empty() {
                self.screens.push(surface.clone());
            } else {
                self.screens[idx] = surface.clone();
            }
            self.current_surface = idx;
        }
    }

    fn next_surface(&self, surface: &Surface) -> Option<Surface> {
        self.spare_surfaces
            .iter()
            .find(|s| s.id.screen == surface.id.screen && s.id.desktop == surface.id.desktop + 1)
            .cloned()
    }

    fn current_window(&self) -> Option<WindowId> { self.current_window }

    fn set_current_window(&mut self, window: WindowId) { self.current_window = Some(window); }

    fn show_notification(&mut self, text: &str, icon: Option<&str>, hint: Option<&str>) {
        self.notifications.push(Notification {
            text: text.to_string(),
            icon: icon.map(str::to_string),
            hint: hint.map(str::to_string),
        });
    }
}
