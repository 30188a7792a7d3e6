//! Interfaces the engine consumes from its host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::screen::Surface;
use super::window::WindowId;

/// Work the engine asks the host to hand back later via
/// [`Engine::run_deferred`](crate::layout_engine::Engine::run_deferred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferredTask {
    /// Minimize every tile except the current window while Monocle is active.
    MinimizeRest,
}

/// Fire-and-forget deferred calls. There is no cancellation; the task itself
/// re-checks whether it still applies when it runs.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, task: DeferredTask);
}

pub trait Controller: Scheduler {
    fn screens(&self) -> Vec<Surface>;

    fn current_surface(&self) -> Surface;
    fn set_current_surface(&mut self, surface: &Surface);

    /// The surface after `surface` (next desktop), if there is one.
    fn next_surface(&self, surface: &Surface) -> Option<Surface>;

    fn current_window(&self) -> Option<WindowId>;
    fn set_current_window(&mut self, window: WindowId);

    fn show_notification(&mut self, text: &str, icon: Option<&str>, hint: Option<&str>);
}
