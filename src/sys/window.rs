use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::screen::Surface;

/// An identifier representing a window, derived from the backend window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(id: u64) -> WindowId { WindowId(id) }

    pub fn get(&self) -> u64 { self.0 }
}

impl From<WindowId> for u64 {
    fn from(val: WindowId) -> Self { val.get() }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A window as the host sees it. The engine wraps one of these in every
/// [`EngineWindow`](crate::model::EngineWindow).
pub trait BackendWindow: fmt::Debug {
    fn id(&self) -> WindowId;

    /// The geometry the host currently reports for the window.
    fn geometry(&self) -> Rect;

    fn should_float(&self) -> bool;
    fn should_ignore(&self) -> bool;

    fn full_screen(&self) -> bool;
    fn maximized(&self) -> bool;
    fn shaded(&self) -> bool;

    fn screen(&self) -> u32;

    fn minimized(&self) -> bool;
    fn set_minimized(&mut self, minimized: bool);

    fn surface(&self) -> Surface;
    fn set_surface(&mut self, surface: &Surface);

    /// Pushes geometry and decoration policy to the real window. `None` leaves
    /// the corresponding property untouched.
    fn commit(&mut self, geometry: Option<Rect>, no_border: Option<bool>, keep_above: Option<bool>);

    fn visible_on(&self, surface: &Surface) -> bool;
}
