pub mod command;
pub mod engine;
pub mod graph;
pub mod layout_store;
pub mod parts;
pub mod systems;
pub mod utils;

pub use command::{ActionResponse, LayoutCommand};
pub use engine::{DRAG_UNTILE_THRESHOLD, Engine, LayoutEvent, NEIGHBOR_TOLERANCE};
pub use graph::{Angle, CompassDirection, Direction, Orientation};
pub use layout_store::{LayoutStore, LayoutStoreEntry};
pub use systems::{LayoutCapabilities, LayoutId, WindowsLayout, WindowsLayoutKind};

#[cfg(test)]
mod tests;
