//! The boundary between the engine and whatever is hosting it.

pub mod geometry;
pub mod headless;
pub mod host;
pub mod screen;
pub mod window;
