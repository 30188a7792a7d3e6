pub mod window;
pub mod window_store;

pub use window::{EngineWindow, WindowState};
pub use window_store::WindowStore;
