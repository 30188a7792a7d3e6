use super::window::EngineWindow;
use crate::sys::screen::Surface;
use crate::sys::window::WindowId;

/// Every managed window in one list. Index 0 of whatever subset a layout sees
/// is its master; there is no other master flag.
#[derive(Debug, Default)]
pub struct WindowStore {
    list: Vec<EngineWindow>,
}

impl WindowStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.list.len() }

    pub fn is_empty(&self) -> bool { self.list.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &EngineWindow> { self.list.iter() }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EngineWindow> { self.list.iter_mut() }

    pub fn at(&self, idx: usize) -> Option<&EngineWindow> { self.list.get(idx) }

    pub fn index_of(&self, id: WindowId) -> Option<usize> {
        self.list.iter().position(|w| w.id() == id)
    }

    pub fn contains(&self, id: WindowId) -> bool { self.index_of(id).is_some() }

    pub fn get(&self, id: WindowId) -> Option<&EngineWindow> {
        self.list.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut EngineWindow> {
        self.list.iter_mut().find(|w| w.id() == id)
    }

    pub fn ids(&self) -> Vec<WindowId> { self.list.iter().map(EngineWindow::id).collect() }

    pub fn push(&mut self, window: EngineWindow) { self.list.push(window) }

    pub fn unshift(&mut self, window: EngineWindow) { self.list.insert(0, window) }

    /// Inserts right after `after`, or at the front when `after` is unknown.
    pub fn insert_after(&mut self, after: WindowId, window: EngineWindow) {
        let idx = self.index_of(after).map_or(0, |i| i + 1);
        self.list.insert(idx, window);
    }

    pub fn remove(&mut self, id: WindowId) -> Option<EngineWindow> {
        let idx = self.index_of(id)?;
        Some(self.list.remove(idx))
    }

    /// Relocates `src` to the slot `dest` occupied before the move, or the one
    /// after it.
    pub fn move_window(&mut self, src: WindowId, dest: WindowId, after: bool) {
        let (Some(src_idx), Some(dest_idx)) = (self.index_of(src), self.index_of(dest)) else {
            return;
        };
        let window = self.list.remove(src_idx);
        let idx = if after { dest_idx + 1 } else { dest_idx };
        self.list.insert(idx.min(self.list.len()), window);
    }

    /// Swaps positions. Weights travel with the windows.
    pub fn swap(&mut self, alpha: WindowId, beta: WindowId) {
        let (Some(a), Some(b)) = (self.index_of(alpha), self.index_of(beta)) else {
            return;
        };
        self.list.swap(a, b);
    }

    pub fn put_window_to_master(&mut self, id: WindowId) {
        if let Some(idx) = self.index_of(id) {
            let window = self.list.remove(idx);
            self.list.insert(0, window);
        }
    }

    pub fn visible_windows_on(&self, surface: &Surface) -> Vec<&EngineWindow> {
        self.list.iter().filter(|w| w.visible_on(surface)).collect()
    }

    pub fn visible_windows_on_mut(&mut self, surface: &Surface) -> Vec<&mut EngineWindow> {
        self.list.iter_mut().filter(|w| w.visible_on(surface)).collect()
    }

    pub fn visible_tiled_windows_on(&self, surface: &Surface) -> Vec<&EngineWindow> {
        self.list.iter().filter(|w| w.is_tiled() && w.visible_on(surface)).collect()
    }

    pub fn visible_tiled_windows_on_mut(&mut self, surface: &Surface) -> Vec<&mut EngineWindow> {
        self.list.iter_mut().filter(|w| w.is_tiled() && w.visible_on(surface)).collect()
    }

    pub fn visible_tileable_windows_on(&self, surface: &Surface) -> Vec<&EngineWindow> {
        self.list.iter().filter(|w| w.is_tileable() && w.visible_on(surface)).collect()
    }

    pub fn visible_tileable_windows_on_mut(
        &mut self,
        surface: &Surface,
    ) -> Vec<&mut EngineWindow> {
        self.list.iter_mut().filter(|w| w.is_tileable() && w.visible_on(surface)).collect()
    }

    /// Tileable windows assigned to `surface`, minimized or not.
    pub fn tileable_windows_on(&self, surface: &Surface) -> Vec<&EngineWindow> {
        self.list.iter().filter(|w| w.is_tileable() && w.on_surface(surface)).collect()
    }

    /// Every window assigned to `surface`, minimized or not.
    pub fn all_windows_on(&self, surface: &Surface) -> Vec<&EngineWindow> {
        self.list.iter().filter(|w| w.on_surface(surface)).collect()
    }
}
