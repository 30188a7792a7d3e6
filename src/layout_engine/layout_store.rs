use tracing::debug;

use super::systems::{LayoutId, WindowsLayoutKind};
use crate::common::collections::HashMap;
use crate::common::config::Settings;
use crate::common::util::wrap_index;
use crate::sys::screen::{Surface, SurfaceId};

/// Layout selection of one surface. Layouts are built on first use and kept,
/// so their ratios and counts survive switching away and back.
#[derive(Debug, Clone)]
pub struct LayoutStoreEntry {
    /// Position of `current` in the configured order, or `None` when it was
    /// picked by id and is not part of the order.
    current_index: Option<usize>,
    current: LayoutId,
    previous: LayoutId,
    layouts: HashMap<LayoutId, WindowsLayoutKind>,
}

impl LayoutStoreEntry {
    pub fn new(settings: &Settings) -> LayoutStoreEntry {
        let current = settings.layout.initial_layout();
        let mut entry = LayoutStoreEntry {
            current_index: Some(0),
            current,
            previous: current,
            layouts: HashMap::default(),
        };
        entry.load_layout(settings, current);
        entry
    }

    pub fn current_id(&self) -> LayoutId { self.current }

    pub fn previous_id(&self) -> LayoutId { self.previous }

    pub fn current_index(&self) -> Option<usize> { self.current_index }

    pub fn current_layout(&mut self, settings: &Settings) -> &mut WindowsLayoutKind {
        self.load_layout(settings, self.current)
    }

    pub fn cycle_layout(&mut self, settings: &Settings, step: isize) -> &mut WindowsLayoutKind {
        let order = &settings.layout.order;
        self.previous = self.current;
        let index = match self.current_index {
            Some(index) => wrap_index(index as isize + step, order.len()),
            None => 0,
        };
        if let Some(&id) = order.get(index) {
            self.current_index = Some(index);
            self.current = id;
        }
        self.load_layout(settings, self.current)
    }

    /// Switches to `id`, or back to the previous layout if `id` is already
    /// active.
    pub fn toggle_layout(&mut self, settings: &Settings, id: LayoutId) -> &mut WindowsLayoutKind {
        if self.current == id {
            self.current = self.previous;
            self.previous = id;
        } else {
            self.previous = self.current;
            self.current = id;
        }
        self.current_index = settings.layout.order.iter().position(|&l| l == self.current);
        self.load_layout(settings, self.current)
    }

    fn load_layout(&mut self, settings: &Settings, id: LayoutId) -> &mut WindowsLayoutKind {
        self.layouts.entry(id).or_insert_with(|| {
            debug!("creating layout {id}");
            WindowsLayoutKind::new(id, settings)
        })
    }
}

/// Per-surface layout selection. Entries are created with defaults the first
/// time a surface is looked up.
#[derive(Debug)]
pub struct LayoutStore {
    settings: Settings,
    entries: HashMap<SurfaceId, LayoutStoreEntry>,
    /// Shared by every ignored surface.
    floating: WindowsLayoutKind,
}

impl LayoutStore {
    pub fn new(settings: Settings) -> LayoutStore {
        LayoutStore {
            floating: WindowsLayoutKind::new(LayoutId::Floating, &settings),
            settings,
            entries: HashMap::default(),
        }
    }

    pub fn entry(&self, surface: SurfaceId) -> Option<&LayoutStoreEntry> { self.entries.get(&surface) }

    pub fn current_layout(&mut self, surface: &Surface) -> &mut WindowsLayoutKind {
        if surface.ignore {
            return &mut self.floating;
        }
        let settings = &self.settings;
        self.entries
            .entry(surface.id)
            .or_insert_with(|| LayoutStoreEntry::new(settings))
            .current_layout(settings)
    }

    /// `None` on ignored surfaces, which cannot change layout.
    pub fn cycle_layout(&mut self, surface: &Surface, step: isize) -> Option<&mut WindowsLayoutKind> {
        if surface.ignore {
            return None;
        }
        let settings = &self.settings;
        let entry = self.entries.entry(surface.id).or_insert_with(|| LayoutStoreEntry::new(settings));
        Some(entry.cycle_layout(settings, step))
    }

    pub fn toggle_layout(&mut self, surface: &Surface, id: LayoutId) -> Option<&mut WindowsLayoutKind> {
        if surface.ignore {
            return None;
        }
        let settings = &self.settings;
        let entry = self.entries.entry(surface.id).or_insert_with(|| LayoutStoreEntry::new(settings));
        Some(entry.toggle_layout(settings, id))
    }
}
