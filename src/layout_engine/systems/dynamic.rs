use tracing::{debug, warn};

use crate::common::collections::VecDeque;
use crate::common::config::Settings;
use crate::layout_engine::command::{ActionResponse, LayoutCommand};
use crate::layout_engine::graph::Orientation;
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout};
use crate::layout_engine::utils::split_area_weighted;
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::Rect;
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

#[derive(Debug, Clone, PartialEq)]
pub enum DynamicNode {
    Part(DynamicLayoutPart),
    Window(WindowId),
}

/// Outcome of [`DynamicLayoutPart::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitResult {
    NotFound,
    Done,
    /// The window is the only thing in this part; the parent has to replace
    /// the whole part.
    ReplaceMe,
}

/// A user-built tree of splits. Every node divides its area evenly between
/// its children along `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicLayoutPart {
    pub gap: f64,
    pub direction: Orientation,
    pub sub_parts: Vec<DynamicNode>,
}

impl DynamicLayoutPart {
    pub fn new(gap: f64, direction: Orientation) -> DynamicLayoutPart {
        DynamicLayoutPart { gap, direction, sub_parts: Vec::new() }
    }

    /// Wraps `window` into a new part laid out along `direction`.
    pub fn split(&mut self, direction: Orientation, window: WindowId) {
        let _ = self.split_inner(direction, window);
    }

    fn split_inner(&mut self, direction: Orientation, window: WindowId) -> SplitResult {
        // Only the root part keeps the tile gap; nested parts sit flush.
        let replacement = || {
            let mut part = DynamicLayoutPart::new(0.0, direction);
            part.sub_parts.push(DynamicNode::Window(window));
            DynamicNode::Part(part)
        };

        let len = self.sub_parts.len();
        for i in 0..len {
            let hit = match &mut self.sub_parts[i] {
                DynamicNode::Window(id) if *id == window => {
                    if len == 1 {
                        return SplitResult::ReplaceMe;
                    }
                    true
                }
                DynamicNode::Window(_) => false,
                DynamicNode::Part(part) => match part.split_inner(direction, window) {
                    SplitResult::NotFound => false,
                    SplitResult::Done => return SplitResult::Done,
                    SplitResult::ReplaceMe => true,
                },
            };
            if hit {
                self.sub_parts[i] = replacement();
                return SplitResult::Done;
            }
        }
        SplitResult::NotFound
    }

    /// Brings the tree in sync with `ids`, the current window order: drops
    /// windows that are gone or out of order and, at the top level, appends
    /// whatever is left.
    pub fn prepare(&mut self, ids: &mut VecDeque<WindowId>, top_level: bool) {
        self.sub_parts.retain_mut(|node| match node {
            DynamicNode::Part(part) => {
                part.prepare(ids, false);
                !part.sub_parts.is_empty()
            }
            DynamicNode::Window(id) => {
                if ids.front() == Some(&*id) {
                    ids.pop_front();
                    true
                } else {
                    false
                }
            }
        });

        if top_level {
            self.sub_parts.extend(ids.drain(..).map(DynamicNode::Window));
        }
    }

    /// Places `new` right after `current`, inside the same part. Returns
    /// whether `current` was found.
    pub fn handle_new_window(&mut self, current: WindowId, new: WindowId) -> bool {
        for i in 0..self.sub_parts.len() {
            let found = match &mut self.sub_parts[i] {
                DynamicNode::Part(part) => {
                    if part.handle_new_window(current, new) {
                        return true;
                    }
                    false
                }
                DynamicNode::Window(id) => *id == current,
            };
            if found {
                self.sub_parts.insert(i + 1, DynamicNode::Window(new));
                return true;
            }
        }
        false
    }

    /// One rectangle per window, in tree order. `ids` is consumed as windows
    /// are placed.
    pub fn apply(&self, area: Rect, ids: &mut VecDeque<WindowId>) -> Vec<Rect> {
        let weights = vec![1.0; self.sub_parts.len()];
        let areas = split_area_weighted(area, &weights, self.gap, self.direction.is_horizontal());

        let mut rects = Vec::new();
        for (node, part_area) in self.sub_parts.iter().zip(areas) {
            match node {
                DynamicNode::Part(part) => rects.extend(part.apply(part_area, ids)),
                DynamicNode::Window(expected) => {
                    match ids.pop_front() {
                        Some(id) if id != *expected => {
                            warn!("unexpected window {id} in dynamic layout, expected {expected}");
                        }
                        None => {
                            warn!("dynamic layout ran out of windows at {expected}");
                            return rects;
                        }
                        Some(_) => {}
                    }
                    rects.push(part_area);
                }
            }
        }
        rects
    }

    /// Window ids in tree order.
    pub fn windows(&self) -> Vec<WindowId> {
        let mut out = Vec::new();
        for node in &self.sub_parts {
            match node {
                DynamicNode::Part(part) => out.extend(part.windows()),
                DynamicNode::Window(id) => out.push(*id),
            }
        }
        out
    }
}

/// Splits are built by hand with the split commands; new windows join the
/// part of the window they were opened from.
#[derive(Debug, Clone)]
pub struct DynamicLayout {
    parts: DynamicLayoutPart,
}

impl DynamicLayout {
    pub fn new(settings: &Settings) -> DynamicLayout {
        DynamicLayout {
            parts: DynamicLayoutPart::new(settings.tile_gap(), Orientation::Horizontal),
        }
    }

    pub fn parts(&self) -> &DynamicLayoutPart { &self.parts }
}

impl WindowsLayout for DynamicLayout {
    fn id(&self) -> LayoutId { LayoutId::Dynamic }

    fn name(&self) -> &'static str { "Dynamic Layout" }

    fn icon(&self) -> &'static str { "mosaic-dynamic" }

    fn capabilities(&self) -> LayoutCapabilities {
        LayoutCapabilities::ACTIONS | LayoutCapabilities::NEW_WINDOW
    }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        for tile in tileables.iter_mut() {
            tile.set_state(WindowState::Tiled);
        }

        let ids: VecDeque<WindowId> = tileables.iter().map(|t| t.id()).collect();
        self.parts.prepare(&mut ids.clone(), true);
        let rects = self.parts.apply(area, &mut ids.clone());
        debug!(?rects, "dynamic layout applied");

        for (tile, geometry) in tileables.iter_mut().zip(rects) {
            tile.geometry = geometry;
        }
    }

    fn execute_action(&mut self, cmd: &LayoutCommand, current: Option<WindowId>) -> ActionResponse {
        let direction = match cmd {
            LayoutCommand::SplitHorizontally => Orientation::Horizontal,
            LayoutCommand::SplitVertically => Orientation::Vertical,
            _ => return ActionResponse::Unhandled,
        };
        if let Some(window) = current {
            self.parts.split(direction, window);
        }
        ActionResponse::Handled
    }

    fn handle_new_window(&mut self, current: WindowId, new: WindowId) {
        let _ = self.parts.handle_new_window(current, new);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::systems::test_support::*;

    fn area() -> Rect { Rect::new(0.0, 0.0, 1000.0, 1000.0) }

    fn ids(raw: &[u64]) -> VecDeque<WindowId> { raw.iter().copied().map(WindowId::new).collect() }

    fn arrange(layout: &mut DynamicLayout, ws: &mut [EngineWindow]) -> Vec<Rect> {
        let mut tiles: Vec<_> = ws.iter_mut().collect();
        layout.apply(&mut controller(), &mut tiles, area());
        geometries(ws)
    }

    #[test]
    fn unknown_windows_are_appended_side_by_side() {
        let mut layout = DynamicLayout::new(&Settings::default());
        let mut ws = windows(2);
        assert_eq!(
            arrange(&mut layout, &mut ws),
            vec![Rect::new(0.0, 0.0, 500.0, 1000.0), Rect::new(500.0, 0.0, 500.0, 1000.0)]
        );
        assert_eq!(layout.parts().windows(), vec![WindowId::new(1), WindowId::new(2)]);
    }

    #[test]
    fn splitting_nests_a_part() {
        let mut layout = DynamicLayout::new(&Settings::default());
        let mut ws = windows(2);
        let _ = arrange(&mut layout, &mut ws);

        assert_eq!(
            layout.execute_action(&LayoutCommand::SplitVertically, Some(WindowId::new(2))),
            ActionResponse::Handled
        );
        layout.handle_new_window(WindowId::new(2), WindowId::new(3));

        let mut ws = windows(3);
        assert_eq!(
            arrange(&mut layout, &mut ws),
            vec![
                Rect::new(0.0, 0.0, 500.0, 1000.0),
                Rect::new(500.0, 0.0, 500.0, 500.0),
                Rect::new(500.0, 500.0, 500.0, 500.0),
            ]
        );
    }

    #[test]
    fn nested_parts_have_no_gap() {
        let mut settings = Settings::default();
        settings.gaps.inner = 10.0;
        let mut layout = DynamicLayout::new(&settings);
        let mut ws = windows(2);
        let _ = arrange(&mut layout, &mut ws);
        let _ = layout.execute_action(&LayoutCommand::SplitVertically, Some(WindowId::new(2)));
        layout.handle_new_window(WindowId::new(2), WindowId::new(3));

        let mut ws = windows(3);
        let mut tiles: Vec<_> = ws.iter_mut().collect();
        layout.apply(&mut controller(), &mut tiles, Rect::new(0.0, 0.0, 1010.0, 1000.0));
        assert_eq!(
            geometries(&ws),
            vec![
                Rect::new(0.0, 0.0, 500.0, 1000.0),
                Rect::new(510.0, 0.0, 500.0, 500.0),
                Rect::new(510.0, 500.0, 500.0, 500.0),
            ]
        );
        let DynamicNode::Part(nested) = &layout.parts().sub_parts[1] else {
            panic!("expected a nested part: {:?}", layout.parts());
        };
        assert_eq!(nested.gap, 0.0);
    }

    #[test]
    fn split_of_lone_window_replaces_its_part() {
        let mut part = DynamicLayoutPart::new(0.0, Orientation::Horizontal);
        part.prepare(&mut ids(&[1, 2]), true);
        part.split(Orientation::Vertical, WindowId::new(2));
        // Splitting again the only window of the nested part swaps the part
        // instead of nesting deeper.
        part.split(Orientation::Horizontal, WindowId::new(2));

        let DynamicNode::Part(nested) = &part.sub_parts[1] else {
            panic!("expected a nested part: {part:?}");
        };
        assert_eq!(nested.direction, Orientation::Horizontal);
        assert_eq!(nested.sub_parts, vec![DynamicNode::Window(WindowId::new(2))]);
    }

    #[test]
    fn prepare_drops_closed_windows_and_empty_parts() {
        let mut part = DynamicLayoutPart::new(0.0, Orientation::Horizontal);
        part.prepare(&mut ids(&[1, 2, 3]), true);
        part.split(Orientation::Vertical, WindowId::new(3));

        part.prepare(&mut ids(&[1, 2]), true);
        assert_eq!(
            part.sub_parts,
            vec![DynamicNode::Window(WindowId::new(1)), DynamicNode::Window(WindowId::new(2))]
        );
    }

    #[test]
    fn out_of_order_windows_are_re_appended() {
        let mut part = DynamicLayoutPart::new(0.0, Orientation::Horizontal);
        part.prepare(&mut ids(&[1, 2, 3]), true);
        part.split(Orientation::Vertical, WindowId::new(3));
        part.prepare(&mut ids(&[2, 1, 3]), true);
        // 1 and 3 lose their slots; the nested part goes away with 3.
        assert_eq!(
            part.sub_parts,
            vec![
                DynamicNode::Window(WindowId::new(2)),
                DynamicNode::Window(WindowId::new(1)),
                DynamicNode::Window(WindowId::new(3)),
            ]
        );
    }

    #[test]
    fn new_window_lands_next_to_current() {
        let mut part = DynamicLayoutPart::new(0.0, Orientation::Horizontal);
        part.prepare(&mut ids(&[1, 2]), true);
        assert!(part.handle_new_window(WindowId::new(1), WindowId::new(9)));
        assert!(!part.handle_new_window(WindowId::new(7), WindowId::new(8)));
        assert_eq!(part.windows(), vec![WindowId::new(1), WindowId::new(9), WindowId::new(2)]);
    }

    #[test]
    fn other_commands_fall_through() {
        let mut layout = DynamicLayout::new(&Settings::default());
        assert_eq!(
            layout.execute_action(&LayoutCommand::IncreaseMasterCount, None),
            ActionResponse::Unhandled
        );
    }
}
