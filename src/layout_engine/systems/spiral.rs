use crate::common::config::Settings;
use crate::layout_engine::graph::Angle;
use crate::layout_engine::parts::{FillLayoutPart, HalfSplitLayoutPart, LayoutPart};
use crate::layout_engine::systems::{LayoutCapabilities, LayoutId, WindowsLayout, position_of};
use crate::model::{EngineWindow, WindowState};
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

/// The far side of a spiral split: either the last tile or the next split.
#[derive(Debug, Clone)]
pub enum SpiralTail {
    Fill(FillLayoutPart),
    Split(Box<HalfSplitLayoutPart<FillLayoutPart, SpiralTail>>),
}

impl SpiralTail {
    /// Makes sure `remaining` splits hang off this point of the chain.
    /// `position` is the chain index of the split living here.
    fn bore(&mut self, position: usize, remaining: usize, gap: f64) {
        if remaining == 0 {
            return;
        }
        if let SpiralTail::Fill(_) = self {
            let mut split = HalfSplitLayoutPart::new(FillLayoutPart, SpiralTail::Fill(FillLayoutPart));
            split.angle = Angle::from_quarter_turns(position);
            split.gap = gap;
            *self = SpiralTail::Split(Box::new(split));
        }
        if let SpiralTail::Split(split) = self {
            split.secondary.bore(position + 1, remaining - 1, gap);
        }
    }
}

impl LayoutPart for SpiralTail {
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect> {
        match self {
            SpiralTail::Fill(fill) => fill.apply(area, tiles),
            SpiralTail::Split(split) => split.apply(area, tiles),
        }
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: usize,
        delta: RectDelta,
    ) -> RectDelta {
        match self {
            SpiralTail::Fill(fill) => fill.adjust(area, tiles, basis, delta),
            SpiralTail::Split(split) => split.adjust(area, tiles, basis, delta),
        }
    }
}

/// Each window takes half of what the previous one left, turning clockwise.
/// The chain of splits only ever grows so ratios survive windows closing.
#[derive(Debug, Clone)]
pub struct SpiralLayout {
    depth: usize,
    gap: f64,
    parts: HalfSplitLayoutPart<FillLayoutPart, SpiralTail>,
}

impl SpiralLayout {
    pub fn new(settings: &Settings) -> SpiralLayout {
        let gap = settings.tile_gap();
        let mut parts = HalfSplitLayoutPart::new(FillLayoutPart, SpiralTail::Fill(FillLayoutPart));
        parts.gap = gap;
        SpiralLayout { depth: 1, gap, parts }
    }

    fn bore(&mut self, depth: usize) {
        if self.depth >= depth {
            return;
        }
        self.parts.secondary.bore(1, depth - 1, self.gap);
        self.depth = depth;
    }
}

impl WindowsLayout for SpiralLayout {
    fn id(&self) -> LayoutId { LayoutId::Spiral }

    fn name(&self) -> &'static str { "Spiral Layout" }

    fn icon(&self) -> &'static str { "mosaic-spiral" }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::ADJUST }

    fn apply(&mut self, _: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect) {
        for tile in tileables.iter_mut() {
            tile.set_state(WindowState::Tiled);
        }

        self.bore(tileables.len());

        let geometries = self.parts.apply(area, tileables);
        for (tile, geometry) in tileables.iter_mut().zip(geometries) {
            tile.geometry = geometry;
        }
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: WindowId,
        delta: RectDelta,
    ) {
        if let Some(idx) = position_of(tiles, basis) {
            let _ = self.parts.adjust(area, tiles, idx, delta);
        }
    }
}
