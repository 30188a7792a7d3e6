//! Composable geometry strategies. Concrete layouts nest these into fixed
//! trees; a part only ever sees the tiles routed to it.

use super::graph::Angle;
use super::utils::{adjust_area_half_weights, adjust_area_weights, split_area_half_weighted, split_area_weighted};
use crate::model::EngineWindow;
use crate::sys::geometry::{Rect, RectDelta};

pub trait LayoutPart {
    /// One rectangle per tile, in tile order.
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect>;

    /// Absorbs a resize of `tiles[basis]` and returns whatever part of `delta`
    /// the enclosing part still has to handle, in the caller's frame.
    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: usize,
        delta: RectDelta,
    ) -> RectDelta;
}

/// Every tile gets the whole area.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillLayoutPart;

impl LayoutPart for FillLayoutPart {
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect> { vec![area; tiles.len()] }

    fn adjust(&mut self, _: Rect, _: &mut [&mut EngineWindow], _: usize, delta: RectDelta) -> RectDelta {
        delta
    }
}

/// Tiles stacked top to bottom, sized by their own weights.
#[derive(Debug, Clone, Default)]
pub struct StackLayoutPart {
    pub gap: f64,
}

impl StackLayoutPart {
    pub fn new(gap: f64) -> Self { Self { gap } }
}

impl LayoutPart for StackLayoutPart {
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect> {
        let weights: Vec<f64> = tiles.iter().map(|t| t.weight()).collect();
        split_area_weighted(area, &weights, self.gap, false)
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: usize,
        delta: RectDelta,
    ) -> RectDelta {
        let weights: Vec<f64> = tiles.iter().map(|t| t.weight()).collect();
        let n = tiles.len() as f64;
        let new_weights = adjust_area_weights(area, &weights, self.gap, basis, delta, false);
        for (tile, weight) in tiles.iter_mut().zip(new_weights) {
            tile.set_weight(weight * n);
        }

        // Only the outermost tiles can move the stack's own top and bottom.
        RectDelta::new(
            delta.east,
            delta.west,
            if basis + 1 == tiles.len() { delta.south } else { 0.0 },
            if basis == 0 { delta.north } else { 0.0 },
        )
    }
}

/// Splits the area in two by `ratio`. The first `primary_size` tiles go to
/// `primary`, the rest to `secondary`.
///
/// | angle | split      | primary |
/// | ----- | ---------- | ------- |
/// |     0 | horizontal | left    |
/// |    90 | vertical   | top     |
/// |   180 | horizontal | right   |
/// |   270 | vertical   | bottom  |
#[derive(Debug, Clone)]
pub struct HalfSplitLayoutPart<P, S> {
    pub primary: P,
    pub secondary: S,
    pub angle: Angle,
    pub gap: f64,
    pub primary_size: usize,
    pub ratio: f64,
}

impl<P: LayoutPart, S: LayoutPart> HalfSplitLayoutPart<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            angle: Angle::Deg0,
            gap: 0.0,
            primary_size: 1,
            ratio: 0.5,
        }
    }

    fn physical_ratio(&self) -> f64 {
        if self.angle.is_reversed() { 1.0 - self.ratio } else { self.ratio }
    }
}

impl<P: LayoutPart, S: LayoutPart> LayoutPart for HalfSplitLayoutPart<P, S> {
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect> {
        if tiles.len() <= self.primary_size {
            return self.primary.apply(area, tiles);
        }
        if self.primary_size == 0 {
            return self.secondary.apply(area, tiles);
        }

        let (area1, area2) =
            split_area_half_weighted(area, self.physical_ratio(), self.gap, self.angle.is_horizontal());
        let (primary_area, secondary_area) =
            if self.angle.is_reversed() { (area2, area1) } else { (area1, area2) };

        let (primary_tiles, secondary_tiles) = tiles.split_at(self.primary_size);
        let mut result = self.primary.apply(primary_area, primary_tiles);
        result.extend(self.secondary.apply(secondary_area, secondary_tiles));
        result
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: usize,
        delta: RectDelta,
    ) -> RectDelta {
        if basis >= tiles.len() {
            return delta;
        }
        if tiles.len() <= self.primary_size {
            return self.primary.adjust(area, tiles, basis, delta);
        }
        if self.primary_size == 0 {
            return self.secondary.adjust(area, tiles, basis, delta);
        }

        let target = if basis < self.primary_size { 0 } else { 1 };
        let (primary_tiles, secondary_tiles) = tiles.split_at_mut(self.primary_size);
        let delta = if target == 0 {
            self.primary.adjust(area, primary_tiles, basis, delta)
        } else {
            self.secondary.adjust(area, secondary_tiles, basis - self.primary_size, delta)
        };

        let reversed = self.angle.is_reversed();
        let ratio = adjust_area_half_weights(
            area,
            self.physical_ratio(),
            self.gap,
            if reversed { 1 - target } else { target },
            delta,
            self.angle.is_horizontal(),
        );
        self.ratio = if reversed { 1.0 - ratio } else { ratio };

        // The edge between the halves is consumed here; the caller must not
        // see it again.
        match (self.angle, target) {
            (Angle::Deg0, 0) | (Angle::Deg180, 1) => RectDelta { east: 0.0, ..delta },
            (Angle::Deg0, _) | (Angle::Deg180, _) => RectDelta { west: 0.0, ..delta },
            (Angle::Deg90, 0) | (Angle::Deg270, 1) => RectDelta { south: 0.0, ..delta },
            (Angle::Deg90, _) | (Angle::Deg270, _) => RectDelta { north: 0.0, ..delta },
        }
    }
}

/// Runs the inner part in a rotated frame.
#[derive(Debug, Clone)]
pub struct RotateLayoutPart<T> {
    pub inner: T,
    pub angle: Angle,
}

impl<T: LayoutPart> RotateLayoutPart<T> {
    pub fn new(inner: T) -> Self { Self { inner, angle: Angle::Deg0 } }

    pub fn rotate(&mut self, clockwise: bool) { self.angle = self.angle.rotated(clockwise); }

    fn inner_area(&self, area: Rect) -> Rect {
        match self.angle {
            Angle::Deg90 | Angle::Deg270 => area.transposed(),
            Angle::Deg0 | Angle::Deg180 => area,
        }
    }
}

impl<T: LayoutPart> LayoutPart for RotateLayoutPart<T> {
    fn apply(&self, area: Rect, tiles: &[&mut EngineWindow]) -> Vec<Rect> {
        let area = self.inner_area(area);
        let result = self.inner.apply(area, tiles);
        let mirrored_x = |g: &Rect| area.x + area.width - (g.x - area.x + g.width);

        match self.angle {
            Angle::Deg0 => result,
            Angle::Deg90 => result.iter().map(Rect::transposed).collect(),
            Angle::Deg180 => result
                .iter()
                .map(|g| Rect::new(mirrored_x(g), g.y, g.width, g.height))
                .collect(),
            Angle::Deg270 => result
                .iter()
                .map(|g| Rect::new(g.y, mirrored_x(g), g.height, g.width))
                .collect(),
        }
    }

    fn adjust(
        &mut self,
        area: Rect,
        tiles: &mut [&mut EngineWindow],
        basis: usize,
        delta: RectDelta,
    ) -> RectDelta {
        let area = self.inner_area(area);
        let delta = self.inner.adjust(area, tiles, basis, self.angle.rotate_delta(delta));
        self.angle.unrotate_delta(delta)
    }
}
