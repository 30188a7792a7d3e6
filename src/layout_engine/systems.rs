use bitflags::bitflags;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, VariantNames};

use super::command::{ActionResponse, LayoutCommand};
use crate::common::config::Settings;
use crate::model::EngineWindow;
use crate::sys::geometry::{Rect, RectDelta};
use crate::sys::host::Controller;
use crate::sys::window::WindowId;

/// Stable name of a layout, as written in the config file.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    VariantNames,
    EnumIter
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutId {
    #[default]
    Tile,
    Monocle,
    ThreeColumn,
    Spiral,
    Spread,
    Stair,
    Quarter,
    Slabs,
    Cascade,
    Floating,
    Dynamic,
    VerticalTile,
}

bitflags! {
    /// Optional behaviour a layout opts into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayoutCapabilities: u8 {
        /// Reacts to tiles being resized by hand.
        const ADJUST = 1 << 0;
        /// Gets first refusal on user commands.
        const ACTIONS = 1 << 1;
        /// Wants to hear where new windows were inserted.
        const NEW_WINDOW = 1 << 2;
    }
}

#[enum_dispatch]
pub trait WindowsLayout {
    fn id(&self) -> LayoutId;

    /// Human-readable name, shown in notifications.
    fn name(&self) -> &'static str;

    fn icon(&self) -> &'static str;

    /// Layout-specific state worth showing next to the name, e.g. the
    /// number of master windows.
    fn hint(&self) -> Option<String> { None }

    /// Maximum number of windows the layout tiles.
    fn capacity(&self) -> Option<usize> { None }

    fn capabilities(&self) -> LayoutCapabilities { LayoutCapabilities::empty() }

    /// Assigns a state and a geometry to every tileable window.
    fn apply(&mut self, controller: &mut dyn Controller, tileables: &mut [&mut EngineWindow], area: Rect);

    /// Folds a manual resize of `basis` back into the layout's ratios and
    /// weights.
    fn adjust(
        &mut self,
        _area: Rect,
        _tiles: &mut [&mut EngineWindow],
        _basis: WindowId,
        _delta: RectDelta,
    ) {
    }

    fn execute_action(&mut self, _cmd: &LayoutCommand, _current: Option<WindowId>) -> ActionResponse {
        ActionResponse::Unhandled
    }

    /// `new` was inserted right after `current` in the window order.
    fn handle_new_window(&mut self, _current: WindowId, _new: WindowId) {}
}

#[enum_dispatch(WindowsLayout)]
#[derive(Debug, Clone)]
pub enum WindowsLayoutKind {
    Tile(TileLayout),
    Monocle(MonocleLayout),
    ThreeColumn(ThreeColumnLayout),
    Spiral(SpiralLayout),
    Spread(SpreadLayout),
    Stair(StairLayout),
    Quarter(QuarterLayout),
    Slabs(SlabsLayout),
    Cascade(CascadeLayout),
    Floating(FloatingLayout),
    Dynamic(DynamicLayout),
    VerticalTile(VerticalTileLayout),
}

impl WindowsLayoutKind {
    pub fn new(id: LayoutId, settings: &Settings) -> WindowsLayoutKind {
        match id {
            LayoutId::Tile => TileLayout::new(settings).into(),
            LayoutId::Monocle => MonocleLayout::new(settings).into(),
            LayoutId::ThreeColumn => ThreeColumnLayout::new(settings).into(),
            LayoutId::Spiral => SpiralLayout::new(settings).into(),
            LayoutId::Spread => SpreadLayout::default().into(),
            LayoutId::Stair => StairLayout::default().into(),
            LayoutId::Quarter => QuarterLayout::new(settings).into(),
            LayoutId::Slabs => SlabsLayout::new(settings).into(),
            LayoutId::Cascade => CascadeLayout::default().into(),
            LayoutId::Floating => FloatingLayout.into(),
            LayoutId::Dynamic => DynamicLayout::new(settings).into(),
            LayoutId::VerticalTile => VerticalTileLayout::new(settings).into(),
        }
    }

    pub fn is_monocle(&self) -> bool { matches!(self, WindowsLayoutKind::Monocle(_)) }
}

/// Index of `basis` among `tiles`.
pub(crate) fn position_of(tiles: &[&mut EngineWindow], basis: WindowId) -> Option<usize> {
    tiles.iter().position(|t| t.id() == basis)
}

/// Applies stack weights of `tiles` to `area` and writes the result back.
pub(crate) fn stack_tiles(tiles: &mut [&mut EngineWindow], area: Rect, gap: f64, horizontal: bool) {
    let weights: Vec<f64> = tiles.iter().map(|t| t.weight()).collect();
    let areas = super::utils::split_area_weighted(area, &weights, gap, horizontal);
    for (tile, geometry) in tiles.iter_mut().zip(areas) {
        tile.geometry = geometry;
    }
}

/// Re-weights `tiles` after `tiles[basis]` was resized along one axis.
pub(crate) fn reweight_tiles(
    tiles: &mut [&mut EngineWindow],
    area: Rect,
    gap: f64,
    basis: usize,
    delta: RectDelta,
    horizontal: bool,
) {
    let weights: Vec<f64> = tiles.iter().map(|t| t.weight()).collect();
    let n = tiles.len() as f64;
    let new_weights = super::utils::adjust_area_weights(area, &weights, gap, basis, delta, horizontal);
    for (tile, weight) in tiles.iter_mut().zip(new_weights) {
        tile.set_weight(weight * n);
    }
}

mod cascade;
mod dynamic;
mod floating;
mod monocle;
mod quarter;
mod slabs;
mod spiral;
mod spread;
mod stair;
mod three_column;
mod tile;
mod vertical_tile;

pub use cascade::CascadeLayout;
pub use dynamic::{DynamicLayout, DynamicLayoutPart};
pub use floating::FloatingLayout;
pub use monocle::MonocleLayout;
pub use quarter::QuarterLayout;
pub use slabs::SlabsLayout;
pub use spiral::SpiralLayout;
pub use spread::SpreadLayout;
pub use stair::StairLayout;
pub use three_column::ThreeColumnLayout;
pub use tile::TileLayout;
pub use vertical_tile::VerticalTileLayout;
