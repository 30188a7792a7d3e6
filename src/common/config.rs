use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::layout_engine::LayoutId;
use crate::sys::geometry::Rect;

/// Largest master count any layout accepts.
pub const MAX_MASTER_COUNT: usize = 10;

pub fn config_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("mosaic")
        .join("config.toml")
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown layout `{name}`, expected one of: {}", LayoutId::VARIANTS.join(", "))]
    UnknownLayout { name: String },
    #[error("layout.order must name at least one layout")]
    EmptyLayoutOrder,
    #[error("layout.order lists `{0}` more than once")]
    DuplicateLayout(LayoutId),
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Parses a layout id the way the config file spells it (`three_column`).
pub fn parse_layout_id(name: &str) -> Result<LayoutId, ConfigError> {
    LayoutId::from_str(name).map_err(|_| ConfigError::UnknownLayout { name: name.to_string() })
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub gaps: GapSettings,
    /// Keep floating windows above tiled ones.
    #[serde(default = "yes")]
    pub keep_float_above: bool,
    /// Strip decorations from tiled windows.
    #[serde(default = "no")]
    pub no_tile_border: bool,
    /// Insert new windows at the front of the order instead of after the
    /// current window.
    #[serde(default = "no")]
    pub new_window_as_master: bool,
    /// Dragging a tile far enough away from its slot floats it.
    #[serde(default = "yes")]
    pub untile_by_dragging: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Layouts reachable by cycling, in order. The first one is the initial
    /// layout of every surface.
    #[serde(default = "default_layout_order")]
    pub order: Vec<LayoutId>,
    #[serde(default = "no")]
    pub maximize_sole_tile: bool,
    #[serde(default = "yes")]
    pub monocle_maximize: bool,
    /// Minimize every other tile while Monocle is active.
    #[serde(default = "no")]
    pub monocle_minimize_rest: bool,
    /// Tiles wider than `working area height * ratio` are narrowed and
    /// centred. Zero disables the limit.
    #[serde(default)]
    pub limit_tile_width_ratio: f64,
}

/// Gap configuration for window spacing
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct GapSettings {
    /// Space between tiles and the screen edges
    #[serde(default)]
    pub outer: OuterGaps,
    /// Space between neighbouring tiles
    #[serde(default)]
    pub inner: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct OuterGaps {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub right: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            gaps: GapSettings::default(),
            keep_float_above: true,
            no_tile_border: false,
            new_window_as_master: false,
            untile_by_dragging: true,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            order: default_layout_order(),
            maximize_sole_tile: false,
            monocle_maximize: true,
            monocle_minimize_rest: false,
            limit_tile_width_ratio: 0.0,
        }
    }
}

impl Settings {
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut issues = self.layout.issues();
        issues.extend(self.gaps.issues());
        issues
    }

    pub fn validate(&self) -> Vec<String> {
        self.issues().iter().map(ToString::to_string).collect()
    }

    /// The working area of a surface minus the outer gaps.
    pub fn tiling_area(&self, working_area: Rect) -> Rect {
        let outer = &self.gaps.outer;
        working_area.gap(outer.left, outer.right, outer.top, outer.bottom)
    }

    /// The gap layouts leave between neighbouring tiles.
    pub fn tile_gap(&self) -> f64 { self.gaps.inner }
}

impl LayoutSettings {
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.order.is_empty() {
            issues.push(ConfigError::EmptyLayoutOrder);
        }
        for (i, id) in self.order.iter().enumerate() {
            if self.order[..i].contains(id) {
                issues.push(ConfigError::DuplicateLayout(*id));
            }
        }

        if !(0.0..=10.0).contains(&self.limit_tile_width_ratio) {
            issues.push(ConfigError::OutOfRange {
                field: "layout.limit_tile_width_ratio",
                value: self.limit_tile_width_ratio,
                min: 0.0,
                max: 10.0,
            });
        }

        issues
    }

    /// The layout a fresh surface starts on.
    pub fn initial_layout(&self) -> LayoutId { self.order.first().copied().unwrap_or_default() }
}

impl GapSettings {
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();
        let fields = [
            ("gaps.outer.top", self.outer.top),
            ("gaps.outer.left", self.outer.left),
            ("gaps.outer.bottom", self.outer.bottom),
            ("gaps.outer.right", self.outer.right),
            ("gaps.inner", self.inner),
        ];
        for (field, value) in fields {
            if value < 0.0 {
                issues.push(ConfigError::Negative { field, value });
            }
        }
        issues
    }
}

fn yes() -> bool { true }

fn no() -> bool { false }

fn default_layout_order() -> Vec<LayoutId> {
    vec![
        LayoutId::Tile,
        LayoutId::Monocle,
        LayoutId::ThreeColumn,
        LayoutId::Spread,
        LayoutId::Stair,
        LayoutId::Spiral,
    ]
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn default() -> Config {
        Self::parse(include_str!("../../mosaic.default.toml"))
            .unwrap_or_else(|_| Config { settings: Settings::default() })
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        let file: ConfigFile = match toml::from_str(buf) {
            Ok(file) => file,
            Err(e) => bail!("{e}"),
        };
        // An empty order leaves surfaces without a layout to start on.
        if file.settings.layout.order.is_empty() {
            return Err(ConfigError::EmptyLayoutOrder.into());
        }
        Ok(Config { settings: file.settings })
    }
}
