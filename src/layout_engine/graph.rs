use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::sys::geometry::{Rect, RectDelta};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool { self == Orientation::Horizontal }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Whether the direction points away from the origin (right or down).
    pub fn is_forward(self) -> bool { matches!(self, Direction::Right | Direction::Down) }

    /// The origin coordinate along the direction's axis.
    pub fn origin(self, rect: &Rect) -> f64 {
        match self.orientation() {
            Orientation::Horizontal => rect.x,
            Orientation::Vertical => rect.y,
        }
    }

    /// The span of `rect` across the direction's axis.
    pub fn cross_span(self, rect: &Rect) -> (f64, f64) {
        match self.orientation() {
            Orientation::Horizontal => (rect.y, rect.max_y()),
            Orientation::Vertical => (rect.x, rect.max_x()),
        }
    }

    /// The edge of a candidate that faces back towards the basis window.
    pub fn facing_edge(self, rect: &Rect) -> f64 {
        match self {
            Direction::Up => rect.max_y(),
            Direction::Down => rect.y,
            Direction::Left => rect.max_x(),
            Direction::Right => rect.x,
        }
    }
}

/// Rotation of a layout part, in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Angle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    pub fn from_quarter_turns(turns: usize) -> Angle {
        match turns % 4 {
            0 => Angle::Deg0,
            1 => Angle::Deg90,
            2 => Angle::Deg180,
            _ => Angle::Deg270,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }

    /// Rotates by a quarter turn clockwise, or counter-clockwise when
    /// `clockwise` is false.
    pub fn rotated(self, clockwise: bool) -> Angle {
        let turns = self.degrees() as usize / 90;
        Angle::from_quarter_turns(if clockwise { turns + 1 } else { turns + 3 })
    }

    /// 0 and 180 split along the x axis.
    pub fn is_horizontal(self) -> bool { matches!(self, Angle::Deg0 | Angle::Deg180) }

    /// 180 and 270 put the primary side at the far end.
    pub fn is_reversed(self) -> bool { matches!(self, Angle::Deg180 | Angle::Deg270) }

    /// Maps a delta from the outer frame into the rotated frame.
    pub fn rotate_delta(self, delta: RectDelta) -> RectDelta {
        match self {
            Angle::Deg0 => delta,
            Angle::Deg90 => RectDelta::new(delta.south, delta.north, delta.east, delta.west),
            Angle::Deg180 => RectDelta::new(delta.west, delta.east, delta.south, delta.north),
            Angle::Deg270 => RectDelta::new(delta.north, delta.south, delta.east, delta.west),
        }
    }

    /// Inverse of [`Self::rotate_delta`].
    pub fn unrotate_delta(self, delta: RectDelta) -> RectDelta {
        match self {
            Angle::Deg270 => RectDelta::new(delta.south, delta.north, delta.west, delta.east),
            other => other.rotate_delta(delta),
        }
    }
}

/// The eight directions a cascade can fan out in, clockwise from north-west.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum CompassDirection {
    NorthWest,
    North,
    NorthEast,
    East,
    #[default]
    SouthEast,
    South,
    SouthWest,
    West,
}

impl CompassDirection {
    const ALL: [CompassDirection; 8] = [
        CompassDirection::NorthWest,
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
    ];

    /// `(vertical, horizontal)` unit steps.
    pub fn decompose(self) -> (i32, i32) {
        match self {
            CompassDirection::NorthWest => (-1, -1),
            CompassDirection::North => (-1, 0),
            CompassDirection::NorthEast => (-1, 1),
            CompassDirection::East => (0, 1),
            CompassDirection::SouthEast => (1, 1),
            CompassDirection::South => (1, 0),
            CompassDirection::SouthWest => (1, -1),
            CompassDirection::West => (0, -1),
        }
    }

    pub fn step(self, step: isize) -> CompassDirection {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or_default();
        Self::ALL[(idx as isize + step).rem_euclid(8) as usize]
    }
}
