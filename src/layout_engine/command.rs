use serde::{Deserialize, Serialize};

use super::graph::Direction;
use super::systems::LayoutId;

/// A user action, usually bound to a shortcut by the host.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    FocusNext,
    FocusPrev,
    MoveFocus(Direction),

    MoveNext,
    MovePrev,
    MoveWindow(Direction),

    IncreaseWidth,
    DecreaseWidth,
    IncreaseHeight,
    DecreaseHeight,

    IncreaseMasterCount,
    DecreaseMasterCount,
    IncreaseMasterSize,
    DecreaseMasterSize,

    ToggleFloat,
    FloatAll,
    PushToMaster,

    NextLayout,
    PrevLayout,
    ToggleLayout(LayoutId),

    Rotate,
    RotateReverse,
    RotatePart,

    SplitHorizontally,
    SplitVertically,
}

/// What a layout did with a command offered to it.
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ActionResponse {
    /// Not interested; run the command's default behaviour.
    #[default]
    Unhandled,
    Handled,
    /// Handled, and the layout's name or hint changed.
    ShowLayoutNotification,
    /// Handled by redirecting to a focus move through the window order.
    FocusOrder { step: isize, include_hidden: bool },
}

impl ActionResponse {
    pub fn is_handled(self) -> bool { self != ActionResponse::Unhandled }
}
