//! Pointer events and modifier flags delivered by the hosting view.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys and button state accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFlags {
    pub shift: bool,
    /// Duplicates the selection when a move starts.
    pub ctrl: bool,
    pub alt: bool,
    /// Primary (left) button is held.
    pub primary: bool,
}

impl EventFlags {
    /// No modifiers, no buttons.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        primary: false,
    };

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// An event routed to the active tool. Positions are in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolEvent {
    ButtonDown {
        position: Point,
        #[serde(default)]
        flags: EventFlags,
    },
    ButtonUp {
        position: Point,
        #[serde(default)]
        flags: EventFlags,
    },
    MouseMove {
        position: Point,
        #[serde(default)]
        flags: EventFlags,
    },
    DoubleClick {
        position: Point,
        #[serde(default)]
        flags: EventFlags,
    },
    /// Host-initiated abort (focus loss, Escape).
    Cancel,
    /// Properties command for the current selection.
    EditProperties,
}

impl ToolEvent {
    /// Parse a gesture script: a JSON array of events.
    pub fn script_from_json(json: &str) -> Result<Vec<ToolEvent>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Client position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            ToolEvent::ButtonDown { position, .. }
            | ToolEvent::ButtonUp { position, .. }
            | ToolEvent::MouseMove { position, .. }
            | ToolEvent::DoubleClick { position, .. } => Some(*position),
            ToolEvent::Cancel | ToolEvent::EditProperties => None,
        }
    }
}
