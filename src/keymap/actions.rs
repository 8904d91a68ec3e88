//! Semantic actions that keyboard shortcuts map to.

use serde::{Deserialize, Serialize};

/// All user actions the application understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move selection up in a list
    MoveUp,
    /// Move selection down in a list
    MoveDown,
    /// Move the cursor left in an input
    MoveLeft,
    /// Move the cursor right in an input
    MoveRight,
    /// Jump up by a page
    PageUp,
    /// Jump down by a page
    PageDown,
    /// Go to the first item
    GoToTop,
    /// Go to the last item
    GoToEnd,

    // ============ Confirmation ============
    /// Submit / confirm (Enter)
    Confirm,
    /// Cancel or close an overlay (Esc)
    Cancel,

    // ============ Global ============
    /// Quit the application
    Quit,
    /// Show help overlay
    Help,
    /// Discard the session and start a new upload
    NewUpload,

    // ============ Editor ============
    /// Mark the selected segment as the first one of a clip
    MarkStart,
    /// Mark the selected segment as the last one of a clip
    MarkEnd,
    /// Turn the marked range into a clip
    AddClip,
    /// Remove the most recently added clip
    DeleteClip,
    /// Write clips to disk
    Save,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Confirm => "Confirm",
            Action::Cancel => "Cancel / close",
            Action::Quit => "Quit",
            Action::Help => "Show help",
            Action::NewUpload => "New upload",
            Action::MarkStart => "Mark clip start",
            Action::MarkEnd => "Mark clip end",
            Action::AddClip => "Add marked clip",
            Action::DeleteClip => "Remove last clip",
            Action::Save => "Save clips",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToEnd => "Navigation",

            Action::Confirm | Action::Cancel => "Selection",

            Action::Quit | Action::Help | Action::NewUpload => "Global",

            Action::MarkStart
            | Action::MarkEnd
            | Action::AddClip
            | Action::DeleteClip
            | Action::Save => "Clips",

            Action::Backspace | Action::DeleteChar => "Text Editing",
        }
    }

    /// Whether the action may fire while a text input has focus.
    ///
    /// Plain character keys always go to the input; this only applies to
    /// chords and non-character keys.
    pub fn works_while_typing(&self) -> bool {
        matches!(self, Action::Quit | Action::Help)
    }
}
