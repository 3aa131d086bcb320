//! Presentation surface.
//!
//! The controller never draws anything itself. It hands view models to a
//! [`Surface`], which may be a terminal, a web page or a test recorder.

use async_trait::async_trait;

use crate::{
    catalog::render::{CardGrid, StatisticsPanel},
    vehicles::form::EditForm,
};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation went through.
    Success,

    /// The operation was refused or failed.
    Error,
}

/// Blocking user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Success or error.
    pub severity: Severity,

    /// Text shown to the user.
    pub message: &'static str,
}

impl Notice {
    /// Success notice.
    #[must_use]
    pub const fn success(message: &'static str) -> Self {
        Self {
            severity: Severity::Success,
            message,
        }
    }

    /// Error notice.
    #[must_use]
    pub const fn error(message: &'static str) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

/// Shown after a successful insert.
pub const VEHICLE_ADDED: Notice = Notice::success("Vehicle added to Vault!");

/// Shown after a successful edit.
pub const VEHICLE_UPDATED: Notice = Notice::success("Vehicle updated successfully!");

/// Shown after a successful delete.
pub const VEHICLE_REMOVED: Notice = Notice::success("Vehicle removed successfully!");

/// Shown when the chassis number is already taken.
pub const DUPLICATE_CHASSIS: Notice =
    Notice::error("Error: Chassis number already exists in the vault!");

/// Shown when a form names an unknown category.
pub const INVALID_CATEGORY: Notice = Notice::error("Error: Unknown vehicle category.");

/// Shown when the store rejects an insert.
pub const ADD_FAILED: Notice = Notice::error("Failed to add vehicle. Check logs for details.");

/// Shown when the store rejects an edit.
pub const UPDATE_FAILED: Notice = Notice::error("Failed to update vehicle");

/// Shown when the store rejects a delete.
pub const REMOVE_FAILED: Notice = Notice::error("Failed to remove vehicle");

/// Inline message replacing the card grid when loading fails.
pub const LOAD_ERROR: &str = "Error loading vehicles";

/// Confirmation prompt shown before deletion.
pub const REMOVE_PROMPT: &str = "Remove this vehicle from vault?";

/// Where the controller sends everything it wants shown.
#[async_trait]
pub trait Surface: Send {
    /// Replace the statistics panel.
    fn render_statistics(&mut self, panel: &StatisticsPanel);

    /// Replace the card grid and count label.
    fn render_cards(&mut self, grid: &CardGrid);

    /// Replace the card grid with an inline error.
    fn render_error(&mut self, message: &str);

    /// Show a notice.
    fn notify(&mut self, notice: Notice);

    /// Ask the user to confirm; `false` means declined.
    async fn confirm(&mut self, prompt: &str) -> bool;

    /// Clear the create form after a successful insert.
    fn reset_create_form(&mut self);

    /// Show the edit surface populated with `form`.
    fn open_edit(&mut self, form: EditForm);

    /// Hide the edit surface.
    fn close_edit(&mut self);
}
