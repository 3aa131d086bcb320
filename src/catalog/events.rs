//! Catalog events.

use crate::{
    catalog::render::CardAction,
    vehicles::{
        form::{EditForm, VehicleForm},
        records::{CategoryFilter, VehicleId},
    },
};

/// Everything the presentation surface can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Create form submitted.
    Submit(VehicleForm),

    /// Edit form submitted.
    SubmitEdit(EditForm),

    /// Edit action on a card.
    OpenEdit(VehicleId),

    /// Edit surface dismissed.
    CloseEdit,

    /// Remove action on a card.
    Delete(VehicleId),

    /// Filter button activated.
    Filter(CategoryFilter),

    /// Search input changed.
    Search(String),

    /// Reload everything from the store.
    Refresh,
}

impl From<CardAction> for Event {
    fn from(action: CardAction) -> Self {
        match action {
            CardAction::Edit(id) => Event::OpenEdit(id),
            CardAction::Remove(id) => Event::Delete(id),
        }
    }
}
