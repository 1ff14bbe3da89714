//! Custom actions for the Order actor.

use crate::model::{OrderStatus, PartyId};

/// Status changes are the only mutation an order accepts.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order to `target` on behalf of `actor`.
    ///
    /// `note` overrides the default audit message; a blank note counts as absent.
    /// For `target == Rejected` the note is the rejection reason and is required.
    Transition {
        target: OrderStatus,
        actor: PartyId,
        note: Option<String>,
    },
}
