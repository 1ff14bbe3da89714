//! The order state machine.
//!
//! Pure functions over `&mut Order`. The actor calls them on a staged copy, so a
//! failure here never reaches the stored order.

use super::error::OrderError;
use crate::model::{AvailableActions, Order, OrderNote, OrderStatus, PartyId};
use chrono::{DateTime, Utc};

/// Audit message recorded when the caller gives none.
pub fn default_note(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Order placed",
        OrderStatus::Accepted => "Order accepted by supplier",
        OrderStatus::Preparing => "Order is being prepared",
        OrderStatus::Packed => "Order packed and ready for dispatch",
        OrderStatus::InTransit => "Order is in transit",
        OrderStatus::OutForDelivery => "Order is out for delivery",
        OrderStatus::Delivered => "Order delivered",
        OrderStatus::Cancelled => "Order cancelled by supplier",
        OrderStatus::Rejected => "Order rejected by supplier",
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Moves `order` to `target` and appends the audit note.
///
/// Authorization is checked before the table: a party other than the order's
/// supplier gets `Forbidden` whatever the status.
pub fn apply_transition(
    order: &mut Order,
    target: OrderStatus,
    actor: PartyId,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), OrderError> {
    if actor != order.supplier_id {
        return Err(OrderError::Forbidden(format!(
            "only the supplier of {} can change its status",
            order.id
        )));
    }
    if !order.status.can_transition_to(target) {
        return Err(OrderError::InvalidTransition {
            current: order.status,
            requested: target,
            available: AvailableActions::for_status(order.status),
        });
    }

    let message = non_blank(note).unwrap_or_else(|| default_note(target));
    order.notes.push(OrderNote {
        message: message.to_string(),
        timestamp: now,
        author_id: actor,
    });
    order.status = target;
    order.updated_at = now;
    Ok(())
}

/// Rejects a pending order. The reason is checked first and ends up in the note.
pub fn reject_order(
    order: &mut Order,
    actor: PartyId,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), OrderError> {
    let reason = non_blank(reason).ok_or_else(|| {
        OrderError::ValidationError("a reason is required to reject an order".to_string())
    })?;
    let note = format!("Order rejected: {reason}");
    apply_transition(order, OrderStatus::Rejected, actor, Some(&note), now)
}
