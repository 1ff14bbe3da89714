//! Order status and the transition table.
//!
//! [`OrderStatus::allowed_next`] is the only place the workflow is written down. The
//! named supplier operations ([`OrderStep`]) carry nothing but a target status; whether
//! a step is possible from the current status is always answered by the table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    #[serde(alias = "confirmed")]
    Accepted,
    Preparing,
    Packed,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Packed,
        OrderStatus::InTransit,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Rejected,
    ];

    /// Statuses reachable in one step.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Accepted, Rejected],
            Accepted => &[Preparing, Cancelled],
            Preparing => &[Packed, Cancelled],
            Packed => &[InTransit, Cancelled],
            InTransit => &[OutForDelivery, Cancelled],
            OutForDelivery => &[Delivered, Cancelled],
            Delivered | Cancelled | Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Placed and not yet finished.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Packed => "packed",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "confirmed" {
            return Ok(OrderStatus::Accepted);
        }
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A named supplier operation on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStep {
    Accept,
    Reject,
    Prepare,
    Pack,
    Transit,
    OutForDelivery,
    Deliver,
    Cancel,
}

impl OrderStep {
    pub const ALL: [OrderStep; 8] = [
        OrderStep::Accept,
        OrderStep::Reject,
        OrderStep::Prepare,
        OrderStep::Pack,
        OrderStep::Transit,
        OrderStep::OutForDelivery,
        OrderStep::Deliver,
        OrderStep::Cancel,
    ];

    pub fn target(self) -> OrderStatus {
        match self {
            OrderStep::Accept => OrderStatus::Accepted,
            OrderStep::Reject => OrderStatus::Rejected,
            OrderStep::Prepare => OrderStatus::Preparing,
            OrderStep::Pack => OrderStatus::Packed,
            OrderStep::Transit => OrderStatus::InTransit,
            OrderStep::OutForDelivery => OrderStatus::OutForDelivery,
            OrderStep::Deliver => OrderStatus::Delivered,
            OrderStep::Cancel => OrderStatus::Cancelled,
        }
    }

    /// The step that leads into `status`, if any.
    pub fn for_target(status: OrderStatus) -> Option<OrderStep> {
        OrderStep::ALL.into_iter().find(|step| step.target() == status)
    }

    /// Human label reported back to clients as an available action.
    pub fn label(self) -> &'static str {
        match self {
            OrderStep::Accept => "accept",
            OrderStep::Reject => "reject",
            OrderStep::Prepare => "start preparing",
            OrderStep::Pack => "mark packed",
            OrderStep::Transit => "start transit",
            OrderStep::OutForDelivery => "out for delivery",
            OrderStep::Deliver => "mark delivered",
            OrderStep::Cancel => "cancel",
        }
    }

    /// Parses the action segment of `POST /order/supplier/:id/:action`.
    /// Cancelling goes through the generic status endpoint.
    pub fn from_path(segment: &str) -> Option<OrderStep> {
        match segment {
            "accept" => Some(OrderStep::Accept),
            "reject" => Some(OrderStep::Reject),
            "prepare" => Some(OrderStep::Prepare),
            "pack" => Some(OrderStep::Pack),
            "transit" => Some(OrderStep::Transit),
            "delivery" => Some(OrderStep::OutForDelivery),
            "delivered" => Some(OrderStep::Deliver),
            _ => None,
        }
    }

    /// The status this step must start from, when the table has exactly one.
    pub fn required_status(self) -> Option<OrderStatus> {
        let mut predecessors = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(self.target()));
        match (predecessors.next(), predecessors.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// The steps open from a given status, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableActions(Vec<OrderStep>);

impl AvailableActions {
    pub fn for_status(status: OrderStatus) -> Self {
        Self(
            status
                .allowed_next()
                .iter()
                .filter_map(|next| OrderStep::for_target(*next))
                .collect(),
        )
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|step| step.label()).collect()
    }
}

impl fmt::Display for AvailableActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.labels().join(", "))
    }
}
