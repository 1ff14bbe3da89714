//! Dashboard statistics over a party's orders.

use crate::model::{Order, OrderStatus};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub total_orders: usize,
    pub completed_orders: usize,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    /// One entry per status, zero counts included.
    pub by_status: BTreeMap<OrderStatus, usize>,
    pub active_orders: usize,
    pub completed_orders: usize,
    pub total_amount: Decimal,
    pub average_order_value: Decimal,
    pub this_month: MonthlyStats,
}

/// Sums clamp at `Decimal::MAX`.
fn add_amount(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}

/// Aggregates `orders`; "this month" is `now`'s calendar month in UTC.
pub fn compute_order_stats(orders: &[Order], now: DateTime<Utc>) -> OrderStats {
    let mut by_status: BTreeMap<OrderStatus, usize> =
        OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut total_amount = Decimal::ZERO;
    let mut this_month = MonthlyStats {
        total_orders: 0,
        completed_orders: 0,
        total_amount: Decimal::ZERO,
    };

    for order in orders {
        *by_status.entry(order.status).or_insert(0) += 1;
        total_amount = add_amount(total_amount, order.total_amount);

        if order.created_at.year() == now.year() && order.created_at.month() == now.month() {
            this_month.total_orders += 1;
            this_month.total_amount = add_amount(this_month.total_amount, order.total_amount);
            if order.status == OrderStatus::Delivered {
                this_month.completed_orders += 1;
            }
        }
    }

    let average_order_value = if orders.is_empty() {
        Decimal::ZERO
    } else {
        (total_amount / Decimal::from(orders.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    OrderStats {
        total_orders: orders.len(),
        active_orders: orders.iter().filter(|o| o.status.is_active()).count(),
        completed_orders: by_status
            .get(&OrderStatus::Delivered)
            .copied()
            .unwrap_or(0),
        by_status,
        total_amount,
        average_order_value,
        this_month,
    }
}
