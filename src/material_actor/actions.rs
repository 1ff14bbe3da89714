//! Stock operations on a [`Material`](crate::model::Material).

/// Custom actions for Material entities.
#[derive(Debug, Clone)]
pub enum MaterialAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes stock for a new order. Fails if the request exceeds what is available.
    ReserveStock(u32),
    /// Puts stock back after an order is cancelled or rejected.
    ReleaseStock(u32),
}

/// Results from MaterialActions - variants match 1:1 with MaterialAction.
/// Every variant carries the stock level after the action.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialActionResult {
    CheckStock(u32),
    ReserveStock(u32),
    ReleaseStock(u32),
}
