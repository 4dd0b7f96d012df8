//! Order totals calculation using rust_decimal for precision
//!
//! All monetary math is done in `Decimal` and converted to `f64` only at
//! the storage/serialization boundary. Line prices are the snapshot values
//! recorded when an item was added, never the live dish price.

use rust_decimal::prelude::*;
use shared::models::{OrderItem, OrderTotals};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tip policy for a totals run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tip {
    /// Caller-supplied flat amount
    Flat(f64),
    /// Fraction of the subtotal (0.10 = 10%)
    Rate(f64),
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[inline]
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute display totals for an order's line items
///
/// ```text
/// subtotal = Σ ordered_unit_price × quantity
/// tax      = subtotal × tax_rate
/// tip      = flat amount, or subtotal × tip rate
/// total    = subtotal + tax + tip
/// ```
///
/// Deterministic and free of I/O. Callers re-run it whenever the ledger
/// changes; the persisted order total is a separate explicit write-through
/// cache and is never derived here implicitly.
pub fn calculate_totals(items: &[OrderItem], tax_rate: f64, tip: Tip) -> OrderTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| to_decimal(item.ordered_unit_price) * Decimal::from(item.quantity))
        .sum();
    let subtotal = round2(subtotal);

    let tax = round2(subtotal * to_decimal(tax_rate));
    let tip = match tip {
        Tip::Flat(amount) => round2(to_decimal(amount)),
        Tip::Rate(rate) => round2(subtotal * to_decimal(rate)),
    };
    let total = subtotal + tax + tip;

    OrderTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        tip: to_f64(tip),
        total: to_f64(total),
    }
}
