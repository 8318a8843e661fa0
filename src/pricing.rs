//! Pricing
//!
//! Exact subtotal arithmetic over cart rows. All sums are carried in minor
//! units; nothing in this module rounds.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::line_items::{LineItem, LineItemId};

/// Errors that can occur while calculating line or cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum SubtotalError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// A line total overflowed minor-unit arithmetic.
    #[error("line total for item {0} overflowed")]
    LineTotalOverflow(LineItemId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total for a single cart row: unit price times quantity.
///
/// # Errors
///
/// Returns [`SubtotalError::LineTotalOverflow`] if the multiplication does
/// not fit in minor units.
pub fn line_total<'a>(item: &LineItem<'a>) -> Result<Money<'a, Currency>, SubtotalError> {
    let quantity = i64::from(item.quantity().get());

    let minor = item
        .price()
        .to_minor_units()
        .checked_mul(quantity)
        .ok_or_else(|| SubtotalError::LineTotalOverflow(item.id().clone()))?;

    Ok(Money::from_minor(minor, item.price().currency()))
}

/// Calculates the subtotal of a list of cart rows.
///
/// # Errors
///
/// - [`SubtotalError::NoItems`]: no items were provided, so currency could
///   not be determined.
/// - [`SubtotalError::LineTotalOverflow`]: a line total overflowed.
/// - [`SubtotalError::Money`]: wrapped money arithmetic or currency mismatch
///   error.
pub fn subtotal<'a>(items: &[LineItem<'a>]) -> Result<Money<'a, Currency>, SubtotalError> {
    let first = items.first().ok_or(SubtotalError::NoItems)?;

    items.iter().try_fold(
        Money::from_minor(0, first.price().currency()),
        |acc, item| Ok(acc.add(line_total(item)?)?),
    )
}
