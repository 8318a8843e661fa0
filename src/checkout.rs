//! Checkout
//!
//! Derived checkout math consumed by the cart and checkout views: delivery
//! fee, tax and grand total on top of the cart subtotal, plus the
//! minimum-order gate. Nothing here is cached; a [`Quote`] is recomputed
//! from the cart whenever a view needs one.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, observer::CartObserver},
    pricing::SubtotalError,
};

/// The fallback per-order delivery fee, in minor units, for contexts where
/// no restaurant fee is known.
pub const STANDARD_DELIVERY_FEE_MINOR: i64 = 399;

/// Errors that can occur while building a checkout quote.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Errors bubbled up from subtotal calculation.
    #[error(transparent)]
    Subtotal(#[from] SubtotalError),

    /// Tax calculation could not be safely represented in minor units.
    #[error("tax conversion overflowed or was not finite")]
    TaxConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A restaurant's declared per-order delivery fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryFee<'a> {
    /// The restaurant delivers for free.
    Free,

    /// A flat per-order fee.
    Flat(Money<'a, Currency>),
}

impl<'a> DeliveryFee<'a> {
    /// The standard flat fee used when no restaurant context is known.
    #[must_use]
    pub fn standard(currency: &'static Currency) -> Self {
        DeliveryFee::Flat(Money::from_minor(STANDARD_DELIVERY_FEE_MINOR, currency))
    }

    /// The fee as a money amount in the given currency.
    #[must_use]
    pub fn amount(&self, currency: &'static Currency) -> Money<'a, Currency> {
        match self {
            DeliveryFee::Free => Money::from_minor(0, currency),
            DeliveryFee::Flat(fee) => *fee,
        }
    }
}

/// Per-order pricing policy applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutPolicy {
    /// Tax rate applied to the subtotal.
    pub tax_rate: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        // 10% of the subtotal.
        Self {
            tax_rate: Decimal::new(10, 2),
        }
    }
}

/// A fully derived set of order totals.
///
/// Not stored anywhere; always recomputed from the cart via [`quote`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote<'a> {
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    total: Money<'a, Currency>,
    tax_rate: Decimal,
}

impl<'a> Quote<'a> {
    /// The cart subtotal, pre-fee and pre-tax.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// The delivery fee applied to this order.
    #[must_use]
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery_fee
    }

    /// Tax on the subtotal, rounded to minor units.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Grand total: subtotal + delivery fee + tax.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The tax rate this quote was computed with.
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// The tax rate as a percentage, for display.
    #[must_use]
    pub fn tax_rate_percent(&self) -> Percentage {
        Percentage::from(self.tax_rate)
    }
}

/// Build a checkout quote from the cart and a delivery fee.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if the subtotal cannot be calculated, tax
/// conversion overflows, or money arithmetic fails.
pub fn quote<'a, O: CartObserver>(
    cart: &'a Cart<'a, O>,
    delivery_fee: &DeliveryFee<'a>,
    policy: &CheckoutPolicy,
) -> Result<Quote<'a>, CheckoutError> {
    let subtotal = cart.subtotal()?;
    let currency = cart.currency();

    let fee = delivery_fee.amount(currency);
    let tax_minor = tax_on_minor(subtotal.to_minor_units(), policy.tax_rate)?;
    let tax = Money::from_minor(tax_minor, currency);

    let total = subtotal.add(fee)?.add(tax)?;

    Ok(Quote {
        subtotal,
        delivery_fee: fee,
        tax,
        total,
        tax_rate: policy.tax_rate,
    })
}

/// Whether a subtotal satisfies a restaurant's minimum-order threshold.
///
/// The comparison is on exact minor units and the boundary is inclusive: a
/// subtotal equal to the minimum passes.
#[must_use]
pub fn meets_minimum_order(subtotal: &Money<'_, Currency>, minimum: &Money<'_, Currency>) -> bool {
    subtotal.to_minor_units() >= minimum.to_minor_units()
}

/// Calculate tax in minor units from a subtotal in minor units.
///
/// The multiplication is carried in decimal space; rounding to whole minor
/// units (half away from zero) is the only rounding step.
fn tax_on_minor(subtotal_minor: i64, rate: Decimal) -> Result<i64, CheckoutError> {
    let Some(minor) = Decimal::from_i64(subtotal_minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(applied) = rate.checked_mul(minor) else {
        return Err(CheckoutError::TaxConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(CheckoutError::TaxConversion)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::line_items::{LineItemId, LineItemInput};

    use super::*;

    fn cart_with_items<'a>() -> Result<Cart<'a>, crate::cart::CartError> {
        let mut cart = Cart::new(USD);

        // 14.99 * 2 + 8.99 = 38.97
        let bowl = LineItemInput::new(
            LineItemId::new("1", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(1499, USD),
        );
        cart.add_item(bowl.clone())?;
        cart.add_item(bowl)?;
        cart.add_item(LineItemInput::new(
            LineItemId::new("1", "3"),
            "Green Vitality",
            "Protein Smoothie",
            Money::from_minor(899, USD),
        ))?;

        Ok(cart)
    }

    #[test]
    fn quote_with_standard_fee() -> TestResult {
        let cart = cart_with_items()?;

        let quote = quote(
            &cart,
            &DeliveryFee::standard(USD),
            &CheckoutPolicy::default(),
        )?;

        assert_eq!(quote.subtotal(), Money::from_minor(3897, USD));
        assert_eq!(quote.delivery_fee(), Money::from_minor(399, USD));
        // 10% of 38.97 is 3.897, rounded to 3.90 at the minor-unit boundary.
        assert_eq!(quote.tax(), Money::from_minor(390, USD));
        assert_eq!(quote.total(), Money::from_minor(4686, USD));

        Ok(())
    }

    #[test]
    fn quote_with_free_delivery() -> TestResult {
        let cart = cart_with_items()?;

        let quote = quote(&cart, &DeliveryFee::Free, &CheckoutPolicy::default())?;

        assert_eq!(quote.delivery_fee(), Money::from_minor(0, USD));
        assert_eq!(quote.total(), Money::from_minor(4287, USD));

        Ok(())
    }

    #[test]
    fn quote_for_empty_cart_is_all_zero_except_fee() -> TestResult {
        let cart = Cart::new(USD);

        let quote = quote(
            &cart,
            &DeliveryFee::standard(USD),
            &CheckoutPolicy::default(),
        )?;

        assert_eq!(quote.subtotal(), Money::from_minor(0, USD));
        assert_eq!(quote.tax(), Money::from_minor(0, USD));
        assert_eq!(quote.total(), Money::from_minor(399, USD));

        Ok(())
    }

    #[test]
    fn minimum_order_boundary_is_inclusive() {
        let minimum = Money::from_minor(1500, USD);

        assert!(!meets_minimum_order(
            &Money::from_minor(1299, USD),
            &minimum
        ));
        assert!(meets_minimum_order(&Money::from_minor(1500, USD), &minimum));
        assert!(meets_minimum_order(&Money::from_minor(1501, USD), &minimum));
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 10% of 0.05 is 0.005: rounds up to a whole cent.
        assert_eq!(tax_on_minor(5, Decimal::new(10, 2))?, 1);
        // 10% of 0.04 is 0.004: rounds down.
        assert_eq!(tax_on_minor(4, Decimal::new(10, 2))?, 0);

        Ok(())
    }

    #[test]
    fn tax_rate_percent_reports_rate() -> TestResult {
        let cart = cart_with_items()?;
        let quote = quote(&cart, &DeliveryFee::Free, &CheckoutPolicy::default())?;

        assert_eq!(
            quote.tax_rate_percent(),
            Percentage::from(Decimal::new(10, 2))
        );

        Ok(())
    }
}
