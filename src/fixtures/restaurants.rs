//! Restaurant Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{checkout::DeliveryFee, fixtures::FixtureError, restaurants::Restaurant};

/// Wrapper for restaurants in YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantsFixture {
    /// Vector of restaurant fixtures
    pub restaurants: Vec<RestaurantFixture>,
}

/// Restaurant Fixture
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Stable restaurant identifier
    pub id: String,

    /// Restaurant name
    pub name: String,

    /// Cuisine label
    pub cuisine: String,

    /// Delivery fee in display format (e.g., "Free" or "2.99 USD")
    pub delivery_fee: String,

    /// Minimum order threshold (e.g., "15.00 USD")
    pub minimum_order: String,
}

impl TryFrom<RestaurantFixture> for Restaurant<'_> {
    type Error = FixtureError;

    fn try_from(fixture: RestaurantFixture) -> Result<Self, Self::Error> {
        let delivery_fee = parse_fee(&fixture.delivery_fee)?;

        let (minimum_minor, currency) = parse_price(&fixture.minimum_order)?;
        let minimum_order = Money::from_minor(minimum_minor, currency);

        Ok(Restaurant {
            id: fixture.id,
            name: fixture.name,
            cuisine: fixture.cuisine,
            delivery_fee,
            minimum_order,
        })
    }
}

/// Parse price string (e.g., "14.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a delivery fee in its display format: `"Free"` or `"AMOUNT CURRENCY"`.
///
/// # Errors
///
/// Returns an error if the fee is neither `Free` nor a parseable price.
pub fn parse_fee(s: &str) -> Result<DeliveryFee<'static>, FixtureError> {
    if s.trim().eq_ignore_ascii_case("free") {
        return Ok(DeliveryFee::Free);
    }

    let (minor, currency) = parse_price(s)?;

    Ok(DeliveryFee::Flat(Money::from_minor(minor, currency)))
}
