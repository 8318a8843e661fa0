//! Restaurants
//!
//! The restaurant read model the cart consumes. The cart only cares about a
//! restaurant's identity, declared delivery fee and minimum-order threshold;
//! everything else is display metadata.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::checkout::{DeliveryFee, meets_minimum_order};

new_key_type! {
    /// Restaurant Key
    pub struct RestaurantKey;
}

/// Restaurant
#[derive(Debug, Clone)]
pub struct Restaurant<'a> {
    /// Stable identifier, used as the restaurant half of line-item identity.
    pub id: String,

    /// Restaurant display name.
    pub name: String,

    /// Cuisine label.
    pub cuisine: String,

    /// The restaurant's declared per-order delivery fee.
    ///
    /// This is the source of truth for the fee at checkout.
    pub delivery_fee: DeliveryFee<'a>,

    /// Subtotal threshold gating checkout eligibility.
    pub minimum_order: Money<'a, Currency>,
}

impl Restaurant<'_> {
    /// Whether an order with the given subtotal may proceed to checkout.
    ///
    /// The gate compares the exact, unrounded subtotal and the boundary is
    /// inclusive.
    #[must_use]
    pub fn accepts_order(&self, subtotal: &Money<'_, Currency>) -> bool {
        meets_minimum_order(subtotal, &self.minimum_order)
    }
}
