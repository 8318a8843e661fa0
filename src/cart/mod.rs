//! Cart
//!
//! The session cart: an ordered collection of [`LineItem`]s with at most one
//! row per identity key, mutated exclusively through the operations on
//! [`Cart`]. The cart is the sole arbiter of cart consistency; views only
//! read derived values from it.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    line_items::{LineItem, LineItemId, LineItemInput},
    pricing::{SubtotalError, subtotal},
};

pub mod observer;

use observer::{CartEvent, CartEventKind, CartObserver, NoopCartObserver};

/// Errors related to cart mutation.
///
/// A failed mutation leaves the cart untouched.
#[derive(Debug, Error)]
pub enum CartError {
    /// A candidate's currency differs from the cart currency (item currency, cart currency).
    #[error("item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A candidate carried a negative unit price.
    #[error("item {0} has a negative unit price")]
    NegativePrice(LineItemId),

    /// A candidate's identity fields were blank.
    #[error("line item identity fields must be non-empty")]
    BlankIdentity,

    /// Merging a candidate would overflow the row quantity.
    #[error("quantity for item {0} overflowed")]
    QuantityOverflow(LineItemId),
}

/// The session-scoped cart.
///
/// Insertion order is preserved for display; totals are order-independent.
/// All rows share the cart currency.
#[derive(Debug)]
pub struct Cart<'a, O: CartObserver = NoopCartObserver> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
    version: u64,
    observer: O,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency, with no observer.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart::with_observer(currency, NoopCartObserver)
    }
}

impl<'a, O: CartObserver> Cart<'a, O> {
    /// Create an empty cart whose state changes are reported to `observer`.
    #[must_use]
    pub fn with_observer(currency: &'static Currency, observer: O) -> Self {
        Cart {
            items: Vec::new(),
            currency,
            version: 0,
            observer,
        }
    }

    /// Add a candidate item to the cart.
    ///
    /// If a row with the same identity key exists, its quantity is increased
    /// by the candidate's requested quantity; otherwise a new row is
    /// appended. Calling this N times with quantity 1 is equivalent to one
    /// call with quantity N.
    ///
    /// # Errors
    ///
    /// - [`CartError::BlankIdentity`]: an identity component is blank.
    /// - [`CartError::NegativePrice`]: the unit price is negative.
    /// - [`CartError::CurrencyMismatch`]: the price currency differs from the
    ///   cart currency.
    /// - [`CartError::QuantityOverflow`]: merging would overflow the row
    ///   quantity.
    pub fn add_item(&mut self, input: LineItemInput<'a>) -> Result<(), CartError> {
        self.validate(&input)?;

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == input.id()) {
            let quantity = item
                .quantity()
                .checked_add(input.quantity().get())
                .ok_or_else(|| CartError::QuantityOverflow(item.id().clone()))?;

            item.set_quantity(quantity);

            let event = CartEventKind::QuantityUpdated(input.id().clone(), quantity.get());
            self.bump(event);

            return Ok(());
        }

        let id = input.id().clone();
        self.items.push(input.into_line_item());
        self.bump(CartEventKind::ItemAdded(id));

        Ok(())
    }

    /// Set the quantity of an existing row to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the row. An unknown id is a no-op,
    /// so after this call no row ever has a non-positive quantity.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i32) {
        let Some(quantity) = NonZeroU32::new(quantity.max(0).unsigned_abs()) else {
            self.remove_item(id);
            return;
        };

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.set_quantity(quantity);
            self.bump(CartEventKind::QuantityUpdated(id.clone(), quantity.get()));
        }
    }

    /// Delete the row with the given identity key, if present.
    ///
    /// Unknown ids are a no-op; calling this twice is the same as once.
    pub fn remove_item(&mut self, id: &LineItemId) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);

        if self.items.len() != before {
            self.bump(CartEventKind::ItemRemoved(id.clone()));
        }
    }

    /// Empty the cart unconditionally.
    ///
    /// Used after order placement or explicit user action. Clearing an
    /// already-empty cart changes nothing and emits no event.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }

        self.items.clear();
        self.bump(CartEventKind::Cleared);
    }

    /// Sum of all row quantities, not the number of distinct rows.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// The cart subtotal: Σ price × quantity, pre-fee, pre-tax.
    ///
    /// Returns a zero amount for an empty cart. The value is exact minor
    /// units; rounding happens only at presentation boundaries.
    ///
    /// # Errors
    ///
    /// Returns a [`SubtotalError`] if there was a money arithmetic or
    /// overflow error.
    pub fn subtotal(&'a self) -> Result<Money<'a, Currency>, SubtotalError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        subtotal(&self.items)
    }

    /// Iterate over the rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'_>> {
        self.items.iter()
    }

    /// Number of distinct rows in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The cart currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// State version, incremented on every state-changing operation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn validate(&self, input: &LineItemInput<'a>) -> Result<(), CartError> {
        if input.id().is_blank() {
            return Err(CartError::BlankIdentity);
        }

        if input.price().is_negative() {
            return Err(CartError::NegativePrice(input.id().clone()));
        }

        let item_currency = input.price().currency();
        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        Ok(())
    }

    fn bump(&mut self, kind: CartEventKind) {
        self.version += 1;

        let event = CartEvent {
            version: self.version,
            kind,
        };

        self.observer.on_cart_changed(&event);
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn power_bowl<'a>() -> LineItemInput<'a> {
        LineItemInput::new(
            LineItemId::new("1", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(1499, USD),
        )
    }

    fn smoothie<'a>() -> LineItemInput<'a> {
        LineItemInput::new(
            LineItemId::new("1", "3"),
            "Green Vitality",
            "Protein Smoothie",
            Money::from_minor(899, USD),
        )
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(USD);

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn empty_cart_subtotal_is_zero() -> TestResult {
        let cart = Cart::new(USD);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn adding_same_identity_twice_merges() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(power_bowl())?;
        cart.add_item(power_bowl())?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn repeated_adds_equal_one_bulk_add() -> TestResult {
        let mut singles = Cart::new(USD);
        for _ in 0..3 {
            singles.add_item(power_bowl())?;
        }

        let mut bulk = Cart::new(USD);
        bulk.add_item(power_bowl().with_quantity(NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN)))?;

        assert_eq!(singles.item_count(), bulk.item_count());
        assert_eq!(singles.subtotal()?, bulk.subtotal()?);

        Ok(())
    }

    #[test]
    fn merge_overflow_errors_and_leaves_state_untouched() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl().with_quantity(NonZeroU32::MAX))?;
        let version = cart.version();

        let result = cart.add_item(power_bowl());

        assert!(matches!(result, Err(CartError::QuantityOverflow(_))));

        let quantities: Vec<u32> = cart.iter().map(|item| item.quantity().get()).collect();
        assert_eq!(quantities, vec![u32::MAX]);
        assert_eq!(cart.version(), version);

        Ok(())
    }

    #[test]
    fn distinct_identities_keep_own_rows() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(power_bowl())?;
        cart.add_item(smoothie())?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn subtotal_matches_price_times_quantity() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(power_bowl())?;
        cart.add_item(power_bowl())?;
        cart.add_item(smoothie())?;

        // 14.99 * 2 + 8.99 = 38.97
        assert_eq!(cart.subtotal()?, Money::from_minor(3897, USD));
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn update_quantity_sets_absolute_value() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;

        cart.update_quantity(&LineItemId::new("1", "1"), 5);

        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn update_quantity_zero_removes_row() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;

        cart.update_quantity(&LineItemId::new("1", "1"), 0);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_negative_removes_row() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;

        cart.update_quantity(&LineItemId::new("1", "1"), -5);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_id_is_noop() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;
        let version = cart.version();

        cart.update_quantity(&LineItemId::new("2", "9"), 4);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.version(), version);

        Ok(())
    }

    #[test]
    fn remove_item_is_idempotent() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;

        let id = LineItemId::new("1", "1");
        cart.remove_item(&id);
        let version = cart.version();
        cart.remove_item(&id);

        assert!(cart.is_empty());
        assert_eq!(cart.version(), version);

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;
        cart.add_item(smoothie())?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn clear_on_empty_cart_emits_nothing() {
        let mut cart = Cart::new(USD);

        cart.clear();

        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut cart = Cart::new(USD);

        let input = LineItemInput::new(
            LineItemId::new("1", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(-100, USD),
        );

        assert!(matches!(
            cart.add_item(input),
            Err(CartError::NegativePrice(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn blank_identity_is_rejected() {
        let mut cart = Cart::new(USD);

        let input = LineItemInput::new(
            LineItemId::new("", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(1499, USD),
        );

        assert!(matches!(
            cart.add_item(input),
            Err(CartError::BlankIdentity)
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let mut cart = Cart::new(USD);

        let input = LineItemInput::new(
            LineItemId::new("1", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(1499, GBP),
        );

        match cart.add_item(input) {
            Err(CartError::CurrencyMismatch(item_currency, cart_currency)) => {
                assert_eq!(item_currency, GBP.iso_alpha_code);
                assert_eq!(cart_currency, USD.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn add_update_remove_round_trip_leaves_cart_empty() -> TestResult {
        let mut cart = Cart::new(USD);
        let id = LineItemId::new("1", "1");

        cart.add_item(power_bowl())?;
        cart.update_quantity(&id, 5);
        cart.remove_item(&id);

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn iter_preserves_insertion_order() -> TestResult {
        let mut cart = Cart::new(USD);
        cart.add_item(power_bowl())?;
        cart.add_item(smoothie())?;

        let names: Vec<&str> = cart.iter().map(LineItem::name).collect();

        assert_eq!(names, vec!["Power Bowl Supreme", "Protein Smoothie"]);

        Ok(())
    }

    #[test]
    fn version_increments_on_each_change() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(power_bowl())?;
        assert_eq!(cart.version(), 1);

        cart.add_item(power_bowl())?;
        assert_eq!(cart.version(), 2);

        cart.remove_item(&LineItemId::new("1", "1"));
        assert_eq!(cart.version(), 3);

        Ok(())
    }

    #[test]
    fn observer_receives_events() -> TestResult {
        #[derive(Default)]
        struct Recorder {
            events: Vec<CartEventKind>,
        }

        impl CartObserver for Recorder {
            fn on_cart_changed(&mut self, event: &CartEvent) {
                self.events.push(event.kind.clone());
            }
        }

        let mut cart = Cart::with_observer(USD, Recorder::default());
        let id = LineItemId::new("1", "1");

        cart.add_item(power_bowl())?;
        cart.add_item(power_bowl())?;
        cart.update_quantity(&id, 4);
        cart.remove_item(&id);

        assert_eq!(
            cart.observer.events,
            vec![
                CartEventKind::ItemAdded(id.clone()),
                CartEventKind::QuantityUpdated(id.clone(), 2),
                CartEventKind::QuantityUpdated(id.clone(), 4),
                CartEventKind::ItemRemoved(id),
            ]
        );

        Ok(())
    }
}
