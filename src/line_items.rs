//! Line Items
//!
//! A [`LineItem`] is one distinct purchasable product plus a quantity within
//! the session cart. Identity is the composite of the owning restaurant and
//! the menu item; two additions that resolve to the same identity merge
//! quantity rather than creating a second row.

use std::{fmt, num::NonZeroU32};

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// Display-only customization notes attached to a line item.
///
/// Order is preserved. Customizations carry no price delta and do not
/// contribute to the identity key.
pub type Customizations = SmallVec<[String; 4]>;

/// Composite identity key for a cart row: owning restaurant plus menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemId {
    restaurant_id: String,
    menu_item_id: String,
}

impl LineItemId {
    /// Create an identity key from its two components.
    #[must_use]
    pub fn new(restaurant_id: impl Into<String>, menu_item_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            menu_item_id: menu_item_id.into(),
        }
    }

    /// The owning restaurant's identifier.
    #[must_use]
    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// The menu item's identifier within its restaurant.
    #[must_use]
    pub fn menu_item_id(&self) -> &str {
        &self.menu_item_id
    }

    /// Whether either identity component is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.restaurant_id.trim().is_empty() || self.menu_item_id.trim().is_empty()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.restaurant_id, self.menu_item_id)
    }
}

/// A candidate line item handed to the cart's add operation.
///
/// Carries a requested quantity (defaulting to 1) so that adding a candidate
/// N times and adding it once with quantity N produce the same cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput<'a> {
    id: LineItemId,
    restaurant_name: String,
    name: String,
    image: String,
    price: Money<'a, Currency>,
    quantity: NonZeroU32,
    customizations: Customizations,
}

impl<'a> LineItemInput<'a> {
    /// Create a candidate with quantity 1, no image and no customizations.
    #[must_use]
    pub fn new(
        id: LineItemId,
        restaurant_name: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id,
            restaurant_name: restaurant_name.into(),
            name: name.into(),
            image: String::new(),
            price,
            quantity: NonZeroU32::MIN,
            customizations: Customizations::new(),
        }
    }

    /// Set the requested quantity for a bulk add.
    #[must_use]
    pub fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Attach a display image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Attach display-only customization notes.
    #[must_use]
    pub fn with_customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = customizations;
        self
    }

    /// The identity key this candidate resolves to.
    #[must_use]
    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    /// The unit price of the candidate.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// The requested quantity.
    #[must_use]
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn into_line_item(self) -> LineItem<'a> {
        LineItem {
            id: self.id,
            restaurant_name: self.restaurant_name,
            name: self.name,
            image: self.image,
            price: self.price,
            quantity: self.quantity,
            customizations: self.customizations,
        }
    }
}

/// A stored cart row.
///
/// Unit price and identity are fixed at add time; only the quantity is
/// mutable, and only through the cart. Quantity is a [`NonZeroU32`], so a row
/// with quantity 0 cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    id: LineItemId,
    restaurant_name: String,
    name: String,
    image: String,
    price: Money<'a, Currency>,
    quantity: NonZeroU32,
    customizations: Customizations,
}

impl<'a> LineItem<'a> {
    /// The identity key of this row.
    #[must_use]
    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    /// Denormalized restaurant display name, captured at add time.
    #[must_use]
    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    /// The item's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display image reference, possibly empty.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Unit price, fixed at add time.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Current quantity of this row.
    #[must_use]
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Display-only customization notes.
    #[must_use]
    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn id_displays_composite_form() {
        let id = LineItemId::new("1", "42");

        assert_eq!(id.to_string(), "1-42");
    }

    #[test]
    fn ids_with_same_components_are_equal() {
        let a = LineItemId::new("green-vitality", "power-bowl");
        let b = LineItemId::new("green-vitality", "power-bowl");
        let c = LineItemId::new("green-vitality", "smoothie");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn blank_components_are_detected() {
        assert!(LineItemId::new("", "42").is_blank());
        assert!(LineItemId::new("1", "  ").is_blank());
        assert!(!LineItemId::new("1", "42").is_blank());
    }

    #[test]
    fn input_defaults_to_quantity_one() {
        let input = LineItemInput::new(
            LineItemId::new("1", "1"),
            "Green Vitality",
            "Power Bowl Supreme",
            Money::from_minor(1499, USD),
        );

        assert_eq!(input.quantity().get(), 1);
    }

    #[test]
    fn input_builders_set_fields() {
        let customizations: Customizations = smallvec!["No onions".to_string()];
        let input = LineItemInput::new(
            LineItemId::new("1", "2"),
            "Green Vitality",
            "Vegan Buddha Bowl",
            Money::from_minor(1299, USD),
        )
        .with_image("buddha.jpg")
        .with_customizations(customizations.clone());

        let item = input.into_line_item();

        assert_eq!(item.image(), "buddha.jpg");
        assert_eq!(item.customizations(), &customizations);
        assert_eq!(item.restaurant_name(), "Green Vitality");
    }
}
