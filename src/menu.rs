//! Menu
//!
//! Read-only menu listings. A [`MenuItem`] together with its [`Restaurant`]
//! is everything needed to build a cart candidate; the cart never reaches
//! back into the catalog.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::{
    line_items::{Customizations, LineItemId, LineItemInput},
    restaurants::Restaurant,
};

new_key_type! {
    /// Menu Item Key
    pub struct MenuItemKey;
}

/// A purchasable menu entry.
#[derive(Debug, Clone)]
pub struct MenuItem<'a> {
    /// Stable identifier within the restaurant, used as the menu-item half
    /// of line-item identity.
    pub id: String,

    /// Item display name.
    pub name: String,

    /// Item description.
    pub description: String,

    /// Unit price.
    pub price: Money<'a, Currency>,

    /// Display image reference.
    pub image: String,

    /// Menu section this item is listed under.
    pub category: String,
}

impl<'a> MenuItem<'a> {
    /// Build a cart candidate for this item from the given restaurant.
    ///
    /// The candidate's identity is the composite of the restaurant id and
    /// this item's id; price and display fields are captured at this point.
    #[must_use]
    pub fn line_input(&self, restaurant: &Restaurant<'a>) -> LineItemInput<'a> {
        LineItemInput::new(
            LineItemId::new(restaurant.id.clone(), self.id.clone()),
            restaurant.name.clone(),
            self.name.clone(),
            self.price,
        )
        .with_image(self.image.clone())
    }

    /// Build a cart candidate carrying display-only customization notes.
    #[must_use]
    pub fn line_input_with_customizations(
        &self,
        restaurant: &Restaurant<'a>,
        customizations: Customizations,
    ) -> LineItemInput<'a> {
        self.line_input(restaurant)
            .with_customizations(customizations)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use smallvec::smallvec;

    use crate::checkout::DeliveryFee;

    use super::*;

    fn restaurant<'a>() -> Restaurant<'a> {
        Restaurant {
            id: "green-vitality".to_string(),
            name: "Green Vitality".to_string(),
            cuisine: "Healthy Bowls".to_string(),
            delivery_fee: DeliveryFee::Free,
            minimum_order: Money::from_minor(1500, USD),
        }
    }

    fn power_bowl<'a>() -> MenuItem<'a> {
        MenuItem {
            id: "power-bowl".to_string(),
            name: "Power Bowl Supreme".to_string(),
            description: "Quinoa, grilled chicken, avocado".to_string(),
            price: Money::from_minor(1499, USD),
            image: "power-bowl.jpg".to_string(),
            category: "Bowls".to_string(),
        }
    }

    #[test]
    fn line_input_carries_composite_identity() {
        let input = power_bowl().line_input(&restaurant());

        assert_eq!(input.id().to_string(), "green-vitality-power-bowl");
        assert_eq!(input.price(), &Money::from_minor(1499, USD));
        assert_eq!(input.quantity().get(), 1);
    }

    #[test]
    fn customizations_do_not_change_identity() {
        let restaurant = restaurant();
        let item = power_bowl();

        let plain = item.line_input(&restaurant);
        let customized = item
            .line_input_with_customizations(&restaurant, smallvec!["Extra avocado".to_string()]);

        assert_eq!(plain.id(), customized.id());
    }
}
