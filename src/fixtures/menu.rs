//! Menu Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, restaurants::parse_price},
    menu::MenuItem,
};

/// Wrapper for menu entries in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Vector of menu item fixtures
    pub menu: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// String key of the owning restaurant
    pub restaurant: String,

    /// Stable item identifier within the restaurant
    pub id: String,

    /// Item name
    pub name: String,

    /// Item description
    #[serde(default)]
    pub description: String,

    /// Item price (e.g., "14.99 USD")
    pub price: String,

    /// Display image reference
    #[serde(default)]
    pub image: String,

    /// Menu section
    #[serde(default)]
    pub category: String,
}

impl TryFrom<MenuItemFixture> for MenuItem<'_> {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        Ok(MenuItem {
            id: fixture.id,
            name: fixture.name,
            description: fixture.description,
            price,
            image: fixture.image,
            category: fixture.category,
        })
    }
}
