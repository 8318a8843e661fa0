//! Fixtures
//!
//! YAML-backed catalog sets used by the demo and integration tests. A
//! fixture set is a directory under `fixtures/` holding `restaurants.yml`
//! and `menu.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    fixtures::{
        menu::MenuFixture,
        restaurants::{RestaurantsFixture, parse_price},
    },
    menu::{MenuItem, MenuItemKey},
    restaurants::{Restaurant, RestaurantKey},
};

pub mod menu;
pub mod restaurants;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Currency mismatch between fixture entries
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No restaurants loaded yet
    #[error("No restaurants loaded yet; currency unknown")]
    NoCurrency,
}

/// A loaded catalog fixture set.
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// `SlotMaps` to store the actual types with generated keys
    restaurants: SlotMap<RestaurantKey, Restaurant<'a>>,
    menu_items: SlotMap<MenuItemKey, MenuItem<'a>>,

    /// String key -> `SlotMap` key mappings for lookups
    restaurant_keys: FxHashMap<String, RestaurantKey>,
    menu_item_keys: FxHashMap<String, MenuItemKey>,

    /// Menu item keys grouped by owning restaurant, in fixture order
    menu_by_restaurant: FxHashMap<String, Vec<MenuItemKey>>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures"))
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            restaurants: SlotMap::with_key(),
            menu_items: SlotMap::with_key(),
            restaurant_keys: FxHashMap::default(),
            menu_item_keys: FxHashMap::default(),
            menu_by_restaurant: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load restaurants from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_restaurants(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join(name).join("restaurants.yml");
        let contents = fs::read_to_string(&file_path)?;
        let fixture: RestaurantsFixture = serde_norway::from_str(&contents)?;

        for restaurant_fixture in fixture.restaurants {
            // Parse to get currency first (before creating the Restaurant)
            let (_minimum_minor, currency) = parse_price(&restaurant_fixture.minimum_order)?;
            self.check_currency(currency)?;

            let key = restaurant_fixture.id.clone();
            let restaurant: Restaurant<'a> = restaurant_fixture.try_into()?;
            let restaurant_key = self.restaurants.insert(restaurant);

            self.restaurant_keys.insert(key, restaurant_key);
        }

        Ok(self)
    }

    /// Load menu items from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a
    /// referenced restaurant does not exist.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join(name).join("menu.yml");
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        for item_fixture in fixture.menu {
            let restaurant_id = item_fixture.restaurant.clone();

            if !self.restaurant_keys.contains_key(&restaurant_id) {
                return Err(FixtureError::RestaurantNotFound(restaurant_id));
            }

            let (_minor, currency) = parse_price(&item_fixture.price)?;
            self.check_currency(currency)?;

            let key = format!("{restaurant_id}-{}", item_fixture.id);
            let item: MenuItem<'a> = item_fixture.try_into()?;
            let item_key = self.menu_items.insert(item);

            self.menu_item_keys.insert(key, item_key);
            self.menu_by_restaurant
                .entry(restaurant_id)
                .or_default()
                .push(item_key);
        }

        Ok(self)
    }

    /// Load a complete fixture set (restaurants and menu with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_restaurants(name)?.load_menu(name)?;

        Ok(fixture)
    }

    /// Get a restaurant by its string id.
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant is not found.
    pub fn restaurant(&self, id: &str) -> Result<&Restaurant<'a>, FixtureError> {
        let key = self
            .restaurant_keys
            .get(id)
            .ok_or_else(|| FixtureError::RestaurantNotFound(id.to_string()))?;

        self.restaurants
            .get(*key)
            .ok_or_else(|| FixtureError::RestaurantNotFound(id.to_string()))
    }

    /// Get a menu item by its composite string key (`restaurant-item`).
    ///
    /// # Errors
    ///
    /// Returns an error if the menu item is not found.
    pub fn menu_item(&self, key: &str) -> Result<&MenuItem<'a>, FixtureError> {
        let item_key = self
            .menu_item_keys
            .get(key)
            .ok_or_else(|| FixtureError::MenuItemNotFound(key.to_string()))?;

        self.menu_items
            .get(*item_key)
            .ok_or_else(|| FixtureError::MenuItemNotFound(key.to_string()))
    }

    /// The menu of a restaurant, in fixture order.
    ///
    /// Returns an empty listing for an unknown restaurant.
    #[must_use]
    pub fn menu_for(&self, restaurant_id: &str) -> Vec<&MenuItem<'a>> {
        self.menu_by_restaurant
            .get(restaurant_id)
            .map_or_else(Vec::new, |keys| {
                keys.iter()
                    .filter_map(|key| self.menu_items.get(*key))
                    .collect()
            })
    }

    /// All restaurant ids in the set.
    #[must_use]
    pub fn restaurant_ids(&self) -> Vec<&str> {
        self.restaurant_keys.keys().map(String::as_str).collect()
    }

    /// Currency shared by every entry in the set.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if nothing has been loaded yet.
    pub fn currency(&self) -> Result<&'static rusty_money::iso::Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn check_currency(
        &mut self,
        currency: &'static rusty_money::iso::Currency,
    ) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }
}
