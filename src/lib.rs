//! Tiffin
//!
//! Tiffin is the shopping-cart and order-total engine for a food-delivery
//! storefront: line-item identity and quantity merging, exact decimal money
//! totals, delivery-fee and tax math, and the minimum-order checkout gate.
//!
//! The cart is a pure in-memory aggregate. UI surfaces call its operations
//! and re-render from derived values; persistence, payment and order
//! tracking live outside this crate.
//!
//! ```
//! use rusty_money::{Money, iso::USD};
//! use tiffin::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cart = Cart::new(USD);
//!
//! let bowl = LineItemInput::new(
//!     LineItemId::new("green-vitality", "power-bowl"),
//!     "Green Vitality",
//!     "Power Bowl Supreme",
//!     Money::from_minor(1499, USD),
//! );
//!
//! cart.add_item(bowl.clone())?;
//! cart.add_item(bowl)?;
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal()?, Money::from_minor(2998, USD));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod line_items;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod restaurants;
pub mod utils;
