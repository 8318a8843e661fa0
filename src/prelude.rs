//! Tiffin prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError,
        observer::{CartEvent, CartEventKind, CartObserver, NoopCartObserver},
    },
    checkout::{CheckoutError, CheckoutPolicy, DeliveryFee, Quote, meets_minimum_order, quote},
    fixtures::{Fixture, FixtureError},
    line_items::{Customizations, LineItem, LineItemId, LineItemInput},
    menu::{MenuItem, MenuItemKey},
    pricing::{SubtotalError, line_total, subtotal},
    receipt::{OrderSummary, SummaryError},
    restaurants::{Restaurant, RestaurantKey},
};
