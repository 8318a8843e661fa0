//! Cart Observer
//!
//! Dependent views (cart page, restaurant detail, checkout) re-render from
//! cart state. The cart notifies a single registered observer after every
//! successful state-changing operation; operations that leave the cart
//! unchanged emit nothing.
//!
//! # Zero Overhead
//!
//! When no observer is provided (the default case), the cart uses a
//! [`NoopCartObserver`] and the notification calls are optimized away via
//! monomorphization.

use crate::line_items::LineItemId;

/// A change notification emitted by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    /// Cart state version after the change was applied.
    pub version: u64,

    /// What changed.
    pub kind: CartEventKind,
}

/// The kind of change a [`CartEvent`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEventKind {
    /// A new row was inserted.
    ItemAdded(LineItemId),

    /// An existing row's quantity changed (merge or absolute set).
    QuantityUpdated(LineItemId, u32),

    /// A row was deleted.
    ItemRemoved(LineItemId),

    /// The whole cart was emptied.
    Cleared,
}

/// Observer trait for reacting to cart state changes.
pub trait CartObserver {
    /// Called after a state-changing operation has been applied.
    fn on_cart_changed(&mut self, event: &CartEvent);
}

/// Observer that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCartObserver;

impl CartObserver for NoopCartObserver {
    fn on_cart_changed(&mut self, _event: &CartEvent) {}
}
