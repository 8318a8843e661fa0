//! Order Summary
//!
//! Rendering of a cart plus its checkout quote: an item table followed by
//! the subtotal / delivery fee / tax / total block shown on the cart and
//! checkout views.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{Cart, observer::CartObserver},
    checkout::Quote,
    pricing::{SubtotalError, line_total},
};

/// Errors that can occur when writing an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating a line total from cart rows.
    #[error(transparent)]
    Subtotal(#[from] SubtotalError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Printable summary of an order about to be placed.
#[derive(Debug, Clone, Copy)]
pub struct OrderSummary<'a> {
    quote: Quote<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Create a summary from a checkout quote.
    #[must_use]
    pub fn from_quote(quote: Quote<'a>) -> Self {
        Self { quote }
    }

    /// The quote this summary renders.
    #[must_use]
    pub fn quote(&self) -> &Quote<'a> {
        &self.quote
    }

    /// Write the item table and totals block.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a line total cannot be calculated or
    /// the writer fails.
    pub fn write_to<O: CartObserver>(
        &self,
        mut out: impl io::Write,
        cart: &Cart<'_, O>,
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Restaurant", "Unit Price", "Line Total"]);

        for item in cart.iter() {
            let total = line_total(item)?;

            builder.push_record([
                item.quantity().to_string(),
                item.name().to_string(),
                item.restaurant_name().to_string(),
                item.price().to_string(),
                total.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.modify(Columns::new(3..), Alignment::right());

        writeln!(out, "{table}")?;

        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let rate = (self.quote.tax_rate() * Decimal::ONE_HUNDRED).normalize();

        writeln!(out, "Subtotal:     {}", self.quote.subtotal())?;
        writeln!(out, "Delivery Fee: {}", self.quote.delivery_fee())?;
        writeln!(out, "Tax ({rate}%):    {}", self.quote.tax())?;
        writeln!(out, "Total:        {}", self.quote.total())?;

        Ok(())
    }
}
