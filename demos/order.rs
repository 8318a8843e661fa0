//! Order Demo
//!
//! Builds a cart from a catalog fixture set, quotes the order, and prints
//! the summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-r` to pick a restaurant id
//! Use `-n` to cap the number of distinct menu items added to the cart

use std::io;

use anyhow::Result;
use clap::Parser;
use tiffin::{
    cart::Cart,
    checkout::{CheckoutPolicy, quote},
    fixtures::Fixture,
    receipt::OrderSummary,
    utils::DemoOrderArgs,
};

/// Order Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoOrderArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let restaurant = fixture.restaurant(&args.restaurant)?;
    let menu = fixture.menu_for(&args.restaurant);

    let mut cart = Cart::new(fixture.currency()?);

    let cap = args.n.unwrap_or(menu.len());
    for (idx, item) in menu.iter().take(cap).enumerate() {
        cart.add_item(item.line_input(restaurant))?;

        // Add the first item twice to show quantity merging.
        if idx == 0 {
            cart.add_item(item.line_input(restaurant))?;
        }
    }

    let quote = quote(&cart, &restaurant.delivery_fee, &CheckoutPolicy::default())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    OrderSummary::from_quote(quote).write_to(&mut handle, &cart)?;

    if restaurant.accepts_order(&quote.subtotal()) {
        println!("\nOrder from {} is ready for checkout.", restaurant.name);
    } else {
        println!(
            "\nBelow the minimum order for {} ({}).",
            restaurant.name, restaurant.minimum_order
        );
    }

    Ok(())
}
