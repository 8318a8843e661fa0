//! Utils

use clap::Parser;

/// Arguments for the order demo
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Fixture set to use for the catalog
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Restaurant id to order from
    #[clap(short, long, default_value = "green-vitality")]
    pub restaurant: String,

    /// Cap on the number of distinct menu items added to the cart
    #[clap(short, long)]
    pub n: Option<usize>,
}
