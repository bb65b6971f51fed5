//! Utils

use clap::Parser;

/// Arguments for the marketplace demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to use for products & orders
    #[clap(short, long, default_value = "souk")]
    pub fixture: String,

    /// Fixture key of the product to work with (defaults to the first key)
    #[clap(short, long)]
    pub product: Option<String>,

    /// Option selections as `group=value` pairs
    #[clap(short, long)]
    pub select: Vec<String>,
}

impl DemoArgs {
    /// Parse the `group=value` selection pairs into a selections map.
    pub fn selections(&self) -> crate::options::Selections {
        self.select
            .iter()
            .filter_map(|pair| pair.split_once('='))
            .map(|(group, value)| (group.to_string(), value.to_string()))
            .collect()
    }
}
