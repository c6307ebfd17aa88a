//! The bundled card catalog.
//!
//! A small, curated data file compiled into the binary. The core only sees
//! it through the `CatalogSource` trait.

use color_eyre::eyre::WrapErr;
use perkwallet_core::{CardTemplate, StaticCatalog};

const CATALOG_JSON: &str = include_str!("data/catalog.json");

/// Parse the bundled catalog.
pub fn bundled_catalog() -> color_eyre::Result<StaticCatalog> {
    let cards: Vec<CardTemplate> =
        serde_json::from_str(CATALOG_JSON).wrap_err("parsing bundled catalog")?;
    Ok(StaticCatalog::new(cards))
}
