//! Product domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use minishop_core::{Price, ProductId};

/// A catalog item.
///
/// Products are created out-of-band (CLI seed / product add); the web
/// surface only reads them.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Price in the shop currency.
    pub price: Price,
    /// Filename of the product image, if any, under the image directory.
    pub image_file: Option<String>,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}
