//! Cart line item domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use minishop_core::{CartItemId, ProductId, UserId};

/// A line item linking a user to a product.
///
/// Each add-to-cart submission inserts a fresh row; repeated adds of the
/// same product are separate rows, never merged.
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    /// Unique line item ID.
    pub id: CartItemId,
    /// Owner of the cart line.
    pub user_id: UserId,
    /// Product added to the cart.
    pub product_id: ProductId,
    /// Quantity requested in this submission.
    pub quantity: i32,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
}
