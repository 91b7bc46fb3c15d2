//! Cart repository for database operations.

use sqlx::{FromRow, PgPool};

use minishop_core::{CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartItem;

/// A cart line joined with its product, for display.
#[derive(Debug, Clone, FromRow)]
pub struct CartLine {
    /// Line item ID.
    pub id: CartItemId,
    /// Product on this line.
    pub product_id: ProductId,
    /// Product name at display time.
    pub name: String,
    /// Unit price at display time.
    pub price: Price,
    /// Quantity requested in this submission.
    pub quantity: i32,
}

/// Repository for cart line item operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a cart line for a user.
    ///
    /// Every submission inserts a fresh row; adding the same product twice
    /// yields two rows rather than an incremented quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// foreign key violations for a vanished user or product).
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id, quantity, created_at
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// List a user's cart lines joined with their products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id, ci.product_id, p.name, p.price, ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
