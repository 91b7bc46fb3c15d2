//! Catalog management commands.

use tracing::{error, info};

use minishop_web::db::ProductRepository;
use minishop_web::forms::ProductSubmission;

/// Add a single product to the catalog.
///
/// Fields go through the same validation as any other product source, so
/// a negative price or a blank name is rejected before touching the
/// database.
///
/// # Errors
///
/// Returns an error if validation fails or the insert fails.
pub async fn add(
    name: &str,
    description: &str,
    price: &str,
    image: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let submission = ProductSubmission {
        name: name.to_owned(),
        description: description.to_owned(),
        price: price.to_owned(),
        image_file: image.map(ToOwned::to_owned),
    };

    let valid = match submission.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            for e in &errors {
                error!("  {}: {}", e.field, e.message);
            }
            return Err(format!("{} validation errors", errors.len()).into());
        }
    };

    let pool = super::connect().await?;

    let product = ProductRepository::new(&pool)
        .create(
            &valid.name,
            &valid.description,
            valid.price,
            valid.image_file.as_deref(),
        )
        .await?;

    info!(product_id = %product.id, name = %product.name, "product created");
    Ok(())
}
