//! Seed the catalog with sample products.

use tracing::info;

use minishop_core::Price;
use minishop_web::db::ProductRepository;

const SAMPLE_PRODUCTS: &[(&str, &str, &str, Option<&str>)] = &[
    (
        "Enamel Mug",
        "A sturdy 350ml enamel mug for camp coffee.",
        "12.50",
        Some("mug.png"),
    ),
    (
        "Canvas Tote",
        "Heavyweight cotton tote with reinforced handles.",
        "18.00",
        Some("tote.png"),
    ),
    (
        "Field Notebook",
        "Pocket-sized dot-grid notebook, 64 pages.",
        "6.75",
        None,
    ),
];

/// Insert the sample products.
///
/// Inserts run unconditionally; re-running the command duplicates the
/// catalog entries.
///
/// # Errors
///
/// Returns an error if a price fails to parse or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    for (name, description, price, image_file) in SAMPLE_PRODUCTS {
        let price = Price::parse(price).map_err(|e| format!("bad sample price: {e}"))?;
        let product = repo.create(name, description, price, *image_file).await?;
        info!(product_id = %product.id, name = %product.name, "seeded product");
    }

    info!("Seeding complete!");
    Ok(())
}
