//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Product listing
//! GET  /home                                - Product listing (alias)
//! GET  /product/{id}                        - Product detail + add-to-cart form
//! POST /product/{id}                        - Add to cart
//! GET  /cart                                - Current user's cart (requires auth)
//! GET  /register                            - Registration form
//! POST /register                            - Registration action
//! GET  /login                               - Login form
//! POST /login                               - Login action
//! GET  /logout                              - Logout action
//! GET  /static/product_images/{filename}    - Product image by filename
//! ```
//!
//! The routing table is built once at startup; handlers receive all state
//! and session context explicitly through extractors.

pub mod auth;
pub mod cart;
pub mod home;
pub mod images;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the shop.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product listing
        .route("/", get(home::home))
        .route("/home", get(home::home))
        // Product detail + add-to-cart
        .route(
            "/product/{id}",
            get(products::show).post(products::add_to_cart),
        )
        // Cart overview
        .route("/cart", get(cart::show))
        // Auth
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Product images
        .route(
            "/static/product_images/{filename}",
            get(images::product_image),
        )
}
