//! Domain types backing the handlers and repositories.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::User;
