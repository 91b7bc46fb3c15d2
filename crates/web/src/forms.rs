//! Whole-form input validation.
//!
//! Each submission type deserializes the raw fields of one HTML form and
//! validates them into a typed record. Invalid input is a normal outcome
//! carried as field-level errors, never an `Err` through the application
//! error type: every field is checked and the form succeeds only when all
//! rules pass.

use serde::Deserialize;

use minishop_core::{Email, Price, Username};

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field, matching the form input name.
    pub field: &'static str,
    /// Human-readable message rendered next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors for a whole form, in field order.
pub type FieldErrors = Vec<FieldError>;

fn require<'a>(errors: &mut FieldErrors, field: &'static str, value: &'a str) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "This field is required."));
        None
    } else {
        Some(trimmed)
    }
}

/// Presence check for secrets. The value is returned untouched; trimming
/// a password would hash something other than what the user typed.
fn require_secret<'a>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &'a str,
) -> Option<&'a str> {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required."));
        None
    } else {
        Some(value)
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Raw registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterSubmission {
    pub csrf_token: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A registration that passed every rule.
#[derive(Debug)]
pub struct ValidRegistration {
    pub username: Username,
    pub email: Email,
    pub password: String,
}

impl RegisterSubmission {
    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns every failed rule as a `FieldError`; the record is produced
    /// only when the whole form is valid.
    pub fn validate(&self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = require(&mut errors, "username", &self.username)
            .and_then(|s| match Username::parse(s) {
                Ok(name) => Some(name),
                Err(e) => {
                    errors.push(FieldError::new("username", e.to_string()));
                    None
                }
            });

        let email = require(&mut errors, "email", &self.email).and_then(|s| {
            match Email::parse(s) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push(FieldError::new("email", e.to_string()));
                    None
                }
            }
        });

        let password = require_secret(&mut errors, "password", &self.password);

        match require_secret(&mut errors, "confirm_password", &self.confirm_password) {
            Some(confirm) if password.is_some() && Some(confirm) != password => {
                errors.push(FieldError::new(
                    "confirm_password",
                    "Passwords must match.",
                ));
            }
            _ => {}
        }

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) if errors.is_empty() => {
                Ok(ValidRegistration {
                    username,
                    email,
                    password: password.to_owned(),
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Login
// =============================================================================

/// Raw login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginSubmission {
    pub csrf_token: String,
    pub email: String,
    pub password: String,
}

/// A login attempt that passed every rule.
#[derive(Debug)]
pub struct ValidLogin {
    pub email: Email,
    pub password: String,
}

impl LoginSubmission {
    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns every failed rule as a `FieldError`.
    pub fn validate(&self) -> Result<ValidLogin, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = require(&mut errors, "email", &self.email).and_then(|s| {
            match Email::parse(s) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push(FieldError::new("email", e.to_string()));
                    None
                }
            }
        });

        let password = require_secret(&mut errors, "password", &self.password);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(ValidLogin {
                email,
                password: password.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Add to cart
// =============================================================================

/// Raw add-to-cart form fields from the product detail page.
#[derive(Debug, Deserialize)]
pub struct AddToCartSubmission {
    pub csrf_token: String,
    pub quantity: String,
}

/// An add-to-cart request that passed every rule.
#[derive(Debug)]
pub struct ValidAddToCart {
    pub quantity: i32,
}

impl AddToCartSubmission {
    /// Validate the quantity field.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` if the quantity is missing, not an integer,
    /// or below one.
    pub fn validate(&self) -> Result<ValidAddToCart, FieldErrors> {
        let mut errors = FieldErrors::new();

        let quantity = require(&mut errors, "quantity", &self.quantity).and_then(|s| {
            match s.parse::<i32>() {
                Ok(q) if q >= 1 => Some(q),
                Ok(_) => {
                    errors.push(FieldError::new("quantity", "Quantity must be at least 1."));
                    None
                }
                Err(_) => {
                    errors.push(FieldError::new("quantity", "Quantity must be a whole number."));
                    None
                }
            }
        });

        match quantity {
            Some(quantity) if errors.is_empty() => Ok(ValidAddToCart { quantity }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Raw product fields.
///
/// The web surface exposes no create-product route; this schema validates
/// the CLI catalog path.
#[derive(Debug, Deserialize)]
pub struct ProductSubmission {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_file: Option<String>,
}

/// A product that passed every rule.
#[derive(Debug)]
pub struct ValidProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_file: Option<String>,
}

impl ProductSubmission {
    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns every failed rule as a `FieldError`.
    pub fn validate(&self) -> Result<ValidProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = require(&mut errors, "name", &self.name);
        let description = require(&mut errors, "description", &self.description);

        let price = require(&mut errors, "price", &self.price).and_then(|s| {
            match Price::parse(s) {
                Ok(price) => Some(price),
                Err(e) => {
                    errors.push(FieldError::new("price", e.to_string()));
                    None
                }
            }
        });

        // The image is optional; an empty value means no image.
        let image_file = self
            .image_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        match (name, description, price) {
            (Some(name), Some(description), Some(price)) if errors.is_empty() => {
                Ok(ValidProduct {
                    name: name.to_owned(),
                    description: description.to_owned(),
                    price,
                    image_file,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str, confirm: &str) -> RegisterSubmission {
        RegisterSubmission {
            csrf_token: String::new(),
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[test]
    fn test_registration_valid() {
        let valid = register("alice", "alice@example.com", "hunter22", "hunter22")
            .validate()
            .unwrap();
        assert_eq!(valid.username.as_str(), "alice");
        assert_eq!(valid.email.as_str(), "alice@example.com");
        assert_eq!(valid.password, "hunter22");
    }

    #[test]
    fn test_registration_all_fields_required() {
        let errors = register("", "", "", "").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["username", "email", "password", "confirm_password"]
        );
    }

    #[test]
    fn test_registration_username_length() {
        assert!(
            register("a", "a@example.com", "pw", "pw")
                .validate()
                .is_err()
        );
        assert!(
            register(&"a".repeat(21), "a@example.com", "pw", "pw")
                .validate()
                .is_err()
        );
        assert!(
            register(&"a".repeat(20), "a@example.com", "pw", "pw")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_registration_bad_email() {
        let errors = register("alice", "not-an-email", "pw", "pw")
            .validate()
            .unwrap_err();
        assert!(errors.iter().any(|e| e.field == "email"));
    }

    #[test]
    fn test_registration_password_whitespace_preserved() {
        let valid = register("alice", "alice@example.com", " hunter22 ", " hunter22 ")
            .validate()
            .unwrap();
        assert_eq!(valid.password, " hunter22 ");
    }

    #[test]
    fn test_registration_password_differing_only_in_whitespace_mismatch() {
        let errors = register("alice", "alice@example.com", "hunter22", "hunter22 ")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
    }

    #[test]
    fn test_registration_password_mismatch() {
        let errors = register("alice", "alice@example.com", "hunter22", "hunter23")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
    }

    #[test]
    fn test_login_valid() {
        let form = LoginSubmission {
            csrf_token: String::new(),
            email: "alice@example.com".to_owned(),
            password: "hunter22".to_owned(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_login_password_whitespace_preserved() {
        let form = LoginSubmission {
            csrf_token: String::new(),
            email: "alice@example.com".to_owned(),
            password: " hunter22 ".to_owned(),
        };
        assert_eq!(form.validate().unwrap().password, " hunter22 ");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginSubmission {
            csrf_token: String::new(),
            email: String::new(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    fn add_to_cart(quantity: &str) -> AddToCartSubmission {
        AddToCartSubmission {
            csrf_token: String::new(),
            quantity: quantity.to_owned(),
        }
    }

    #[test]
    fn test_add_to_cart_valid() {
        assert_eq!(add_to_cart("2").validate().unwrap().quantity, 2);
        assert_eq!(add_to_cart(" 1 ").validate().unwrap().quantity, 1);
    }

    #[test]
    fn test_add_to_cart_rejects_zero_and_negative() {
        assert!(add_to_cart("0").validate().is_err());
        assert!(add_to_cart("-3").validate().is_err());
    }

    #[test]
    fn test_add_to_cart_rejects_non_integer() {
        assert!(add_to_cart("two").validate().is_err());
        assert!(add_to_cart("1.5").validate().is_err());
        assert!(add_to_cart("").validate().is_err());
    }

    fn product(name: &str, description: &str, price: &str) -> ProductSubmission {
        ProductSubmission {
            name: name.to_owned(),
            description: description.to_owned(),
            price: price.to_owned(),
            image_file: None,
        }
    }

    #[test]
    fn test_product_valid() {
        let valid = product("Mug", "A mug.", "9.99").validate().unwrap();
        assert_eq!(valid.name, "Mug");
        assert_eq!(format!("{}", valid.price), "$9.99");
        assert!(valid.image_file.is_none());
    }

    #[test]
    fn test_product_zero_price_allowed() {
        assert!(product("Mug", "A mug.", "0").validate().is_ok());
    }

    #[test]
    fn test_product_negative_price_rejected() {
        let errors = product("Mug", "A mug.", "-1").validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "price"));
    }

    #[test]
    fn test_product_all_required() {
        let errors = product("", "", "").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_product_empty_image_treated_as_none() {
        let form = ProductSubmission {
            name: "Mug".to_owned(),
            description: "A mug.".to_owned(),
            price: "1".to_owned(),
            image_file: Some("  ".to_owned()),
        };
        assert!(form.validate().unwrap().image_file.is_none());
    }
}
