//! Item payload validation.

use crate::error::AppError;
use crate::model::{Item, ItemPayload};
use serde::Serialize;

/// One failed constraint on one field.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldViolation {
            field,
            message: message.into(),
        }
    }
}

pub struct ItemValidator;

impl ItemValidator {
    /// Check every constraint and collect all violations. On success returns an
    /// unsaved `Item` carrying the validated fields.
    pub fn validate(payload: ItemPayload) -> Result<Item, AppError> {
        let mut violations = Vec::new();

        let name = match payload.name {
            None => {
                violations.push(FieldViolation::new("name", "must not be null"));
                None
            }
            Some(n) if n.trim().is_empty() => {
                violations.push(FieldViolation::new("name", "must not be blank"));
                None
            }
            Some(n) => Some(n),
        };

        let price = match payload.price {
            None => {
                violations.push(FieldViolation::new("price", "must not be null"));
                None
            }
            Some(p) if !p.is_finite() || p <= 0.0 => {
                violations.push(FieldViolation::new("price", "must be greater than 0"));
                None
            }
            Some(p) => Some(p),
        };

        match (name, price) {
            (Some(name), Some(price)) if violations.is_empty() => Ok(Item::new(name, price)),
            _ => Err(AppError::Validation(violations)),
        }
    }
}
