//! Item record and request payload.

use serde::{Deserialize, Serialize};

/// A shopping item. `id` is `None` until the store assigns one.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Item {
            id: None,
            name: name.into(),
            price,
        }
    }
}

/// Body of POST and PUT. Fields are optional so that missing or null values
/// surface as field violations instead of deserialization failures; any `id`
/// sent by the client is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct ItemPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}
