//! Request extractors that turn framework rejections into `AppError`.

pub mod json;
pub use json::ItemJson;
