//! HTTP handlers for the item collection and the service root.

pub mod home;
pub mod items;
