// Core types and primitives shared by models, forms and stores

pub mod strong_types;

pub use strong_types::{UnknownValue, UserId};
