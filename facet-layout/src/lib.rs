pub mod bin;
pub mod error;
pub mod pie;
