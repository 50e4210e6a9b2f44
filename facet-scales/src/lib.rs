pub mod array;
pub mod band;
pub mod error;
pub mod linear;
pub mod ordinal;
