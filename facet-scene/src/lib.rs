pub mod attr;
pub mod element;
pub mod pool;
pub mod surface;
