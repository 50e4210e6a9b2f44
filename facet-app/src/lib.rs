pub mod axis;
pub mod chart;
pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
