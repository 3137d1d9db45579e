//! A module to encapsulate all things related to radio operation.
pub mod prelude;

pub mod cc2520;
pub use cc2520::{Cc2520, Cc2520Error, Cc2520Pins};

mod config;
pub use config::RadioConfig;

pub mod frame;
