pub mod use_wheel_store;

pub use use_wheel_store::*;
