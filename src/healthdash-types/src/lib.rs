pub mod activities;
pub mod async_value;
pub mod heat_map;
pub mod records;
pub mod ui;

pub use async_value::AsyncValue;
