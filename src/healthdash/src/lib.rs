#[macro_use]
extern crate log;

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod config;
pub use config::HomeConfig;

mod state;
pub use state::{Async, HomeEvent, HomeState};

mod view_model;
pub use view_model::HomeViewModel;

pub mod render;
