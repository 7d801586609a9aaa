#[macro_use]
extern crate log;

mod error;
pub use error::ProviderError;

mod aggregate;
pub use aggregate::DailyAggregate;

mod provider;
pub use provider::{HealthProvider, PermissionRequester};

pub mod store;
pub use store::{HealthStore, Sample};

pub mod export;
pub use export::ExportProvider;

pub mod memory;
pub use memory::InMemoryProvider;
