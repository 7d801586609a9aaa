pub(crate) mod format;
pub use format::{DisplayPolicy, Rounding, display_policy, to_compact_record, to_ui_model};

pub(crate) mod heat_map;
pub use heat_map::build_heat_map;

pub mod helpers;
