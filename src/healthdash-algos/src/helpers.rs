pub mod format_hms;
pub mod time_window;
