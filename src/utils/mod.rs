pub mod format;

pub use format::{daily_index_name, format_timestamp};
