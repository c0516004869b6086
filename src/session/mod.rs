pub mod messages;
pub mod search_mode;
pub mod watch_mode;

pub use search_mode::run_search_mode;
pub use watch_mode::{WatchOptions, run_watch_mode};
