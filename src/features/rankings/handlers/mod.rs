pub mod ranking_handler;

pub use ranking_handler::{get_groups, get_summary, get_toppers};
