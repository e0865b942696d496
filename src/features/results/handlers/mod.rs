pub mod result_handler;

pub use result_handler::{
    delete_result, get_result, list_results, submit_result, toggle_approved, toggle_verified,
    update_result,
};
