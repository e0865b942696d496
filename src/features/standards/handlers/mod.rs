pub mod standard_handler;

pub use standard_handler::{
    create_standard, delete_standard, get_standard, list_standards, update_standard,
};
