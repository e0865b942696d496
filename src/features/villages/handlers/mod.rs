pub mod village_handler;

pub use village_handler::{
    create_village, delete_village, get_village, list_villages, update_village,
};
