mod auth_helpers;
mod errors;
mod items;
mod passkey;
mod password;

pub use auth_helpers::user_from_token;
pub use errors::CoordinationError;
pub use items::{
    create_item_core, delete_item_core, get_item_core, list_items_core, update_item_core,
};
pub use passkey::{
    handle_login_options_core, handle_login_verify_core, handle_register_options_core,
    handle_register_verify_core,
};
pub use password::{login_password_core, register_password_user_core};
