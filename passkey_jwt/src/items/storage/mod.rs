mod config;
mod postgres;
mod sqlite;
mod store_type;

pub(crate) use config::DB_TABLE_ITEMS;
pub use store_type::ItemStore;
