pub mod client;
pub mod repositories;
pub mod table_names;
