pub mod book;
pub mod config;
pub mod slots;
pub mod zones;
