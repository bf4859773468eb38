pub mod add;
pub mod config;
pub mod export;
pub mod fetch;
pub mod list;
pub mod remove;
