pub mod config;
pub mod download;
pub mod extract;
pub mod install;
pub mod version;
