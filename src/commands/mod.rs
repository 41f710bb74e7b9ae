pub mod config;
pub mod install;
