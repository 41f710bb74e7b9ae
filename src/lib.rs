//! phpfetch Library
//!
//! Downloads the PHP Windows binary archive and unpacks it into a directory.
//! The `phpfetch` CLI is a thin wrapper over [`core::install::install`].

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::install::{install, Installer};
pub use crate::error::{PhpFetchError, Result};
