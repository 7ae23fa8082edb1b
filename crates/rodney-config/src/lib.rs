//! Configuration management for the rodney system.
//!
//! This crate handles loading and saving `.rodney/config.yaml` files,
//! discovering `.rodney/` directories in the filesystem, and layering
//! `RODNEY_*` environment variables on top.

pub mod config;
pub mod config_dir;
