//! Command handlers, one module per subcommand.

pub mod actions;
pub mod completion;
pub mod config_cmd;
pub mod fields;
pub mod preview;
pub mod run;
pub mod version;
