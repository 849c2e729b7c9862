//! Domain services (command handlers)

pub mod group_commands;

pub use group_commands::GroupCommands;
