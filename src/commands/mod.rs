mod config_cmd;
mod user;

pub use config_cmd::ConfigCommand;
pub use user::{UserCommand, UserCommandError};
