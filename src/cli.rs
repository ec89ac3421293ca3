//! CLI domain: parse, route and output only.
//! Single route table dispatches to the configuration store.

mod output;
mod parse;
mod route;

pub use output::{format_defaults_table, format_value, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
