pub mod admin;
pub mod browse;
pub mod config;
pub mod session;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
