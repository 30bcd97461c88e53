use anyhow::Result;
use colored::Colorize;

use crate::media::device::{default_device_name, list_device_names};

pub fn run() -> Result<()> {
    let names = list_device_names()?;
    if names.is_empty() {
        println!("{}", "No audio output devices found.".yellow());
        return Ok(());
    }
    let default = default_device_name();
    for (i, name) in names.iter().enumerate() {
        if default.as_deref() == Some(name.as_str()) {
            println!("#{i}: {} {}", name.green().bold(), "(default)".dimmed());
        } else {
            println!("#{i}: {name}");
        }
    }
    Ok(())
}
