use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!(
                "{} {key} = {value} {}",
                "Set".green().bold(),
                format!("({})", path.display()).dimmed()
            );
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let language = config
        .language()
        .map(|l| format!("{} {}", l.code(), l.flag()))
        .unwrap_or_else(|| "ask on start".to_string());
    let device = config.audio_device().unwrap_or("system default");

    print_entry("defaults.language", &language);
    print_entry("defaults.start_muted", &config.start_muted().to_string());
    print_entry("defaults.reduced_motion", &config.reduced_motion().to_string());
    print_entry("audio.device", device);
    Ok(())
}

fn print_entry(key: &str, value: &str) {
    println!("  {:<26} {}", key.cyan(), value);
}
