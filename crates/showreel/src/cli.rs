use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::language::Language;

#[derive(Parser)]
#[command(name = "showreel")]
#[command(author, version, about)]
#[command(long_about = "Brazilian Live Sessions showreel.\n\n\
    A full-screen slide presentation with background music that steps aside\n\
    for the video slides.\n\n\
    Examples:\n  \
    showreel                     Launch the presentation (fullscreen)\n  \
    showreel --windowed          Launch in a window\n  \
    showreel --lang pt-br        Skip the language screen\n  \
    showreel devices             List audio output devices")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Presentation language (en-us, es, pt-br); skips the selector
    #[arg(long, global = false, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Start with the background music muted
    #[arg(long, global = false)]
    pub muted: bool,

    /// Cut between slides without the crossfade
    #[arg(long, global = false)]
    pub reduced_motion: bool,

    /// Audio output device (substring of its name)
    #[arg(long, global = false)]
    pub device: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the background music playlist
    Tracks,

    /// List audio output devices
    Devices,

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.language, defaults.start_muted, audio.device)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unknown language '{code}' (en-us, es, pt-br)"))
}

/// Launch settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// Zero-based.
    pub start_slide: usize,
    pub language: Option<Language>,
    pub muted: bool,
    pub reduced_motion: bool,
    pub device: Option<String>,
}

impl Cli {
    pub fn launch_options(&self, config: &crate::config::Config) -> LaunchOptions {
        LaunchOptions {
            windowed: self.windowed,
            start_slide: self.slide.unwrap_or(1).saturating_sub(1),
            language: self.lang.or_else(|| config.language()),
            muted: self.muted || config.start_muted(),
            reduced_motion: self.reduced_motion || config.reduced_motion(),
            device: self
                .device
                .clone()
                .or_else(|| config.audio_device().map(str::to_string)),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Tracks) => {
                crate::commands::tracks::run();
                Ok(())
            }
            Some(Commands::Devices) => crate::commands::devices::run(),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                let config = crate::config::Config::load_or_default();
                let options = self.launch_options(&config);
                crate::app::run(options)
            }
        }
    }
}
