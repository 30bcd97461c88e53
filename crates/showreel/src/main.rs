mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod constants;
mod deck;
mod language;
mod media;
mod music;
mod navigation;
mod render;
mod session;
mod theme;
mod video;
mod viewport;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose, cli.quiet);

    cli.run()
}

/// `RUST_LOG` wins; otherwise the verbosity flags pick our level and
/// dependencies stay at `warn`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("warn,showreel={level}"))),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!quiet && colored::control::SHOULD_COLORIZE.should_colorize())
        .init();
}
