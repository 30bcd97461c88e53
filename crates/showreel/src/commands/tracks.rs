use colored::Colorize;

use crate::constants::{BACKGROUND_MUSIC_TRACKS, track_title};

pub fn run() {
    println!("{}", "Background music".bold());
    for (i, uri) in BACKGROUND_MUSIC_TRACKS.iter().enumerate() {
        println!("  {} {}", format!("{:>2}.", i + 1).dimmed(), track_title(uri));
        println!("      {}", uri.dimmed());
    }
}
