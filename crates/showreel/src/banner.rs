use colored::Colorize;

const BANNER: &str = r"
  ___ _                          _
 / __| |_  _____ __ ___ _ ___ ___| |
 \__ \ ' \/ _ \ V  V / '_/ -_) -_) |
 |___/_||_\___/\_/\_/|_| \___\___|_|
";

pub fn print_banner_with_version() {
    println!("{}", BANNER.truecolor(0xC5, 0x8B, 0x30).bold());
    println!(
        "  {} {}",
        "Brazilian Live Sessions".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!();
}
