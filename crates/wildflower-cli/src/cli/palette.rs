//! List the palette and fixed drawing colors.

use wildflower::{Color, SessionConfig};

use super::common::{CliError, SeededSource, SessionArgs};

/// Execute the palette command.
///
/// Accepts `--config` so a custom palette can be previewed.
pub fn cmd_palette(args: &[String]) -> Result<(), CliError> {
    let mut session = SessionArgs::default();
    let mut i = 0;
    while i < args.len() {
        if !session.accept(args, &mut i)? {
            return Err(CliError::UnknownFlag(args[i].clone()));
        }
        i += 1;
    }

    // Rolls never touch colors
    let config = session.build(&mut SeededSource::new(0))?;
    print!("{}", palette_listing(&config));
    Ok(())
}

fn swatch_line(label: &str, color: Color) -> String {
    let Color { r, g, b } = color;
    // 24-bit ANSI background swatch
    format!("  \x1b[48;2;{};{};{}m    \x1b[0m {}  {}\n", r, g, b, color, label)
}

/// Text listing of every color `config` draws with.
pub fn palette_listing(config: &SessionConfig) -> String {
    let mut out = String::from("Flower palette:\n");
    for (i, color) in config.palette.iter().enumerate() {
        out.push_str(&swatch_line(&format!("flower {}", i + 1), *color));
    }
    out.push_str("Fixed colors:\n");
    out.push_str(&swatch_line("outline", config.outline_color));
    out.push_str(&swatch_line("stem", config.stem_color));
    out.push_str(&swatch_line("center", config.center_color));
    out.push_str(&swatch_line("leaf", config.leaf_color));
    out
}
