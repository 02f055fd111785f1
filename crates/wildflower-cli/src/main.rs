//! wildflower - grow procedural flowers from the command line
//!
//! Usage:
//!   wildflower [draw] [options]      Grow one plant, write SVG/PNG/JSON
//!   wildflower config [options]      Print the effective configuration
//!   wildflower palette               List drawing colors

mod cli;

use std::env;

use cli::{cmd_config, cmd_draw, cmd_palette};

fn main() {
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        // Bare invocation or leading flags: draw
        None => cmd_draw(&[]),
        Some(flag) if flag.starts_with('-') && !matches!(flag, "-h" | "--help") => cmd_draw(&args[1..]),
        Some("draw") => cmd_draw(&args[2..]),
        Some("config") => cmd_config(&args[2..]),
        Some("palette") => cmd_palette(&args[2..]),
        Some("help" | "--help" | "-h") => {
            print_usage(&args[0]);
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("wildflower - procedural flower generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [draw] [options]     Grow one plant (default command)", prog);
    eprintln!("  {} config [options]     Print the effective configuration as YAML", prog);
    eprintln!("  {} palette [--config f] List drawing colors", prog);
    eprintln!("  {} help                 Show this message", prog);
    eprintln!();
    eprintln!("Draw options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  --json                 Write plant structure as JSON instead of SVG");
    eprintln!("  --png <file>           Also render a PNG");
    eprintln!("  --png-scale <n>        PNG scale factor (default: 1.0)");
    eprintln!("  --crop                 Frame the plant instead of the whole canvas");
    eprintln!("  -q, --quiet            No progress output");
    eprintln!();
    eprintln!("Session options (draw, config, palette):");
    eprintln!("  --seed <n> | --daily   Reproducible seed, or one derived from today's date");
    eprintln!("  -c, --config <file>    YAML overrides (see `{} config`)", prog);
    eprintln!("  --width/--height <n>   Canvas size (default: 600 × 800)");
    eprintln!("  --shared-colors        Branch flowers reuse the plant color");
    eprintln!("  --diverse-colors       Branch flowers pick their own colors");
    eprintln!("  --leaf-chance <p>      Per-step leaf probability");
    eprintln!("  --branch-chance <p>    Per-step branch probability");
    eprintln!();
    eprintln!("Run `{} draw --help` for examples.", prog);
}
