//! Dump the effective session configuration as YAML.

use super::common::{CliError, SeededSource, SessionArgs};
use super::draw::print_session_options;

/// Execute the config command.
///
/// Uses the same seed and layering as `draw`, so
/// `wildflower config --seed 7` shows exactly what `wildflower draw --seed 7`
/// grows with. The output can be fed back through `--config`.
pub fn cmd_config(args: &[String]) -> Result<(), CliError> {
    let mut session = SessionArgs::default();
    let mut i = 0;
    while i < args.len() {
        if matches!(args[i].as_str(), "-h" | "--help") {
            print_usage();
            return Ok(());
        }
        if !session.accept(args, &mut i)? {
            return Err(CliError::UnknownFlag(args[i].clone()));
        }
        i += 1;
    }

    let seed = session.resolve_seed()?;
    let config = session.build(&mut SeededSource::new(seed))?;
    let yaml = serde_yaml::to_string(&config).map_err(|e| CliError::Encode(e.to_string()))?;

    println!("# seed: {}", seed);
    print!("{}", yaml);
    Ok(())
}

pub fn print_usage() {
    eprintln!("wildflower config - Print the effective configuration as YAML");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    wildflower config [SESSION OPTIONS]");
    print_session_options();
}
