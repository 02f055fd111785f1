//! Shared CLI utilities: session flags, seeding, output, errors.

use std::fmt;
use std::fs;
use std::io::{self, Write};

use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};

use wildflower::{ColorPolicy, RandomSource, SessionConfig};

use super::config_file::{ConfigFile, LoadError};

/// Error type for CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Flag given without its value
    MissingValue(String),
    /// Flag value that doesn't parse
    BadValue { flag: String, value: String },
    UnknownFlag(String),
    Conflict(&'static str, &'static str),
    Config(LoadError),
    Write { path: String, source: io::Error },
    Render(String),
    Encode(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingValue(flag) => write!(f, "{} requires a value", flag),
            CliError::BadValue { flag, value } => write!(f, "invalid value for {}: {}", flag, value),
            CliError::UnknownFlag(flag) => write!(f, "unknown option: {}", flag),
            CliError::Conflict(a, b) => write!(f, "{} and {} cannot be used together", a, b),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Write { path, source } => write!(f, "cannot write {}: {}", path, source),
            CliError::Render(msg) => write!(f, "PNG rendering failed: {}", msg),
            CliError::Encode(msg) => write!(f, "output encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Config(e)
    }
}

/// Take the value following `args[*i]`, advancing `i` onto it.
pub fn take_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(flag.clone()))
}

/// Parse the value following `args[*i]`.
pub fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, CliError> {
    let flag = args[*i].clone();
    let value = take_value(args, i)?;
    value.parse().map_err(|_| CliError::BadValue {
        flag,
        value: value.to_string(),
    })
}

/// Flags shared by every command that builds a session configuration.
#[derive(Debug, Default, Clone)]
pub struct SessionArgs {
    pub seed: Option<u64>,
    pub daily: bool,
    pub config_path: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub policy: Option<ColorPolicy>,
    pub leaf_chance: Option<f64>,
    pub branch_chance: Option<f64>,
}

impl SessionArgs {
    /// Consume `args[*i]` if it is a session flag.
    ///
    /// Returns `Ok(false)` when the flag belongs to someone else.
    pub fn accept(&mut self, args: &[String], i: &mut usize) -> Result<bool, CliError> {
        match args[*i].as_str() {
            "--seed" => self.seed = Some(parse_value(args, i)?),
            "--daily" => self.daily = true,
            "--config" | "-c" => self.config_path = Some(take_value(args, i)?.to_string()),
            "--width" => self.width = Some(parse_value(args, i)?),
            "--height" => self.height = Some(parse_value(args, i)?),
            "--shared-colors" => self.set_policy(ColorPolicy::Shared)?,
            "--diverse-colors" => self.set_policy(ColorPolicy::Diverse)?,
            "--leaf-chance" => self.leaf_chance = Some(parse_value(args, i)?),
            "--branch-chance" => self.branch_chance = Some(parse_value(args, i)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn set_policy(&mut self, policy: ColorPolicy) -> Result<(), CliError> {
        match self.policy {
            Some(existing) if existing != policy => {
                Err(CliError::Conflict("--shared-colors", "--diverse-colors"))
            }
            _ => {
                self.policy = Some(policy);
                Ok(())
            }
        }
    }

    /// The seed for this run: explicit, today's date, or fresh entropy.
    pub fn resolve_seed(&self) -> Result<u64, CliError> {
        match (self.seed, self.daily) {
            (Some(_), true) => Err(CliError::Conflict("--seed", "--daily")),
            (Some(seed), false) => Ok(seed),
            (None, true) => Ok(date_seed(Local::now().date_naive())),
            (None, false) => Ok(rand::random()),
        }
    }

    /// Build the effective configuration.
    ///
    /// Layers: defaults, per-session rolls from `rng`, the YAML file, then
    /// command-line flags. The result is validated.
    pub fn build(&self, rng: &mut dyn RandomSource) -> Result<SessionConfig, CliError> {
        let mut config = SessionConfig::default().roll(rng);

        if let Some(path) = &self.config_path {
            ConfigFile::load(path)?.apply(&mut config);
        }

        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(policy) = self.policy {
            config.color_policy = Some(policy);
        }
        if let Some(chance) = self.leaf_chance {
            config.leaf_chance = chance;
        }
        if let Some(chance) = self.branch_chance {
            config.branch_chance = chance;
        }

        config.validate().map_err(LoadError::Invalid)?;
        Ok(config)
    }
}

/// Seed derived from a calendar date, e.g. 2024-03-17 -> 20240317.
pub fn date_seed(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// `RandomSource` backed by rand's `StdRng`.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Write `content` to `path`, or stdout for `None` / `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), CliError> {
    match path {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| CliError::Write {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
        Some(path) => fs::write(path, content).map_err(|source| CliError::Write {
            path: path.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn accept_all(list: &[&str]) -> Result<SessionArgs, CliError> {
        let args = args(list);
        let mut session = SessionArgs::default();
        let mut i = 0;
        while i < args.len() {
            if !session.accept(&args, &mut i)? {
                return Err(CliError::UnknownFlag(args[i].clone()));
            }
            i += 1;
        }
        Ok(session)
    }

    #[test]
    fn date_seed_reads_as_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(date_seed(date), 20240317);
    }

    #[test]
    fn session_flags_parse() {
        let session = accept_all(&["--seed", "7", "--width", "300", "--diverse-colors", "--leaf-chance", "0.2"]).unwrap();
        assert_eq!(session.seed, Some(7));
        assert_eq!(session.width, Some(300.0));
        assert_eq!(session.policy, Some(ColorPolicy::Diverse));
        assert_eq!(session.leaf_chance, Some(0.2));
    }

    #[test]
    fn missing_and_bad_values() {
        assert!(matches!(accept_all(&["--seed"]), Err(CliError::MissingValue(_))));
        assert!(matches!(accept_all(&["--width", "wide"]), Err(CliError::BadValue { .. })));
    }

    #[test]
    fn conflicting_policies_rejected() {
        assert!(matches!(
            accept_all(&["--shared-colors", "--diverse-colors"]),
            Err(CliError::Conflict(..))
        ));
    }

    #[test]
    fn seed_and_daily_conflict() {
        let session = accept_all(&["--seed", "1", "--daily"]).unwrap();
        assert!(session.resolve_seed().is_err());
    }

    #[test]
    fn flags_override_rolled_values() {
        let session = accept_all(&["--branch-chance", "0.5", "--height", "400"]).unwrap();
        let config = session.build(&mut SeededSource::new(3)).unwrap();
        assert_eq!(config.branch_chance, 0.5);
        assert_eq!(config.canvas.height, 400.0);
        assert!(config.max_rotation >= std::f64::consts::PI * 0.1);
    }

    #[test]
    fn invalid_flag_values_fail_validation() {
        let session = accept_all(&["--leaf-chance", "2"]).unwrap();
        assert!(matches!(
            session.build(&mut SeededSource::new(3)),
            Err(CliError::Config(LoadError::Invalid(_)))
        ));
    }

    #[test]
    fn seeded_source_is_deterministic() {
        let mut a = SeededSource::new(99);
        let mut b = SeededSource::new(99);
        for _ in 0..10 {
            let x = a.next_f64();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_f64());
        }
    }
}
