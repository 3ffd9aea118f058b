use std::collections::BTreeMap;
use std::env;
use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::linter::default_registry;
use crate::linter::modifiers::Modifier;
use crate::linter::rules::{Registry, RuleDefinition};

/// Severity and rule-set configuration for one run.
///
/// `default_lints` extends the built-in rule table under new ids;
/// `warn`/`allow`/`deny` override severities by id; modifiers run last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub warn: Vec<String>,
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub default_lints: BTreeMap<String, RuleDefinition>,
    pub default_modifiers: Vec<Modifier>,
}

impl Options {
    /// Builds the full rule table: built-ins plus `default_lints`.
    ///
    /// A custom id colliding with a built-in is rejected rather than
    /// silently replacing it; use the severity lists to retune
    /// built-ins instead.
    pub fn build_registry(&self) -> Result<Registry, ConfigError> {
        let mut registry = default_registry();

        for (id, definition) in &self.default_lints {
            if registry.contains(id) {
                return Err(ConfigError::DuplicateRule { id: id.clone() });
            }
            registry.register(id.clone(), definition.clone());
        }

        Ok(registry)
    }
}

/// A configuration problem that aborts the whole invocation before any
/// document is checked.
#[derive(Debug)]
pub enum ConfigError {
    /// A rule id appears in more than one of `warn`/`allow`/`deny`.
    DuplicateSeverity { id: String },
    /// A severity list names a rule that is not registered.
    UnknownRule { id: String },
    /// A custom rule id collides with a built-in rule.
    DuplicateRule { id: String },
    /// A `preamble-regex` pattern does not compile.
    InvalidPattern { id: String, error: regex::Error },
    /// The configuration file could not be deserialized.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSeverity { id } => {
                write!(f, "rule `{id}` appears in more than one severity list")
            }
            Self::UnknownRule { id } => write!(f, "unknown rule `{id}` in severity list"),
            Self::DuplicateRule { id } => write!(f, "rule `{id}` is already registered"),
            Self::InvalidPattern { id, error } => {
                write!(f, "invalid pattern for rule `{id}`: {error}")
            }
            Self::Invalid(message) => f.write_str(message),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidPattern { error, .. } => Some(error),
            _ => None,
        }
    }
}

const CANDIDATE_NAMES: &[&str] = &[".gavel.toml", "gavel.toml"];

fn parse_options_str(s: &str, path: &Path) -> io::Result<Options> {
    toml::from_str::<Options>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_options(path: &Path) -> io::Result<Options> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let options = parse_options_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(options)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("gavel").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("gavel")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .gavel.toml, gavel.toml
/// 3) XDG: $XDG_CONFIG_HOME/gavel/config.toml or ~/.config/gavel/config.toml
/// 4) default options
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Options, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let options = read_options(path)?;
        return Ok((options, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(options) = read_options(&p)
    {
        return Ok((options, Some(p)));
    }

    if let Some(p) = xdg_config_path()
        && let Ok(options) = read_options(&p)
    {
        return Ok((options, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Options::default(), None))
}
