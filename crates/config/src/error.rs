//! Configuration errors.

use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt};

/// Header of the message printed when the configuration could not be extracted.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract ENS config:";

/// Represents a failed attempt to extract `Config` from a `Figment`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    /// error thrown when extracting the `Config`
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// The individual problems, deduplicated, in the order figment reported them.
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut unique = HashSet::with_capacity(self.error.count());
        self.error
            .clone()
            .into_iter()
            .map(|err| {
                let from_toml = err
                    .metadata
                    .as_ref()
                    .map(|meta| meta.name.contains(Toml::NAME))
                    .unwrap_or_default();
                if from_toml { ConfigError::Toml(err) } else { ConfigError::Other(err) }
            })
            .filter(|err| unique.insert(err.to_string()))
            .collect()
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.errors() {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A single problem found while building the configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// An error in the `ens.toml` file
    Toml(figment::Error),
    /// Any other error, such as a malformed environment variable
    Other(figment::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_err = |err: &figment::Error, f: &mut fmt::Formatter<'_>| {
            write!(f, "{err}")?;
            if !err.path.is_empty() {
                // the path holds the setting name, like `["rpc_timeout"]`
                write!(f, " for setting `{}`", err.path.join("."))?;
            }
            Ok(())
        };

        match self {
            Self::Toml(err) => {
                f.write_str("ens.toml error: ")?;
                fmt_err(err, f)
            }
            Self::Other(err) => {
                f.write_str("ens config error: ")?;
                fmt_err(err, f)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Other(error) | Self::Toml(error) => Error::source(error),
        }
    }
}
