//! Config file provider.

use figment::{
    Error, Metadata, Profile, Provider,
    providers::{Env, Format, Toml},
    value::{Dict, Map},
};
use std::path::{Path, PathBuf};

/// A TOML file whose path may be overridden by an environment variable.
///
/// Reading fails if the variable is set but the file it names does not exist. A missing default
/// file is not an error.
pub(crate) struct TomlFileProvider {
    env_var: Option<&'static str>,
    default: PathBuf,
}

impl TomlFileProvider {
    pub(crate) fn new(env_var: Option<&'static str>, default: impl Into<PathBuf>) -> Self {
        Self { env_var, default: default.into() }
    }

    fn env_val(&self) -> Option<String> {
        self.env_var.and_then(Env::var)
    }

    fn file(&self) -> PathBuf {
        match self.env_val() {
            Some(file) => PathBuf::from(file),
            None => find_in_ancestors(&self.default).unwrap_or_else(|| self.default.clone()),
        }
    }

    fn is_missing(&self) -> bool {
        self.env_val().is_some_and(|file| !Path::new(&file).exists())
    }
}

impl Provider for TomlFileProvider {
    fn metadata(&self) -> Metadata {
        if self.is_missing() {
            Metadata::named("TOML file provider")
        } else {
            Toml::file(self.file()).metadata()
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        use serde::de::Error as _;
        if let (Some(var), Some(file)) = (self.env_var, self.env_val()) {
            if !Path::new(&file).exists() {
                return Err(Error::custom(format!(
                    "config file `{file}` set in env var `{var}` does not exist"
                )));
            }
            return Toml::file(file).data();
        }
        Toml::file(self.file()).data()
    }
}

/// Finds `file` in the current directory or the closest parent directory containing it.
fn find_in_ancestors(file: &Path) -> Option<PathBuf> {
    if file.is_absolute() {
        return file.is_file().then(|| file.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors().map(|dir| dir.join(file)).find(|path| path.is_file())
}
