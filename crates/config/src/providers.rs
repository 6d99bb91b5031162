use figment::{
    Error, Metadata, Profile, Provider,
    providers::{Env, Format, Toml},
    value::{Dict, Map},
};
use std::path::{Path, PathBuf};

/// Reads the TOML file named by an environment variable, falling back to a default path.
///
/// A missing default file yields no values, a missing file named by the environment variable is
/// an error.
#[derive(Clone, Debug)]
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
        self.env_val().map(PathBuf::from).unwrap_or_else(|| self.default.clone())
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
        if let (Some(var), Some(file)) = (self.env_var, self.env_val())
            && !Path::new(&file).exists()
        {
            return Err(Error::custom(format!(
                "Config file `{file}` set in env var `{var}` does not exist"
            )));
        }
        Toml::file(self.file()).data()
    }
}
