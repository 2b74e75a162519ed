use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    errors::{HookError, Result},
    signature::SIGNATURE_HEADER,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Webhook token from the ChatWork settings page, base64 text.
    #[serde(default, serialize_with = "expose_token")]
    pub webhook_token: Option<SecretString>,
    /// Header the claimed signature arrives in.
    #[serde(default = "default_signature_header")]
    pub signature_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_token: None,
            signature_header: default_signature_header(),
        }
    }
}

impl Config {
    pub fn is_configured(&self) -> bool {
        self.webhook_token
            .as_ref()
            .map(|token| token.expose_secret().trim())
            .is_some_and(|token| !token.is_empty())
    }

    pub fn token(&self) -> Result<&[u8]> {
        self.webhook_token
            .as_ref()
            .map(|token| token.expose_secret().trim())
            .filter(|token| !token.is_empty())
            .map(str::as_bytes)
            .ok_or(HookError::NotConfigured)
    }
}

pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

/// Layer defaults, `CHATWORKHOOK_*` environment variables and the TOML file
/// at `path` (if it exists), in increasing precedence.
pub fn load_from(path: &Path) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("CHATWORKHOOK_"));

    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    figment.extract().map_err(|_| HookError::ConfigLoad)
}

pub fn save(config: &Config) -> Result<()> {
    save_to(config, &config_path()?)
}

pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Err(HookError::HomeDirUnavailable);
    };

    fs::create_dir_all(parent)
        .map_err(|_| HookError::CreateConfigDir(parent.display().to_string()))?;

    let toml_text = toml::to_string_pretty(config).map_err(|_| HookError::ConfigSerialize)?;
    fs::write(path, toml_text).map_err(|_| HookError::WriteConfig(path.display().to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let Some(base_dirs) = BaseDirs::new() else {
        return Err(HookError::HomeDirUnavailable);
    };
    Ok(base_dirs
        .config_dir()
        .join("chatworkhook")
        .join("config.toml"))
}

fn default_signature_header() -> String {
    SIGNATURE_HEADER.to_string()
}

fn expose_token<S>(
    token: &Option<SecretString>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    token
        .as_ref()
        .map(|token| token.expose_secret())
        .serialize(serializer)
}
