use std::{path::Path, time::Duration};

use config_sys::{Config, ConfigError, Environment, File};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

const CONFIG_FOLDER_PATH_DEFAULT: &str = "./config/";
const CONFIG_FILE_LOCAL_PREFIX: &str = "local_";
// This makes it so "<APP_NAME>_SENSOR__HOST overrides sensor.host
const CONFIG_ENV_SEPARATOR: &str = "__";
const CONFIG_ENV_PREFIX_SEPARATOR: &str = "_";

#[derive(Debug, Clone, Copy)]
pub enum FileFormat {
    YAML,
}

impl FileFormat {
    pub fn as_str(&self) -> &str {
        match self {
            FileFormat::YAML => "yaml",
        }
    }
}

/// Loads settings, later sources overriding earlier ones:
/// serde defaults, `./config/<app>.<ext>`, `./config/local_<app>.<ext>`,
/// `<APP>_*` environment variables, then `extra_path` if given.
pub fn setup_config<T>(
    app_name: &str,
    file_format: FileFormat,
    extra_path: Option<&Path>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    setup_config_from(
        CONFIG_FOLDER_PATH_DEFAULT,
        app_name,
        file_format,
        extra_path,
    )
}

pub fn setup_config_from<T>(
    folder: &str,
    app_name: &str,
    file_format: FileFormat,
    extra_path: Option<&Path>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut s = Config::builder()
        .add_source(
            File::with_name(format!("{}{}.{}", folder, app_name, file_format.as_str()).as_str())
                .required(false),
        )
        .add_source(
            File::with_name(
                format!(
                    "{}{}{}.{}",
                    folder,
                    CONFIG_FILE_LOCAL_PREFIX,
                    app_name,
                    file_format.as_str()
                )
                .as_str(),
            )
            .required(false),
        )
        .add_source(
            Environment::with_prefix(app_name.to_uppercase().as_str())
                .prefix_separator(CONFIG_ENV_PREFIX_SEPARATOR)
                .separator(CONFIG_ENV_SEPARATOR),
        );

    if let Some(extra_path) = extra_path {
        s = s.add_source(File::from(extra_path));
    }

    s.build()?.try_deserialize::<T>()
}

/// Reads durations written the humantime way, e.g. `"1s"` or `"250ms"`.
pub fn humantime_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}
