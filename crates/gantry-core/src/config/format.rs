use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Manifest encodings. YAML and TOML sit behind the `yaml-config` and
/// `toml-config` features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    #[cfg(feature = "yaml-config")]
    Yaml,
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Every format compiled into this build, with the extensions it claims.
    pub const SUPPORTED: &'static [(ConfigFormat, &'static [&'static str])] = &[
        (ConfigFormat::Json, &["json"]),
        #[cfg(feature = "yaml-config")]
        (ConfigFormat::Yaml, &["yaml", "yml"]),
        #[cfg(feature = "toml-config")]
        (ConfigFormat::Toml, &["toml"]),
    ];

    /// Canonical extension, also used as the display label.
    pub fn extension(&self) -> &'static str {
        Self::SUPPORTED
            .iter()
            .find(|(format, _)| format == self)
            .and_then(|(_, extensions)| extensions.first().copied())
            .unwrap_or("json")
    }

    /// Case-insensitive lookup of a bare extension such as `"yml"`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        Self::SUPPORTED
            .iter()
            .find(|(_, extensions)| extensions.contains(&extension.as_str()))
            .map(|(format, _)| *format)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }

    /// Decode `content` in this format; the error is the decoder's message.
    pub(crate) fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}
