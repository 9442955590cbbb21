use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::format::ConfigFormat;
use crate::config::settings::LifecycleSettings;
use crate::declaration::Bundle;
use crate::kernel::component::ComponentId;

/// Lifecycle phase a scripted component is told to fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailPhase {
    Construct,
    Init,
    Start,
}

/// One component as described in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(default)]
    pub load_order: i32,
    #[serde(default, alias = "depends_on")]
    pub dependencies: Vec<String>,
    /// Declare an init hook.
    #[serde(default)]
    pub init: bool,
    /// Declare a start hook.
    #[serde(default)]
    pub start: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<FailPhase>,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            load_order: 0,
            dependencies: Vec::new(),
            init: false,
            start: false,
            fail: None,
        }
    }

    pub fn id(&self) -> ComponentId {
        ComponentId::new(self.name.as_str())
    }

    pub fn dependency_ids(&self) -> Vec<ComponentId> {
        self.dependencies.iter().map(|name| ComponentId::new(name.as_str())).collect()
    }

    /// Whether an init hook is declared, either explicitly or to fail in it.
    pub fn has_init_hook(&self) -> bool {
        self.init || self.fail == Some(FailPhase::Init)
    }

    /// Whether a start hook is declared, either explicitly or to fail in it.
    pub fn has_start_hook(&self) -> bool {
        self.start || self.fail == Some(FailPhase::Start)
    }
}

/// A named bundle as described in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSpec {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl BundleSpec {
    pub fn to_bundle(&self) -> Bundle {
        self.members
            .iter()
            .fold(Bundle::new(self.name.as_str()), |bundle, member| bundle.member_id(member.as_str()))
    }
}

/// Declarations, bundles and settings described as data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub settings: LifecycleSettings,
    pub components: Vec<ComponentSpec>,
    pub bundles: Vec<BundleSpec>,
}

impl Manifest {
    /// Parse manifest content in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        format.decode(content).map_err(|message| ConfigError::Parse {
            format: format.to_string(),
            message,
        })
    }

    /// Load a manifest from disk, choosing the format by file extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading {} manifest from {}", format, path.display());
        Self::parse(&content, format)
    }

    /// Serialise to JSON; used when echoing a normalised manifest.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            format: ConfigFormat::Json.to_string(),
            message: e.to_string(),
        })
    }

    pub fn bundles(&self) -> Vec<Bundle> {
        self.bundles.iter().map(BundleSpec::to_bundle).collect()
    }
}
