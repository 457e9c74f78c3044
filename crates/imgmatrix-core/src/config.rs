use serde::{Deserialize, Serialize};

/// File name looked up in the output root.
pub const CONFIG_FILE: &str = "imgmatrix.toml";

/// imgmatrix.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub matrix: MatrixSpec,
    /// Version aliases, in publishing order.
    #[serde(default = "default_aliases")]
    pub aliases: Vec<VersionAliases>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Published image name
    #[serde(default = "default_image_name")]
    pub name: String,
    /// Codefresh registry integration name
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Git repository cloned by the deploy pipeline
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Branch whose builds get pushed
    #[serde(default = "default_push_branch")]
    pub push_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSpec {
    /// PHP runtime versions
    #[serde(default = "default_versions")]
    pub versions: Vec<String>,
    /// Image variants; an empty string is the plain image
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,
    /// Dockerfile build targets (stage names)
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// Target whose images carry no suffix
    #[serde(default = "default_target")]
    pub default_target: String,
}

/// Alternate tags published for one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionAliases {
    pub version: String,
    pub aliases: Vec<String>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            matrix: MatrixSpec::default(),
            aliases: default_aliases(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            name: default_image_name(),
            registry: default_registry(),
            repo: default_repo(),
            push_branch: default_push_branch(),
        }
    }
}

impl Default for MatrixSpec {
    fn default() -> Self {
        Self {
            versions: default_versions(),
            variants: default_variants(),
            targets: default_targets(),
            default_target: default_target(),
        }
    }
}

impl MatrixConfig {
    /// Load from imgmatrix.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Alias keys that do not name a configured version.
    ///
    /// These are not an error; they just never substitute anything.
    pub fn unmatched_alias_versions(&self) -> Vec<&str> {
        self.aliases
            .iter()
            .map(|a| a.version.as_str())
            .filter(|v| !self.matrix.versions.iter().any(|known| known == v))
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn default_image_name() -> String {
    "atk4/image".to_owned()
}

fn default_registry() -> String {
    "atk4".to_owned()
}

fn default_repo() -> String {
    "atk4/image".to_owned()
}

fn default_push_branch() -> String {
    "master".to_owned()
}

fn default_versions() -> Vec<String> {
    strings(&["7.2", "7.3", "7.4", "8.0"])
}

fn default_variants() -> Vec<String> {
    strings(&[""])
}

fn default_targets() -> Vec<String> {
    strings(&["base", "npm", "selenium"])
}

fn default_target() -> String {
    "base".to_owned()
}

fn default_aliases() -> Vec<VersionAliases> {
    vec![
        VersionAliases {
            version: "7.4".to_owned(),
            aliases: strings(&["7.x"]),
        },
        VersionAliases {
            version: "8.0".to_owned(),
            aliases: strings(&["8.x", "latest"]),
        },
    ]
}
