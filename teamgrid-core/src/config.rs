//! Global teamgrid configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{TeamGridError, TeamGridResult};
use crate::store::Store;
use crate::sync::DirRemote;

static DEFAULT_DATA_DIR: &str = "~/.local/share/teamgrid";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Global configuration at ~/.config/teamgrid/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct TeamGridConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Shared directory used as the sync remote. Absent means local-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_dir: Option<PathBuf>,

    /// Player selected by default for `week` and `set`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl Default for TeamGridConfig {
    fn default() -> Self {
        TeamGridConfig {
            data_dir: default_data_dir(),
            remote_dir: None,
            player: None,
        }
    }
}

impl TeamGridConfig {
    pub fn config_path() -> TeamGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TeamGridError::Config("Could not determine config directory".into()))?
            .join("teamgrid");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> TeamGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: TeamGridConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| TeamGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TeamGridError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Save the current config to ~/.config/teamgrid/config.toml
    pub fn save(&self) -> TeamGridResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| TeamGridError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| TeamGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> TeamGridResult<()> {
        let contents = format!(
            "\
# teamgrid configuration

# Where local data lives:
# data_dir = \"{}\"

# Shared directory to sync snapshots through (any folder all devices see):
# remote_dir = \"~/Sync/teamgrid\"

# Player selected by default for `week` and `set`:
# player = \"Alex\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TeamGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TeamGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn remote(&self) -> Option<DirRemote> {
        let dir = self.remote_dir.as_ref()?;
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        Some(DirRemote::new(expanded))
    }

    /// Remember `name` as the default player if none is configured yet.
    /// Returns true if the default was set.
    pub fn set_default_player_if_unset(&mut self, name: &str) -> TeamGridResult<bool> {
        if self.player.is_some() {
            return Ok(false);
        }
        self.player = Some(name.to_string());
        self.save()?;
        Ok(true)
    }

    /// Open the local store, wired to the configured remote if there is one.
    pub fn open_store(&self) -> Store {
        let store = Store::new(self.data_path());
        match self.remote() {
            Some(remote) => store.with_remote(remote),
            None => store,
        }
    }
}
