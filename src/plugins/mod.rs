//! Plugin manifests and registry
//!
//! Plugins extend the harvest pipeline with custom document processing.
//! Each plugin ships a `plugin.yaml` manifest; the registry loads manifests
//! from a plugins directory and resolves them by name.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::document::Document;
use crate::utils::error::{HarvestError, Result};

/// Manifest describing a plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name, unique within a registry
    pub name: String,
    /// Plugin version
    pub version: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Plugin-specific settings
    #[serde(default)]
    pub settings: HashMap<String, serde_yaml::Value>,
}

/// A pipeline extension point
pub trait Plugin: Send + Sync {
    /// Plugin name, matching its manifest
    fn name(&self) -> &str;

    /// Prepare the plugin for use
    fn initialize(&mut self) -> Result<()>;

    /// Process one document
    fn process(&self, document: Document) -> Result<Document>;
}

/// Loads and resolves plugin manifests
#[derive(Debug, Default)]
pub struct PluginRegistry {
    manifests: RwLock<HashMap<String, PluginManifest>>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest from one plugin directory (`<dir>/plugin.yaml`)
    /// and register it.
    pub fn load_plugin(&self, plugin_dir: &Path) -> Result<PluginManifest> {
        let manifest_path = plugin_dir.join("plugin.yaml");
        let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
            HarvestError::Plugin(format!(
                "Cannot read manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        let manifest: PluginManifest = serde_yaml::from_str(&content)
            .map_err(|e| HarvestError::Plugin(format!("Invalid manifest: {}", e)))?;

        info!("Loaded plugin: {} v{}", manifest.name, manifest.version);
        self.manifests
            .write()
            .insert(manifest.name.clone(), manifest.clone());
        Ok(manifest)
    }

    /// Load every plugin under `plugins_dir` (one subdirectory per plugin).
    /// Directories without a valid manifest are logged and skipped.
    pub fn load_directory(&self, plugins_dir: &Path) -> Result<usize> {
        let entries = std::fs::read_dir(plugins_dir).map_err(|e| {
            HarvestError::Plugin(format!(
                "Cannot read plugins directory {}: {}",
                plugins_dir.display(),
                e
            ))
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match self.load_plugin(&path) {
                Ok(_) => loaded += 1,
                Err(e) => warn!("Skipping plugin at {}: {}", path.display(), e),
            }
        }

        Ok(loaded)
    }

    /// Manifest for a plugin by name
    pub fn get(&self, name: &str) -> Option<PluginManifest> {
        self.manifests.read().get(name).cloned()
    }

    /// Names of all registered plugins, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.manifests.read().keys().cloned().collect();
        names.sort();
        names
    }
}
