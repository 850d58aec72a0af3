//! Template loading for the comparison report.
//!
//! Templates live in a YAML file of named Handlebars templates. The
//! built-in set is compiled into the crate.

use serde::Deserialize;
use std::collections::HashMap;

const BUILTIN_TEMPLATES: &str = include_str!("../templates/report-templates.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Templates shipped with the crate
    pub fn builtin() -> Result<Self, String> {
        Self::from_yaml(BUILTIN_TEMPLATES)
    }

    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file: {}", e))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse templates YAML: {}", e))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
