//! Profile lookup table: one classifier plus one profile per expert kind.

use std::fs;
use std::path::Path;

use lawbot_core::{AgentProfile, ExpertKind};
use serde::Deserialize;
use tracing::info;

use crate::prompts::{
    CIVIL_PROMPT, CLASSIFIER_PROMPT, CONSTITUTION_PROMPT, CRIMINAL_PROMPT, TRAFFIC_PROMPT,
};
use crate::ConfigError;

/// Optional replacement fields for a single built-in profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl ProfileOverride {
    fn apply(self, profile: &mut AgentProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(prompt) = self.system_prompt {
            profile.system_prompt = prompt;
        }
        if let Some(model) = self.model {
            profile.model = model;
        }
    }
}

/// Shape of a profile override file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(default)]
    classifier: Option<ProfileOverride>,
    #[serde(default)]
    constitution: Option<ProfileOverride>,
    #[serde(default)]
    criminal: Option<ProfileOverride>,
    #[serde(default)]
    civil: Option<ProfileOverride>,
    #[serde(default)]
    traffic: Option<ProfileOverride>,
}

/// Static profiles for the classifier and every expert.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    classifier: AgentProfile,
    experts: [AgentProfile; 4],
}

fn profile(name: &str, system_prompt: &str, model: &str) -> AgentProfile {
    AgentProfile {
        name: name.to_string(),
        system_prompt: system_prompt.to_string(),
        model: model.to_string(),
    }
}

impl ProfileTable {
    /// Creates the built-in profiles, all bound to `model`.
    pub fn builtin(model: &str) -> Self {
        Self {
            classifier: profile("Classifier", CLASSIFIER_PROMPT, model),
            experts: [
                profile("Constitution_agent", CONSTITUTION_PROMPT, model),
                profile("BNS_agent", CRIMINAL_PROMPT, model),
                profile("Civil_agent", CIVIL_PROMPT, model),
                profile("Traffic_agent", TRAFFIC_PROMPT, model),
            ],
        }
    }

    /// Overlays JSON overrides onto the built-in profiles.
    pub fn from_json(json: &str, model: &str) -> Result<Self, ConfigError> {
        let overrides: OverrideFile = serde_json::from_str(json)?;
        let mut table = Self::builtin(model);

        if let Some(o) = overrides.classifier {
            o.apply(&mut table.classifier);
        }

        let per_expert = [
            (ExpertKind::Constitution, overrides.constitution),
            (ExpertKind::Criminal, overrides.criminal),
            (ExpertKind::Civil, overrides.civil),
            (ExpertKind::Traffic, overrides.traffic),
        ];
        for (kind, o) in per_expert {
            if let Some(o) = o {
                o.apply(&mut table.experts[kind.index()]);
            }
        }

        Ok(table)
    }

    /// Reads an override file from disk.
    pub fn load_from_file(path: &Path, model: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_json(&content, model)?;
        info!("Loaded profile overrides from {}", path.display());
        Ok(table)
    }

    /// Returns the classifier profile.
    pub fn classifier(&self) -> &AgentProfile {
        &self.classifier
    }

    /// Returns the profile for an expert kind.
    pub fn expert(&self, kind: ExpertKind) -> &AgentProfile {
        &self.experts[kind.index()]
    }
}
