//! Page settings (vitrine.toml)

use serde::{Deserialize, Serialize};
use vitrine_animation::TypingTimings;
use vitrine_core::{Error, Result};

/// Top-level page settings
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PageConfig {
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Seed for decorative randomness; unseeded sessions use entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Typing-text cycle
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TypingConfig {
    #[serde(default = "default_texts")]
    pub texts: Vec<String>,
    #[serde(default = "default_start_delay")]
    pub start_delay_ms: u64,
    #[serde(default = "default_type_ms")]
    pub type_ms: u64,
    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,
    #[serde(default = "default_hold_full")]
    pub hold_full_ms: u64,
    #[serde(default = "default_hold_empty")]
    pub hold_empty_ms: u64,
}

fn default_texts() -> Vec<String> {
    [
        "Hi, I'm Sivakumar Adabala",
        "Azure DevOps Engineer",
        "Cloud Infrastructure Expert",
        "CI/CD Automation Specialist",
        "Terraform & Kubernetes Expert",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_start_delay() -> u64 {
    1000
}

fn default_type_ms() -> u64 {
    100
}

fn default_delete_ms() -> u64 {
    50
}

fn default_hold_full() -> u64 {
    2000
}

fn default_hold_empty() -> u64 {
    500
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            texts: default_texts(),
            start_delay_ms: default_start_delay(),
            type_ms: default_type_ms(),
            delete_ms: default_delete_ms(),
            hold_full_ms: default_hold_full(),
            hold_empty_ms: default_hold_empty(),
        }
    }
}

impl TypingConfig {
    pub fn timings(&self) -> TypingTimings {
        TypingTimings {
            start_delay_ms: self.start_delay_ms,
            type_ms: self.type_ms,
            delete_ms: self.delete_ms,
            hold_full_ms: self.hold_full_ms,
            hold_empty_ms: self.hold_empty_ms,
        }
    }

    /// Every delay that re-arms the cycle must be at least 1 ms
    pub fn validate(&self) -> Result<()> {
        let delays = [
            ("type_ms", self.type_ms),
            ("delete_ms", self.delete_ms),
            ("hold_full_ms", self.hold_full_ms),
            ("hold_empty_ms", self.hold_empty_ms),
        ];
        match delays.iter().find(|(_, ms)| *ms == 0) {
            Some((name, _)) => Err(Error::Config(format!("typing.{name} must be at least 1 ms"))),
            None => Ok(()),
        }
    }
}

/// Optional page behaviors
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FeaturesConfig {
    #[serde(default = "default_true")]
    pub particles: bool,
    #[serde(default = "default_hero_particles")]
    pub hero_particles: usize,
    #[serde(default = "default_tech_particles")]
    pub tech_particles: usize,
    #[serde(default)]
    pub lazy_images: bool,
    #[serde(default)]
    pub preloader: bool,
}

fn default_true() -> bool {
    true
}

fn default_hero_particles() -> usize {
    50
}

fn default_tech_particles() -> usize {
    20
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            particles: true,
            hero_particles: default_hero_particles(),
            tech_particles: default_tech_particles(),
            lazy_images: false,
            preloader: false,
        }
    }
}

/// Fixed delays of overlays and the contact form
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TimingConfig {
    /// How long a notification stays before sliding out
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    /// Simulated submission latency
    #[serde(default = "default_form_delay")]
    pub form_delay_ms: u64,
}

fn default_notification_ms() -> u64 {
    5000
}

fn default_form_delay() -> u64 {
    2000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_ms: default_notification_ms(),
            form_delay_ms: default_form_delay(),
        }
    }
}

impl PageConfig {
    /// Parse settings from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.typing.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
