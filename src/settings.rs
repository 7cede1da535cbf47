//! Page settings
//!
//! Embedded in the page as JSON (`<script id="heads-config">`); every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::countdown::DEFAULT_TARGET_MS;
use crate::error::ConfigError;
use crate::particles::PARTICLE_COUNT;
use crate::sim::Tuning;

/// Fewest heads that can produce a winner
pub const MIN_HEADS: usize = 2;

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine tuning
    pub tuning: Tuning,
    /// One head per name, in DOM order (`#flying-head-1`, ...)
    pub head_names: Vec<String>,
    /// Ambient particles
    pub particle_count: usize,
    /// Countdown target (Unix epoch, ms)
    pub countdown_target_ms: f64,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            head_names: vec!["Head 1".into(), "Head 2".into(), "Head 3".into()],
            particle_count: PARTICLE_COUNT,
            countdown_target_ms: DEFAULT_TARGET_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// DOM id of the embedded config block
    pub const CONFIG_ELEMENT_ID: &'static str = "heads-config";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.head_names.len() < MIN_HEADS {
            return Err(ConfigError::TooFewHeads {
                min: MIN_HEADS,
                actual: self.head_names.len(),
            });
        }

        let t = &self.tuning;
        let checks = [
            ("head_size", t.head_size),
            ("speed", t.speed),
            ("max_frame_dt", t.max_frame_dt),
            ("max_health", t.max_health as f32),
            ("collision_damage", t.collision_damage as f32),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded page settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring page settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
