//! PPO training parameters, keyed by scenario name.
//!
//! The grid world never reads these. They are handed wholesale to an
//! external training driver.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REACHER_V4: &str = "Reacher-v4";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Ppo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpoHyperparams {
    #[serde(default)]
    pub algo: Algorithm,
    pub normalize: bool,
    pub n_envs: usize,
    pub policy: String,
    pub n_timesteps: f64,
    pub batch_size: usize,
    pub n_steps: usize,
    pub gamma: f64,
    pub learning_rate: f64,
    pub ent_coef: f64,
    pub clip_range: f64,
    pub n_epochs: usize,
    pub gae_lambda: f64,
    pub max_grad_norm: f64,
    pub vf_coef: f64,
}

impl PpoHyperparams {
    pub fn reacher_v4() -> Self {
        Self {
            algo: Algorithm::Ppo,
            normalize: false,
            n_envs: 1,
            policy: "MlpPolicy".to_string(),
            n_timesteps: 100000.0,
            batch_size: 32,
            n_steps: 512,
            gamma: 0.9,
            learning_rate: 0.000104019,
            ent_coef: 7.52585e-08,
            clip_range: 0.3,
            n_epochs: 5,
            gae_lambda: 1.0,
            max_grad_norm: 0.9,
            vf_coef: 0.950368,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperparamTable(BTreeMap<String, PpoHyperparams>);

impl HyperparamTable {
    pub fn builtin() -> Self {
        Self(BTreeMap::from([(
            REACHER_V4.to_string(),
            PpoHyperparams::reacher_v4(),
        )]))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, scenario: &str) -> Option<&PpoHyperparams> {
        self.0.get(scenario)
    }

    pub fn insert(&mut self, scenario: &str, params: PpoHyperparams) -> Option<PpoHyperparams> {
        self.0.insert(scenario.to_string(), params)
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
