//! Enemy intents and their weighted sampling

use crate::config::IntentWeights;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What an enemy has announced it will do on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyAction {
    Attack,
    Defend,
    /// Curse the hero's backpack; insertion is left to the controller
    Malediction,
}

impl EnemyAction {
    /// Get all actions, in weight order
    pub fn all() -> &'static [EnemyAction] {
        &[EnemyAction::Attack, EnemyAction::Defend, EnemyAction::Malediction]
    }
}

/// Weighted sampler over enemy actions
#[derive(Debug, Clone)]
pub struct IntentSampler {
    index: WeightedIndex<u32>,
}

impl IntentSampler {
    /// Returns `None` when every weight is zero
    pub fn new(weights: &IntentWeights) -> Option<Self> {
        WeightedIndex::new([weights.attack, weights.defend, weights.malediction])
            .ok()
            .map(|index| IntentSampler { index })
    }

    pub fn sample(&self, rng: &mut impl Rng) -> EnemyAction {
        EnemyAction::all()[self.index.sample(rng)]
    }
}
