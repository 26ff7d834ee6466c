//! Battle - Turn machine for one encounter
//!
//! ```text
//! Init -> AnnounceEnemyTurn -> PlayerTurnActive -> PlayerTurnEnded
//!      -> EnemyTurnExecuting -> AnnounceEnemyTurn | Won | Lost
//! ```
//!
//! After the enemies act, the next turn is armed (stamina restored, new
//! intents announced) but stays in `AnnounceEnemyTurn` until the controller
//! calls `begin_player_turn`, which is where pending curses get inserted.
//!
//! The battle owns the enemy list and the injected RNG. The hero (and the
//! backpack it owns) is borrowed per call so the controller keeps access to
//! it between actions.

mod action;
mod report;

pub use action::{EnemyAction, IntentSampler};
pub use report::{BattleOutcome, BattlePhase, EnemyTurnReport, ItemUse};

use crate::combat::apply_item_effects;
use crate::config::GameConstants;
use crate::enemy::{Enemy, EnemyKind};
use crate::error::{BackpackError, Result};
use crate::hero::Hero;
use crate::types::ItemId;
use rand::Rng;
use tracing::{debug, info, warn};

pub struct Battle<R: Rng> {
    rng: R,
    constants: GameConstants,
    sampler: IntentSampler,
    /// Living enemies; players always hit index 0
    enemies: Vec<Enemy>,
    /// Announced intents, index-aligned with `enemies`
    actions: Vec<EnemyAction>,
    phase: BattlePhase,
    defeated: u32,
    pending_maledictions: u32,
}

impl<R: Rng> Battle<R> {
    /// Create a battle with an injected random source
    pub fn new(rng: R, constants: GameConstants) -> Result<Self> {
        let sampler = IntentSampler::new(&constants.intents).ok_or_else(|| {
            BackpackError::IllegalArgument("intent weights must not all be zero".to_string())
        })?;
        Ok(Battle {
            rng,
            constants,
            sampler,
            enemies: Vec::new(),
            actions: Vec::new(),
            phase: BattlePhase::Init,
            defeated: 0,
            pending_maledictions: 0,
        })
    }

    // === Lifecycle ===

    /// Spawn a random group of enemies and open the first player turn
    pub fn init_enemies(&mut self, hero: &mut Hero) {
        let spec = &self.constants.enemies;
        let count = self.rng.gen_range(spec.min_count..=spec.max_count.max(spec.min_count));
        let kinds = EnemyKind::all();
        let enemies = (0..count)
            .map(|_| {
                let kind = kinds[self.rng.gen_range(0..kinds.len())];
                Enemy::spawn(kind, &self.constants)
            })
            .collect();
        self.init_with_enemies(hero, enemies);
    }

    /// Start the encounter against a given enemy group
    pub fn init_with_enemies(&mut self, hero: &mut Hero, enemies: Vec<Enemy>) {
        self.enemies = enemies.into_iter().filter(Enemy::is_alive).collect();
        self.actions.clear();
        self.defeated = 0;
        self.pending_maledictions = 0;
        info!(
            enemies = self.enemies.len(),
            kinds = ?self.enemies.iter().map(|e| e.kind).collect::<Vec<_>>(),
            "encounter started"
        );

        if self.is_running(hero) {
            self.start_player_turn(hero);
        } else {
            self.settle(hero);
        }
    }

    /// Sample one intent per living enemy
    pub fn announce_enemy_turn(&mut self) {
        self.phase = BattlePhase::AnnounceEnemyTurn;
        let sampler = &self.sampler;
        let rng = &mut self.rng;
        self.actions = self.enemies.iter().map(|_| sampler.sample(&mut *rng)).collect();
        debug!(actions = ?self.actions, "enemy intents announced");
    }

    fn start_player_turn(&mut self, hero: &mut Hero) {
        hero.reset_stamina();
        self.announce_enemy_turn();
        self.phase = BattlePhase::PlayerTurnActive;
    }

    /// Open the player turn that the last enemy turn armed
    pub fn begin_player_turn(&mut self) -> Result<()> {
        if self.phase != BattlePhase::AnnounceEnemyTurn {
            warn!(phase = ?self.phase, "no announced turn to begin");
            return Err(BackpackError::InvalidTurnAction(format!(
                "cannot begin a player turn during {:?}",
                self.phase
            )));
        }
        self.phase = BattlePhase::PlayerTurnActive;
        Ok(())
    }

    fn settle(&mut self, hero: &Hero) {
        self.actions.clear();
        self.phase = if hero.is_alive() {
            BattlePhase::Won
        } else {
            BattlePhase::Lost
        };
        info!(
            outcome = ?self.phase,
            defeated = self.defeated,
            hp = hero.hp(),
            "encounter over"
        );
    }

    // === Player turn ===

    /// Use an item from the hero's backpack
    ///
    /// Every precondition is checked before anything changes, so an `Err`
    /// leaves the hero, backpack and enemies untouched.
    pub fn use_item(&mut self, hero: &mut Hero, id: ItemId) -> Result<ItemUse> {
        if self.phase != BattlePhase::PlayerTurnActive {
            warn!(phase = ?self.phase, %id, "item used out of turn");
            return Err(BackpackError::InvalidTurnAction(format!(
                "cannot use items during {:?}",
                self.phase
            )));
        }
        let item = hero
            .inventory()
            .item(id)
            .cloned()
            .ok_or(BackpackError::ItemNotFound(id))?;
        if !hero.has_stamina(item.stamina_cost()) {
            warn!(
                item = %item.name(),
                cost = item.stamina_cost(),
                stamina = hero.stamina(),
                "not enough stamina"
            );
            return Err(BackpackError::InvalidTurnAction(format!(
                "{} needs {} stamina, hero has {}",
                item.name(),
                item.stamina_cost(),
                hero.stamina()
            )));
        }

        let mut outcome = ItemUse::default();
        hero.spend_stamina(item.stamina_cost())?;
        if item.stamina_regen() > 0 {
            hero.regen_stamina(item.stamina_regen());
        }
        if item.heal_amount() > 0 {
            outcome.healed = hero.heal(item.heal_amount());
        }
        if item.defend_value() > 0 {
            hero.add_protection(item.defend_value());
            outcome.protection = item.defend_value();
        }

        if item.attack_value() > 0 && !self.enemies.is_empty() {
            let effects = apply_item_effects(hero, id, &self.constants.combat)?;
            outcome.damage = effects.damage;
            outcome.life_bonus = effects.life_bonus;

            let target = self.enemies[0].take_damage(effects.damage);
            if target.is_alive() {
                self.enemies[0] = target;
            } else {
                self.enemies.remove(0);
                if !self.actions.is_empty() {
                    self.actions.remove(0);
                }
                self.defeated += 1;
                hero.gain_experience(target.experience);
                outcome.enemy_defeated = true;
                info!(kind = %target.kind, defeated = self.defeated, "enemy defeated");
            }
        }

        let worn = item.decrease_durability();
        if worn.is_broken() {
            hero.inventory_mut().update_item(id, None)?;
            outcome.item_broken = true;
            debug!(item = %item.name(), "item broke");
        } else {
            hero.inventory_mut().update_item(id, Some(worn))?;
        }

        if !self.is_running(hero) {
            self.settle(hero);
        }
        Ok(outcome)
    }

    /// Hand the turn to the enemies, which act immediately
    pub fn end_player_turn(&mut self, hero: &mut Hero) -> Result<EnemyTurnReport> {
        if self.phase != BattlePhase::PlayerTurnActive {
            warn!(phase = ?self.phase, "player turn already ended");
            return Err(BackpackError::InvalidTurnAction(format!(
                "no player turn to end during {:?}",
                self.phase
            )));
        }
        self.phase = BattlePhase::PlayerTurnEnded;
        Ok(self.execute_enemy_turn(hero))
    }

    // === Enemy turn ===

    /// Carry out the announced intents in order
    ///
    /// Does nothing unless the player turn has just ended with intents on the
    /// table. Maledictions are only counted; inserting the curse is up to the
    /// controller (see `take_pending_maledictions`).
    pub fn execute_enemy_turn(&mut self, hero: &mut Hero) -> EnemyTurnReport {
        let mut report = EnemyTurnReport::default();
        if self.phase != BattlePhase::PlayerTurnEnded || self.actions.is_empty() {
            return report;
        }
        self.phase = BattlePhase::EnemyTurnExecuting;

        let actions = std::mem::take(&mut self.actions);
        for (index, action) in actions.into_iter().enumerate() {
            let Some(enemy) = self.enemies.get(index) else {
                break;
            };
            match action {
                EnemyAction::Attack => {
                    let absorbed = enemy.attack_damage.min(hero.protection());
                    report.damage_absorbed += absorbed;
                    report.damage_taken += hero.take_hit(enemy.attack_damage);
                }
                EnemyAction::Defend => {
                    self.enemies[index] = enemy.defend(self.constants.enemies.defend_bonus);
                    report.defends += 1;
                }
                EnemyAction::Malediction => {
                    self.pending_maledictions += 1;
                    report.maledictions += 1;
                }
            }
        }

        hero.reset_protection();
        debug!(report = %report.summary(), hp = hero.hp(), "enemy turn resolved");

        if self.is_running(hero) {
            hero.reset_stamina();
            self.announce_enemy_turn();
        } else {
            self.settle(hero);
        }
        report
    }

    /// Drain the curse intents that still need inserting
    pub fn take_pending_maledictions(&mut self) -> u32 {
        std::mem::take(&mut self.pending_maledictions)
    }

    // === Queries ===

    /// The encounter continues while the hero lives and enemies remain
    pub fn is_running(&self, hero: &Hero) -> bool {
        hero.is_alive() && !self.enemies.is_empty()
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == BattlePhase::PlayerTurnActive
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Won => Some(BattleOutcome::Won),
            BattlePhase::Lost => Some(BattleOutcome::Lost),
            _ => None,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn announced_actions(&self) -> &[EnemyAction] {
        &self.actions
    }

    /// Enemies defeated since the encounter started
    pub fn defeated_count(&self) -> u32 {
        self.defeated
    }

    pub fn pending_maledictions(&self) -> u32 {
        self.pending_maledictions
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }
}
