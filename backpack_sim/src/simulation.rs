//! Auto-pilot controller driving seeded encounters

use backpack_core::item::ItemTemplate;
use backpack_core::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Catalog ids the hero starts with, in packing order
pub const STARTING_KIT: &[&str] = &[
    "short_sword",
    "buckler",
    "healing_herb",
    "ration",
    "gold_pouch",
];

/// Safety valve against encounters that never settle
const MAX_TURNS: u32 = 200;
/// Free indestructible items could otherwise be used forever
const MAX_ACTIONS_PER_TURN: usize = 32;

/// What happened in one encounter
#[derive(Debug, Clone, Serialize)]
pub struct EncounterSummary {
    pub index: u32,
    pub outcome: Option<BattleOutcome>,
    pub enemies: usize,
    pub defeated: u32,
    pub turns: u32,
    pub hp_left: u32,
    pub damage_taken: u32,
    pub maledictions: u32,
    /// Items lost because a curse pushed them out of the backpack
    pub discarded: usize,
    pub gold_looted: u32,
    pub cells_unlocked: u32,
}

impl EncounterSummary {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let outcome = match self.outcome {
            Some(BattleOutcome::Won) => "won",
            Some(BattleOutcome::Lost) => "lost",
            None => "unfinished",
        };
        let mut parts = vec![format!(
            "#{} {} in {} turn(s), {}/{} defeated, {} hp left",
            self.index, outcome, self.turns, self.defeated, self.enemies, self.hp_left
        )];

        if self.maledictions > 0 {
            parts.push(format!("{} curse(s)", self.maledictions));
        }

        if self.discarded > 0 {
            parts.push(format!("{} item(s) lost", self.discarded));
        }

        if self.gold_looted > 0 {
            parts.push(format!("+{} gold", self.gold_looted));
        }

        if self.cells_unlocked > 0 {
            parts.push(format!("+{} cell(s)", self.cells_unlocked));
        }

        parts.join(", ")
    }
}

/// A run of consecutive encounters with one hero
#[derive(Debug, Serialize)]
pub struct Simulation {
    pub hero: Hero,
    pub expansion: ExpansionSystem,
    pub encounters: Vec<EncounterSummary>,
    #[serde(skip)]
    constants: GameConstants,
    #[serde(skip)]
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a hero from the constants and pack the starting kit
    pub fn new(
        constants: GameConstants,
        catalog: &HashMap<String, ItemTemplate>,
        seed: u64,
    ) -> Result<Self> {
        let mut hero = Hero::from_constants(&constants)?;
        for id in STARTING_KIT {
            let Some(template) = catalog.get(*id) else {
                warn!(id, "starting item missing from catalog");
                continue;
            };
            let item = template.build()?;
            if hero.inventory_mut().auto_add(&item).is_none() {
                warn!(item = %item.name(), "no room for starting item");
            }
        }

        let expansion = ExpansionSystem::new(hero.inventory());
        Ok(Simulation {
            hero,
            expansion,
            encounters: Vec::new(),
            constants,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn is_hero_alive(&self) -> bool {
        self.hero.is_alive()
    }

    /// Play encounters until `count` are done or the hero falls
    pub fn run(&mut self, count: u32) -> Result<()> {
        for index in 1..=count {
            if !self.hero.is_alive() {
                break;
            }
            let summary = self.run_encounter(index)?;
            info!(summary = %summary.summary(), "encounter finished");
            self.encounters.push(summary);
        }
        Ok(())
    }

    /// Fight one seeded encounter to its end, then collect rewards
    pub fn run_encounter(&mut self, index: u32) -> Result<EncounterSummary> {
        let battle_rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let mut battle = Battle::new(battle_rng, self.constants.clone())?;
        battle.init_enemies(&mut self.hero);

        let mut summary = EncounterSummary {
            index,
            outcome: None,
            enemies: battle.enemies().len(),
            defeated: 0,
            turns: 0,
            hp_left: self.hero.hp(),
            damage_taken: 0,
            maledictions: 0,
            discarded: 0,
            gold_looted: 0,
            cells_unlocked: 0,
        };

        while battle.is_running(&self.hero) && summary.turns < MAX_TURNS {
            summary.turns += 1;
            play_turn(&mut battle, &mut self.hero)?;
            if !battle.is_player_turn() {
                continue;
            }

            let report = battle.end_player_turn(&mut self.hero)?;
            summary.damage_taken += report.damage_taken;
            debug!(turn = summary.turns, report = %report.summary(), "enemy turn");

            for _ in 0..battle.take_pending_maledictions() {
                summary.maledictions += 1;
                let shapes = MaledictionShape::all();
                let shape = shapes[self.rng.gen_range(0..shapes.len())];
                summary.discarded += insert_malediction(self.hero.inventory_mut(), shape);
            }

            if battle.is_running(&self.hero) {
                battle.begin_player_turn()?;
            }
        }

        summary.outcome = battle.outcome();
        summary.defeated = battle.defeated_count();
        summary.hp_left = self.hero.hp();
        if summary.outcome == Some(BattleOutcome::Won) {
            let (gold, cells) = self.collect_rewards(summary.defeated);
            summary.gold_looted = gold;
            summary.cells_unlocked = cells;
        }
        Ok(summary)
    }

    /// Loot gold and spend unlock credits on the frontier
    fn collect_rewards(&mut self, defeated: u32) -> (u32, u32) {
        let rewards = &self.constants.rewards;
        let gold = rewards.gold_per_defeat.saturating_mul(defeated);
        let looted = if gold == 0 {
            0
        } else {
            match self.hero.inventory_mut().add_quantity(GOLD_NAME, gold) {
                Ok(_) => gold,
                Err(err) => {
                    warn!(%err, "gold left behind");
                    0
                }
            }
        };

        let credits = rewards.unlocks_per_defeat.saturating_mul(defeated);
        self.expansion.add_pending_unlocks(credits, self.hero.inventory());
        let unlocked = spend_unlocks(&mut self.expansion, self.hero.inventory_mut());
        (looted, unlocked)
    }
}

/// Use items until nothing affordable is worth using
///
/// Heals first when below half health, otherwise attacks, then raises shields
/// with whatever stamina remains.
pub fn play_turn<R: Rng>(battle: &mut Battle<R>, hero: &mut Hero) -> Result<()> {
    for _ in 0..MAX_ACTIONS_PER_TURN {
        if !battle.is_player_turn() {
            break;
        }
        let Some(id) = pick_item(hero) else {
            break;
        };
        let used = battle.use_item(hero, id)?;
        debug!(
            %id,
            damage = used.damage,
            healed = used.healed,
            protection = used.protection,
            "item used"
        );
    }
    Ok(())
}

fn pick_item(hero: &Hero) -> Option<ItemId> {
    let affordable: Vec<(ItemId, &Item)> = hero
        .inventory()
        .items()
        .filter(|(_, item)| !item.is_malediction() && hero.has_stamina(item.stamina_cost()))
        .collect();

    let wounded = hero.hp() * 2 < hero.max_hp();
    let healer = affordable.iter().find(|(_, item)| item.heal_amount() > 0);
    let weapon = affordable
        .iter()
        .filter(|(_, item)| item.attack_value() > 0)
        .max_by_key(|(_, item)| item.attack_value());
    let shield = affordable.iter().find(|(_, item)| item.defend_value() > 0);
    let regen = affordable
        .iter()
        .find(|(_, item)| item.stamina_regen() > 0 && hero.stamina() < hero.max_stamina());

    let first = if wounded { healer.or(weapon) } else { weapon };
    first.or(shield).or(regen).map(|(id, _)| *id)
}

/// Force a curse into the first spot it can take, re-packing what it displaced
///
/// Existing curses are never displaced. Returns how many displaced items no
/// longer fit and were discarded. A backpack with no such spot leaves the
/// curse unplaced.
pub fn insert_malediction(grid: &mut GridInventory, shape: MaledictionShape) -> usize {
    let curse = Item::malediction(shape);
    let Some((x, y)) = grid
        .coordinates()
        .find(|&(x, y)| {
            grid.can_force_place(&curse, x, y) && !blocked_by_curse(grid, &curse, x, y)
        })
    else {
        warn!(?shape, "no room for malediction");
        return 0;
    };

    let displaced: Vec<Item> = grid
        .blocking_items(&curse, x, y)
        .into_iter()
        .filter_map(|id| grid.remove(id))
        .collect();

    if let Err(err) = grid.force_place(&curse, x, y) {
        warn!(%err, "malediction rejected");
    }

    let mut discarded = 0;
    for item in &displaced {
        if grid.auto_add(item).is_none() {
            info!(item = %item.name(), "pushed out by malediction");
            discarded += 1;
        }
    }
    discarded
}

fn blocked_by_curse(grid: &GridInventory, curse: &Item, x: i32, y: i32) -> bool {
    grid.blocking_items(curse, x, y)
        .into_iter()
        .filter_map(|id| grid.item(id))
        .any(Item::is_malediction)
}

/// Spend every credit on the first frontier cell, returning cells unlocked
pub fn spend_unlocks(expansion: &mut ExpansionSystem, grid: &mut GridInventory) -> u32 {
    let mut unlocked = 0;
    while expansion.is_expansion_available() {
        let Some(&(x, y)) = expansion.frontier().iter().next() else {
            break;
        };
        if !expansion.unlock_cell(grid, x, y) {
            break;
        }
        unlocked += 1;
    }
    unlocked
}
