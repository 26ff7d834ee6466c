//! Integration test: Backpack layout -> Battle -> Expansion
//!
//! Drives the core the way a controller would: arrange the backpack, fight an
//! encounter, insert curses, and spend unlock credits.

use backpack_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_battle(constants: GameConstants) -> Battle<StdRng> {
    Battle::new(StdRng::seed_from_u64(42), constants).expect("valid constants")
}

fn open_hero(width: usize, height: usize) -> Hero {
    let grid = GridInventory::with_unlocked_rect(width, height, 0, 0, width as i32, height as i32)
        .expect("valid grid");
    Hero::new(40, 3, grid).expect("valid hero")
}

#[test]
fn test_two_attacks_defeat_skeleton() {
    let mut hero = open_hero(4, 4);
    let sword = hero
        .inventory_mut()
        .place(&Item::weapon("Broadsword", 10, 1, 5), 0, 0)
        .unwrap();

    let mut battle = seeded_battle(GameConstants::default());
    battle.init_with_enemies(&mut hero, vec![Enemy::new(EnemyKind::Skeleton, 15, 4)]);
    assert!(battle.is_running(&hero));

    let first = battle.use_item(&mut hero, sword).unwrap();
    assert_eq!(first.damage, 10);
    assert!(!first.enemy_defeated);
    assert_eq!(battle.enemies()[0].hp, 5);
    assert!(battle.enemies()[0].is_alive());
    assert_eq!(battle.defeated_count(), 0);

    let second = battle.use_item(&mut hero, sword).unwrap();
    assert!(second.enemy_defeated);
    assert!(battle.enemies().is_empty());
    assert_eq!(battle.defeated_count(), 1);
    assert!(!battle.is_running(&hero));
    assert_eq!(battle.outcome(), Some(BattleOutcome::Won));

    assert_eq!(hero.inventory().item(sword).unwrap().durability(), Some(3));
    assert_eq!(hero.stamina(), 1);
    assert_eq!(hero.hp(), 40);
}

#[test]
fn test_attacks_hit_front_enemy_only() {
    let mut hero = open_hero(4, 4);
    let sword = hero
        .inventory_mut()
        .place(&Item::weapon("Broadsword", 20, 1, 5), 0, 0)
        .unwrap();

    let mut battle = seeded_battle(GameConstants::default());
    battle.init_with_enemies(
        &mut hero,
        vec![
            Enemy::new(EnemyKind::Skeleton, 15, 4),
            Enemy::new(EnemyKind::Brute, 30, 7),
        ],
    );
    let brute_intent = battle.announced_actions()[1];

    battle.use_item(&mut hero, sword).unwrap();
    assert_eq!(battle.enemies().len(), 1);
    assert_eq!(battle.enemies()[0].kind, EnemyKind::Brute);
    assert_eq!(battle.enemies()[0].hp, 30);
    assert_eq!(battle.announced_actions(), &[brute_intent]);
    assert!(battle.is_running(&hero));
}

#[test]
fn test_weapon_breaks_and_leaves_backpack() {
    let mut hero = open_hero(3, 3);
    let knife = hero
        .inventory_mut()
        .place(&Item::weapon("Knife", 2, 1, 1).with_size(1, 2).unwrap(), 1, 0)
        .unwrap();

    let mut battle = seeded_battle(GameConstants::default());
    battle.init_with_enemies(&mut hero, vec![Enemy::new(EnemyKind::Brute, 30, 7)]);

    let used = battle.use_item(&mut hero, knife).unwrap();
    assert!(used.item_broken);
    assert!(!hero.inventory().contains(knife));
    assert!(hero.inventory().cell(1, 0).is_none());
    assert!(hero.inventory().cell(1, 1).is_none());
    assert!(matches!(
        battle.use_item(&mut hero, knife),
        Err(BackpackError::ItemNotFound(_))
    ));
}

#[test]
fn test_adjacent_healing_grants_life_bonus() {
    let mut hero = open_hero(4, 4);
    let sword = hero
        .inventory_mut()
        .place(&Item::weapon("Sword", 4, 1, 5).with_size(1, 2).unwrap(), 0, 0)
        .unwrap();

    let mut constants = GameConstants::default();
    constants.intents.attack = 100;
    constants.intents.defend = 0;
    constants.intents.malediction = 0;
    let mut battle = seeded_battle(constants);
    battle.init_with_enemies(&mut hero, vec![Enemy::new(EnemyKind::Brute, 30, 7)]);
    battle.end_player_turn(&mut hero).unwrap();
    battle.begin_player_turn().unwrap();
    assert_eq!(hero.hp(), 33);

    let plain = battle.use_item(&mut hero, sword).unwrap();
    assert_eq!(plain.life_bonus, 0);
    assert_eq!(hero.hp(), 33);

    hero.inventory_mut().place(&Item::healing("Herb", 3), 1, 2).unwrap();
    let boosted = battle.use_item(&mut hero, sword).unwrap();
    assert_eq!(boosted.life_bonus, 1);
    assert_eq!(hero.hp(), 34);
}

#[test]
fn test_anti_tank_hammer_rewards_no_protection() {
    let mut hero = open_hero(4, 4);
    let items = default_items();
    let hammer = items["anti_tank_hammer"].build().unwrap();
    let buckler = items["buckler"].build().unwrap();
    let hammer = hero.inventory_mut().auto_add(&hammer).unwrap();
    let buckler = hero.inventory_mut().auto_add(&buckler).unwrap();

    let mut battle = seeded_battle(GameConstants::default());
    battle.init_with_enemies(&mut hero, vec![Enemy::new(EnemyKind::Brute, 60, 7)]);

    battle.use_item(&mut hero, buckler).unwrap();
    let chip = battle.use_item(&mut hero, hammer).unwrap();
    assert_eq!(chip.damage, 1);
    assert_eq!(battle.enemies()[0].hp, 59);
}

#[test]
fn test_malediction_insertion_by_controller() {
    let mut hero = open_hero(3, 3);
    let herb = hero.inventory_mut().place(&Item::healing("Herb", 2), 0, 0).unwrap();
    let bread = hero.inventory_mut().place(&Item::ration("Bread", 1), 2, 2).unwrap();

    let mut constants = GameConstants::default();
    constants.intents.attack = 0;
    constants.intents.defend = 0;
    constants.intents.malediction = 1;
    let mut battle = seeded_battle(constants);
    battle.init_with_enemies(&mut hero, vec![Enemy::new(EnemyKind::Skeleton, 15, 4)]);
    assert_eq!(battle.announced_actions(), &[EnemyAction::Malediction]);

    let report = battle.end_player_turn(&mut hero).unwrap();
    assert_eq!(report.maledictions, 1);
    assert_eq!(battle.take_pending_maledictions(), 1);

    // Controller resolves the blockers, forces the curse in, re-adds the rest
    let curse = Item::malediction(MaledictionShape::Square);
    let grid = hero.inventory_mut();
    assert!(grid.can_force_place(&curse, 0, 0));
    let blockers = grid.blocking_items(&curse, 0, 0);
    assert_eq!(blockers.iter().copied().collect::<Vec<_>>(), vec![herb]);

    let displaced: Vec<Item> = blockers.into_iter().filter_map(|id| grid.remove(id)).collect();
    let curse_id = grid.force_place(&curse, 0, 0).unwrap();
    for item in &displaced {
        assert!(grid.auto_add(item).is_some());
    }

    assert_eq!(grid.cells_of(curse_id), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert!(grid.contains(bread));
    assert_eq!(grid.item_count(), 3);

    battle.begin_player_turn().unwrap();
    assert!(battle.is_player_turn());
}

#[test]
fn test_gold_stack_flow() {
    let mut hero = open_hero(3, 3);
    let grid = hero.inventory_mut();
    grid.auto_add(&Item::gold(10)).unwrap();

    grid.add_quantity(GOLD_NAME, 5).unwrap();
    assert_eq!(grid.get_quantity(GOLD_NAME), 15);

    let before = grid.clone();
    assert!(matches!(
        grid.remove_quantity(GOLD_NAME, 16),
        Err(BackpackError::InsufficientResource { .. })
    ));
    assert_eq!(*grid, before);
    assert_eq!(hero.gold(), 15);
}

#[test]
fn test_expansion_spends_single_credit() {
    let mut grid = GridInventory::with_unlocked_rect(5, 7, 1, 2, 3, 3).unwrap();
    let mut expansion = ExpansionSystem::new(&grid);
    expansion.add_pending_unlocks(1, &grid);

    let frontier: Vec<Cell> = expansion.frontier().iter().copied().collect();
    let (first, second) = (frontier[0], frontier[frontier.len() - 1]);

    assert!(expansion.unlock_cell(&mut grid, first.0, first.1));
    assert!(!expansion.unlock_cell(&mut grid, second.0, second.1));
    assert_eq!(expansion.pending_unlocks(), 0);
    assert!(!grid.is_unlocked(second.0, second.1));
    assert_eq!(grid.unlocked_count(), 10);
}

#[test]
fn test_seeded_encounter_runs_to_completion() {
    let constants = GameConstants::bundled();
    let mut hero = Hero::from_constants(&constants).unwrap();
    let items = default_items();
    let sword = hero
        .inventory_mut()
        .auto_add(&items["short_sword"].build().unwrap().with_durability(None))
        .unwrap();

    let mut battle = seeded_battle(constants);
    battle.init_enemies(&mut hero);

    let mut turns = 0;
    while battle.is_running(&hero) && turns < 200 {
        while battle.is_player_turn() && hero.has_stamina(1) {
            battle.use_item(&mut hero, sword).unwrap();
        }
        if battle.is_player_turn() {
            battle.end_player_turn(&mut hero).unwrap();
        }
        battle.take_pending_maledictions();
        if battle.is_running(&hero) {
            battle.begin_player_turn().unwrap();
        }
        turns += 1;
    }

    assert!(!battle.is_running(&hero));
    assert!(battle.outcome().is_some());
    assert!(battle.phase().is_terminal());
}
