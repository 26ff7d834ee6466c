//! Plain-text views of the hero and the backpack

use backpack_core::prelude::*;

/// One glyph per cell: `#` locked, `.` empty, otherwise the item's initial
///
/// Curses render as `*`, gold as `$`.
pub fn render_backpack(grid: &GridInventory) -> String {
    let mut out = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            out.push(glyph(grid, x, y));
        }
        out.push('\n');
    }
    out
}

fn glyph(grid: &GridInventory, x: i32, y: i32) -> char {
    if !grid.is_unlocked(x, y) {
        return '#';
    }
    let Some(item) = grid.cell(x, y).and_then(|id| grid.item(id)) else {
        return '.';
    };
    match item.kind() {
        ItemKind::Malediction { .. } => '*',
        ItemKind::Gold { .. } => '$',
        _ => item
            .name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
    }
}

/// Item list with durability, one per line
pub fn render_items(grid: &GridInventory) -> String {
    grid.items()
        .map(|(id, item)| {
            let wear = match item.durability() {
                Some(left) => format!("{} use(s) left", left),
                None => "indestructible".to_string(),
            };
            match item.kind() {
                ItemKind::Gold { quantity } => format!("  {} {} x{}", id, item.name(), quantity),
                _ => format!("  {} {} [{}] ({})", id, item.name(), item.kind().label(), wear),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_hero(hero: &Hero) -> String {
    format!(
        "HP {}/{}  Stamina {}/{}  XP {}  Gold {}",
        hero.hp(),
        hero.max_hp(),
        hero.stamina(),
        hero.max_stamina(),
        hero.experience(),
        hero.gold()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_backpack_glyphs() {
        let mut grid = GridInventory::with_unlocked_rect(3, 2, 0, 0, 2, 2).unwrap();
        grid.place(&Item::weapon("sword", 3, 1, 2), 0, 0).unwrap();
        grid.place(&Item::gold(4), 1, 1).unwrap();
        assert_eq!(render_backpack(&grid), "S.#\n.$#\n");
    }

    #[test]
    fn test_render_items_lists_wear() {
        let mut grid = GridInventory::with_unlocked_rect(2, 1, 0, 0, 2, 1).unwrap();
        grid.place(&Item::weapon("Sword", 3, 1, 2), 0, 0).unwrap();
        grid.place(&Item::gold(4), 1, 0).unwrap();
        let text = render_items(&grid);
        assert!(text.contains("Sword"));
        assert!(text.contains("2 use(s) left"));
        assert!(text.contains("Gold x4"));
    }
}
