//! ItemKind - The closed set of item variants and their shape masks

use serde::{Deserialize, Serialize};

/// What an item is, together with the stats that only that kind carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Weapon { attack: u32, stamina_cost: u32 },
    Shield { defend: u32, stamina_cost: u32 },
    Healing { heal: u32 },
    Ration { stamina_regen: u32 },
    /// Stackable currency, merged by name
    Gold { quantity: u32 },
    /// Curse forced into the backpack by an enemy
    Malediction { shape: MaledictionShape },
}

impl ItemKind {
    /// Short lowercase label, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Shield { .. } => "shield",
            ItemKind::Healing { .. } => "healing",
            ItemKind::Ration { .. } => "ration",
            ItemKind::Gold { .. } => "gold",
            ItemKind::Malediction { .. } => "malediction",
        }
    }
}

/// The two canonical curse footprints
///
/// ```text
/// Square    Serpent
/// XX        XX..
/// XX        .XXX
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaledictionShape {
    Square,
    Serpent,
}

const SQUARE_MASK: [[bool; 2]; 2] = [[true, true], [true, true]];
const SERPENT_MASK: [[bool; 4]; 2] = [[true, true, false, false], [false, true, true, true]];

impl MaledictionShape {
    /// Get all shapes
    pub fn all() -> &'static [MaledictionShape] {
        &[MaledictionShape::Square, MaledictionShape::Serpent]
    }

    /// Bounding box as (width, height)
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            MaledictionShape::Square => (2, 2),
            MaledictionShape::Serpent => (4, 2),
        }
    }

    /// Whether the mask covers local offset (dx, dy)
    pub fn covers(self, dx: i32, dy: i32) -> bool {
        let (w, h) = self.dimensions();
        if dx < 0 || dy < 0 || dx >= w as i32 || dy >= h as i32 {
            return false;
        }
        let (x, y) = (dx as usize, dy as usize);
        match self {
            MaledictionShape::Square => SQUARE_MASK[y][x],
            MaledictionShape::Serpent => SERPENT_MASK[y][x],
        }
    }

    /// Number of cells the shape covers
    pub fn cell_count(self) -> usize {
        let (w, h) = self.dimensions();
        (0..h as i32)
            .flat_map(|dy| (0..w as i32).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| self.covers(dx, dy))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_is_solid() {
        assert_eq!(MaledictionShape::Square.cell_count(), 4);
        assert!(MaledictionShape::Square.covers(1, 1));
        assert!(!MaledictionShape::Square.covers(2, 0));
    }

    #[test]
    fn test_serpent_footprint() {
        let s = MaledictionShape::Serpent;
        assert_eq!(s.cell_count(), 5);
        assert!(s.covers(0, 0));
        assert!(s.covers(1, 0));
        assert!(!s.covers(2, 0));
        assert!(!s.covers(0, 1));
        assert!(s.covers(3, 1));
        assert!(!s.covers(-1, 0));
    }

    #[test]
    fn test_kind_serde_tag() {
        let json = r#"{"kind":"weapon","attack":5,"stamina_cost":1}"#;
        let kind: ItemKind = serde_json::from_str(json).unwrap();
        assert_eq!(kind, ItemKind::Weapon { attack: 5, stamina_cost: 1 });
        assert_eq!(kind.label(), "weapon");
    }
}
