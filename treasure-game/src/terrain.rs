//! Terrain surrounding a town and the supply needed to cross it.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Mountains,
    Ocean,
    Plains,
    Desert,
    Jungle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    kind: TerrainKind,
    required_item: Item,
}

/// Every terrain a town can be built in, each equally likely.
pub const TERRAINS: [Terrain; 5] = [
    Terrain::new(TerrainKind::Mountains, Item::Rope),
    Terrain::new(TerrainKind::Ocean, Item::Boat),
    Terrain::new(TerrainKind::Plains, Item::Horse),
    Terrain::new(TerrainKind::Desert, Item::Water),
    Terrain::new(TerrainKind::Jungle, Item::Machete),
];

impl TerrainKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Jungle => "Jungle",
        }
    }
}

impl Terrain {
    const fn new(kind: TerrainKind, required_item: Item) -> Self {
        Self {
            kind,
            required_item,
        }
    }

    /// Pick one of the [`TERRAINS`] uniformly.
    pub fn roll(rng: &mut impl Rng) -> Self {
        TERRAINS[rng.gen_range(0..TERRAINS.len())]
    }

    /// The terrain of the given kind from the fixed table.
    #[must_use]
    pub fn of_kind(kind: TerrainKind) -> Self {
        TERRAINS
            .iter()
            .copied()
            .find(|terrain| terrain.kind == kind)
            .unwrap_or(TERRAINS[0])
    }

    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub const fn required_item(&self) -> Item {
        self.required_item
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn every_terrain_requires_a_shop_supply() {
        for terrain in TERRAINS {
            assert!(Item::SUPPLIES.contains(&terrain.required_item()));
        }
    }

    #[test]
    fn lookup_by_kind_matches_table() {
        assert_eq!(Terrain::of_kind(TerrainKind::Ocean).required_item(), Item::Boat);
        assert_eq!(Terrain::of_kind(TerrainKind::Desert).required_item(), Item::Water);
    }

    #[test]
    fn rolls_reach_every_terrain() {
        let mut rng = SmallRng::seed_from_u64(0x7EA5);
        let seen: HashSet<TerrainKind> = (0..500).map(|_| Terrain::roll(&mut rng).kind()).collect();
        assert_eq!(seen.len(), TERRAINS.len());
    }
}
