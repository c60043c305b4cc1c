//! Items a hunter can carry: shop supplies and buried treasure.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Item {
    Water,
    Rope,
    Machete,
    Horse,
    Boat,
    Bravery,
    Banana,
    Twig,
    Spoon,
}

impl Item {
    pub const ALL: &'static [Self] = &[
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Horse,
        Self::Boat,
        Self::Bravery,
        Self::Banana,
        Self::Twig,
        Self::Spoon,
    ];

    /// Items stocked by every shop, in catalog order.
    pub const SUPPLIES: &'static [Self] = &[
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Horse,
        Self::Boat,
        Self::Bravery,
    ];

    /// Treasures that can be dug up while hunting, in die-face order.
    pub const TREASURES: &'static [Self] = &[Self::Banana, Self::Twig, Self::Spoon];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Rope => "Rope",
            Self::Machete => "Machete",
            Self::Horse => "Horse",
            Self::Boat => "Boat",
            Self::Bravery => "Bravery",
            Self::Banana => "Banana",
            Self::Twig => "Twig",
            Self::Spoon => "Spoon",
        }
    }

    /// Case-insensitive lookup by display name. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|item| item.name().eq_ignore_ascii_case(needle))
    }

    #[must_use]
    pub const fn is_treasure(self) -> bool {
        matches!(self, Self::Banana | Self::Twig | Self::Spoon)
    }

    /// Amount added to the hunter's running treasure total when found.
    #[must_use]
    pub const fn treasure_code(self) -> Option<u32> {
        match self {
            Self::Banana => Some(1),
            Self::Twig => Some(2),
            Self::Spoon => Some(3),
            _ => None,
        }
    }

    /// What the treasure is good for, used in the "found" message.
    #[must_use]
    pub const fn tool_verb(self) -> Option<&'static str> {
        match self {
            Self::Banana => Some("eat"),
            Self::Twig => Some("beat"),
            Self::Spoon => Some("dig"),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
