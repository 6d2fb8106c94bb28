//! Contact categories and participants
//!
//! Every body the player can touch carries a [`Category`]. Categories are
//! totally ordered; a contact is always handled with the lower category first
//! so each pairing has exactly one canonical form.

use super::state::{EntityId, PowerUpKind};

/// Role of a body for contact handling (declaration order is the sort order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Player,
    Window,
    SideBorder,
    GoodItem,
    BadItem,
    BottomBorder,
    PowerUp(PowerUpKind),
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Player,
        Category::Window,
        Category::SideBorder,
        Category::GoodItem,
        Category::BadItem,
        Category::BottomBorder,
        Category::PowerUp(PowerUpKind::DoubleScore),
        Category::PowerUp(PowerUpKind::Invincibility),
        Category::PowerUp(PowerUpKind::ExtraLife),
    ];

    /// Single-bit tag for this category; tags increase with the sort order
    pub fn tag(self) -> u32 {
        match self {
            Category::Player => 1,
            Category::Window => 1 << 1,
            Category::SideBorder => 1 << 2,
            Category::GoodItem => 1 << 3,
            Category::BadItem => 1 << 4,
            Category::BottomBorder => 1 << 5,
            Category::PowerUp(kind) => 1 << (6 + kind.index()),
        }
    }
}

/// One participant of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Body {
    pub category: Category,
    /// Spawned entity behind the body (borders and the player have none)
    pub entity: Option<EntityId>,
}

impl Body {
    pub fn player() -> Self {
        Self {
            category: Category::Player,
            entity: None,
        }
    }

    pub fn bottom_border() -> Self {
        Self {
            category: Category::BottomBorder,
            entity: None,
        }
    }

    pub fn side_border() -> Self {
        Self {
            category: Category::SideBorder,
            entity: None,
        }
    }

    pub fn window(id: EntityId) -> Self {
        Self {
            category: Category::Window,
            entity: Some(id),
        }
    }

    pub fn item(category: Category, id: EntityId) -> Self {
        Self {
            category,
            entity: Some(id),
        }
    }
}

/// Contact participants in canonical order (lower category first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub first: Body,
    pub second: Body,
}

impl ContactPair {
    pub fn ordered(a: Body, b: Body) -> Self {
        if a.category < b.category {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Combined category tags of both participants
    pub fn mask(&self) -> u32 {
        self.first.category.tag() | self.second.category.tag()
    }

    /// The non-player participant, if the player is part of this contact
    pub fn player_other(&self) -> Option<Body> {
        (self.first.category == Category::Player).then_some(self.second)
    }
}
