//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the garden.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation, the terminal view, and the input layer alike.
//!
//! # Terrain
//!
//! Each terrain kind carries a fixed passability cost. Lower is faster to
//! cross; a cost of zero or below can never be entered.
//!
//! | Terrain | Glyph | Cost | Actions |
//! |---------|-------|------|---------|
//! | Ground | `.` | 2 | Move, Place, Build |
//! | Soil | `#` | 4 | Move, Place, Build |
//! | Grass | `"` | 8 | Move, Place, Build |
//! | Path | `:` | 1 | Move, Place, Build |
//! | Bridge | `=` | 1 | Move |
//! | Water | `~` | 16 | Move, Build |
//! | Rock | `^` | -1 | - |
//! | House | `H` | -1 | Move |
//!
//! # Timing
//!
//! The simulation is tick driven. One tick moves walk progress forward by one,
//! advances the active action by one, and ages every plant by one.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Fixed timestep interval |
//! | `EXECUTION_TIME` | 10 | Ticks to finish dig/place/build |
//!
//! # Examples
//!
//! ```
//! use my_garden_types::{ActionKind, Point, Terrain};
//!
//! let p = Point::new(2, 3) + Point::new(1, -1);
//! assert_eq!(p, Point::new(3, 2));
//! assert_eq!(p.manhattan(Point::new(0, 0)), 5);
//!
//! assert_eq!(Terrain::Ground.passability(), 2);
//! assert!(!Terrain::Rock.is_passable());
//! assert_eq!(Terrain::Water.available_actions(), &[ActionKind::Move, ActionKind::Build]);
//! ```

use std::ops::Add;

/// Fixed timestep interval in milliseconds.
pub const TICK_MS: u32 = 100;

/// Ticks a dig/place/build action needs before it fires.
pub const EXECUTION_TIME: u32 = 10;

/// Largest accepted grid side (terminal coordinates are `u16`).
pub const MAX_GRID_SIDE: i32 = 4096;

/// Passability coefficients per terrain kind.
pub mod passability {
    pub const GROUND: i32 = 2;
    pub const SOIL: i32 = 4;
    pub const GRASS: i32 = 8;
    pub const PATH: i32 = 1;
    pub const WATER: i32 = 16;
    pub const ROCK: i32 = -1;
    pub const BRIDGE: i32 = 1;
    pub const HOUSE: i32 = -1;
}

/// The four cardinal steps, in the order the search and generators expand them.
pub const CARDINALS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
];

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (4-neighbourhood) distance.
    pub fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev (8-neighbourhood) distance.
    pub fn chebyshev(self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// xterm-256 colour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color256(pub u8);

impl Color256 {
    pub const RED: Color256 = Color256(196);
    pub const YELLOW: Color256 = Color256(226);
    pub const BLUE: Color256 = Color256(21);
    pub const WHITE: Color256 = Color256(231);
    pub const BLACK: Color256 = Color256(0);
    pub const GRAY20: Color256 = Color256(235);
    pub const GRAY50: Color256 = Color256(240);
    pub const GRAY80: Color256 = Color256(248);
    pub const DARK_GREEN: Color256 = Color256(22);
    pub const GRAY_BROWN: Color256 = Color256(101);
    pub const LIGHT_BROWN: Color256 = Color256(136);
    pub const ORANGE_BROWN: Color256 = Color256(130);
    pub const PURPLE: Color256 = Color256(92);
    pub const ROCK_GRAY: Color256 = Color256(242);
    pub const TREE_GREEN: Color256 = Color256(28);
}

/// Actions a player can pick for a targeted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move,
    Dig,
    Place,
    Build,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::Dig => "Dig",
            ActionKind::Place => "Place",
            ActionKind::Build => "Build",
        }
    }
}

const LAND_ACTIONS: [ActionKind; 3] = [ActionKind::Move, ActionKind::Place, ActionKind::Build];
const WATER_ACTIONS: [ActionKind; 2] = [ActionKind::Move, ActionKind::Build];
const MOVE_ONLY: [ActionKind; 1] = [ActionKind::Move];

/// Actions offered when the targeted cell holds a growing object.
pub const OCCUPIED_ACTIONS: [ActionKind; 2] = [ActionKind::Move, ActionKind::Dig];

/// Terrain occupying every grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Ground,
    Soil,
    Grass,
    Path,
    Bridge,
    Water,
    Rock,
    House,
}

impl Terrain {
    pub fn passability(&self) -> i32 {
        match self {
            Terrain::Ground => passability::GROUND,
            Terrain::Soil => passability::SOIL,
            Terrain::Grass => passability::GRASS,
            Terrain::Path => passability::PATH,
            Terrain::Bridge => passability::BRIDGE,
            Terrain::Water => passability::WATER,
            Terrain::Rock => passability::ROCK,
            Terrain::House => passability::HOUSE,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.passability() > 0
    }

    pub fn glyph(&self) -> char {
        match self {
            Terrain::Ground => '.',
            Terrain::Soil => '#',
            Terrain::Grass => '"',
            Terrain::Path => ':',
            Terrain::Bridge => '=',
            Terrain::Water => '~',
            Terrain::Rock => '^',
            Terrain::House => 'H',
        }
    }

    pub fn color(&self) -> Color256 {
        match self {
            Terrain::Ground => Color256::GRAY_BROWN,
            Terrain::Soil => Color256::LIGHT_BROWN,
            Terrain::Grass => Color256::DARK_GREEN,
            Terrain::Path => Color256::ORANGE_BROWN,
            Terrain::Bridge => Color256::ORANGE_BROWN,
            Terrain::Water => Color256::BLUE,
            Terrain::Rock => Color256::ROCK_GRAY,
            Terrain::House => Color256::ORANGE_BROWN,
        }
    }

    /// Actions offered when this terrain is targeted and no entity sits on it.
    pub fn available_actions(&self) -> &'static [ActionKind] {
        match self {
            Terrain::Ground | Terrain::Soil | Terrain::Grass | Terrain::Path => &LAND_ACTIONS,
            Terrain::Water => &WATER_ACTIONS,
            Terrain::Bridge | Terrain::House => &MOVE_ONLY,
            Terrain::Rock => &[],
        }
    }

    /// Terrain kinds that may be built on top of this one.
    pub fn build_options(&self) -> &'static [Terrain] {
        match self {
            Terrain::Water => &[Terrain::Bridge],
            Terrain::Ground | Terrain::Soil | Terrain::Grass | Terrain::Path => {
                &[Terrain::Soil, Terrain::Path, Terrain::House]
            }
            Terrain::Bridge | Terrain::Rock | Terrain::House => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Terrain::Ground => "Ground",
            Terrain::Soil => "Soil",
            Terrain::Grass => "Grass",
            Terrain::Path => "Path",
            Terrain::Bridge => "Bridge",
            Terrain::Water => "Water",
            Terrain::Rock => "Rock",
            Terrain::House => "House",
        }
    }
}

/// Plant species that can grow on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Vegetable,
    Flower,
    Tree,
}

impl Species {
    /// Species offered by the Place menu, in display order.
    pub const ALL: [Species; 3] = [Species::Vegetable, Species::Flower, Species::Tree];

    pub fn color(&self) -> Color256 {
        match self {
            Species::Vegetable => Color256::RED,
            Species::Flower => Color256::PURPLE,
            Species::Tree => Color256::TREE_GREEN,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::Vegetable => "Vegetable",
            Species::Flower => "Flower",
            Species::Tree => "Tree",
        }
    }
}

/// Glyph drawn for the gardener.
pub const GARDENER_GLYPH: char = '@';

/// Colour drawn for the gardener.
pub const GARDENER_COLOR: Color256 = Color256::YELLOW;

/// Background used for cells on the active path.
pub const PATH_HIGHLIGHT: Color256 = Color256::GRAY80;

/// High-level inputs accepted by the game state.
///
/// Produced by the key mapping layer; consumed by `GardenState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GardenAction {
    /// Move the selection cursor one cell left
    CursorLeft,
    /// Move the selection cursor one cell right
    CursorRight,
    /// Move the selection cursor one cell up
    CursorUp,
    /// Move the selection cursor one cell down
    CursorDown,
    /// Walk to the cursor
    FollowCursor,
    /// Open the action menu for the cursor cell
    OpenMenu,
    /// Highlight the previous menu entry
    MenuUp,
    /// Highlight the next menu entry
    MenuDown,
    /// Confirm the highlighted menu entry
    MenuConfirm,
    /// Close the menu without choosing
    MenuCancel,
}
