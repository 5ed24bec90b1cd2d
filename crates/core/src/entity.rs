//! Entities and the plant growth state machine
//!
//! A cell holds at most one entity: the gardener marker or a growing plant.
//! Plants move through `Planted -> Growing -> Ready`. Each stage draws its
//! duration once, when the stage is entered, from the species table; the
//! stage value itself is never mutated, a transition replaces it.

use log::trace;
use rand::Rng;

use crate::rng::randint;
use crate::types::{Color256, Species, GARDENER_COLOR, GARDENER_GLYPH};

/// Life-cycle stage of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthStage {
    Planted,
    Growing,
    Ready,
}

impl GrowthStage {
    pub fn next(&self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Planted => Some(GrowthStage::Growing),
            GrowthStage::Growing => Some(GrowthStage::Ready),
            GrowthStage::Ready => None,
        }
    }
}

/// Duration range (in ticks, inclusive) and glyph of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub glyph: char,
}

impl StageSpec {
    const fn new(min_ticks: u32, max_ticks: u32, glyph: char) -> Self {
        Self {
            min_ticks,
            max_ticks,
            glyph,
        }
    }
}

/// Per-species growth configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesSpec {
    pub planted: StageSpec,
    pub growing: StageSpec,
    pub ready: StageSpec,
}

const VEGETABLE: SpeciesSpec = SpeciesSpec {
    planted: StageSpec::new(50, 100, 'c'),
    growing: StageSpec::new(50, 100, 'c'),
    ready: StageSpec::new(50, 100, 'C'),
};

const FLOWER: SpeciesSpec = SpeciesSpec {
    planted: StageSpec::new(50, 100, 'f'),
    growing: StageSpec::new(50, 100, 'f'),
    ready: StageSpec::new(50, 100, 'F'),
};

const TREE: SpeciesSpec = SpeciesSpec {
    planted: StageSpec::new(50, 300, 'i'),
    growing: StageSpec::new(1000, 5000, 't'),
    ready: StageSpec::new(50, 100, 'T'),
};

/// Growth table for a species.
pub fn species_spec(species: Species) -> &'static SpeciesSpec {
    match species {
        Species::Vegetable => &VEGETABLE,
        Species::Flower => &FLOWER,
        Species::Tree => &TREE,
    }
}

impl SpeciesSpec {
    pub fn stage(&self, stage: GrowthStage) -> &StageSpec {
        match stage {
            GrowthStage::Planted => &self.planted,
            GrowthStage::Growing => &self.growing,
            GrowthStage::Ready => &self.ready,
        }
    }
}

/// An immutable stage instance with its rolled duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthState {
    stage: GrowthStage,
    duration: u32,
    glyph: char,
}

impl GrowthState {
    /// Roll a fresh state for `stage` of `species`.
    pub fn new<R: Rng + ?Sized>(species: Species, stage: GrowthStage, rng: &mut R) -> Self {
        let spec = species_spec(species).stage(stage);
        let duration = randint(rng, spec.min_ticks as i32, spec.max_ticks as i32) as u32;
        Self {
            stage,
            duration,
            glyph: spec.glyph,
        }
    }

    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    /// Ticks needed before this stage hands over to the next one.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

/// A plant occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowingObject {
    species: Species,
    state: GrowthState,
    grow_iteration: u32,
}

impl GrowingObject {
    /// A freshly planted object.
    pub fn new<R: Rng + ?Sized>(species: Species, rng: &mut R) -> Self {
        Self::with_state(species, GrowthState::new(species, GrowthStage::Planted, rng))
    }

    pub fn with_state(species: Species, state: GrowthState) -> Self {
        Self {
            species,
            state,
            grow_iteration: 0,
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn state(&self) -> &GrowthState {
        &self.state
    }

    pub fn stage(&self) -> GrowthStage {
        self.state.stage
    }

    /// Ticks spent in the current stage.
    pub fn grow_iteration(&self) -> u32 {
        self.grow_iteration
    }

    pub fn glyph(&self) -> char {
        self.state.glyph
    }

    pub fn color(&self) -> Color256 {
        self.species.color()
    }

    /// Advance one tick. Returns `true` when the stage (and glyph) changed.
    ///
    /// Ready is terminal: ticking it is a no-op.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(next) = self.state.stage.next() else {
            return false;
        };

        self.grow_iteration += 1;
        if self.grow_iteration < self.state.duration {
            return false;
        }

        self.set_state(GrowthState::new(self.species, next, rng));
        trace!("{:?} entered {:?}", self.species, next);
        true
    }

    fn set_state(&mut self, state: GrowthState) {
        self.state = state;
        self.grow_iteration = 0;
    }
}

/// Exclusive occupant of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Gardener,
    Plant(GrowingObject),
}

impl Entity {
    pub fn glyph(&self) -> char {
        match self {
            Entity::Gardener => GARDENER_GLYPH,
            Entity::Plant(obj) => obj.glyph(),
        }
    }

    pub fn color(&self) -> Color256 {
        match self {
            Entity::Gardener => GARDENER_COLOR,
            Entity::Plant(obj) => obj.color(),
        }
    }

    pub fn is_gardener(&self) -> bool {
        matches!(self, Entity::Gardener)
    }

    pub fn as_plant(&self) -> Option<&GrowingObject> {
        match self {
            Entity::Plant(obj) => Some(obj),
            Entity::Gardener => None,
        }
    }

    /// Advance one tick; the gardener has no state of its own.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        match self {
            Entity::Gardener => false,
            Entity::Plant(obj) => obj.update(rng),
        }
    }
}
