//! Timed player actions
//!
//! An action targets one cell, counts elapsed ticks, and applies its mutation
//! exactly once when the count reaches its execution time. Ticking a finished
//! action does nothing.

use log::debug;

use crate::entity::{Entity, GrowingObject};
use crate::grid::Grid;
use crate::types::{ActionKind, Point, Terrain};

/// Mutation applied when an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Remove the plant on the target cell.
    Dig,
    /// Install a new plant on the target cell.
    Place(GrowingObject),
    /// Replace the target cell's terrain.
    Build(Terrain),
}

impl ActionEffect {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionEffect::Dig => ActionKind::Dig,
            ActionEffect::Place(_) => ActionKind::Place,
            ActionEffect::Build(_) => ActionKind::Build,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAction {
    target: Point,
    effect: ActionEffect,
    execution_time: u32,
    elapsed: u32,
    executed: bool,
}

impl PlayerAction {
    pub fn new(target: Point, effect: ActionEffect, execution_time: u32) -> Self {
        Self {
            target,
            effect,
            execution_time,
            elapsed: 0,
            executed: false,
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn effect(&self) -> &ActionEffect {
        &self.effect
    }

    pub fn kind(&self) -> ActionKind {
        self.effect.kind()
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn execution_time(&self) -> u32 {
        self.execution_time
    }

    pub fn executed(&self) -> bool {
        self.executed
    }

    /// Advance one tick. Returns `true` on the tick the mutation fires.
    pub fn execute(&mut self, grid: &mut Grid) -> bool {
        if self.executed {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed < self.execution_time {
            return false;
        }

        self.finish(grid);
        self.executed = true;
        debug!(
            "{} finished at ({}, {})",
            self.kind().label(),
            self.target.x,
            self.target.y
        );
        true
    }

    fn finish(&self, grid: &mut Grid) {
        let target = self.target;
        // The gardener's own cell is never overwritten or dug out.
        if grid.entity(target).is_some_and(Entity::is_gardener) {
            return;
        }
        match self.effect {
            ActionEffect::Dig => {
                grid.take_entity(target);
            }
            ActionEffect::Place(obj) => {
                grid.set_entity(target, Entity::Plant(obj));
            }
            ActionEffect::Build(terrain) => grid.set_terrain(target, terrain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Species, EXECUTION_TIME};
    use rand::rngs::mock::StepRng;

    fn planted_grid() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut rng = StepRng::new(0, 0);
        grid.set_entity(
            Point::new(1, 1),
            Entity::Plant(GrowingObject::new(Species::Vegetable, &mut rng)),
        );
        grid
    }

    #[test]
    fn dig_fires_on_the_last_tick_only() {
        let mut grid = planted_grid();
        let mut dig = PlayerAction::new(Point::new(1, 1), ActionEffect::Dig, EXECUTION_TIME);

        for _ in 0..EXECUTION_TIME - 1 {
            assert!(!dig.execute(&mut grid));
        }
        assert!(!dig.executed());
        assert!(grid.entity(Point::new(1, 1)).is_some());

        assert!(dig.execute(&mut grid));
        assert!(dig.executed());
        assert!(grid.entity(Point::new(1, 1)).is_none());
    }

    #[test]
    fn finished_action_is_idempotent() {
        let mut grid = planted_grid();
        let mut dig = PlayerAction::new(Point::new(1, 1), ActionEffect::Dig, 1);
        assert!(dig.execute(&mut grid));

        // Re-plant; a second firing would remove it again.
        let mut rng = StepRng::new(0, 0);
        grid.set_entity(
            Point::new(1, 1),
            Entity::Plant(GrowingObject::new(Species::Flower, &mut rng)),
        );
        for _ in 0..20 {
            assert!(!dig.execute(&mut grid));
        }
        assert!(grid.entity(Point::new(1, 1)).is_some());
        assert_eq!(dig.elapsed(), 1);
    }

    #[test]
    fn place_and_build_mutate_target() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut rng = StepRng::new(0, 0);
        let tree = GrowingObject::new(Species::Tree, &mut rng);

        let mut place = PlayerAction::new(Point::new(0, 0), ActionEffect::Place(tree), 2);
        place.execute(&mut grid);
        place.execute(&mut grid);
        assert_eq!(grid.entity(Point::new(0, 0)), Some(&Entity::Plant(tree)));

        let mut build = PlayerAction::new(Point::new(1, 0), ActionEffect::Build(Terrain::House), 1);
        build.execute(&mut grid);
        assert_eq!(grid.terrain(Point::new(1, 0)), Terrain::House);
        assert_eq!(build.kind(), ActionKind::Build);
    }

    #[test]
    fn gardener_cell_is_left_alone() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set_entity(Point::new(0, 0), Entity::Gardener);
        let mut dig = PlayerAction::new(Point::new(0, 0), ActionEffect::Dig, 1);
        assert!(dig.execute(&mut grid));
        assert_eq!(grid.entity(Point::new(0, 0)), Some(&Entity::Gardener));
    }
}
