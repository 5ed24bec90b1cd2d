//! Player module - cursor, locomotion and action state machine
//!
//! The player is either idle, walking a path, or executing an action. A walk
//! may carry a follow-up action that starts once the last step is taken.
//! Any new request discards whatever was in flight.
//!
//! Walking consumes one queued point each time the accumulated walk progress
//! reaches the passability cost of the next cell, so slow terrain takes
//! proportionally more ticks to cross.

use log::{debug, warn};

use crate::action::{ActionEffect, PlayerAction};
use crate::entity::Entity;
use crate::grid::Grid;
use crate::pathfind::{path_to_area, path_to_point, Path};
use crate::types::{ActionKind, Point, Terrain};

/// What the player is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Walking {
        path: Path,
        progress: u32,
        then: Option<PlayerAction>,
    },
    Acting(PlayerAction),
}

/// Outcome of one player tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Nothing,
    Stepped { from: Point, to: Point },
    ActionFinished(ActionKind),
    PathBlocked,
}

#[derive(Debug, Clone)]
pub struct Player {
    pos: Point,
    cursor: Point,
    activity: Activity,
    execution_time: u32,
    max_path_len: usize,
}

impl Player {
    pub fn new(pos: Point, execution_time: u32, max_path_len: usize) -> Self {
        Self {
            pos,
            cursor: pos,
            activity: Activity::Idle,
            execution_time,
            max_path_len,
        }
    }

    /// Gardener's grid position.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Cell targeted by the next request.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.activity, Activity::Idle)
    }

    pub fn active_path(&self) -> Option<&Path> {
        match &self.activity {
            Activity::Walking { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The action being executed or queued behind the current walk.
    pub fn pending_action(&self) -> Option<&PlayerAction> {
        match &self.activity {
            Activity::Walking { then, .. } => then.as_ref(),
            Activity::Acting(action) => Some(action),
            Activity::Idle => None,
        }
    }

    pub fn execution_time(&self) -> u32 {
        self.execution_time
    }

    /// Place the selection cursor, clamped to the grid.
    pub fn set_cursor(&mut self, grid: &mut Grid, cursor: Point) {
        let clamped = Point::new(
            cursor.x.clamp(0, grid.width() - 1),
            cursor.y.clamp(0, grid.height() - 1),
        );
        if clamped == self.cursor {
            return;
        }
        grid.set_selected(self.cursor, false);
        grid.set_selected(clamped, true);
        self.cursor = clamped;
    }

    pub fn move_cursor(&mut self, grid: &mut Grid, dx: i32, dy: i32) {
        let next = Point::new(self.cursor.x + dx, self.cursor.y + dy);
        self.set_cursor(grid, next);
    }

    /// Walk toward the cursor.
    ///
    /// Free passable cells are reached exactly; occupied or impassable ones
    /// (a plant, a house) are approached from a neighbouring cell.
    pub fn request_move(&mut self, grid: &mut Grid) -> bool {
        self.cancel(grid);
        let target = self.cursor;
        if target == self.pos {
            return true;
        }
        let path = if grid.passability(target) <= 0 {
            path_to_area(grid, self.pos, target)
        } else {
            path_to_point(grid, self.pos, target)
        };
        let Some(path) = self.accept_path(path, target) else {
            return false;
        };
        if !path.is_empty() {
            self.start_walk(grid, path, None);
        }
        true
    }

    /// Walk next to the cursor and then perform `effect` on it.
    pub fn request_action(&mut self, grid: &mut Grid, effect: ActionEffect) -> bool {
        self.cancel(grid);
        let target = self.cursor;
        let path = path_to_area(grid, self.pos, target);
        let Some(path) = self.accept_path(path, target) else {
            return false;
        };

        let action = PlayerAction::new(target, effect, self.execution_time);
        debug!(
            "{} queued for ({}, {}) after {} steps",
            action.kind().label(),
            target.x,
            target.y,
            path.len()
        );
        if path.is_empty() {
            self.activity = Activity::Acting(action);
        } else {
            self.start_walk(grid, path, Some(action));
        }
        true
    }

    fn accept_path(&self, path: Option<Path>, target: Point) -> Option<Path> {
        match path {
            None => {
                debug!("no path to ({}, {})", target.x, target.y);
                None
            }
            Some(path) if path.len() > self.max_path_len => {
                warn!(
                    "path to ({}, {}) has {} steps, over the {} step limit",
                    target.x,
                    target.y,
                    path.len(),
                    self.max_path_len
                );
                None
            }
            Some(path) => {
                debug!("path to ({}, {}) found: {} steps", target.x, target.y, path.len());
                Some(path)
            }
        }
    }

    fn start_walk(&mut self, grid: &mut Grid, path: Path, then: Option<PlayerAction>) {
        for &p in &path {
            grid.set_on_path(p, true);
        }
        self.activity = Activity::Walking {
            path,
            progress: 0,
            then,
        };
    }

    /// Drop any path or action in flight and clear path highlights.
    pub fn cancel(&mut self, grid: &mut Grid) {
        if let Activity::Walking { path, .. } = &self.activity {
            for &p in path {
                grid.set_on_path(p, false);
            }
        }
        self.activity = Activity::Idle;
    }

    /// Advance locomotion or the active action by one unit.
    pub fn tick(&mut self, grid: &mut Grid) -> PlayerEvent {
        match &mut self.activity {
            Activity::Idle => PlayerEvent::Nothing,
            Activity::Acting(action) => {
                if !action.execute(grid) {
                    return PlayerEvent::Nothing;
                }
                let kind = action.kind();
                self.activity = Activity::Idle;
                PlayerEvent::ActionFinished(kind)
            }
            Activity::Walking {
                path,
                progress,
                then,
            } => {
                let Some(&next) = path.front() else {
                    self.activity = then.take().map_or(Activity::Idle, Activity::Acting);
                    return PlayerEvent::Nothing;
                };

                let cost = grid.passability(next);
                if cost <= 0 {
                    debug!("path blocked at ({}, {})", next.x, next.y);
                    self.cancel(grid);
                    return PlayerEvent::PathBlocked;
                }

                *progress += 1;
                if *progress < cost as u32 {
                    return PlayerEvent::Nothing;
                }

                *progress = 0;
                path.pop_front();
                let finished = path.is_empty();
                let follow_up = if finished { then.take() } else { None };

                let from = self.pos;
                self.step(grid, next);
                if finished {
                    self.activity = follow_up.map_or(Activity::Idle, Activity::Acting);
                }
                PlayerEvent::Stepped { from, to: next }
            }
        }
    }

    fn step(&mut self, grid: &mut Grid, to: Point) {
        let from = self.pos;
        grid.take_entity(from);
        if !matches!(grid.terrain(from), Terrain::Water | Terrain::Bridge) {
            grid.set_terrain(from, Terrain::Path);
        }
        grid.set_on_path(from, false);

        grid.set_on_path(to, false);
        grid.set_entity(to, Entity::Gardener);
        self.pos = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::GrowingObject;
    use crate::types::{Species, EXECUTION_TIME};
    use rand::rngs::mock::StepRng;

    fn open_grid(w: i32, h: i32, start: Point) -> (Grid, Player) {
        let mut grid = Grid::new(w, h).unwrap();
        grid.set_entity(start, Entity::Gardener);
        let player = Player::new(start, EXECUTION_TIME, (w * h) as usize);
        (grid, player)
    }

    fn run_until_idle(grid: &mut Grid, player: &mut Player, limit: usize) -> usize {
        for i in 0..limit {
            if player.is_idle() {
                return i;
            }
            player.tick(grid);
        }
        panic!("player still busy after {} ticks", limit);
    }

    #[test]
    fn cursor_is_clamped_and_selection_follows() {
        let (mut grid, mut player) = open_grid(3, 3, Point::new(1, 1));
        player.move_cursor(&mut grid, -5, 0);
        assert_eq!(player.cursor(), Point::new(0, 1));
        assert!(grid.get(Point::new(0, 1)).selected);
        assert!(!grid.get(Point::new(1, 1)).selected);
    }

    #[test]
    fn walk_speed_follows_terrain_cost() {
        let (mut grid, mut player) = open_grid(3, 1, Point::new(0, 0));
        grid.set_terrain(Point::new(1, 0), Terrain::Grass);
        player.set_cursor(&mut grid, Point::new(1, 0));
        assert!(player.request_move(&mut grid));

        for _ in 0..7 {
            assert_eq!(player.tick(&mut grid), PlayerEvent::Nothing);
        }
        assert_eq!(
            player.tick(&mut grid),
            PlayerEvent::Stepped {
                from: Point::new(0, 0),
                to: Point::new(1, 0)
            }
        );
        assert!(player.is_idle());
        assert_eq!(player.pos(), Point::new(1, 0));
    }

    #[test]
    fn vacated_cells_become_path_except_water_and_bridge() {
        let (mut grid, mut player) = open_grid(4, 1, Point::new(0, 0));
        grid.set_terrain(Point::new(1, 0), Terrain::Bridge);
        grid.set_terrain(Point::new(2, 0), Terrain::Water);
        player.set_cursor(&mut grid, Point::new(3, 0));
        assert!(player.request_move(&mut grid));
        run_until_idle(&mut grid, &mut player, 100);

        assert_eq!(grid.terrain(Point::new(0, 0)), Terrain::Path);
        assert_eq!(grid.terrain(Point::new(1, 0)), Terrain::Bridge);
        assert_eq!(grid.terrain(Point::new(2, 0)), Terrain::Water);
        assert_eq!(grid.entity(Point::new(3, 0)), Some(&Entity::Gardener));
        assert!(grid.entity(Point::new(0, 0)).is_none());
        assert!(grid.points().all(|p| !grid.get(p).on_path));
    }

    #[test]
    fn move_onto_own_cell_stays_put() {
        let (mut grid, mut player) = open_grid(5, 5, Point::new(2, 2));
        assert_eq!(player.cursor(), player.pos());
        assert!(player.request_move(&mut grid));
        assert!(player.is_idle());

        for _ in 0..20 {
            assert_eq!(player.tick(&mut grid), PlayerEvent::Nothing);
        }
        assert_eq!(player.pos(), Point::new(2, 2));
        assert_eq!(grid.terrain(Point::new(2, 2)), Terrain::Ground);
        assert_eq!(grid.entity(Point::new(2, 2)), Some(&Entity::Gardener));
    }

    #[test]
    fn unreachable_move_leaves_player_idle() {
        let (mut grid, mut player) = open_grid(3, 3, Point::new(0, 0));
        grid.set_terrain(Point::new(1, 0), Terrain::Rock);
        grid.set_terrain(Point::new(0, 1), Terrain::Rock);
        player.set_cursor(&mut grid, Point::new(2, 2));
        assert!(!player.request_move(&mut grid));
        assert!(player.is_idle());
    }

    #[test]
    fn move_onto_a_house_stops_next_to_it() {
        let (mut grid, mut player) = open_grid(3, 1, Point::new(0, 0));
        grid.set_terrain(Point::new(2, 0), Terrain::House);
        player.set_cursor(&mut grid, Point::new(2, 0));
        assert!(player.request_move(&mut grid));
        run_until_idle(&mut grid, &mut player, 100);
        assert_eq!(player.pos(), Point::new(1, 0));
    }

    #[test]
    fn action_runs_after_approach_walk() {
        let (mut grid, mut player) = open_grid(4, 1, Point::new(0, 0));
        let mut rng = StepRng::new(0, 0);
        grid.set_entity(
            Point::new(3, 0),
            Entity::Plant(GrowingObject::new(Species::Vegetable, &mut rng)),
        );
        player.set_cursor(&mut grid, Point::new(3, 0));
        assert!(player.request_action(&mut grid, ActionEffect::Dig));
        assert_eq!(player.active_path().map(|p| p.len()), Some(2));
        assert_eq!(player.pending_action().map(PlayerAction::kind), Some(ActionKind::Dig));

        // Two Ground steps at cost 2 each.
        for _ in 0..4 {
            player.tick(&mut grid);
        }
        assert_eq!(player.pos(), Point::new(2, 0));
        assert!(matches!(player.activity(), Activity::Acting(_)));

        for _ in 0..EXECUTION_TIME - 1 {
            assert_eq!(player.tick(&mut grid), PlayerEvent::Nothing);
        }
        assert_eq!(player.tick(&mut grid), PlayerEvent::ActionFinished(ActionKind::Dig));
        assert!(grid.entity(Point::new(3, 0)).is_none());
        assert!(player.is_idle());
    }

    #[test]
    fn adjacent_action_starts_immediately() {
        let (mut grid, mut player) = open_grid(2, 1, Point::new(0, 0));
        player.set_cursor(&mut grid, Point::new(1, 0));
        assert!(player.request_action(&mut grid, ActionEffect::Build(Terrain::Soil)));
        assert!(matches!(player.activity(), Activity::Acting(_)));
        run_until_idle(&mut grid, &mut player, 20);
        assert_eq!(grid.terrain(Point::new(1, 0)), Terrain::Soil);
    }

    #[test]
    fn blocked_path_is_abandoned() {
        let (mut grid, mut player) = open_grid(3, 1, Point::new(0, 0));
        player.set_cursor(&mut grid, Point::new(2, 0));
        assert!(player.request_move(&mut grid));
        grid.set_terrain(Point::new(1, 0), Terrain::Rock);

        assert_eq!(player.tick(&mut grid), PlayerEvent::PathBlocked);
        assert!(player.is_idle());
        assert!(!grid.get(Point::new(2, 0)).on_path);
    }

    #[test]
    fn new_request_discards_the_old_one() {
        let (mut grid, mut player) = open_grid(5, 1, Point::new(2, 0));
        player.set_cursor(&mut grid, Point::new(4, 0));
        assert!(player.request_move(&mut grid));
        player.set_cursor(&mut grid, Point::new(0, 0));
        assert!(player.request_move(&mut grid));

        assert!(!grid.get(Point::new(4, 0)).on_path);
        assert_eq!(player.active_path().and_then(|p| p.back()), Some(&Point::new(0, 0)));
    }

    #[test]
    fn long_paths_over_the_limit_are_refused() {
        let mut grid = Grid::new(10, 1).unwrap();
        grid.set_entity(Point::new(0, 0), Entity::Gardener);
        let mut player = Player::new(Point::new(0, 0), EXECUTION_TIME, 3);
        player.set_cursor(&mut grid, Point::new(9, 0));
        assert!(!player.request_move(&mut grid));
        assert!(player.is_idle());
    }
}
