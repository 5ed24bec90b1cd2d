//! Grid module - the garden map
//!
//! A fixed `width x height` array of cells in row-major order. Every cell
//! always has a terrain value and at most one entity. Mutations mark the cell
//! dirty so the renderer only repaints what changed.
//!
//! Coordinates are internally derived from the grid's own bounds, so indexing
//! outside the grid is a programming error and panics.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::entity::Entity;
use crate::error::{GardenError, GardenResult};
use crate::types::{
    ActionKind, Color256, Point, Terrain, CARDINALS, MAX_GRID_SIDE, OCCUPIED_ACTIONS,
    PATH_HIGHLIGHT,
};

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub entity: Option<Entity>,
    /// Cursor is on this cell (render-only).
    pub selected: bool,
    /// Cell belongs to the active path (render-only).
    pub on_path: bool,
}

impl Cell {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            entity: None,
            selected: false,
            on_path: false,
        }
    }

    /// Routing cost of entering this cell; any entity blocks it.
    pub fn passability(&self) -> i32 {
        if self.entity.is_some() {
            return -1;
        }
        self.terrain.passability()
    }

    pub fn glyph(&self) -> char {
        match &self.entity {
            Some(e) => e.glyph(),
            None => self.terrain.glyph(),
        }
    }

    pub fn color(&self) -> Color256 {
        match &self.entity {
            Some(e) => e.color(),
            None => self.terrain.color(),
        }
    }

    /// Actions a player may choose when targeting this cell.
    ///
    /// A growing object offers Move/Dig; otherwise (empty, or the gardener
    /// itself) the terrain's own table applies.
    pub fn available_actions(&self) -> &'static [ActionKind] {
        match &self.entity {
            Some(Entity::Plant(_)) => &OCCUPIED_ACTIONS,
            _ => self.terrain.available_actions(),
        }
    }
}

/// What the renderer must draw at one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    pub pos: Point,
    pub glyph: char,
    pub fg: Color256,
    /// Background highlight for path cells.
    pub bg: Option<Color256>,
    pub selected: bool,
}

/// The garden map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    dirty: Vec<bool>,
    dirty_list: Vec<Point>,
}

impl Grid {
    /// All-Ground grid. Fails on non-positive or oversized dimensions.
    pub fn new(width: i32, height: i32) -> GardenResult<Self> {
        Self::filled(width, height, Terrain::Ground)
    }

    pub fn filled(width: i32, height: i32, terrain: Terrain) -> GardenResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GardenError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(GardenError::Config(format!(
                "grid dimensions {}x{} exceed the {} cell limit per side",
                width, height, MAX_GRID_SIDE
            )));
        }

        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Cell::new(terrain); len],
            dirty: vec![false; len],
            dirty_list: Vec::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline(always)]
    fn index(&self, p: Point) -> usize {
        assert!(
            self.in_bounds(p),
            "point ({}, {}) outside {}x{} grid",
            p.x,
            p.y,
            self.width,
            self.height
        );
        (p.y as usize) * (self.width as usize) + (p.x as usize)
    }

    pub fn get(&self, p: Point) -> &Cell {
        &self.cells[self.index(p)]
    }

    pub fn terrain(&self, p: Point) -> Terrain {
        self.get(p).terrain
    }

    pub fn entity(&self, p: Point) -> Option<&Entity> {
        self.get(p).entity.as_ref()
    }

    pub fn passability(&self, p: Point) -> i32 {
        self.get(p).passability()
    }

    pub fn available_actions(&self, p: Point) -> &'static [ActionKind] {
        self.get(p).available_actions()
    }

    /// In-bounds 4-neighbours of `p`.
    pub fn neighbors(&self, p: Point) -> ArrayVec<Point, 4> {
        CARDINALS
            .iter()
            .map(|&d| p + d)
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    fn cell_mut(&mut self, p: Point) -> &mut Cell {
        let i = self.index(p);
        if !self.dirty[i] {
            self.dirty[i] = true;
            self.dirty_list.push(p);
        }
        &mut self.cells[i]
    }

    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) {
        self.cell_mut(p).terrain = terrain;
    }

    /// Install an entity, replacing whatever occupied the cell.
    pub fn set_entity(&mut self, p: Point, entity: Entity) -> Option<Entity> {
        self.cell_mut(p).entity.replace(entity)
    }

    pub fn take_entity(&mut self, p: Point) -> Option<Entity> {
        self.cell_mut(p).entity.take()
    }

    pub fn set_selected(&mut self, p: Point, selected: bool) {
        if self.get(p).selected != selected {
            self.cell_mut(p).selected = selected;
        }
    }

    pub fn set_on_path(&mut self, p: Point, on_path: bool) {
        if self.get(p).on_path != on_path {
            self.cell_mut(p).on_path = on_path;
        }
    }

    /// Force a repaint of `p` without changing it.
    pub fn mark_dirty(&mut self, p: Point) {
        let _ = self.cell_mut(p);
    }

    /// Advance every entity one tick, marking cells whose look changed.
    pub fn update_entities<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut changed = 0;
        for i in 0..self.cells.len() {
            let Some(entity) = self.cells[i].entity.as_mut() else {
                continue;
            };
            if entity.update(rng) {
                let p = Point::new(i as i32 % self.width, i as i32 / self.width);
                self.mark_dirty(p);
                changed += 1;
            }
        }
        changed
    }

    pub fn redraw_request(&self, p: Point) -> RedrawRequest {
        let cell = self.get(p);
        RedrawRequest {
            pos: p,
            glyph: cell.glyph(),
            fg: cell.color(),
            bg: cell.on_path.then_some(PATH_HIGHLIGHT),
            selected: cell.selected,
        }
    }

    /// Redraw requests for every cell changed since the last drain.
    ///
    /// Each changed cell appears exactly once, in the order it was first touched.
    pub fn drain_redraws(&mut self) -> Vec<RedrawRequest> {
        let points = std::mem::take(&mut self.dirty_list);
        let out = points.iter().map(|&p| self.redraw_request(p)).collect();
        for p in points {
            let i = self.index(p);
            self.dirty[i] = false;
        }
        out
    }

    pub fn has_pending_redraws(&self) -> bool {
        !self.dirty_list.is_empty()
    }

    /// Count cells whose terrain matches.
    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|c| c.terrain == terrain).count()
    }
}
