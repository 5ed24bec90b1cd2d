//! Procedural map generator
//!
//! Builds the initial garden on an all-Ground grid, in order:
//! lakes, rivers, rock clusters, vegetation, and finally the gardener.
//!
//! Seed selection uses rejection sampling capped at [`attempt_cap`] tries so
//! tiny or saturated grids cannot livelock. Lake, river and rock seeds that
//! exhaust the cap are skipped; the gardener falls back to a scan and fails
//! with [`GardenError::Generation`] only when no eligible cell exists.

use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use rand::Rng;

use crate::entity::{Entity, GrowingObject};
use crate::error::{GardenError, GardenResult};
use crate::grid::Grid;
use crate::rng::{chance, randint};
use crate::types::{Point, Species, Terrain, CARDINALS};

/// Probability that a lake frontier neighbour becomes water.
pub const LAKE_SPREAD: f32 = 0.4;

/// Probability per river step of turning to a new direction.
pub const RIVER_TURN: f32 = 0.1;

/// Rock spread probability at the seed wave; drops by [`ROCK_DECAY`] per wave.
pub const ROCK_SPREAD: f32 = 0.8;
pub const ROCK_DECAY: f32 = 0.1;

/// Vegetation automaton passes.
pub const VEGETATION_PASSES: usize = 2;

/// Rejection-sampling attempts allowed per pick on `grid`.
pub fn attempt_cap(grid: &Grid) -> usize {
    (grid.area() as usize).saturating_mul(8).max(64)
}

/// Summary of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub gardener: Point,
    pub lakes: usize,
    pub rivers: usize,
    pub rock_clusters: usize,
    pub trees: usize,
}

/// Run every generation stage and place the gardener.
pub fn generate<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> GardenResult<GenerationReport> {
    let lakes = generate_lakes(grid, rng);
    let rivers = generate_rivers(grid, rng);
    let rock_clusters = generate_rocks(grid, rng);
    let trees = generate_vegetation(grid, rng);
    let gardener = place_gardener(grid, rng)?;

    let report = GenerationReport {
        gardener,
        lakes,
        rivers,
        rock_clusters,
        trees,
    };
    info!(
        "generated {}x{} garden: {} lakes, {} rivers, {} rock clusters, {} trees, gardener at ({}, {})",
        grid.width(),
        grid.height(),
        lakes,
        rivers,
        rock_clusters,
        trees,
        gardener.x,
        gardener.y
    );
    Ok(report)
}

fn random_point<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Point {
    Point::new(
        randint(rng, 0, grid.width() - 1),
        randint(rng, 0, grid.height() - 1),
    )
}

/// Rejection-sample a point satisfying `accept`, giving up after the cap.
fn sample_point<R, F>(grid: &Grid, rng: &mut R, mut accept: F) -> Option<Point>
where
    R: Rng + ?Sized,
    F: FnMut(Point) -> bool,
{
    for _ in 0..attempt_cap(grid) {
        let p = random_point(grid, rng);
        if accept(p) {
            return Some(p);
        }
    }
    None
}

fn seed_count<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, cells_per_seed: i32) -> i32 {
    randint(rng, 1, (grid.area() / cells_per_seed).max(1))
}

/// Flood-fill lakes from random seeds. Returns the number of seeds placed.
pub fn generate_lakes<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut seen: HashSet<Point> = HashSet::new();
    let mut frontier: VecDeque<Point> = VecDeque::new();

    let count = seed_count(grid, rng, 200);
    for _ in 0..count {
        let Some(seed) = sample_point(grid, rng, |p| !seen.contains(&p)) else {
            debug!("lake seed sampling exhausted");
            break;
        };
        grid.set_terrain(seed, Terrain::Water);
        frontier.push_front(seed);
        seen.insert(seed);
    }
    let placed = frontier.len();

    while let Some(p) = frontier.pop_back() {
        for n in grid.neighbors(p) {
            if !seen.insert(n) {
                continue;
            }
            if chance(rng, LAKE_SPREAD) {
                grid.set_terrain(n, Terrain::Water);
                frontier.push_front(n);
            }
        }
    }

    placed
}

/// Walk rivers from random seeds. Returns the number of rivers started.
pub fn generate_rivers<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut seen: HashSet<Point> = HashSet::new();
    let mut started = 0;

    let count = seed_count(grid, rng, 400);
    for _ in 0..count {
        let Some(pos) = sample_point(grid, rng, |p| !seen.contains(&p)) else {
            debug!("river seed sampling exhausted");
            break;
        };
        carve_river(grid, &mut seen, pos, rng);
        started += 1;
    }

    started
}

/// Paint one river from `start` and return its course in walk order.
///
/// The walk ends when it leaves the grid or reaches a cell in `seen`.
fn carve_river<R: Rng + ?Sized>(
    grid: &mut Grid,
    seen: &mut HashSet<Point>,
    start: Point,
    rng: &mut R,
) -> Vec<Point> {
    let mut pos = start;
    let mut course = vec![pos];
    grid.set_terrain(pos, Terrain::Water);
    seen.insert(pos);

    let mut dir = CARDINALS[randint(rng, 0, 3) as usize];
    loop {
        if chance(rng, RIVER_TURN) {
            let mut next = CARDINALS[randint(rng, 0, 3) as usize];
            while next == dir {
                next = CARDINALS[randint(rng, 0, 3) as usize];
            }
            dir = next;
            pos = pos + dir;
        } else {
            let drift = randint(rng, -1, 1);
            pos = if dir.x == 0 {
                Point::new(pos.x + drift, pos.y + dir.y)
            } else {
                Point::new(pos.x + dir.x, pos.y + drift)
            };
        }

        if !grid.in_bounds(pos) || !seen.insert(pos) {
            break;
        }
        grid.set_terrain(pos, Terrain::Water);
        course.push(pos);
    }
    course
}

/// Grow rock clusters from Ground seeds, thinning out wave by wave.
pub fn generate_rocks<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut seen: HashSet<Point> = HashSet::new();
    let mut frontier: VecDeque<Point> = VecDeque::new();

    let count = seed_count(grid, rng, 600);
    for _ in 0..count {
        let seed = sample_point(grid, rng, |p| {
            !seen.contains(&p) && grid.terrain(p) == Terrain::Ground
        });
        let Some(seed) = seed else {
            debug!("rock seed sampling exhausted");
            break;
        };
        grid.set_terrain(seed, Terrain::Rock);
        frontier.push_front(seed);
        seen.insert(seed);
    }
    let placed = frontier.len();

    let mut wave = 0u32;
    let mut wave_remaining = frontier.len();
    while let Some(p) = frontier.pop_back() {
        let spread = ROCK_SPREAD - wave as f32 * ROCK_DECAY;
        for n in grid.neighbors(p) {
            if seen.contains(&n) || grid.terrain(n) != Terrain::Ground {
                continue;
            }
            seen.insert(n);
            if chance(rng, spread) {
                grid.set_terrain(n, Terrain::Rock);
                frontier.push_front(n);
            }
        }

        wave_remaining = wave_remaining.saturating_sub(1);
        if wave_remaining == 0 {
            wave += 1;
            wave_remaining = frontier.len();
        }
    }

    placed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Open,
    Grass,
    Tree,
    Blocked,
}

fn any_within(layer: &[Layer], width: i32, height: i32, p: Point, kind: Layer, radius: i32) -> bool {
    let (x0, x1) = ((p.x - radius).max(0), (p.x + radius).min(width - 1));
    let (y0, y1) = ((p.y - radius).max(0), (p.y + radius).min(height - 1));
    (y0..=y1)
        .flat_map(|y| (x0..=x1).map(move |x| Point::new(x, y)))
        .filter(|&q| q != p && p.chebyshev(q) <= radius)
        .any(|q| layer[(q.y * width + q.x) as usize] == kind)
}

/// Cellular-automaton grass and trees. Returns the number of trees planted.
pub fn generate_vegetation<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let mut layer: Vec<Layer> = grid
        .points()
        .map(|p| match grid.terrain(p) {
            Terrain::Water | Terrain::Rock => Layer::Blocked,
            _ => Layer::Open,
        })
        .collect();

    for _ in 0..VEGETATION_PASSES {
        for y in 0..height {
            for x in 0..width {
                let p = Point::new(x, y);
                let i = (y * width + x) as usize;
                if layer[i] != Layer::Open {
                    continue;
                }

                let grass_near = any_within(&layer, width, height, p, Layer::Grass, 1);
                let grass_prob = if grass_near { 0.2 } else { 0.02 };
                if chance(rng, grass_prob) {
                    layer[i] = Layer::Grass;
                    continue;
                }

                let tree_prob = if any_within(&layer, width, height, p, Layer::Tree, 1) {
                    0.0
                } else if any_within(&layer, width, height, p, Layer::Tree, 2) {
                    0.1
                } else {
                    0.03
                };
                if chance(rng, tree_prob) {
                    layer[i] = Layer::Tree;
                }
            }
        }
    }

    let mut trees = 0;
    for (i, kind) in layer.iter().enumerate() {
        let p = Point::new(i as i32 % width, i as i32 / width);
        match kind {
            Layer::Grass => grid.set_terrain(p, Terrain::Grass),
            Layer::Tree => {
                grid.set_entity(p, Entity::Plant(GrowingObject::new(Species::Tree, rng)));
                trees += 1;
            }
            Layer::Open | Layer::Blocked => {}
        }
    }
    trees
}

fn gardener_can_start(grid: &Grid, p: Point) -> bool {
    matches!(grid.terrain(p), Terrain::Ground | Terrain::Grass) && grid.entity(p).is_none()
}

/// Put the gardener on a random free Ground/Grass cell.
pub fn place_gardener<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> GardenResult<Point> {
    let pos = sample_point(grid, rng, |p| gardener_can_start(grid, p))
        .or_else(|| grid.points().find(|&p| gardener_can_start(grid, p)))
        .ok_or_else(|| {
            GardenError::Generation(format!(
                "no free ground or grass cell for the gardener on a {}x{} grid",
                grid.width(),
                grid.height()
            ))
        })?;
    grid.set_entity(pos, Entity::Gardener);
    Ok(pos)
}
