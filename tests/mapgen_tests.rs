use my_garden::core::mapgen::{generate_rocks, place_gardener};
use my_garden::core::{generate, Entity, GardenError, Grid, SimpleRng};
use my_garden::types::Terrain;

#[test]
fn test_generated_map_invariants() {
    for seed in [1, 2, 3, 42, 777] {
        let mut grid = Grid::new(100, 20).unwrap();
        let report = generate(&mut grid, &mut SimpleRng::new(seed)).unwrap();

        let gardeners: Vec<_> = grid
            .points()
            .filter(|&p| grid.entity(p).is_some_and(Entity::is_gardener))
            .collect();
        assert_eq!(gardeners, vec![report.gardener]);
        assert!(matches!(
            grid.terrain(report.gardener),
            Terrain::Ground | Terrain::Grass
        ));

        // Plants only ever sit on land.
        for p in grid.points() {
            if let Some(Entity::Plant(_)) = grid.entity(p) {
                assert!(!matches!(grid.terrain(p), Terrain::Water | Terrain::Rock));
            }
        }
        assert!(grid.count_terrain(Terrain::Water) > 0);

        let plants = grid
            .points()
            .filter(|&p| matches!(grid.entity(p), Some(Entity::Plant(_))))
            .count();
        assert_eq!(plants, report.trees);
    }
}

#[test]
fn test_same_seed_same_map() {
    let mut a = Grid::new(50, 20).unwrap();
    let mut b = Grid::new(50, 20).unwrap();
    let ra = generate(&mut a, &mut SimpleRng::new(31337)).unwrap();
    let rb = generate(&mut b, &mut SimpleRng::new(31337)).unwrap();
    assert_eq!(ra, rb);
    assert_eq!(a.drain_redraws(), b.drain_redraws());
}

#[test]
fn test_tiny_grid_generates() {
    let mut grid = Grid::new(1, 1).unwrap();
    match generate(&mut grid, &mut SimpleRng::new(9)) {
        Ok(report) => assert_eq!(report.gardener.x, 0),
        Err(GardenError::Generation(_)) => {}
        Err(other) => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_no_room_for_gardener_is_an_error() {
    let mut grid = Grid::filled(4, 4, Terrain::Water).unwrap();
    let err = place_gardener(&mut grid, &mut SimpleRng::new(1)).unwrap_err();
    assert!(matches!(err, GardenError::Generation(_)));
}

#[test]
fn test_rocks_need_ground() {
    let mut grid = Grid::filled(10, 10, Terrain::Soil).unwrap();
    assert_eq!(generate_rocks(&mut grid, &mut SimpleRng::new(4)), 0);
    assert_eq!(grid.count_terrain(Terrain::Rock), 0);
}

#[test]
fn test_invalid_dimensions_are_config_errors() {
    assert!(matches!(Grid::new(0, 5), Err(GardenError::Config(_))));
    assert!(matches!(Grid::new(5, -1), Err(GardenError::Config(_))));
}
