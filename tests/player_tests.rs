use my_garden::core::{
    path_to_point, ActionEffect, Entity, GardenConfig, GardenState, GrowingObject, Grid, Player,
    PlayerAction, PlayerEvent, SimpleRng,
};
use my_garden::types::{GardenAction, Point, Species, Terrain, EXECUTION_TIME};

fn five_by_five() -> GardenState {
    GardenState::from_grid(
        Grid::new(5, 5).unwrap(),
        Point::new(0, 0),
        SimpleRng::new(1),
        GardenConfig::default().with_size(5, 5),
    )
}

#[test]
fn test_end_to_end_walk_lays_path() {
    let grid = Grid::new(5, 5).unwrap();
    let planned = path_to_point(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
    assert_eq!(planned.len(), 8);
    assert_eq!(planned.back().copied(), Some(Point::new(4, 4)));

    let mut state = five_by_five();
    for _ in 0..4 {
        state.apply_action(GardenAction::CursorRight);
        state.apply_action(GardenAction::CursorDown);
    }
    assert!(state.apply_action(GardenAction::FollowCursor));
    let walked: Vec<Point> = state.player().active_path().unwrap().iter().copied().collect();

    let mut ticks = 0;
    while !state.player().is_idle() {
        state.tick();
        ticks += 1;
        assert!(ticks <= 100, "walk did not finish");
    }

    // Eight Ground steps at cost 2.
    assert_eq!(ticks, 16);
    assert_eq!(state.player().pos(), Point::new(4, 4));
    assert_eq!(state.grid().entity(Point::new(4, 4)), Some(&Entity::Gardener));
    assert_eq!(state.grid().terrain(Point::new(0, 0)), Terrain::Path);
    for &p in &walked[..walked.len() - 1] {
        assert_eq!(state.grid().terrain(p), Terrain::Path, "{:?}", p);
    }
    assert_eq!(state.grid().terrain(Point::new(4, 4)), Terrain::Ground);
    assert_eq!(state.grid().count_terrain(Terrain::Path), 8);
}

#[test]
fn test_dig_fires_once_after_execution_time() {
    let mut grid = Grid::new(3, 1).unwrap();
    let mut rng = SimpleRng::new(8);
    grid.set_entity(
        Point::new(1, 0),
        Entity::Plant(GrowingObject::new(Species::Vegetable, &mut rng)),
    );

    let mut dig = PlayerAction::new(Point::new(1, 0), ActionEffect::Dig, EXECUTION_TIME);
    for _ in 0..EXECUTION_TIME - 1 {
        assert!(!dig.execute(&mut grid));
    }
    assert!(grid.entity(Point::new(1, 0)).is_some());
    assert!(dig.execute(&mut grid));
    assert!(grid.entity(Point::new(1, 0)).is_none());

    grid.set_entity(
        Point::new(1, 0),
        Entity::Plant(GrowingObject::new(Species::Tree, &mut rng)),
    );
    for _ in 0..50 {
        assert!(!dig.execute(&mut grid));
    }
    assert!(grid.entity(Point::new(1, 0)).is_some());
}

#[test]
fn test_dig_through_menu_removes_plant() {
    let mut state = five_by_five();
    let mut rng = SimpleRng::new(4);
    state.grid_mut().set_entity(
        Point::new(3, 0),
        Entity::Plant(GrowingObject::new(Species::Vegetable, &mut rng)),
    );
    for _ in 0..3 {
        state.apply_action(GardenAction::CursorRight);
    }
    assert!(state.apply_action(GardenAction::OpenMenu));
    state.apply_action(GardenAction::MenuDown);
    assert!(state.apply_action(GardenAction::MenuConfirm));

    let mut finished = None;
    for _ in 0..100 {
        if let PlayerEvent::ActionFinished(kind) = state.tick() {
            finished = Some(kind);
            break;
        }
    }
    assert_eq!(finished, Some(my_garden::types::ActionKind::Dig));
    assert!(state.grid().entity(Point::new(3, 0)).is_none());
    // Approached from the neighbouring cell.
    assert_eq!(state.player().pos(), Point::new(2, 0));
}

#[test]
fn test_build_house_then_walk_next_to_it() {
    let mut state = five_by_five();
    state.apply_action(GardenAction::CursorDown);
    state.apply_action(GardenAction::OpenMenu);
    // Move, Place, Build -> Build -> Soil, Path, House -> House
    for action in [
        GardenAction::MenuDown,
        GardenAction::MenuDown,
        GardenAction::MenuConfirm,
        GardenAction::MenuDown,
        GardenAction::MenuDown,
        GardenAction::MenuConfirm,
    ] {
        state.apply_action(action);
    }
    for _ in 0..EXECUTION_TIME {
        state.tick();
    }
    assert_eq!(state.grid().terrain(Point::new(0, 1)), Terrain::House);

    // Houses cannot be entered; moving onto one stops beside it.
    state.apply_action(GardenAction::CursorDown);
    state.apply_action(GardenAction::FollowCursor);
    state.apply_action(GardenAction::CursorUp);
    assert!(state.apply_action(GardenAction::FollowCursor));
    for _ in 0..100 {
        state.tick();
    }
    assert_eq!(state.player().pos().manhattan(Point::new(0, 1)), 1);
}

#[test]
fn test_unreachable_request_leaves_player_idle() {
    let mut grid = Grid::new(4, 4).unwrap();
    grid.set_entity(Point::new(0, 0), Entity::Gardener);
    for y in 0..4 {
        grid.set_terrain(Point::new(2, y), Terrain::Rock);
    }
    let mut player = Player::new(Point::new(0, 0), EXECUTION_TIME, 16);
    player.set_cursor(&mut grid, Point::new(3, 3));
    assert!(!player.request_move(&mut grid));
    assert!(!player.request_action(&mut grid, ActionEffect::Build(Terrain::Soil)));
    assert!(player.is_idle());
    assert_eq!(player.tick(&mut grid), PlayerEvent::Nothing);
}
