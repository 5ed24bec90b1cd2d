//! Game state module - the whole running garden
//!
//! Ties the grid, the player, the random source and the modal menu together.
//! Input arrives as [`GardenAction`]s through [`GardenState::apply_action`];
//! time advances through [`GardenState::tick`]. While a menu is open the
//! simulation is frozen and only menu inputs are accepted.

use log::debug;
use rand::Rng;

use crate::action::ActionEffect;
use crate::config::GardenConfig;
use crate::entity::{Entity, GrowingObject};
use crate::error::GardenResult;
use crate::grid::{Grid, RedrawRequest};
use crate::mapgen;
use crate::menu::{Menu, MenuOption};
use crate::player::{Player, PlayerEvent};
use crate::rng::SimpleRng;
use crate::types::{ActionKind, GardenAction, Point, Species, Terrain};

/// The menu currently shown, by what its entries choose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenMenu {
    Actions(Menu<ActionKind>),
    Place(Menu<Species>),
    Build(Menu<Terrain>),
}

impl GardenMenu {
    pub fn title(&self) -> &'static str {
        match self {
            GardenMenu::Actions(m) => m.title(),
            GardenMenu::Place(m) => m.title(),
            GardenMenu::Build(m) => m.title(),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            GardenMenu::Actions(m) => m.options().iter().map(|o| o.label).collect(),
            GardenMenu::Place(m) => m.options().iter().map(|o| o.label).collect(),
            GardenMenu::Build(m) => m.options().iter().map(|o| o.label).collect(),
        }
    }

    pub fn current(&self) -> usize {
        match self {
            GardenMenu::Actions(m) => m.current(),
            GardenMenu::Place(m) => m.current(),
            GardenMenu::Build(m) => m.current(),
        }
    }

    /// Dismiss without a choice.
    pub fn cancel(&mut self) {
        match self {
            GardenMenu::Actions(m) => {
                m.cancel();
            }
            GardenMenu::Place(m) => {
                m.cancel();
            }
            GardenMenu::Build(m) => {
                m.cancel();
            }
        }
    }

    pub fn widest_label(&self) -> usize {
        match self {
            GardenMenu::Actions(m) => m.widest_label(),
            GardenMenu::Place(m) => m.widest_label(),
            GardenMenu::Build(m) => m.widest_label(),
        }
    }

    fn move_up(&mut self) {
        match self {
            GardenMenu::Actions(m) => m.move_up(),
            GardenMenu::Place(m) => m.move_up(),
            GardenMenu::Build(m) => m.move_up(),
        }
    }

    fn move_down(&mut self) {
        match self {
            GardenMenu::Actions(m) => m.move_down(),
            GardenMenu::Place(m) => m.move_down(),
            GardenMenu::Build(m) => m.move_down(),
        }
    }
}

fn place_menu() -> Menu<Species> {
    let options = Species::ALL
        .iter()
        .map(|&s| MenuOption {
            label: s.label(),
            value: s,
        })
        .collect();
    Menu::new("Place", options)
}

fn build_menu(target: Terrain) -> Option<Menu<Terrain>> {
    let options: Vec<_> = target
        .build_options()
        .iter()
        .map(|&t| MenuOption {
            label: t.label(),
            value: t,
        })
        .collect();
    if options.is_empty() {
        None
    } else {
        Some(Menu::new("Build", options))
    }
}

/// Complete garden state.
#[derive(Debug, Clone)]
pub struct GardenState<R = SimpleRng> {
    grid: Grid,
    player: Player,
    rng: R,
    menu: Option<GardenMenu>,
    config: GardenConfig,
    ticks: u64,
    full_redraw: bool,
}

impl GardenState<SimpleRng> {
    /// Generate a garden seeded from `config.seed`.
    pub fn from_config(config: GardenConfig) -> GardenResult<Self> {
        let rng = SimpleRng::new(config.seed);
        Self::new(config, rng)
    }
}

impl<R> GardenState<R> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn menu(&self) -> Option<&GardenMenu> {
        self.menu.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Simulation ticks run so far (frozen ticks excluded).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Per-cell redraws accumulated since the last call.
    pub fn drain_redraws(&mut self) -> Vec<RedrawRequest> {
        self.grid.drain_redraws()
    }

    /// Whether the view must repaint everything. Clears the flag.
    pub fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw)
    }

    /// Force a full repaint on the next frame (terminal resize).
    pub fn request_full_redraw(&mut self) {
        self.full_redraw = true;
    }
}

impl<R: Rng> GardenState<R> {
    /// Validate `config` and generate a fresh map with `rng`.
    pub fn new(config: GardenConfig, mut rng: R) -> GardenResult<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height)?;
        let report = mapgen::generate(&mut grid, &mut rng)?;
        Ok(Self::from_grid(grid, report.gardener, rng, config))
    }

    /// Wrap an existing grid. The gardener is put at `gardener` if missing.
    pub fn from_grid(mut grid: Grid, gardener: Point, rng: R, config: GardenConfig) -> Self {
        if !grid.entity(gardener).is_some_and(Entity::is_gardener) {
            grid.set_entity(gardener, Entity::Gardener);
        }
        grid.set_selected(gardener, true);

        let limit = config.path_limit();
        let player = Player::new(gardener, config.execution_time, limit);
        Self {
            grid,
            player,
            rng,
            menu: None,
            config,
            ticks: 0,
            full_redraw: true,
        }
    }

    /// Apply an input.
    ///
    /// Returns `false` when the input does not apply in the current mode or
    /// a walk/action request was refused.
    pub fn apply_action(&mut self, action: GardenAction) -> bool {
        if self.menu.is_some() {
            return self.apply_menu_action(action);
        }

        match action {
            GardenAction::CursorLeft => self.move_cursor(-1, 0),
            GardenAction::CursorRight => self.move_cursor(1, 0),
            GardenAction::CursorUp => self.move_cursor(0, -1),
            GardenAction::CursorDown => self.move_cursor(0, 1),
            GardenAction::FollowCursor => self.player.request_move(&mut self.grid),
            GardenAction::OpenMenu => self.open_action_menu(),
            GardenAction::MenuUp
            | GardenAction::MenuDown
            | GardenAction::MenuConfirm
            | GardenAction::MenuCancel => false,
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) -> bool {
        let before = self.player.cursor();
        self.player.move_cursor(&mut self.grid, dx, dy);
        self.player.cursor() != before
    }

    fn apply_menu_action(&mut self, action: GardenAction) -> bool {
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        match action {
            GardenAction::MenuUp => {
                menu.move_up();
                true
            }
            GardenAction::MenuDown => {
                menu.move_down();
                true
            }
            GardenAction::MenuConfirm => self.confirm_menu(),
            GardenAction::MenuCancel => {
                self.close_menu();
                true
            }
            _ => false,
        }
    }

    fn open_action_menu(&mut self) -> bool {
        let target = self.player.cursor();
        let cell = self.grid.get(target);
        let actions = cell.available_actions();
        if actions.is_empty() {
            debug!("no actions for ({}, {})", target.x, target.y);
            return false;
        }

        let title = match cell.entity.as_ref().and_then(Entity::as_plant) {
            Some(plant) => plant.species().label(),
            None => cell.terrain.label(),
        };
        let options = actions
            .iter()
            .map(|&kind| MenuOption {
                label: kind.label(),
                value: kind,
            })
            .collect();
        self.menu = Some(GardenMenu::Actions(Menu::new(title, options)));
        true
    }

    fn close_menu(&mut self) {
        if let Some(mut menu) = self.menu.take() {
            menu.cancel();
        }
        self.full_redraw = true;
    }

    fn confirm_menu(&mut self) -> bool {
        let Some(menu) = self.menu.take() else {
            return false;
        };
        self.full_redraw = true;
        let target = self.player.cursor();

        match menu {
            GardenMenu::Actions(menu) => match menu.confirm() {
                Some(ActionKind::Move) => self.player.request_move(&mut self.grid),
                Some(ActionKind::Dig) => self.player.request_action(&mut self.grid, ActionEffect::Dig),
                Some(ActionKind::Place) => {
                    self.menu = Some(GardenMenu::Place(place_menu()));
                    true
                }
                Some(ActionKind::Build) => match build_menu(self.grid.terrain(target)) {
                    Some(menu) => {
                        self.menu = Some(GardenMenu::Build(menu));
                        true
                    }
                    None => false,
                },
                None => false,
            },
            GardenMenu::Place(menu) => match menu.confirm() {
                Some(species) => {
                    let plant = GrowingObject::new(species, &mut self.rng);
                    self.player
                        .request_action(&mut self.grid, ActionEffect::Place(plant))
                }
                None => false,
            },
            GardenMenu::Build(menu) => match menu.confirm() {
                Some(terrain) => self
                    .player
                    .request_action(&mut self.grid, ActionEffect::Build(terrain)),
                None => false,
            },
        }
    }

    /// Advance the simulation one tick: the player first, then every plant.
    ///
    /// Does nothing while a menu is open.
    pub fn tick(&mut self) -> PlayerEvent {
        if self.menu.is_some() {
            return PlayerEvent::Nothing;
        }
        let event = self.player.tick(&mut self.grid);
        self.grid.update_entities(&mut self.rng);
        self.ticks += 1;
        event
    }
}
