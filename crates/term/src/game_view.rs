//! GardenView: maps `core::GardenState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The map is drawn one terminal column per cell from the top-left corner,
//! followed by a status line and a key hint line. An open menu is drawn as a
//! box next to the cursor.

use crate::core::{Activity, Entity, GardenMenu, GardenState, GrowthStage, RedrawRequest};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Color256, Point};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the garden.
#[derive(Debug, Clone, Default)]
pub struct GardenView;

impl GardenView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repaint everything: every grid cell, the status lines and any menu.
    pub fn render_into<R>(&self, state: &GardenState<R>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let grid = state.grid();
        for p in grid.points() {
            self.draw_cell(fb, &grid.redraw_request(p));
        }
        self.draw_overlays(state, viewport, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R>(&self, state: &GardenState<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    /// Paint only the cells named by `redraws`.
    pub fn apply_redraws(&self, redraws: &[RedrawRequest], fb: &mut FrameBuffer) {
        for req in redraws {
            self.draw_cell(fb, req);
        }
    }

    /// Bring a persistent framebuffer up to date with `state`.
    ///
    /// Does a full repaint when the state asks for one or the viewport
    /// changed size, and otherwise applies pending per-cell redraws. Returns
    /// `true` for a full repaint.
    pub fn update_into<R>(
        &self,
        state: &mut GardenState<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> bool {
        let resized = fb.resize(viewport.width, viewport.height);
        let full = state.take_full_redraw() || resized;
        let redraws = state.drain_redraws();
        if full {
            self.render_into(state, viewport, fb);
        } else {
            self.apply_redraws(&redraws, fb);
            self.draw_overlays(state, viewport, fb);
        }
        full
    }

    fn draw_overlays<R>(&self, state: &GardenState<R>, viewport: Viewport, fb: &mut FrameBuffer) {
        self.draw_status(state, viewport, fb);
        if let Some(menu) = state.menu() {
            self.draw_menu(fb, menu, state.player().cursor(), viewport);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, req: &RedrawRequest) {
        let (Ok(x), Ok(y)) = (u16::try_from(req.pos.x), u16::try_from(req.pos.y)) else {
            return;
        };
        let style = CellStyle {
            fg: req.fg,
            bg: req.bg.unwrap_or(Color256::BLACK),
            bold: false,
            dim: false,
            reverse: req.selected,
        };
        fb.put_char(x, y, req.glyph, style);
    }

    fn draw_status<R>(&self, state: &GardenState<R>, viewport: Viewport, fb: &mut FrameBuffer) {
        let y = state.grid().height() as u16;
        if y >= viewport.height {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();
        fb.fill_rect(0, y, viewport.width, 1, ' ', value);

        let cursor = state.player().cursor();
        let cell = state.grid().get(cursor);
        let mut x = fb.put_u32(0, y, cursor.x as u32, label);
        x = fb.put_str(x, y, ",", label);
        x = fb.put_u32(x, y, cursor.y as u32, label);
        x = fb.put_str(x + 1, y, cell.terrain.label(), value);
        if let Some(plant) = cell.entity.as_ref().and_then(Entity::as_plant) {
            x = fb.put_str(x + 1, y, plant.species().label(), CellStyle::fg(plant.color()));
            x = fb.put_str(x + 1, y, stage_label(plant.stage()), value);
        }

        x = fb.put_str(x, y, "  |  ", CellStyle { dim: true, ..value });
        let player = state.player();
        match player.activity() {
            Activity::Idle => {
                fb.put_str(x, y, "idle", value);
            }
            Activity::Walking { path, then, .. } => {
                x = fb.put_str(x, y, "walking ", value);
                x = fb.put_u32(x, y, path.len() as u32, value);
                x = fb.put_str(x, y, " steps", value);
                if let Some(action) = then {
                    x = fb.put_str(x, y, ", then ", value);
                    fb.put_str(x, y, action.kind().label(), value);
                }
            }
            Activity::Acting(action) => {
                x = fb.put_str(x, y, action.kind().label(), label);
                x = fb.put_u32(x + 1, y, action.elapsed(), value);
                x = fb.put_str(x, y, "/", value);
                fb.put_u32(x, y, action.execution_time(), value);
            }
        }

        let hint_y = y + 1;
        if hint_y >= viewport.height {
            return;
        }
        let hint = if state.is_menu_open() {
            "w/s select  enter confirm  esc cancel"
        } else {
            "wasd move cursor  f walk  enter actions  q quit"
        };
        let dim = CellStyle { dim: true, ..value };
        fb.fill_rect(0, hint_y, viewport.width, 1, ' ', dim);
        fb.put_str(0, hint_y, hint, dim);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, menu: &GardenMenu, anchor: Point, viewport: Viewport) {
        let labels = menu.labels();
        let inner_w = menu.widest_label() as u16 + 2;
        let box_w = inner_w + 2;
        let box_h = labels.len() as u16 + 4;

        let ax = anchor.x.max(0) as u16;
        let ay = anchor.y.max(0) as u16;
        let x = ax.saturating_add(2).min(viewport.width.saturating_sub(box_w));
        let y = ay.min(viewport.height.saturating_sub(box_h));

        let frame = CellStyle::default();
        let title = CellStyle {
            bold: true,
            ..frame
        };
        fb.fill_rect(x, y, box_w, box_h, ' ', frame);
        self.draw_border(fb, x, y, box_w, box_h, frame);

        fb.put_str(x + 2, y + 1, menu.title(), title);
        for dx in 1..box_w - 1 {
            fb.put_char(x + dx, y + 2, '─', frame);
        }
        fb.put_char(x, y + 2, '├', frame);
        fb.put_char(x + box_w - 1, y + 2, '┤', frame);

        for (i, text) in labels.iter().enumerate() {
            let row = y + 3 + i as u16;
            let style = CellStyle {
                reverse: i == menu.current(),
                ..frame
            };
            fb.fill_rect(x + 1, row, inner_w, 1, ' ', style);
            fb.put_str(x + 2, row, text, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}

fn stage_label(stage: GrowthStage) -> &'static str {
    match stage {
        GrowthStage::Planted => "planted",
        GrowthStage::Growing => "growing",
        GrowthStage::Ready => "ready",
    }
}
