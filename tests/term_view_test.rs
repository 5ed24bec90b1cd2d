use my_garden::core::{GardenConfig, GardenState};
use my_garden::term::{FrameBuffer, GardenView, Viewport};
use my_garden::types::{GardenAction, GARDENER_GLYPH};

fn generated() -> GardenState {
    GardenState::from_config(GardenConfig::default().with_size(40, 10).with_seed(11)).unwrap()
}

#[test]
fn term_view_draws_whole_map_on_first_frame() {
    let mut state = generated();
    let view = GardenView::default();
    let vp = Viewport::new(80, 14);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    assert!(view.update_into(&mut state, vp, &mut fb));
    for p in state.grid().points() {
        let cell = fb.get(p.x as u16, p.y as u16).unwrap();
        assert_eq!(cell.ch, state.grid().get(p).glyph(), "{:?}", p);
    }
    let pos = state.player().pos();
    assert_eq!(fb.get(pos.x as u16, pos.y as u16).unwrap().ch, GARDENER_GLYPH);
}

#[test]
fn term_view_idle_tick_leaves_frame_unchanged() {
    let mut state = generated();
    let view = GardenView::default();
    let vp = Viewport::new(80, 14);
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    view.update_into(&mut state, vp, &mut fb);

    let before = fb.clone();
    state.tick();
    assert!(!view.update_into(&mut state, vp, &mut fb));

    // One tick is too short for any plant to change stage.
    assert_eq!(before, fb);
}

#[test]
fn term_view_resize_forces_full_repaint() {
    let mut state = generated();
    let view = GardenView::default();
    let mut fb = FrameBuffer::new(80, 14);
    view.update_into(&mut state, Viewport::new(80, 14), &mut fb);

    state.apply_action(GardenAction::CursorRight);
    assert!(view.update_into(&mut state, Viewport::new(100, 20), &mut fb));
    assert_eq!(fb.width(), 100);
    assert_eq!(fb.height(), 20);
}
