use super::*;
use crate::common::config::Settings;
use crate::model::WindowState;
use crate::sys::geometry::Rect;
use crate::sys::headless::{HeadlessController, HeadlessWindow};
use crate::sys::host::Controller;
use crate::sys::screen::{Surface, SurfaceId};
use crate::sys::window::WindowId;

type TestEngine = Engine<HeadlessController>;

fn w(id: u64) -> WindowId { WindowId::new(id) }

fn screen() -> Surface { Surface::new(SurfaceId::new(0, 0, 0), Rect::new(0.0, 0.0, 1000.0, 1000.0)) }

fn settings_with(order: &[LayoutId]) -> Settings {
    let mut settings = Settings::default();
    settings.layout.order = order.to_vec();
    settings
}

fn engine_on(surface: Surface, settings: Settings) -> TestEngine {
    Engine::new(HeadlessController::new(vec![surface]), settings)
}

fn add_on(engine: &mut TestEngine, handle: HeadlessWindow) -> HeadlessWindow {
    engine.handle_event(LayoutEvent::WindowAdded(handle.boxed()));
    handle
}

fn add(engine: &mut TestEngine, id: u64) -> HeadlessWindow {
    let surface = engine.controller().current_surface();
    let handle = HeadlessWindow::new(id, &surface, Rect::new(10.0, 20.0, 300.0, 200.0));
    add_on(engine, handle)
}

fn engine_with(n: u64, settings: Settings) -> (TestEngine, Vec<HeadlessWindow>) {
    let mut engine = engine_on(screen(), settings);
    let handles = (1..=n).map(|id| add(&mut engine, id)).collect();
    (engine, handles)
}

fn focus(engine: &mut TestEngine, id: u64) {
    engine.controller_mut().current_window = Some(w(id));
    engine.handle_event(LayoutEvent::WindowFocused(w(id)));
}

fn order(engine: &TestEngine) -> Vec<u64> { engine.windows().iter().map(|w| w.id().get()).collect() }

fn geometries(handles: &[HeadlessWindow]) -> Vec<Rect> { handles.iter().map(HeadlessWindow::geometry).collect() }

fn state(engine: &TestEngine, id: u64) -> WindowState {
    engine.windows().get(w(id)).map(|w| w.state()).unwrap_or(WindowState::Unmanaged)
}

fn last_text(engine: &TestEngine) -> Option<String> {
    engine.controller().last_notification().map(|n| n.text.clone())
}

mod arrange {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn master_and_stack() {
        let (engine, handles) = engine_with(3, Settings::default());
        assert_eq!(
            geometries(&handles),
            vec![
                Rect::new(0.0, 0.0, 500.0, 1000.0),
                Rect::new(500.0, 0.0, 500.0, 500.0),
                Rect::new(500.0, 500.0, 500.0, 500.0),
            ]
        );
        assert!((1..=3).all(|id| state(&engine, id) == WindowState::Tiled));
    }

    #[test]
    fn arranging_twice_changes_nothing() {
        let (mut engine, handles) = engine_with(4, Settings::default());
        let before = geometries(&handles);
        engine.arrange();
        engine.arrange();
        assert_eq!(geometries(&handles), before);
    }

    #[test]
    fn quarter_with_two_windows() {
        let surface = Surface::new(SurfaceId::new(0, 0, 0), Rect::new(0.0, 0.0, 800.0, 600.0));
        let mut engine = engine_on(surface, settings_with(&[LayoutId::Quarter]));
        let handles = vec![add(&mut engine, 1), add(&mut engine, 2)];
        assert_eq!(
            geometries(&handles),
            vec![Rect::new(0.0, 0.0, 400.0, 600.0), Rect::new(400.0, 0.0, 400.0, 600.0)]
        );
    }

    #[test]
    fn floating_windows_keep_their_place() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        let surface = screen();
        let floater = HeadlessWindow::new(3, &surface, Rect::new(40.0, 40.0, 100.0, 100.0)).floating();
        let floater = add_on(&mut engine, floater);

        assert_eq!(state(&engine, 3), WindowState::Floating);
        assert_eq!(floater.geometry(), Rect::new(40.0, 40.0, 100.0, 100.0));
        assert_eq!(floater.commits()[0].keep_above, Some(true));
        assert_eq!(
            geometries(&handles),
            vec![Rect::new(0.0, 0.0, 500.0, 1000.0), Rect::new(500.0, 0.0, 500.0, 1000.0)]
        );
    }

    #[test]
    fn ignored_windows_are_not_managed() {
        let mut engine = engine_on(screen(), Settings::default());
        let surface = screen();
        let handle = HeadlessWindow::new(1, &surface, Rect::default()).ignored();
        let _ = add_on(&mut engine, handle);
        assert!(engine.windows().is_empty());
    }

    #[test]
    fn outer_gaps_shrink_the_tiling_area() {
        let mut settings = Settings::default();
        settings.gaps.outer.left = 10.0;
        settings.gaps.outer.right = 10.0;
        settings.gaps.outer.top = 10.0;
        settings.gaps.outer.bottom = 10.0;
        let (_, handles) = engine_with(1, settings);
        assert_eq!(handles[0].geometry(), Rect::new(10.0, 10.0, 980.0, 980.0));
    }

    #[test]
    fn sole_tile_is_maximized_over_the_working_area() {
        let mut settings = Settings::default();
        settings.layout.maximize_sole_tile = true;
        settings.gaps.outer.left = 10.0;
        settings.gaps.outer.top = 10.0;
        settings.gaps.outer.right = 10.0;
        settings.gaps.outer.bottom = 10.0;
        let (mut engine, handles) = engine_with(1, settings);
        assert_eq!(state(&engine, 1), WindowState::Maximized);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));

        let _ = add(&mut engine, 2);
        assert_eq!(state(&engine, 1), WindowState::Tiled);
        assert_eq!(handles[0].geometry(), Rect::new(10.0, 10.0, 490.0, 980.0));
    }

    #[test]
    fn monocle_ignores_outer_gaps_when_maximizing() {
        let mut settings = settings_with(&[LayoutId::Monocle]);
        settings.gaps.outer.left = 20.0;
        let (engine, handles) = engine_with(2, settings);
        assert_eq!(geometries(&handles), vec![screen().working_area; 2]);
        assert_eq!(state(&engine, 2), WindowState::Maximized);
    }

    #[test]
    fn wide_tiles_are_narrowed_and_centred() {
        let mut settings = Settings::default();
        settings.layout.limit_tile_width_ratio = 0.4;
        let (_, handles) = engine_with(2, settings);
        assert_eq!(
            geometries(&handles),
            vec![Rect::new(50.0, 0.0, 400.0, 1000.0), Rect::new(550.0, 0.0, 400.0, 1000.0)]
        );
    }

    #[test]
    fn ignored_surfaces_float_everything_in_place() {
        let surface = screen().ignored();
        let mut engine = engine_on(surface.clone(), Settings::default());
        let handle = HeadlessWindow::new(1, &surface, Rect::new(10.0, 20.0, 300.0, 200.0));
        let handle = add_on(&mut engine, handle);
        assert_eq!(state(&engine, 1), WindowState::TiledAfloat);
        assert_eq!(handle.geometry(), Rect::new(10.0, 20.0, 300.0, 200.0));
    }
}

mod manage {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn new_windows_follow_the_current_one() {
        let (mut engine, _handles) = engine_with(3, Settings::default());
        focus(&mut engine, 1);
        let _ = add(&mut engine, 4);
        assert_eq!(order(&engine), vec![1, 4, 2, 3]);
    }

    #[test]
    fn new_windows_can_become_master() {
        let mut settings = Settings::default();
        settings.new_window_as_master = true;
        let (mut engine, _handles) = engine_with(3, settings);
        focus(&mut engine, 2);
        let _ = add(&mut engine, 4);
        assert_eq!(order(&engine), vec![4, 3, 2, 1]);
    }

    #[test]
    fn removing_a_window_retiles() {
        let (mut engine, handles) = engine_with(3, Settings::default());
        engine.handle_event(LayoutEvent::WindowRemoved(w(2)));
        assert_eq!(order(&engine), vec![1, 3]);
        assert_eq!(handles[2].geometry(), Rect::new(500.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        let before = geometries(&handles);
        engine.handle_event(LayoutEvent::WindowRemoved(w(9)));
        engine.handle_event(LayoutEvent::WindowMoveOver(w(9)));
        engine.handle_event(LayoutEvent::WindowFocused(w(9)));
        engine.handle_event(LayoutEvent::WindowShadeChanged(w(9)));
        assert_eq!(geometries(&handles), before);
        assert_eq!(order(&engine), vec![1, 2]);
    }

    #[test]
    fn dynamic_layout_places_new_window_next_to_current() {
        let (mut engine, handles) = engine_with(2, settings_with(&[LayoutId::Dynamic]));
        focus(&mut engine, 2);
        engine.execute(&LayoutCommand::SplitVertically);
        let third = add(&mut engine, 3);

        assert_eq!(order(&engine), vec![1, 2, 3]);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert_eq!(handles[1].geometry(), Rect::new(500.0, 0.0, 500.0, 500.0));
        assert_eq!(third.geometry(), Rect::new(500.0, 500.0, 500.0, 500.0));
    }

    #[test]
    fn full_layout_sends_newcomer_to_next_surface() {
        let next = Surface::new(SurfaceId::new(0, 0, 1), Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let mut controller = HeadlessController::new(vec![screen()]);
        controller.spare_surfaces.push(next.clone());
        let mut engine = Engine::new(controller, settings_with(&[LayoutId::Quarter]));

        for id in 1..=4 {
            let _ = add(&mut engine, id);
        }
        let fifth = add(&mut engine, 5);

        assert_eq!(fifth.snapshot().surface.id, next.id);
        assert_eq!(engine.controller().current_surface().id, next.id);
        assert_eq!(state(&engine, 5), WindowState::Tiled);
        assert_eq!(fifth.geometry(), next.working_area);
    }

    #[test]
    fn full_layout_without_next_surface_floats_the_overflow() {
        let (engine, _handles) = engine_with(5, settings_with(&[LayoutId::Quarter]));
        assert_eq!(state(&engine, 4), WindowState::Tiled);
        assert_eq!(state(&engine, 5), WindowState::TiledAfloat);
        assert_eq!(engine.controller().current_surface().id, screen().id);
    }
}

mod commands {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn focus_order_wraps() {
        let (mut engine, _handles) = engine_with(3, Settings::default());
        engine.execute(&LayoutCommand::FocusNext);
        assert_eq!(engine.current_window(), Some(w(1)));

        focus(&mut engine, 3);
        engine.execute(&LayoutCommand::FocusNext);
        assert_eq!(engine.current_window(), Some(w(1)));
        engine.execute(&LayoutCommand::FocusPrev);
        assert_eq!(engine.current_window(), Some(w(3)));
    }

    #[test]
    fn push_to_master_keeps_the_rest_in_order() {
        let (mut engine, _handles) = engine_with(4, Settings::default());
        focus(&mut engine, 3);
        engine.execute(&LayoutCommand::PushToMaster);
        assert_eq!(order(&engine), vec![3, 1, 2, 4]);
        assert_eq!(engine.windows().at(0).map(|w| w.id()), Some(w(3)));
    }

    #[test]
    fn move_next_and_prev() {
        let (mut engine, _handles) = engine_with(3, Settings::default());
        focus(&mut engine, 1);
        engine.execute(&LayoutCommand::MoveNext);
        assert_eq!(order(&engine), vec![2, 1, 3]);

        let (mut engine, _handles) = engine_with(3, Settings::default());
        focus(&mut engine, 1);
        engine.execute(&LayoutCommand::MovePrev);
        assert_eq!(order(&engine), vec![2, 3, 1]);
    }

    #[test]
    fn float_round_trip_restores_float_geometry() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        let original = Rect::new(10.0, 20.0, 300.0, 200.0);
        focus(&mut engine, 1);

        engine.execute(&LayoutCommand::ToggleFloat);
        assert_eq!(state(&engine, 1), WindowState::Floating);
        assert_eq!(handles[0].geometry(), original);
        assert_eq!(handles[1].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));

        engine.execute(&LayoutCommand::ToggleFloat);
        assert_eq!(state(&engine, 1), WindowState::Tiled);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));

        engine.execute(&LayoutCommand::ToggleFloat);
        assert_eq!(handles[0].geometry(), original);
    }

    #[test]
    fn float_all_then_tile_all() {
        let (mut engine, handles) = engine_with(3, Settings::default());
        engine.execute(&LayoutCommand::FloatAll);
        assert!((1..=3).all(|id| state(&engine, id) == WindowState::Floating));
        assert_eq!(handles[0].geometry(), Rect::new(4.0, 4.0, 492.0, 992.0));
        assert_eq!(last_text(&engine).as_deref(), Some("Float All"));

        engine.execute(&LayoutCommand::FloatAll);
        assert!((1..=3).all(|id| state(&engine, id) == WindowState::Tiled));
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert_eq!(last_text(&engine).as_deref(), Some("Tile All"));
    }

    #[test]
    fn master_count_change_shows_the_layout() {
        let (mut engine, handles) = engine_with(3, Settings::default());
        engine.execute(&LayoutCommand::IncreaseMasterCount);

        let note = engine.controller().last_notification().cloned();
        assert_eq!(note.as_ref().map(|n| n.text.as_str()), Some("Tile Layout"));
        assert_eq!(note.as_ref().and_then(|n| n.icon.as_deref()), Some("mosaic-tile"));
        assert_eq!(note.as_ref().and_then(|n| n.hint.as_deref()), Some("2"));
        assert_eq!(
            geometries(&handles),
            vec![
                Rect::new(0.0, 0.0, 500.0, 500.0),
                Rect::new(0.0, 500.0, 500.0, 500.0),
                Rect::new(500.0, 0.0, 500.0, 1000.0),
            ]
        );
    }

    #[test]
    fn layouts_without_a_master_area_say_so() {
        let (mut engine, _handles) = engine_with(2, settings_with(&[LayoutId::Spiral]));
        engine.execute(&LayoutCommand::IncreaseMasterCount);
        assert_eq!(last_text(&engine).as_deref(), Some("No Master Area"));
        engine.execute(&LayoutCommand::Rotate);
        assert_eq!(last_text(&engine).as_deref(), Some("Rotation Not Applicable"));
    }

    #[test]
    fn cycling_layouts_notifies_and_rearranges() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        engine.execute(&LayoutCommand::NextLayout);
        assert_eq!(last_text(&engine).as_deref(), Some("Monocle Layout"));
        assert_eq!(geometries(&handles), vec![screen().working_area; 2]);

        engine.execute(&LayoutCommand::PrevLayout);
        assert_eq!(last_text(&engine).as_deref(), Some("Tile Layout"));
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn toggling_a_layout_twice_returns() {
        let (mut engine, _handles) = engine_with(2, Settings::default());
        engine.execute(&LayoutCommand::ToggleLayout(LayoutId::Spiral));
        assert_eq!(engine.current_layout_on_current_surface().id(), LayoutId::Spiral);
        engine.execute(&LayoutCommand::ToggleLayout(LayoutId::Spiral));
        let entry = engine.layouts().entry(screen().id);
        assert_eq!(entry.map(|e| e.current_id()), Some(LayoutId::Tile));
    }

    #[test]
    fn monocle_focus_walks_the_order() {
        let (mut engine, _handles) = engine_with(3, settings_with(&[LayoutId::Monocle]));
        focus(&mut engine, 1);
        engine.execute(&LayoutCommand::MoveFocus(Direction::Down));
        assert_eq!(engine.current_window(), Some(w(2)));
        engine.execute(&LayoutCommand::MoveFocus(Direction::Left));
        assert_eq!(engine.current_window(), Some(w(1)));
    }
}

mod navigation {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    /// Three full-width rows: master count zero leaves only the stack.
    fn rows() -> (TestEngine, Vec<HeadlessWindow>) {
        let (mut engine, handles) = engine_with(3, Settings::default());
        engine.execute(&LayoutCommand::DecreaseMasterCount);
        (engine, handles)
    }

    #[test]
    fn rows_are_stacked() {
        let (_, handles) = rows();
        assert_eq!(
            geometries(&handles),
            vec![
                Rect::new(0.0, 0.0, 1000.0, 333.0),
                Rect::new(0.0, 333.0, 1000.0, 333.0),
                Rect::new(0.0, 666.0, 1000.0, 333.0),
            ]
        );
    }

    #[test]
    fn vertical_focus_is_symmetric() {
        let (mut engine, _handles) = rows();
        engine.controller_mut().current_window = Some(w(1));

        let mut visited = Vec::new();
        for dir in [Direction::Down, Direction::Down, Direction::Down, Direction::Up, Direction::Up] {
            engine.execute(&LayoutCommand::MoveFocus(dir));
            visited.push(engine.current_window().map(|id| id.get()));
        }
        assert_eq!(visited, vec![Some(2), Some(3), Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn ties_go_to_the_most_recently_focused() {
        let (mut engine, _handles) = engine_with(3, Settings::default());
        engine.handle_event(LayoutEvent::WindowFocused(w(3)));
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::MoveFocus(Direction::Right));
        assert_eq!(engine.current_window(), Some(w(3)));

        engine.handle_event(LayoutEvent::WindowFocused(w(2)));
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::MoveFocus(Direction::Right));
        assert_eq!(engine.current_window(), Some(w(2)));
    }

    #[test]
    fn no_neighbour_is_a_noop() {
        let (mut engine, _handles) = engine_with(3, Settings::default());
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::MoveFocus(Direction::Left));
        assert_eq!(engine.current_window(), Some(w(1)));
    }

    #[test]
    fn focus_without_current_picks_the_first_window() {
        let (mut engine, _handles) = engine_with(2, Settings::default());
        engine.focus_dir(Direction::Up);
        assert_eq!(engine.current_window(), Some(w(1)));
    }

    #[test]
    fn moving_a_tile_swaps_with_its_neighbour() {
        let (mut engine, handles) = engine_with(3, Settings::default());
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::MoveWindow(Direction::Right));
        assert_eq!(order(&engine), vec![2, 1, 3]);
        assert_eq!(handles[1].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn swap_without_current_selects_the_first_tile() {
        let (mut engine, _handles) = engine_with(2, Settings::default());
        engine.swap_direction(Direction::Left);
        assert_eq!(engine.current_window(), Some(w(1)));
        assert_eq!(order(&engine), vec![1, 2]);
    }

    #[test]
    fn floating_windows_move_and_resize_by_steps() {
        let (mut engine, _handles) = engine_with(2, Settings::default());
        let surface = screen();
        let floater = HeadlessWindow::new(3, &surface, Rect::new(100.0, 100.0, 200.0, 200.0)).floating();
        let floater = add_on(&mut engine, floater);
        engine.controller_mut().current_window = Some(w(3));

        engine.execute(&LayoutCommand::IncreaseWidth);
        assert_eq!(floater.geometry(), Rect::new(100.0, 100.0, 250.0, 200.0));
        engine.execute(&LayoutCommand::DecreaseHeight);
        assert_eq!(floater.geometry(), Rect::new(100.0, 100.0, 250.0, 150.0));
        engine.execute(&LayoutCommand::MoveWindow(Direction::Right));
        assert_eq!(floater.geometry(), Rect::new(150.0, 100.0, 250.0, 150.0));
    }
}

mod resize {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn growing_the_master_moves_the_border() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::IncreaseWidth);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 530.0, 1000.0));
        assert_eq!(handles[1].geometry().x, 530.0);
    }

    #[test]
    fn growing_the_rightmost_tile_shrinks_it_from_the_left() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        engine.controller_mut().current_window = Some(w(2));
        engine.execute(&LayoutCommand::IncreaseWidth);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 530.0, 1000.0));
        assert_eq!(handles[1].geometry().x, 530.0);
    }

    #[test]
    fn dragging_an_edge_feeds_back_into_the_layout() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[0].update(|s| s.geometry = Rect::new(0.0, 0.0, 600.0, 1000.0));
        engine.handle_event(LayoutEvent::WindowResizeOver(w(1)));
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 600.0, 1000.0));
        assert_eq!(handles[1].geometry().x, 600.0);
    }

    #[test]
    fn layouts_without_adjust_ignore_resizes() {
        let (mut engine, handles) = engine_with(2, settings_with(&[LayoutId::Monocle]));
        engine.controller_mut().current_window = Some(w(1));
        engine.execute(&LayoutCommand::IncreaseWidth);
        assert_eq!(geometries(&handles), vec![screen().working_area; 2]);
    }

    #[test]
    fn host_moves_of_tiles_are_reverted() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[0].update(|s| s.geometry = Rect::new(5.0, 5.0, 5.0, 5.0));
        engine.handle_event(LayoutEvent::WindowGeometryChanged(w(1)));
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }
}

mod dragging {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn dropping_onto_a_tile_swaps() {
        let (mut engine, handles) = engine_with(3, Settings::default());
        handles[0].update(|s| s.geometry = Rect::new(600.0, 600.0, 200.0, 200.0));
        engine.handle_event(LayoutEvent::WindowMoveOver(w(1)));
        assert_eq!(order(&engine), vec![3, 2, 1]);
        assert_eq!(handles[0].geometry(), Rect::new(500.0, 500.0, 500.0, 500.0));
        assert_eq!(handles[2].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn dragging_far_away_untiles() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        let dropped = Rect::new(100.0, 100.0, 400.0, 800.0);
        handles[0].update(|s| s.geometry = dropped);
        engine.handle_event(LayoutEvent::WindowMoveOver(w(1)));

        assert_eq!(state(&engine, 1), WindowState::Floating);
        assert_eq!(handles[0].geometry(), dropped);
        assert_eq!(handles[1].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert_eq!(last_text(&engine).as_deref(), Some("Window Untiled"));
    }

    #[test]
    fn short_drags_snap_back() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[0].update(|s| s.geometry = Rect::new(10.0, 10.0, 500.0, 1000.0));
        engine.handle_event(LayoutEvent::WindowMoveOver(w(1)));
        assert_eq!(state(&engine, 1), WindowState::Tiled);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn untiling_by_drag_can_be_disabled() {
        let mut settings = Settings::default();
        settings.untile_by_dragging = false;
        let (mut engine, handles) = engine_with(2, settings);
        handles[0].update(|s| s.geometry = Rect::new(100.0, 100.0, 400.0, 800.0));
        engine.handle_event(LayoutEvent::WindowMoveOver(w(1)));
        assert_eq!(state(&engine, 1), WindowState::Tiled);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }
}

mod window_events {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn shaded_windows_float_until_unshaded() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[0].update(|s| s.shaded = true);
        engine.handle_event(LayoutEvent::WindowShadeChanged(w(1)));
        assert_eq!(state(&engine, 1), WindowState::Floating);
        assert_eq!(handles[1].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));

        handles[0].update(|s| s.shaded = false);
        engine.handle_event(LayoutEvent::WindowShadeChanged(w(1)));
        assert_eq!(state(&engine, 1), WindowState::Tiled);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn unminimized_windows_take_focus() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[1].update(|s| s.minimized = true);
        engine.handle_event(LayoutEvent::SurfaceUpdated);
        assert_eq!(handles[0].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));

        handles[1].update(|s| s.minimized = false);
        engine.handle_event(LayoutEvent::WindowUnminimized(w(2)));
        assert_eq!(engine.current_window(), Some(w(2)));
        assert_eq!(handles[1].geometry(), Rect::new(500.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn host_maximize_overrides_the_layout() {
        let (mut engine, handles) = engine_with(2, Settings::default());
        handles[0].update(|s| s.maximized = true);
        engine.handle_event(LayoutEvent::WindowMaximizeChanged(w(1)));
        assert_eq!(state(&engine, 1), WindowState::NativeMaximized);
        assert_eq!(handles[0].geometry(), screen().working_area);
        assert_eq!(handles[1].geometry(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
    }
}

mod monocle_minimize_rest {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn settings() -> Settings {
        let mut settings = settings_with(&[LayoutId::Monocle, LayoutId::Tile]);
        settings.layout.monocle_minimize_rest = true;
        settings
    }

    fn minimized(handles: &[HeadlessWindow]) -> Vec<bool> {
        handles.iter().map(|h| h.snapshot().minimized).collect()
    }

    #[test]
    fn deferred_task_minimizes_the_others() {
        let (mut engine, handles) = engine_with(3, settings());
        engine.controller_mut().current_window = Some(w(2));
        let tasks = engine.controller_mut().take_deferred();
        assert!(!tasks.is_empty());
        for task in tasks {
            engine.run_deferred(task);
        }
        assert_eq!(minimized(&handles), vec![true, false, true]);
    }

    #[test]
    fn deferred_task_rechecks_the_current_window() {
        let (mut engine, handles) = engine_with(3, settings());
        engine.controller_mut().current_window = Some(w(2));
        engine.execute(&LayoutCommand::ToggleFloat);
        assert_eq!(state(&engine, 2), WindowState::Floating);

        for task in engine.controller_mut().take_deferred() {
            engine.run_deferred(task);
        }
        assert_eq!(minimized(&handles), vec![false, false, false]);
    }

    #[test]
    fn focusing_minimizes_the_others() {
        let (mut engine, handles) = engine_with(3, settings());
        focus(&mut engine, 3);
        assert_eq!(minimized(&handles), vec![true, true, false]);
    }

    #[test]
    fn closing_the_current_window_focuses_a_hidden_one() {
        let (mut engine, _handles) = engine_with(3, settings());
        focus(&mut engine, 1);
        engine.handle_event(LayoutEvent::WindowRemoved(w(1)));
        assert_eq!(engine.current_window(), Some(w(2)));
    }

    #[test]
    fn leaving_monocle_is_announced() {
        let (mut engine, _handles) = engine_with(2, settings());
        focus(&mut engine, 1);
        engine.execute(&LayoutCommand::NextLayout);
        assert_eq!(last_text(&engine).as_deref(), Some("Tile Layout"));
        assert!(!engine.is_layout_monocle_and_minimize_rest());
    }
}
