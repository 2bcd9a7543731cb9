use lowpoly::{Button, Editor, EditorState, Hover, Key, KeyEvent, Rgb, Vec2};

fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    data
}

fn red_editor() -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ed = Editor::new();
    assert!(ed.load_image(100, 100, solid_image(100, 100, [255, 0, 0])));
    ed
}

fn click(ed: &mut Editor, x: f32, y: f32) {
    ed.pointer_click(Vec2::new(x, y));
}

/// Build-by-clicks on a solid red image: the finished triangle samples to
/// pure red.
#[test]
fn three_clicks_build_a_red_triangle() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    assert_eq!(ed.state(), EditorState::Building(1));
    click(&mut ed, 100.0, 0.0);
    assert_eq!(ed.state(), EditorState::Building(2));
    click(&mut ed, 0.0, 100.0);
    assert_eq!(ed.state(), EditorState::Idle);

    assert_eq!(ed.mesh().len(), 1);
    assert_eq!(ed.mesh().triangles()[0].color, Rgb { r: 255, g: 0, b: 0 });
    assert!(ed.can_undo());
}

#[test]
fn point_inside_triangle_is_rejected_with_notice() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 100.0, 0.0);
    click(&mut ed, 0.0, 100.0);
    assert_eq!(ed.mesh().len(), 1);
    ed.take_notice();

    // Entirely inside the first triangle; the very first point is refused.
    click(&mut ed, 15.0, 15.0);
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 1);
    let notice = ed.take_notice().unwrap();
    assert!(notice.contains("inside an existing triangle"));

    click(&mut ed, 20.0, 15.0);
    click(&mut ed, 15.0, 20.0);
    assert_eq!(ed.mesh().len(), 1);
}

#[test]
fn escape_cancels_pending_construction() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 50.0, 0.0);
    assert_eq!(ed.state(), EditorState::Building(2));
    ed.key_down(KeyEvent {
        key: Key::Escape,
        ctrl_or_cmd: false,
        in_text_input: false,
    });
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 0);
}

#[test]
fn right_click_cancels_pending_before_removing() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 100.0, 0.0);
    click(&mut ed, 0.0, 100.0);
    click(&mut ed, 200.0, 200.0);
    assert_eq!(ed.state(), EditorState::Building(1));

    // First secondary click only cancels the pending point.
    ed.context_click(Vec2::new(20.0, 20.0));
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 1);

    // Hover the triangle interior, then remove it.
    ed.pointer_move(Vec2::new(25.0, 25.0));
    assert_eq!(ed.hover(), Some(Hover::Triangle(0)));
    ed.context_click(Vec2::new(25.0, 25.0));
    assert_eq!(ed.mesh().len(), 0);
    assert!(ed.can_undo());

    ed.undo();
    assert_eq!(ed.mesh().len(), 1);
}

/// Edge-based construction: a click near an edge at k=0 adopts both of its
/// endpoints; a later click on an adjacent hovered edge (sharing exactly
/// one vertex) attempts the triangle.
#[test]
fn edge_then_adjacent_edge_builds_one_triangle() {
    let mut ed = red_editor();
    // Hub at the origin with two spokes kept clear of the first quadrant:
    // one triangle hanging below the +x axis, one left of the +y axis.
    let doc = r#"{
        "vertices": [
            {"x": 0, "y": 0},
            {"x": 100, "y": 0},
            {"x": 50, "y": -50},
            {"x": 0, "y": 100},
            {"x": -50, "y": 50}
        ],
        "triangles": [
            {"v": [0, 1, 2]},
            {"v": [0, 3, 4]}
        ]
    }"#;
    ed.import_mesh_json(doc).unwrap();
    assert_eq!(ed.mesh().len(), 2);

    // Select the edge along the +x axis.
    click(&mut ed, 50.0, 5.0);
    assert_eq!(ed.state(), EditorState::Building(2));

    // Hover the adjacent edge along the +y axis, then click it.
    ed.pointer_move(Vec2::new(5.0, 50.0));
    assert!(matches!(ed.hover(), Some(Hover::Edge(_))));
    click(&mut ed, 5.0, 50.0);

    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 3);
}

/// Re-forming an existing triangle from two of its neighbors' edges is a
/// duplicate: silently discarded, pending reset, mesh unchanged.
#[test]
fn adjacent_edge_reforming_existing_triangle_is_discarded() {
    let mut ed = red_editor();
    let doc = r#"{
        "vertices": [
            {"x": 0, "y": 0},
            {"x": 100, "y": 0},
            {"x": 0, "y": 100},
            {"x": 100, "y": 100}
        ],
        "triangles": [
            {"v": [0, 1, 2]},
            {"v": [1, 3, 2]}
        ]
    }"#;
    ed.import_mesh_json(doc).unwrap();

    // Shared hypotenuse first, then an outer edge of the second triangle.
    click(&mut ed, 50.0, 50.0);
    assert_eq!(ed.state(), EditorState::Building(2));
    ed.pointer_move(Vec2::new(99.5, 50.0));
    assert!(matches!(ed.hover(), Some(Hover::Edge(_))));
    click(&mut ed, 99.5, 50.0);

    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 2);
    assert!(ed.take_notice().is_none());
}

#[test]
fn clicking_selected_edge_again_deselects_it() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 100.0, 0.0);
    click(&mut ed, 0.0, 100.0);

    // Select the hypotenuse, hover it, click it again.
    click(&mut ed, 50.0, 50.0);
    assert_eq!(ed.state(), EditorState::Building(2));
    ed.pointer_move(Vec2::new(50.0, 50.0));
    click(&mut ed, 50.0, 50.0);
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 1);
}

#[test]
fn drag_commits_one_move_and_invalid_drag_reverts() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);
    click(&mut ed, 60.0, 60.0);
    click(&mut ed, 100.0, 60.0);
    click(&mut ed, 60.0, 100.0);
    assert_eq!(ed.mesh().len(), 2);
    let undo_was = ed.can_undo();
    assert!(undo_was);

    // Valid drag: pull the first triangle's right corner outward.
    ed.pointer_down(Vec2::new(40.0, 0.0), Button::Primary);
    assert_eq!(ed.state(), EditorState::DraggingVertex);
    ed.pointer_move(Vec2::new(50.0, 0.0));
    ed.pointer_move(Vec2::new(55.0, 0.0));
    assert!(!ed.drag_invalid());
    ed.pointer_up(Vec2::new(55.0, 0.0), Button::Primary);
    ed.pointer_click(Vec2::new(55.0, 0.0)); // browser-style trailing click
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().len(), 2);

    // One undo steps back the whole drag, not each move event.
    let moved = ed.mesh().triangles()[0].v[1];
    assert_eq!(ed.mesh().vertex(moved), Vec2::new(55.0, 0.0));
    ed.undo();
    assert_eq!(ed.mesh().vertex(moved), Vec2::new(40.0, 0.0));
    ed.redo();
    assert_eq!(ed.mesh().vertex(moved), Vec2::new(55.0, 0.0));

    // Invalid drag: drop the corner inside the other triangle.
    ed.pointer_down(Vec2::new(55.0, 0.0), Button::Primary);
    ed.pointer_move(Vec2::new(75.0, 75.0));
    assert!(ed.drag_invalid());
    ed.pointer_up(Vec2::new(75.0, 75.0), Button::Primary);
    assert_eq!(ed.mesh().vertex(moved), Vec2::new(55.0, 0.0));
    let notice = ed.take_notice().unwrap();
    assert!(notice.contains("Invalid vertex position"));
}

#[test]
fn motionless_press_on_vertex_leaves_no_history_entry() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);
    ed.undo();
    ed.redo();
    assert!(ed.can_undo());
    assert!(!ed.can_redo());

    ed.pointer_down(Vec2::new(40.0, 0.0), Button::Primary);
    ed.pointer_up(Vec2::new(40.0, 0.0), Button::Primary);
    ed.pointer_click(Vec2::new(40.0, 0.0));

    // No MoveVertex was recorded, and the trailing click did not start a
    // construction on top of the vertex.
    assert_eq!(ed.state(), EditorState::Idle);
    ed.undo();
    assert_eq!(ed.mesh().len(), 0);
}

#[test]
fn pointer_leave_abandons_drag_in_place() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);

    let corner = ed.mesh().triangles()[0].v[1];
    ed.pointer_down(Vec2::new(40.0, 0.0), Button::Primary);
    ed.pointer_move(Vec2::new(60.0, 10.0));
    ed.pointer_leave();
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.mesh().vertex(corner), Vec2::new(40.0, 0.0));
    assert_eq!(ed.hover(), None);
}

#[test]
fn zoom_keeps_world_point_under_pointer() {
    let mut ed = red_editor();
    let screen = Vec2::new(321.0, 87.0);
    for ticks in [-3.0f32, -1.0, 1.0, 2.0, 5.0] {
        let before = ed.view().screen_to_world(screen);
        ed.wheel(screen, 0.0, ticks, true);
        let after = ed.view().screen_to_world(screen);
        assert!((before.x - after.x).abs() < 1e-2, "x drifted at {ticks}");
        assert!((before.y - after.y).abs() < 1e-2, "y drifted at {ticks}");
    }
}

#[test]
fn plain_wheel_pans_by_raw_delta() {
    let mut ed = red_editor();
    let pan = ed.view().pan;
    ed.wheel(Vec2::new(0.0, 0.0), 7.0, -4.0, false);
    assert_eq!(ed.view().pan, Vec2::new(pan.x - 7.0, pan.y + 4.0));
}

#[test]
fn pan_follows_pointer_delta() {
    let mut ed = red_editor();
    ed.pointer_down(Vec2::new(200.0, 200.0), Button::Primary);
    assert_eq!(ed.state(), EditorState::Panning);
    ed.pointer_move(Vec2::new(230.0, 180.0));
    assert_eq!(ed.view().pan, Vec2::new(30.0, -20.0));
    ed.pointer_up(Vec2::new(230.0, 180.0), Button::Primary);
    assert_eq!(ed.state(), EditorState::Idle);
}

#[test]
fn visibility_toggles_respect_text_input_focus() {
    let mut ed = red_editor();
    assert!(ed.show_image());
    ed.key_down(KeyEvent {
        key: Key::Digit1,
        ctrl_or_cmd: false,
        in_text_input: false,
    });
    assert!(!ed.show_image());
    ed.key_down(KeyEvent {
        key: Key::Digit1,
        ctrl_or_cmd: false,
        in_text_input: true,
    });
    assert!(!ed.show_image());

    ed.key_down(KeyEvent {
        key: Key::Digit3,
        ctrl_or_cmd: false,
        in_text_input: false,
    });
    assert!(ed.show_wireframe());
}

#[test]
fn ctrl_z_and_y_drive_history() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);
    assert_eq!(ed.mesh().len(), 1);

    ed.key_down(KeyEvent {
        key: Key::Z,
        ctrl_or_cmd: true,
        in_text_input: false,
    });
    assert_eq!(ed.mesh().len(), 0);
    ed.key_down(KeyEvent {
        key: Key::Y,
        ctrl_or_cmd: true,
        in_text_input: false,
    });
    assert_eq!(ed.mesh().len(), 1);
}

#[test]
fn hover_priority_vertex_over_edge_over_triangle() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 60.0, 0.0);
    click(&mut ed, 0.0, 60.0);

    ed.pointer_move(Vec2::new(1.0, 1.0));
    assert!(matches!(ed.hover(), Some(Hover::Vertex(_))));
    ed.pointer_move(Vec2::new(30.0, 2.0));
    assert!(matches!(ed.hover(), Some(Hover::Edge(_))));
    ed.pointer_move(Vec2::new(18.0, 18.0));
    assert!(matches!(ed.hover(), Some(Hover::Triangle(0))));
    ed.pointer_move(Vec2::new(500.0, 500.0));
    assert_eq!(ed.hover(), None);
}

#[test]
fn clear_all_is_one_undoable_step() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);
    click(&mut ed, 60.0, 60.0);
    click(&mut ed, 100.0, 60.0);
    click(&mut ed, 60.0, 100.0);
    assert_eq!(ed.mesh().len(), 2);

    ed.clear_all();
    assert_eq!(ed.mesh().len(), 0);
    ed.undo();
    assert_eq!(ed.mesh().len(), 2);
}

#[test]
fn load_image_resets_the_session() {
    let mut ed = red_editor();
    click(&mut ed, 0.0, 0.0);
    click(&mut ed, 40.0, 0.0);
    click(&mut ed, 0.0, 40.0);
    assert!(ed.can_undo());

    assert!(ed.load_image(50, 50, solid_image(50, 50, [0, 0, 255])));
    assert_eq!(ed.mesh().len(), 0);
    assert!(!ed.can_undo());
    assert_eq!(ed.state(), EditorState::Idle);
}
