//! Property tests: undo and redo replay edit scripts exactly, whatever the
//! navigation in between.

mod common;

use common::{TestEditor, editor_with, line};
use movetree::{
    Brush, Color, Move, Nag, Node, Priority, Shape, Square,
    adapters::STARTING_FEN,
    tree::to_json,
};
use proptest::prelude::*;

const SAN_POOL: [&str; 6] = ["e4", "d4", "Nf3", "c5", "e5", "Nc6"];
const NAG_POOL: [Nag; 5] = [Nag::GOOD, Nag::MISTAKE, Nag::DUBIOUS, Nag::EQUAL, Nag::UNCLEAR];
const BRUSH_POOL: [Brush; 3] = [Brush::Green, Brush::Red, Brush::Blue];
const BARE_KINGS_FEN: &str = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

/// Circle on e4, or an arrow e2-e4, in the chosen brush.
fn shape(arrow: bool, brush: usize) -> Shape {
    let e4 = Square::new(28).expect("e4 is on the board");
    let brush = BRUSH_POOL[brush];
    if arrow {
        Shape::arrow(Square::new(12).expect("e2 is on the board"), e4, brush)
    } else {
        Shape::circle(e4, brush)
    }
}

#[derive(Debug, Clone)]
enum Action {
    Play(usize),
    Back,
    Forward,
    Root,
    AddLine,
    DeleteLine,
    Comment(String),
    ToggleNag(usize),
    ToggleShape(bool, usize),
    Priority(bool),
    ReverseSiblings,
    TrainingColor(bool),
    Header(Option<String>),
    InitialPosition(bool),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..SAN_POOL.len()).prop_map(Action::Play),
        2 => Just(Action::Back),
        1 => Just(Action::Forward),
        1 => Just(Action::Root),
        2 => Just(Action::AddLine),
        1 => Just(Action::DeleteLine),
        1 => "[a-z]{0,6}".prop_map(Action::Comment),
        1 => (0..NAG_POOL.len()).prop_map(Action::ToggleNag),
        1 => (any::<bool>(), 0..BRUSH_POOL.len())
            .prop_map(|(arrow, brush)| Action::ToggleShape(arrow, brush)),
        1 => any::<bool>().prop_map(Action::Priority),
        1 => Just(Action::ReverseSiblings),
        1 => any::<bool>().prop_map(Action::TrainingColor),
        1 => proptest::option::of("[A-Z][a-z]{1,5}").prop_map(Action::Header),
        1 => any::<bool>().prop_map(Action::InitialPosition),
    ]
}

/// Apply `action`, skipping calls whose preconditions do not hold.
fn apply(editor: &mut TestEditor, action: &Action) {
    let view = editor.view();
    let on_committed = view.ply > 0 && !view.current_node.is_draft;
    match action {
        Action::Play(index) => editor
            .play_san(SAN_POOL[*index])
            .expect("pool moves are SAN"),
        Action::Back => {
            editor.move_backwards().expect("back");
        }
        Action::Forward => {
            editor.move_forwards().expect("forward");
        }
        Action::Root => editor.set_moves(&[]).expect("root"),
        Action::AddLine => {
            if view.line.iter().any(|entry| entry.is_draft) {
                editor.add_line().expect("drafts commit");
            }
        }
        Action::DeleteLine => {
            if on_committed {
                editor.delete_line().expect("committed node deletes");
            }
        }
        Action::Comment(text) => editor.set_comment(text).expect("comment"),
        Action::ToggleNag(index) => editor.toggle_nag(NAG_POOL[*index]).expect("glyph"),
        Action::ToggleShape(arrow, brush) => editor
            .toggle_shape(shape(*arrow, *brush))
            .expect("shape"),
        Action::Priority(first) => {
            let priority = if *first {
                Priority::TrainFirst
            } else {
                Priority::Default
            };
            editor.set_priority(priority).expect("priority");
        }
        Action::ReverseSiblings => {
            if on_committed {
                let parent = editor.cursor().path(view.ply - 1);
                let order: Option<Vec<Move>> = editor
                    .tree()
                    .node(&parent)
                    .map(|node| node.child_moves().into_iter().rev().collect());
                if let Some(order) = order {
                    editor.reorder_moves(view.ply, order).expect("reversal");
                }
            }
        }
        Action::TrainingColor(white) => {
            let color = white.then_some(Color::White);
            editor.set_training_color(color).expect("color");
        }
        Action::Header(value) => editor
            .set_header_value("Opening", value.clone())
            .expect("header"),
        Action::InitialPosition(bare_kings) => {
            let fen = if *bare_kings {
                BARE_KINGS_FEN
            } else {
                STARTING_FEN
            };
            editor.set_initial_position(fen).expect("FEN accepted");
        }
    }
}

fn snapshot(editor: &TestEditor) -> String {
    to_json(editor.tree()).expect("tree serializes")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn undo_all_then_redo_all_is_exact(
        script in proptest::collection::vec(action_strategy(), 0..40),
        detour in proptest::collection::vec(0..SAN_POOL.len(), 0..4),
    ) {
        let mut editor = editor_with(&["e4 e5 Nf3", "e4 c5", "d4"]);
        let start = snapshot(&editor);

        for action in &script {
            apply(&mut editor, action);
        }
        let end = snapshot(&editor);
        let performed = editor.history().undo_len();
        prop_assert!(!editor.history().can_redo());

        let detour: Vec<Move> = detour.iter().map(|&i| Move::new(SAN_POOL[i])).collect();
        for _ in 0..performed {
            editor.set_moves(&detour).expect("detour plays");
            editor.undo().expect("undo");
        }
        prop_assert_eq!(snapshot(&editor), start);
        prop_assert!(!editor.view().can_undo);

        for _ in 0..performed {
            editor.set_moves(&detour).expect("detour plays");
            editor.redo().expect("redo");
        }
        prop_assert_eq!(snapshot(&editor), end);
        prop_assert!(!editor.view().can_redo);
    }

    #[test]
    fn selection_follows_set_moves(path in proptest::collection::vec(0..SAN_POOL.len(), 1..8)) {
        let mut editor = common::manual_editor_with(&["e4 e5 Nf3", "e4 c5", "d4"]);
        let path: Vec<Move> = path.iter().map(|&i| Move::new(SAN_POOL[i])).collect();
        editor.set_moves(&path).expect("pool moves play");

        let view = editor.view();
        prop_assert_eq!(view.line_moves(), path.clone());
        for (i, entry) in view.line.iter().enumerate() {
            prop_assert_eq!(entry.selected, i == path.len() - 1);
            prop_assert_eq!(&entry.path[..], &path[..=i]);
        }
    }
}

#[test]
fn undo_of_root_level_delete_restores_line() {
    let mut editor = editor_with(&["e4 e5"]);
    editor.set_moves(&line("e4")).expect("path exists");
    editor.delete_line().expect("e4 deletes");
    assert_eq!(editor.view().ply, 0);
    assert!(editor.view().line.is_empty());
    editor.undo().expect("undo");
    assert_eq!(editor.view().line_moves(), line("e4 e5"));
}
