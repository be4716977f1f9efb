use gdl::{GameDescription, SExprParser};

use crate::{create_translator_with_parser, BoardDesc, SymmetryDescriptor, Translator};

pub const PIECES: [&str; 3] = ["b", "x", "o"];
pub const CELL_COUNT: usize = 27;
pub const CONTROL_WHITE: usize = 27;
pub const CONTROL_BLACK: usize = 28;
/// A base whose root term is neither registered nor skipped.
pub const STEP: usize = 29;
pub const BASE_COUNT: usize = 30;

pub const WHITE_NOOP: usize = 90;
pub const WHITE_ACTION_COUNT: usize = 91;
pub const BLACK_ACTION_COUNT: usize = 10;

/// Index of `(cell x y piece)` in the state vector. Coordinates are 1 based.
pub fn cell_index(x: usize, y: usize, piece: &str) -> usize {
    let piece_idx = PIECES.iter().position(|p| *p == piece).unwrap();
    ((x - 1) * 3 + (y - 1)) * 3 + piece_idx
}

/// Index of `(mark x y)` in either role's actions.
pub fn mark_index(x: usize, y: usize) -> usize {
    (x - 1) * 3 + (y - 1)
}

/// Index of `(move x1 y1 x2 y2)` in white's actions.
pub fn move_index(x1: usize, y1: usize, x2: usize, y2: usize) -> usize {
    9 + mark_index(x1, y1) * 9 + mark_index(x2, y2)
}

fn coords() -> impl Iterator<Item = (usize, usize)> {
    (1..=3).flat_map(|x| (1..=3).map(move |y| (x, y)))
}

/// A 3x3 marking game where white may also move pieces between any two cells.
pub fn description() -> GameDescription {
    let mut bases = coords()
        .flat_map(|(x, y)| {
            PIECES
                .iter()
                .map(move |p| format!("(true (cell {} {} {}))", x, y, p))
        })
        .collect::<Vec<_>>();
    bases.push("(true (control white))".to_string());
    bases.push("(true (control black))".to_string());
    bases.push("(true (step 1))".to_string());

    let marks = |role: &str| {
        coords()
            .map(|(x, y)| format!("(does {} (mark {} {}))", role, x, y))
            .collect::<Vec<_>>()
    };

    let mut white = marks("white");
    white.extend(coords().flat_map(|(x1, y1)| {
        coords().map(move |(x2, y2)| format!("(does white (move {} {} {} {}))", x1, y1, x2, y2))
    }));
    white.push("(does white noop)".to_string());

    let mut black = marks("black");
    black.push("(does black noop)".to_string());

    GameDescription {
        roles: vec!["white".to_string(), "black".to_string()],
        bases,
        actions: vec![white, black],
    }
}

pub fn board() -> BoardDesc {
    BoardDesc {
        x_cords: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        y_cords: vec!["1".to_string(), "2".to_string(), "3".to_string()],
    }
}

pub fn symmetries() -> SymmetryDescriptor {
    serde_json::from_str(
        r#"{
            "apply_bases": [{"base_term": "cell", "x_terms_idx": 1, "y_terms_idx": 2}],
            "apply_actions": [
                {"base_term": "mark", "x_terms_idx": 1, "y_terms_idx": 2},
                {"base_term": "move", "x_terms_idx": [1, 3], "y_terms_idx": [2, 4]}
            ],
            "skip_bases": ["control"],
            "skip_actions": ["noop"],
            "do_rotations_90": true,
            "do_rotations_180": false,
            "do_reflection": true
        }"#,
    )
    .unwrap()
}

pub fn translator() -> Translator {
    create_translator_with_parser(&SExprParser::new(), &description(), &board(), &symmetries())
        .unwrap()
}

pub fn state_with(indices: &[usize]) -> Vec<bool> {
    let mut state = vec![false; BASE_COUNT];
    for &index in indices {
        state[index] = true;
    }
    state
}
