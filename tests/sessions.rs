// Puzzlebox – Casual word and maze puzzles
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

// Plays whole games through the public API starting from generator JSON.

use puzzlebox::config::GameConfig;
use puzzlebox::directions::Difficulty;
use puzzlebox::grid::Pos;
use puzzlebox::puzzle_data::{
    self, CrosswordData, MazeData, PuzzleData, PuzzleKind, ScrambleData,
    WordSearchData,
};
use puzzlebox::session::Status;
use puzzlebox::{crossword, maze, scramble, word_search};

fn drag(
    session: &mut puzzlebox::session::Session<word_search::WordSearch>,
    cells: &[(u32, u32)],
) -> Option<word_search::Outcome> {
    let (&(row, col), rest) = cells.split_first().unwrap();

    session.act(word_search::Action::Start(Pos::new(row, col)));

    for &(row, col) in rest {
        session.act(word_search::Action::Extend(Pos::new(row, col)));
    }

    session.act(word_search::Action::Commit)
}

#[test]
fn find_the_only_word() {
    let data = WordSearchData::from_json(
        r#"{"grid": [["C","A","T"],["X","X","X"],["X","X","X"]],
            "words": ["CAT"]}"#,
        Difficulty::Easy,
    ).unwrap();
    let mut session = word_search::new_session(data);

    assert_eq!(
        drag(&mut session, &[(0, 0), (0, 1), (0, 2)]),
        Some(word_search::Outcome::Found("CAT".to_string())),
    );

    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.pending_finish(), Some(Status::Won));
    assert_eq!(session.pending_finish(), None);

    let found = session.rules().found_words()
        .map(|word| word.word)
        .collect::<Vec<_>>();
    assert_eq!(&found, &["CAT"]);

    // Nothing more happens once the game is won
    assert_eq!(
        session.act(word_search::Action::Start(Pos::new(1, 1))),
        None,
    );
}

#[test]
fn finding_a_word_twice() {
    let data = WordSearchData::from_json(
        r#"{"grid": [["C","A","T"],["D","O","G"],["X","Y","Z"]],
            "words": ["CAT", "DOG"]}"#,
        Difficulty::Easy,
    ).unwrap();
    let mut session = word_search::new_session(data);

    drag(&mut session, &[(0, 0), (0, 2)]);

    assert_eq!(
        drag(&mut session, &[(0, 0), (0, 1), (0, 2)]),
        Some(word_search::Outcome::AlreadyFound("CAT".to_string())),
    );
    assert_eq!(session.rules().found_words().count(), 1);
    assert!(session.status().is_playing());

    // Dragging from either end of a word finds it
    assert_eq!(
        drag(&mut session, &[(1, 2), (1, 0)]),
        Some(word_search::Outcome::Found("DOG".to_string())),
    );
    assert_eq!(session.status(), Status::Won);
}

#[test]
fn diagonal_word_by_difficulty() {
    let json = r#"{"grid": [["C","X","X"],["X","O","X"],["X","X","W"]],
                   "words": ["COW"]}"#;

    let data = WordSearchData::from_json(json, Difficulty::Medium).unwrap();
    let mut session = word_search::new_session(data);

    assert_eq!(
        drag(&mut session, &[(0, 0), (1, 1), (2, 2)]),
        Some(word_search::Outcome::Found("COW".to_string())),
    );
    assert_eq!(session.status(), Status::Won);

    // An easy puzzle can’t have a diagonal word at all
    assert!(matches!(
        WordSearchData::from_json(json, Difficulty::Easy),
        Err(puzzle_data::Error::WordNotPlaced { .. }),
    ));

    let mut data = WordSearchData::from_json(json, Difficulty::Medium)
        .unwrap();
    data.difficulty = Difficulty::Easy;
    let mut session = word_search::new_session(data);

    assert_eq!(
        drag(&mut session, &[(0, 0), (2, 2)]),
        Some(word_search::Outcome::NoMatch),
    );
    assert!(session.status().is_playing());
}

#[test]
fn scramble_without_time() {
    let data = ScrambleData::from_json(
        r#"{"letters": ["A", "B"], "possibleWords": ["AB"]}"#,
    ).unwrap();
    let config = GameConfig::from_json(r#"{"scramble_duration": 0}"#)
        .unwrap();
    let mut session = scramble::new_session(data, &config);

    session.tick();

    assert_eq!(session.status(), Status::Over);
    assert_eq!(session.clock().remaining(), Some(0));
}

fn crossword_data() -> CrosswordData {
    CrosswordData::from_json(
        r#"{"grid": [["", "", ""], ["", null, null], ["", null, null]],
            "clues": {
              "across": [{"number": 1, "clue": "Pet", "answer": "CAT",
                          "row": 0, "col": 0}],
              "down": [{"number": 1, "clue": "Taxi", "answer": "CAB",
                        "row": 0, "col": 0}]
            }}"#,
    ).unwrap()
}

fn fill_crossword(
    session: &mut puzzlebox::session::Session<crossword::Crossword>,
    letters: &[(u32, u32, char)],
) {
    for &(row, col, letter) in letters {
        assert_eq!(
            session.act(crossword::Action::Input {
                pos: Pos::new(row, col),
                letter: Some(letter),
            }),
            Some(crossword::Outcome::Updated),
        );
    }
}

#[test]
fn crossword_with_a_mistake() {
    let mut session = crossword::new_session(crossword_data());

    fill_crossword(
        &mut session,
        &[(0, 0, 'C'), (0, 1, 'A'), (0, 2, 'X'), (1, 0, 'A'), (2, 0, 'B')],
    );

    let Some(crossword::Outcome::Checked(report)) =
        session.act(crossword::Action::Check)
    else {
        unreachable!("check should always report");
    };

    assert_eq!(report.correct, 1);
    assert_eq!(report.total, 2);
    assert_eq!(&report.to_string(), "You have 1 correct words so far");
    assert!(session.status().is_playing());
    assert!(!session.rules().solved().at(Pos::new(0, 2)));
    assert!(session.rules().solved().at(Pos::new(2, 0)));

    fill_crossword(&mut session, &[(0, 2, 't')]);
    // Filling the grid doesn’t win until it is checked
    assert!(session.status().is_playing());

    session.act(crossword::Action::Check);
    assert_eq!(session.status(), Status::Won);
}

#[test]
fn scramble_from_json() {
    let data = ScrambleData::from_json(
        r#"{"letters": ["A", "A", "B"], "possibleWords": ["BAA", "AB"]}"#,
    ).unwrap();
    let mut session = scramble::new_session(data, &GameConfig::default());

    assert_eq!(
        session.act(scramble::Action::Guess("aaa".to_string())),
        Some(scramble::Outcome::Unformable("AAA".to_string())),
    );
    assert_eq!(
        session.act(scramble::Action::Guess("ba".to_string())),
        Some(scramble::Outcome::NotInList("BA".to_string())),
    );
    assert_eq!(
        session.act(scramble::Action::Guess("baa".to_string())),
        Some(scramble::Outcome::Found("BAA".to_string())),
    );
    assert!(session.rules().found().len() == 1);
}

#[test]
fn scramble_pause_and_time_out() {
    let data = ScrambleData::from_json(
        r#"{"letters": ["A", "A", "B"], "possibleWords": ["BAA", "AB"]}"#,
    ).unwrap();
    let config = GameConfig::from_json(r#"{"scramble_duration": 2}"#)
        .unwrap();
    let mut session = scramble::new_session(data, &config);

    assert_eq!(session.clock().display_seconds(), 2);

    assert!(session.toggle_pause());
    session.tick();
    session.tick();
    assert_eq!(session.clock().display_seconds(), 2);
    assert_eq!(session.act(scramble::Action::Tap(0)), None);

    assert!(!session.toggle_pause());
    session.tick();
    assert!(session.status().is_playing());
    session.tick();

    assert_eq!(session.status(), Status::Over);
    assert_eq!(session.pending_finish(), Some(Status::Over));
    assert_eq!(session.act(scramble::Action::Tap(0)), None);

    session.reset();
    assert!(session.status().is_playing());
    assert_eq!(session.clock().display_seconds(), 2);
}

#[test]
fn walk_through_maze() {
    let data = MazeData::from_json(
        r#"{"mazeData": "S#\n E", "isSolvable": true}"#,
    ).unwrap();
    let mut session = maze::new_session(data, &GameConfig::default());

    // Into the wall
    assert_eq!(session.act(maze::Action::Move { dx: 1, dy: 0 }), None);
    assert_eq!(session.rules().player(), Pos::new(0, 0));

    assert_eq!(
        session.act(maze::Action::Move { dx: 0, dy: 1 }),
        Some(maze::Outcome::Moved(Pos::new(1, 0))),
    );
    session.tick();
    assert!(session.status().is_playing());

    assert_eq!(
        session.act(maze::Action::Swipe { dx: 40.0, dy: 5.0 }),
        Some(maze::Outcome::Moved(Pos::new(1, 1))),
    );
    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.pending_finish(), Some(Status::Won));
    assert_eq!(session.pending_finish(), None);
    assert_eq!(session.snapshot().seconds, 1);
}

#[test]
fn parse_by_kind() {
    let data = puzzle_data::parse(
        PuzzleKind::Maze,
        r#"{"mazeData": "S E", "isSolvable": true}"#,
        Difficulty::Easy,
    ).unwrap();
    assert!(matches!(data, PuzzleData::Maze(_)));

    let err = puzzle_data::parse(
        PuzzleKind::Maze,
        r#"{"mazeData": "S#E", "isSolvable": true}"#,
        Difficulty::Easy,
    ).unwrap_err();
    assert!(matches!(err, puzzle_data::Error::NoPath));

    assert!(
        puzzle_data::parse(PuzzleKind::Scramble, "{", Difficulty::Easy)
            .is_err()
    );
}
