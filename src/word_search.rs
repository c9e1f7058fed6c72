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

use serde::Serialize;
use super::grid::{Grid, Pos};
use super::directions::{self, Difficulty};
use super::mask::CellMask;
use super::puzzle_data::{SearchWord, WordSearchData};
use super::session::{self, Session, Clock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Pointer pressed on a cell
    Start(Pos),
    // Pointer dragged over a cell
    Extend(Pos),
    // Pointer released
    Commit,
    // Pointer cancelled by the browser
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selecting,
    Cancelled,
    Found(String),
    AlreadyFound(String),
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: Vec<Pos>,
}

#[derive(Debug, Clone)]
pub struct WordSearch {
    grid: Grid<char>,
    words: Vec<SearchWord>,
    difficulty: Difficulty,
    // Index into `words` and the cells the player selected, in the
    // order they were found
    found: Vec<(usize, Vec<Pos>)>,
    found_mask: CellMask,
    selection: Vec<Pos>,
}

impl WordSearch {
    pub fn new(data: WordSearchData) -> WordSearch {
        let found_mask = CellMask::new(data.grid.width(), data.grid.height());

        WordSearch {
            grid: data.grid,
            words: data.words,
            difficulty: data.difficulty,
            found: Vec::new(),
            found_mask,
            selection: Vec::new(),
        }
    }

    fn start(&mut self, pos: Pos) -> Option<Outcome> {
        if !self.grid.contains(pos) {
            return None;
        }

        self.selection.clear();
        self.selection.push(pos);

        Some(Outcome::Selecting)
    }

    // The selection always runs in a straight line from the first
    // cell. Once it has two cells the direction is fixed, but dragging
    // back over it can shrink it again.
    fn extend(&mut self, pos: Pos) -> Option<Outcome> {
        let &start = self.selection.first()?;

        if !self.grid.contains(pos) {
            return None;
        }

        let path = directions::line_between(start, pos)?;

        if let (Some(&second), Some(&new_second)) =
            (self.selection.get(1), path.get(1))
        {
            if second != new_second {
                return None;
            }
        }

        if path == self.selection {
            return None;
        }

        self.selection = path;

        Some(Outcome::Selecting)
    }

    fn cancel(&mut self) -> Option<Outcome> {
        if self.selection.is_empty() {
            None
        } else {
            self.selection.clear();
            Some(Outcome::Cancelled)
        }
    }

    fn matches(&self, word: &SearchWord, path: &[Pos]) -> bool {
        let direction = match path {
            [first, second, ..] => directions::line_direction(*first, *second),
            _ => None,
        };

        let n_letters = word.key.chars().count();

        if n_letters != path.len() {
            return false;
        }

        let forwards = word.key.chars()
            .zip(path.iter())
            .all(|(ch, &pos)| *self.grid.at(pos) == ch);

        if forwards &&
            direction.map_or(true, |dir| self.difficulty.allows(dir))
        {
            return true;
        }

        let backwards = word.key.chars()
            .zip(path.iter().rev())
            .all(|(ch, &pos)| *self.grid.at(pos) == ch);

        backwards &&
            direction.map_or(true, |dir| self.difficulty.allows(dir.reverse()))
    }

    fn is_found(&self, word_index: usize) -> bool {
        self.found.iter().any(|&(index, _)| index == word_index)
    }

    fn commit(&mut self) -> Option<Outcome> {
        let path = std::mem::take(&mut self.selection);

        if path.is_empty() {
            return None;
        }

        let mut already_found = None;

        for (index, word) in self.words.iter().enumerate() {
            if !self.matches(word, &path) {
                continue;
            }

            if self.is_found(index) {
                already_found.get_or_insert(index);
                continue;
            }

            for &pos in path.iter() {
                self.found_mask.set(pos);
            }

            let text = word.text.clone();

            log::debug!("found “{}” at {}", text, path[0]);

            self.found.push((index, path));

            return Some(Outcome::Found(text));
        }

        Some(match already_found {
            Some(index) => Outcome::AlreadyFound(self.words[index].text.clone()),
            None => Outcome::NoMatch,
        })
    }

    pub fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.text.as_str())
    }

    pub fn found_words(&self) -> impl Iterator<Item = FoundWord> + '_ {
        self.found.iter().map(|(index, path)| FoundWord {
            word: self.words[*index].text.clone(),
            path: path.clone(),
        })
    }

    pub fn found_mask(&self) -> &CellMask {
        &self.found_mask
    }

    pub fn selection(&self) -> &[Pos] {
        &self.selection
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WordState {
    pub word: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub grid: Vec<String>,
    pub words: Vec<WordState>,
    pub selection: Vec<Pos>,
    pub found: Vec<FoundWord>,
    pub found_cells: Vec<Pos>,
}

impl session::Rules for WordSearch {
    type Action = Action;
    type Outcome = Outcome;
    type Snapshot = Snapshot;

    fn apply(&mut self, action: Action) -> Option<Outcome> {
        match action {
            Action::Start(pos) => self.start(pos),
            Action::Extend(pos) => self.extend(pos),
            Action::Commit => self.commit(),
            Action::Cancel => self.cancel(),
        }
    }

    fn is_won(&self) -> bool {
        self.found.len() >= self.words.len()
    }

    fn reset(&mut self) {
        self.found.clear();
        self.found_mask.clear();
        self.selection.clear();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.rows()
                .map(|row| row.iter().collect())
                .collect(),
            words: self.words.iter()
                .enumerate()
                .map(|(index, word)| WordState {
                    word: word.text.clone(),
                    found: self.is_found(index),
                })
                .collect(),
            selection: self.selection.clone(),
            found: self.found_words().collect(),
            found_cells: self.found_mask.positions().collect(),
        }
    }
}

pub fn new_session(data: WordSearchData) -> Session<WordSearch> {
    Session::new(WordSearch::new(data), Clock::stopwatch())
}

#[cfg(test)]
mod test {
    use super::*;
    use super::session::Rules;
    use crate::puzzle_data::GeneratedWordSearch;
    use crate::session::Status;

    fn make_data(
        grid: &[&str],
        words: &[&str],
        difficulty: Difficulty,
    ) -> WordSearchData {
        GeneratedWordSearch {
            grid: grid.iter()
                .map(|row| row.chars().map(|ch| ch.to_string()).collect())
                .collect(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }.validate(difficulty).unwrap()
    }

    fn select(game: &mut WordSearch, cells: &[(u32, u32)]) -> Option<Outcome> {
        let mut cells = cells.iter().map(|&(row, col)| Pos::new(row, col));

        if let Some(first) = cells.next() {
            game.apply(Action::Start(first));
        }

        for pos in cells {
            game.apply(Action::Extend(pos));
        }

        game.apply(Action::Commit)
    }

    fn found(word: &str) -> Option<Outcome> {
        Some(Outcome::Found(word.to_string()))
    }

    #[test]
    fn straight_selection() {
        let mut game = WordSearch::new(make_data(
            &["CAT", "XOX", "XXW"],
            &["CAT"],
            Difficulty::Easy,
        ));

        assert_eq!(
            game.apply(Action::Start(Pos::new(0, 0))),
            Some(Outcome::Selecting),
        );
        assert_eq!(
            game.apply(Action::Extend(Pos::new(1, 1))),
            Some(Outcome::Selecting),
        );
        // The direction is now fixed to the diagonal
        assert_eq!(game.apply(Action::Extend(Pos::new(0, 1))), None);
        // A bent line isn’t allowed
        assert_eq!(game.apply(Action::Extend(Pos::new(1, 2))), None);
        assert_eq!(game.apply(Action::Extend(Pos::new(3, 3))), None);
        assert_eq!(
            game.apply(Action::Extend(Pos::new(2, 2))),
            Some(Outcome::Selecting),
        );
        assert_eq!(
            game.selection(),
            &[Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 2)],
        );
        assert_eq!(game.apply(Action::Extend(Pos::new(2, 2))), None);

        // Going back to the start frees the direction again
        assert_eq!(
            game.apply(Action::Extend(Pos::new(0, 0))),
            Some(Outcome::Selecting),
        );
        assert_eq!(game.selection(), &[Pos::new(0, 0)]);
        assert_eq!(
            game.apply(Action::Extend(Pos::new(0, 2))),
            Some(Outcome::Selecting),
        );
        assert_eq!(game.apply(Action::Commit), found("CAT"));
        assert!(game.selection().is_empty());
        assert!(game.is_won());
    }

    #[test]
    fn no_selection() {
        let mut game = WordSearch::new(make_data(
            &["AB"],
            &["AB"],
            Difficulty::Easy,
        ));

        assert_eq!(game.apply(Action::Commit), None);
        assert_eq!(game.apply(Action::Extend(Pos::new(0, 1))), None);
        assert_eq!(game.apply(Action::Start(Pos::new(1, 0))), None);
        assert_eq!(game.apply(Action::Cancel), None);

        game.apply(Action::Start(Pos::new(0, 0)));
        assert_eq!(game.apply(Action::Cancel), Some(Outcome::Cancelled));
        assert_eq!(game.apply(Action::Commit), None);
    }

    #[test]
    fn reverse_reading() {
        let grid = ["DOG", "XXX", "TAC"];

        // On easy the words only read forwards so selecting backwards
        // still finds them
        let mut game = WordSearch::new(make_data(
            &grid,
            &["DOG"],
            Difficulty::Easy,
        ));
        assert_eq!(select(&mut game, &[(0, 2), (0, 0)]), found("DOG"));

        // CAT is only in the grid backwards so it needs hard
        let mut game = WordSearch::new(make_data(
            &grid,
            &["CAT", "DOG"],
            Difficulty::Hard,
        ));
        assert_eq!(select(&mut game, &[(2, 2), (2, 0)]), found("CAT"));
        assert_eq!(
            select(&mut game, &[(2, 0), (2, 2)]),
            Some(Outcome::AlreadyFound("CAT".to_string())),
        );
    }

    #[test]
    fn policy_blocks_matches() {
        // GOD reads backwards along the top row. Even if the words
        // list is checked against a harder policy, a session on easy
        // mustn’t accept it.
        let mut data = make_data(&["DOG", "XXX"], &["GOD"], Difficulty::Hard);
        data.difficulty = Difficulty::Easy;
        let mut game = WordSearch::new(data);

        assert_eq!(select(&mut game, &[(0, 2), (0, 0)]), Some(Outcome::NoMatch));
        assert_eq!(select(&mut game, &[(0, 0), (0, 2)]), Some(Outcome::NoMatch));
        assert!(game.found_words().next().is_none());
    }

    #[test]
    fn diagonals_need_medium() {
        let grid = ["CXX", "XOX", "XXW"];

        let mut game = WordSearch::new(
            make_data(&grid, &["COW"], Difficulty::Medium)
        );
        assert_eq!(select(&mut game, &[(2, 2), (0, 0)]), found("COW"));
        assert!(game.is_won());

        // The same diagonal on easy only reads as a match, it isn’t found
        let mut data = make_data(&grid, &["COW"], Difficulty::Medium);
        data.difficulty = Difficulty::Easy;
        let mut game = WordSearch::new(data);

        assert_eq!(select(&mut game, &[(0, 0), (2, 2)]), Some(Outcome::NoMatch));
        assert_eq!(select(&mut game, &[(2, 2), (0, 0)]), Some(Outcome::NoMatch));
        assert_eq!(game.found_mask().count(), 0);
        assert!(!game.is_won());
    }

    #[test]
    fn already_found() {
        let mut game = WordSearch::new(make_data(
            &["CAT", "ATX", "TXX"],
            &["CAT", "AT"],
            Difficulty::Easy,
        ));

        assert_eq!(select(&mut game, &[(0, 0), (0, 2)]), found("CAT"));
        assert_eq!(
            select(&mut game, &[(0, 0), (0, 2)]),
            Some(Outcome::AlreadyFound("CAT".to_string())),
        );
        // The same word in another place is also already found
        assert_eq!(
            select(&mut game, &[(0, 0), (2, 0)]),
            Some(Outcome::AlreadyFound("CAT".to_string())),
        );
        assert_eq!(select(&mut game, &[(0, 0), (1, 0)]), Some(Outcome::NoMatch));
        assert_eq!(game.found_words().count(), 1);
        assert_eq!(game.found_mask().count(), 3);

        assert_eq!(select(&mut game, &[(1, 0), (1, 1)]), found("AT"));
        assert!(game.is_won());

        assert_eq!(
            game.found_words().collect::<Vec<_>>(),
            &[
                FoundWord {
                    word: "CAT".to_string(),
                    path: vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)],
                },
                FoundWord {
                    word: "AT".to_string(),
                    path: vec![Pos::new(1, 0), Pos::new(1, 1)],
                },
            ],
        );

        game.reset();
        assert!(!game.is_won());
        assert_eq!(game.found_mask().count(), 0);
    }

    #[test]
    fn single_cat() {
        let mut session = new_session(make_data(
            &["CAT", "XXX", "XXX"],
            &["CAT"],
            Difficulty::Easy,
        ));

        session.tick();
        session.act(Action::Start(Pos::new(0, 0)));
        session.act(Action::Extend(Pos::new(0, 1)));
        session.act(Action::Extend(Pos::new(0, 2)));
        assert_eq!(session.act(Action::Commit), found("CAT"));
        assert_eq!(session.status(), Status::Won);
        assert_eq!(session.pending_finish(), Some(Status::Won));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.seconds, 1);
        assert_eq!(&snapshot.board.grid, &["CAT", "XXX", "XXX"]);
        assert!(snapshot.board.words[0].found);
        assert_eq!(snapshot.board.found_cells.len(), 3);
    }
}
