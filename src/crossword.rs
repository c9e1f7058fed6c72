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

// Filling in a crossword.
//
// The player has a cursor on one open cell and a direction. Typing
// fills the cell and moves on in reading order: to the next cell in
// the direction, then to the start of the next row (or column for
// down), then back to the top-left corner, always skipping blocked
// cells. The arrow keys and backspace step over blocked cells in the
// same way but stop at the edges of the grid instead of wrapping.
//
// Answers are only marked when the player asks for a check.

use serde::Serialize;
use super::grid::{Grid, Pos};
use super::directions::{self, Direction};
use super::mask::CellMask;
use super::puzzle_data::{self, Cell, Clue, CrosswordData, Orientation};
use super::session::{self, Session, Clock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn direction(self) -> Direction {
        match self {
            Arrow::Up => Direction::North,
            Arrow::Down => Direction::South,
            Arrow::Left => Direction::West,
            Arrow::Right => Direction::East,
        }
    }

    fn orientation(self) -> Orientation {
        match self {
            Arrow::Up | Arrow::Down => Orientation::Down,
            Arrow::Left | Arrow::Right => Orientation::Across,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Click(Pos),
    // Index into the list of clues, across clues first
    SelectClue(usize),
    // The input box for a cell changed. None means it was emptied.
    Input {
        pos: Pos,
        letter: Option<char>,
    },
    // A key pressed with the cursor on a cell
    Type(char),
    Backspace,
    Arrow(Arrow),
    Check,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display,
)]
#[display("You have {correct} correct words so far")]
pub struct CheckReport {
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Checked(CheckReport),
}

#[derive(Debug, Clone)]
pub struct Crossword {
    solution: Grid<Cell>,
    entries: Grid<Cell>,
    clues: Vec<Clue>,
    solved: CellMask,
    cursor: Option<Pos>,
    orientation: Orientation,
    last_check: Option<CheckReport>,
}

fn empty_entries(solution: &Grid<Cell>) -> Grid<Cell> {
    solution.map(|_, &cell| match cell {
        Cell::Blocked => Cell::Blocked,
        Cell::Open(_) => Cell::Open(None),
    })
}

impl Crossword {
    pub fn new(data: CrosswordData) -> Crossword {
        let entries = empty_entries(&data.solution);
        let solved = CellMask::new(data.solution.width(), data.solution.height());

        Crossword {
            solution: data.solution,
            entries,
            clues: data.clues,
            solved,
            cursor: None,
            orientation: Orientation::Across,
            last_check: None,
        }
    }

    fn is_open(&self, pos: Pos) -> bool {
        self.entries.get(pos).is_some_and(|cell| !cell.is_blocked())
    }

    // Next open cell in reading order, wrapping to the top-left
    fn advance(&self, pos: Pos) -> Pos {
        let width = self.entries.width();
        let height = self.entries.height();
        let mut next = pos;

        loop {
            next = match self.orientation {
                Orientation::Across => {
                    if next.col + 1 < width {
                        Pos::new(next.row, next.col + 1)
                    } else if next.row + 1 < height {
                        Pos::new(next.row + 1, 0)
                    } else {
                        Pos::new(0, 0)
                    }
                },
                Orientation::Down => {
                    if next.row + 1 < height {
                        Pos::new(next.row + 1, next.col)
                    } else if next.col + 1 < width {
                        Pos::new(0, next.col + 1)
                    } else {
                        Pos::new(0, 0)
                    }
                },
            };

            // The starting cell is open so this always ends
            if next == pos || self.is_open(next) {
                break next;
            }
        }
    }

    // Next open cell in a straight line, or None at the edge
    fn step_open(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let mut next = pos;

        loop {
            next = directions::step(next, direction);

            if !self.entries.get(next)?.is_blocked() {
                break Some(next);
            }
        }
    }

    fn backwards(&self) -> Direction {
        self.orientation.direction().reverse()
    }

    fn click(&mut self, pos: Pos) -> Option<Outcome> {
        if !self.is_open(pos) {
            return None;
        }

        if self.cursor == Some(pos) {
            self.orientation = self.orientation.toggle();
        } else {
            self.cursor = Some(pos);
        }

        Some(Outcome::Updated)
    }

    fn select_clue(&mut self, index: usize) -> Option<Outcome> {
        let clue = self.clues.get(index)?;

        self.cursor = Some(clue.start);
        self.orientation = clue.orientation;

        Some(Outcome::Updated)
    }

    fn input(&mut self, pos: Pos, letter: Option<char>) -> Option<Outcome> {
        if !self.is_open(pos) {
            return None;
        }

        let letter = match letter {
            Some(ch) => Some(puzzle_data::normalize_letter(ch)?),
            None => None,
        };

        *self.entries.at_mut(pos) = Cell::Open(letter);

        self.cursor = Some(match letter {
            Some(_) => self.advance(pos),
            None => pos,
        });

        Some(Outcome::Updated)
    }

    fn backspace(&mut self) -> Option<Outcome> {
        let cursor = self.cursor?;

        if self.entries.at(cursor).letter().is_some() {
            *self.entries.at_mut(cursor) = Cell::Open(None);
        } else {
            self.cursor = Some(self.step_open(cursor, self.backwards())?);
        }

        Some(Outcome::Updated)
    }

    fn arrow(&mut self, arrow: Arrow) -> Option<Outcome> {
        let cursor = self.cursor?;
        let orientation = arrow.orientation();
        let next = self.step_open(cursor, arrow.direction()).unwrap_or(cursor);

        if next == cursor && orientation == self.orientation {
            return None;
        }

        self.cursor = Some(next);
        self.orientation = orientation;

        Some(Outcome::Updated)
    }

    // What the player has written in the cells of the clue
    pub fn entry_for(&self, clue: &Clue) -> Option<String> {
        clue.cells()
            .map(|pos| self.entries.get(pos).and_then(|cell| cell.letter()))
            .collect()
    }

    fn check(&mut self) -> Option<Outcome> {
        let mut correct = 0;

        for clue in self.clues.iter() {
            if self.entry_for(clue).as_ref() != Some(&clue.answer) {
                continue;
            }

            correct += 1;

            for pos in clue.cells() {
                self.solved.set(pos);
            }
        }

        let report = CheckReport { correct, total: self.clues.len() };

        log::debug!("crossword checked: {}/{}", correct, report.total);

        self.last_check = Some(report);

        Some(Outcome::Checked(report))
    }

    pub fn active_clue(&self) -> Option<usize> {
        let cursor = self.cursor?;

        self.clues.iter().position(|clue| {
            clue.orientation == self.orientation && clue.contains(cursor)
        })
    }

    // The number to print in the corner of a cell
    pub fn clue_number(&self, pos: Pos) -> Option<u32> {
        self.clues.iter()
            .find(|clue| clue.start == pos)
            .map(|clue| clue.number)
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn cursor(&self) -> Option<Pos> {
        self.cursor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn entries(&self) -> &Grid<Cell> {
        &self.entries
    }

    pub fn solution(&self) -> &Grid<Cell> {
        &self.solution
    }

    pub fn solved(&self) -> &CellMask {
        &self.solved
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClueNumber {
    pub pos: Pos,
    pub number: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClueView {
    pub number: u32,
    pub text: String,
    pub orientation: Orientation,
    pub start: Pos,
    pub len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    // null for blocked cells, otherwise the letter or an empty string
    pub grid: Vec<Vec<Option<String>>>,
    pub solved: Vec<Pos>,
    pub numbers: Vec<ClueNumber>,
    pub clues: Vec<ClueView>,
    pub cursor: Option<Pos>,
    pub orientation: Orientation,
    pub active_clue: Option<usize>,
    pub last_check: Option<CheckReport>,
}

impl session::Rules for Crossword {
    type Action = Action;
    type Outcome = Outcome;
    type Snapshot = Snapshot;

    fn apply(&mut self, action: Action) -> Option<Outcome> {
        match action {
            Action::Click(pos) => self.click(pos),
            Action::SelectClue(index) => self.select_clue(index),
            Action::Input { pos, letter } => self.input(pos, letter),
            Action::Type(ch) => self.input(self.cursor?, Some(ch)),
            Action::Backspace => self.backspace(),
            Action::Arrow(arrow) => self.arrow(arrow),
            Action::Check => self.check(),
        }
    }

    fn is_won(&self) -> bool {
        self.last_check.is_some_and(|report| report.correct >= report.total)
    }

    fn reset(&mut self) {
        self.entries = empty_entries(&self.solution);
        self.solved.clear();
        self.cursor = None;
        self.orientation = Orientation::Across;
        self.last_check = None;
    }

    fn snapshot(&self) -> Snapshot {
        let mut numbers = Vec::<ClueNumber>::new();

        for clue in self.clues.iter() {
            if !numbers.iter().any(|n| n.pos == clue.start) {
                numbers.push(ClueNumber { pos: clue.start, number: clue.number });
            }
        }

        Snapshot {
            grid: self.entries.rows()
                .map(|row| {
                    row.iter().map(|&cell| match cell {
                        Cell::Blocked => None,
                        Cell::Open(letter) => Some(
                            letter.map(String::from).unwrap_or_default()
                        ),
                    }).collect()
                })
                .collect(),
            solved: self.solved.positions().collect(),
            numbers,
            clues: self.clues.iter().map(|clue| ClueView {
                number: clue.number,
                text: clue.text.clone(),
                orientation: clue.orientation,
                start: clue.start,
                len: clue.len(),
            }).collect(),
            cursor: self.cursor,
            orientation: self.orientation,
            active_clue: self.active_clue(),
            last_check: self.last_check,
        }
    }
}

pub fn new_session(data: CrosswordData) -> Session<Crossword> {
    Session::new(Crossword::new(data), Clock::stopwatch())
}
