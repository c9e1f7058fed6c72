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

// The eight straight lines through a cell of a square grid. A word
// reads “forwards” when it runs left to right, or top to bottom for
// vertical words. Diagonals count as forwards when they run left to
// right whether they go up or down.

use std::str::FromStr;
use serde::{Serialize, Deserialize};
use super::grid::Pos;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[display("east")]
    East,
    #[display("south-east")]
    SouthEast,
    #[display("south")]
    South,
    #[display("south-west")]
    SouthWest,
    #[display("west")]
    West,
    #[display("north-west")]
    NorthWest,
    #[display("north")]
    North,
    #[display("north-east")]
    NorthEast,
}

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
    Direction::North,
    Direction::NorthEast,
];

impl Direction {
    // Returns (row offset, column offset)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
        }
    }

    pub fn from_delta(d_row: i32, d_col: i32) -> Option<Direction> {
        ALL_DIRECTIONS.into_iter().find(|dir| dir.delta() == (d_row, d_col))
    }

    pub fn reverse(self) -> Direction {
        let (d_row, d_col) = self.delta();
        // Every direction has an opposite
        Direction::from_delta(-d_row, -d_col).unwrap_or(self)
    }

    pub fn is_diagonal(self) -> bool {
        let (d_row, d_col) = self.delta();
        d_row != 0 && d_col != 0
    }

    pub fn is_forwards(self) -> bool {
        matches!(
            self,
            Direction::East |
            Direction::South |
            Direction::SouthEast |
            Direction::NorthEast
        )
    }
}

pub fn step(pos: Pos, direction: Direction) -> Pos {
    let (d_row, d_col) = direction.delta();

    Pos::new(
        pos.row.wrapping_add_signed(d_row),
        pos.col.wrapping_add_signed(d_col),
    )
}

// Returns the direction of the straight line from `start` to `end`, or
// None if they are the same cell or aren’t on a horizontal, vertical
// or 45° diagonal line.
pub fn line_direction(start: Pos, end: Pos) -> Option<Direction> {
    let d_row = end.row as i64 - start.row as i64;
    let d_col = end.col as i64 - start.col as i64;

    if d_row == 0 && d_col == 0 {
        return None;
    }

    if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
        return None;
    }

    Direction::from_delta(d_row.signum() as i32, d_col.signum() as i32)
}

// All of the cells from `start` to `end` inclusive, in order
pub fn line_between(start: Pos, end: Pos) -> Option<Vec<Pos>> {
    if start == end {
        return Some(vec![start]);
    }

    let direction = line_direction(start, end)?;
    let len = start.row.abs_diff(end.row).max(start.col.abs_diff(end.col));

    Some(ray(start, direction, len as usize + 1).collect())
}

// `len` cells starting at `start` and stepping in `direction`. This is
// the span of a crossword answer or of a word search placement.
pub fn ray(start: Pos, direction: Direction, len: usize) -> Ray {
    Ray {
        next: start,
        direction,
        remaining: len,
    }
}

#[derive(Debug, Clone)]
pub struct Ray {
    next: Pos,
    direction: Direction,
    remaining: usize,
}

impl Iterator for Ray {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.remaining == 0 {
            None
        } else {
            self.remaining -= 1;
            let pos = self.next;
            self.next = step(pos, self.direction);
            Some(pos)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ray {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty {name:?}")]
pub struct UnknownDifficulty {
    name: String,
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Difficulty, UnknownDifficulty> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty { name: s.to_string() }),
        }
    }
}

impl Difficulty {
    // Whether a word may be placed running in `direction`. Easy
    // puzzles only have horizontal and vertical words read forwards,
    // medium adds forward diagonals and hard allows anything.
    pub fn allows(self, direction: Direction) -> bool {
        match self {
            Difficulty::Easy => {
                direction.is_forwards() && !direction.is_diagonal()
            },
            Difficulty::Medium => direction.is_forwards(),
            Difficulty::Hard => true,
        }
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> {
        ALL_DIRECTIONS.into_iter().filter(move |&dir| self.allows(dir))
    }
}
