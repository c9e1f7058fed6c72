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

use std::collections::VecDeque;
use serde::Serialize;
use super::grid::{Grid, Pos};
use super::directions::{self, Direction};
use super::puzzle_data::{MazeCell, MazeData};
use super::session::{self, Session, Clock};
use super::config::GameConfig;

const STEPS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

// Shortest route from `start` to `end` including both ends, found
// with a breadth-first search
pub fn solve(cells: &Grid<MazeCell>, start: Pos, end: Pos) -> Option<Vec<Pos>> {
    let mut came_from = Grid::filled(cells.width(), cells.height(), None);
    let mut queue = VecDeque::new();

    *came_from.at_mut(start) = Some(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if pos == end {
            let mut path = vec![end];
            let mut pos = end;

            while pos != start {
                pos = (*came_from.at(pos))?;
                path.push(pos);
            }

            path.reverse();

            return Some(path);
        }

        for dir in STEPS {
            let next = directions::step(pos, dir);

            match cells.get(next) {
                Some(cell) if !cell.is_wall() => (),
                _ => continue,
            }

            if came_from.at(next).is_none() {
                *came_from.at_mut(next) = Some(pos);
                queue.push_back(next);
            }
        }
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // One step where dx is the column offset and dy is the row offset
    Move {
        dx: i32,
        dy: i32,
    },
    // The distance a finger moved across the screen in pixels
    Swipe {
        dx: f64,
        dy: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved(Pos),
}

#[derive(Debug, Clone)]
pub struct Maze {
    cells: Grid<MazeCell>,
    start: Pos,
    end: Pos,
    player: Pos,
    moves: u32,
    swipe_threshold: f64,
}

impl Maze {
    pub fn new(data: MazeData, swipe_threshold: f64) -> Maze {
        Maze {
            cells: data.cells,
            start: data.start,
            end: data.end,
            player: data.start,
            moves: 0,
            swipe_threshold,
        }
    }

    fn move_player(&mut self, dx: i32, dy: i32) -> Option<Outcome> {
        if !matches!((dx, dy), (0, 1) | (0, -1) | (1, 0) | (-1, 0)) {
            return None;
        }

        let target = Pos::new(
            self.player.row.wrapping_add_signed(dy),
            self.player.col.wrapping_add_signed(dx),
        );

        if self.cells.get(target)?.is_wall() {
            return None;
        }

        self.player = target;
        self.moves += 1;

        log::debug!("player moved to {}", target);

        Some(Outcome::Moved(target))
    }

    fn swipe(&mut self, dx: f64, dy: f64) -> Option<Outcome> {
        // Only the dominant axis counts
        let (distance, dx, dy) = if dx.abs() > dy.abs() {
            (dx, dx.signum() as i32, 0)
        } else {
            (dy, 0, dy.signum() as i32)
        };

        if distance.abs() > self.swipe_threshold {
            self.move_player(dx, dy)
        } else {
            None
        }
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn cells(&self) -> &Grid<MazeCell> {
        &self.cells
    }

    pub fn solution(&self) -> Option<Vec<Pos>> {
        solve(&self.cells, self.start, self.end)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub rows: Vec<String>,
    pub player: Pos,
    pub end: Pos,
    pub moves: u32,
}

impl session::Rules for Maze {
    type Action = Action;
    type Outcome = Outcome;
    type Snapshot = Snapshot;

    fn apply(&mut self, action: Action) -> Option<Outcome> {
        match action {
            Action::Move { dx, dy } => self.move_player(dx, dy),
            Action::Swipe { dx, dy } => self.swipe(dx, dy),
        }
    }

    fn is_won(&self) -> bool {
        self.player == self.end
    }

    fn reset(&mut self) {
        self.player = self.start;
        self.moves = 0;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.cells.rows()
                .map(|row| row.iter().map(|cell| cell.to_char()).collect())
                .collect(),
            player: self.player,
            end: self.end,
            moves: self.moves,
        }
    }
}

pub fn new_session(data: MazeData, config: &GameConfig) -> Session<Maze> {
    Session::new(
        Maze::new(data, config.swipe_threshold),
        Clock::stopwatch(),
    )
}
