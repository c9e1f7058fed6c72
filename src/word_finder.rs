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

use super::grid::{Grid, Pos};
use super::directions::{self, Direction, Difficulty, Ray};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: Pos,
    pub direction: Direction,
    pub len: usize,
}

impl Placement {
    pub fn cells(&self) -> Ray {
        directions::ray(self.start, self.direction, self.len)
    }

    pub fn end(&self) -> Pos {
        self.cells().last().unwrap_or(self.start)
    }
}

pub struct Finder {
    letters: Vec<char>,
}

impl Finder {
    pub fn new() -> Finder {
        Finder {
            letters: Vec::new(),
        }
    }

    fn reads_from(
        &self,
        grid: &Grid<char>,
        start: Pos,
        direction: Direction,
    ) -> bool {
        directions::ray(start, direction, self.letters.len())
            .zip(self.letters.iter())
            .all(|(pos, &letter)| grid.get(pos) == Some(&letter))
    }

    // Looks for `word` on a straight line that the difficulty allows.
    // The grid and the word are expected to already be in the same
    // case.
    pub fn find(
        &mut self,
        grid: &Grid<char>,
        word: &str,
        difficulty: Difficulty,
    ) -> Option<Placement> {
        self.letters.clear();
        self.letters.extend(word.chars());

        let &first = self.letters.first()?;

        for start in grid.positions() {
            if *grid.at(start) != first {
                continue;
            }

            for direction in difficulty.directions() {
                if self.reads_from(grid, start, direction) {
                    return Some(Placement {
                        start,
                        direction,
                        len: self.letters.len(),
                    });
                }
            }
        }

        None
    }
}

impl Default for Finder {
    fn default() -> Finder {
        Finder::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn grid() -> Grid<char> {
        Grid::from_text(
            "ABC\n\
             DEF\n\
             GHI",
            ' ',
        ).unwrap()
    }

    #[test]
    fn all_directions() {
        let mut finder = Finder::new();
        let grid = grid();

        let placement = finder.find(&grid, "ABC", Difficulty::Easy).unwrap();
        assert_eq!(placement.start, Pos::new(0, 0));
        assert_eq!(placement.direction, Direction::East);
        assert_eq!(placement.end(), Pos::new(0, 2));

        let placement = finder.find(&grid, "ADG", Difficulty::Easy).unwrap();
        assert_eq!(placement.direction, Direction::South);

        let placement = finder.find(&grid, "AEI", Difficulty::Medium)
            .unwrap();
        assert_eq!(placement.direction, Direction::SouthEast);

        let placement = finder.find(&grid, "GEC", Difficulty::Medium)
            .unwrap();
        assert_eq!(placement.start, Pos::new(2, 0));
        assert_eq!(placement.direction, Direction::NorthEast);

        let placement = finder.find(&grid, "IEA", Difficulty::Hard).unwrap();
        assert_eq!(placement.start, Pos::new(2, 2));
        assert_eq!(placement.direction, Direction::NorthWest);
        assert_eq!(
            placement.cells().collect::<Vec<_>>(),
            &[Pos::new(2, 2), Pos::new(1, 1), Pos::new(0, 0)],
        );
    }

    #[test]
    fn policy_is_respected() {
        let mut finder = Finder::new();
        let grid = grid();

        assert!(finder.find(&grid, "AEI", Difficulty::Easy).is_none());
        assert!(finder.find(&grid, "CBA", Difficulty::Easy).is_none());
        assert!(finder.find(&grid, "CBA", Difficulty::Medium).is_none());
        assert!(finder.find(&grid, "CBA", Difficulty::Hard).is_some());
    }

    #[test]
    fn not_found() {
        let mut finder = Finder::new();
        let grid = grid();

        assert!(finder.find(&grid, "ABCD", Difficulty::Hard).is_none());
        assert!(finder.find(&grid, "AF", Difficulty::Hard).is_none());
        assert!(finder.find(&grid, "", Difficulty::Hard).is_none());
    }

    #[test]
    fn single_letter() {
        let mut finder = Finder::new();
        let placement = finder.find(&grid(), "E", Difficulty::Easy).unwrap();

        assert_eq!(placement.start, Pos::new(1, 1));
        assert_eq!(placement.len, 1);
        assert_eq!(placement.end(), Pos::new(1, 1));
    }
}
