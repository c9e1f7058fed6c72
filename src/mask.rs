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

use super::grid::Pos;

// One flag per cell, for example the cells covered by found words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMask {
    values: Box<[bool]>,
    width: u32,
}

impl CellMask {
    pub fn new(width: u32, height: u32) -> CellMask {
        CellMask {
            values: vec![false; (width * height) as usize].into_boxed_slice(),
            width,
        }
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(pos.col < self.width);

        (pos.row * self.width + pos.col) as usize
    }

    pub fn at(&self, pos: Pos) -> bool {
        self.values[self.index(pos)]
    }

    // Returns whether the cell was newly set
    pub fn set(&mut self, pos: Pos) -> bool {
        let index = self.index(pos);
        !std::mem::replace(&mut self.values[index], true)
    }

    pub fn clear(&mut self) {
        self.values.fill(false);
    }

    pub fn count(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;

        self.values.iter().enumerate().filter_map(move |(i, &v)| {
            v.then(|| Pos::new(i as u32 / width, i as u32 % width))
        })
    }
}
