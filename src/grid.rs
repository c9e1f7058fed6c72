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

use std::fmt;
use serde::{Serialize, Deserialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize,
)]
pub struct Pos {
    pub row: u32,
    pub col: u32,
}

impl Pos {
    pub fn new(row: u32, col: u32) -> Pos {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    values: Box<[T]>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    #[display("empty grid")]
    EmptyGrid,
    #[display("row {row} has {found} cells but the first row has {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Grid<char> {
    // Builds a grid from newline-separated rows. Blank lines before the
    // first row and after the last row are ignored, and rows shorter
    // than the longest one are padded with `fill`.
    pub fn from_text(s: &str, fill: char) -> Result<Grid<char>, Error> {
        let lines = s.lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect::<Vec<_>>();

        let Some(first) = lines.iter().position(|l| !l.trim().is_empty())
        else {
            return Err(Error::EmptyGrid);
        };
        // There is at least one non-blank line so this can’t fail
        let last = lines.iter().rposition(|l| !l.trim().is_empty())
            .unwrap_or(first);

        let lines = &lines[first..=last];

        let width = lines.iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut values = Vec::with_capacity(width * lines.len());

        for (row, line) in lines.iter().enumerate() {
            values.extend(line.chars());
            values.resize((row + 1) * width, fill);
        }

        Ok(Grid {
            values: values.into_boxed_slice(),
            width: width as u32,
            height: lines.len() as u32,
        })
    }
}

impl<T> Grid<T> {
    pub fn from_rows<I, R>(rows: I) -> Result<Grid<T>, Error>
        where I: IntoIterator<Item = R>,
              R: IntoIterator<Item = T>
    {
        let mut values = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (row, cells) in rows.into_iter().enumerate() {
            let before = values.len();
            values.extend(cells);
            let found = values.len() - before;

            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(Error::RaggedRows { row, expected, found });
                },
                Some(_) => (),
            }

            height += 1;
        }

        match width {
            None | Some(0) => Err(Error::EmptyGrid),
            Some(width) => Ok(Grid {
                values: values.into_boxed_slice(),
                width: width as u32,
                height,
            }),
        }
    }

    pub fn filled(width: u32, height: u32, value: T) -> Grid<T>
        where T: Clone
    {
        Grid {
            values: vec![value; (width * height) as usize].into_boxed_slice(),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // Positions stepped off the top or left edge wrap around to
    // u32::MAX so a single comparison catches both sides.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.contains(pos) &&
            (pos.row == 0 ||
             pos.col == 0 ||
             pos.row + 1 == self.height ||
             pos.col + 1 == self.width)
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(self.contains(pos));

        (pos.row * self.width + pos.col) as usize
    }

    pub fn at(&self, pos: Pos) -> &T {
        &self.values[self.index(pos)]
    }

    pub fn at_mut(&mut self, pos: Pos) -> &mut T {
        let index = self.index(pos);
        &mut self.values[index]
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.contains(pos).then(|| self.at(pos))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;

        (0..self.height)
            .flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks(self.width as usize)
    }

    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
        where F: FnMut(Pos, &T) -> U
    {
        Grid {
            values: self.positions().map(|pos| f(pos, self.at(pos))).collect(),
            width: self.width,
            height: self.height,
        }
    }

    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Grid<U>, E>
        where F: FnMut(Pos, T) -> Result<U, E>
    {
        let width = self.width;
        let height = self.height;
        let mut values = Vec::with_capacity(self.values.len());

        for (i, value) in self.values.into_vec().into_iter().enumerate() {
            let pos = Pos::new(i as u32 / width, i as u32 % width);
            values.push(f(pos, value)?);
        }

        Ok(Grid {
            values: values.into_boxed_slice(),
            width,
            height,
        })
    }
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for &ch in row {
                write!(f, "{}", ch)?;
            }
        }

        Ok(())
    }
}
