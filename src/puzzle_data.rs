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

// Puzzles as they arrive from the generator, and the checks that
// turn them into puzzles that a session can be started with.
//
// The generator emits JSON. Each `Generated*` struct mirrors one of
// its output shapes and converting it to the matching `*Data` type
// validates everything that the game logic later relies on. A
// puzzle that fails here must never reach a session.

use std::str::FromStr;
use serde::{Serialize, Deserialize};
use super::grid::{self, Grid, Pos};
use super::directions::{self, Difficulty, Direction, Ray};
use super::word_finder::{self, Placement};
use super::{scramble, maze};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Error {
    #[display("{_0}")]
    #[from]
    Grid(grid::Error),
    #[display("{_0}")]
    #[from]
    Json(serde_json::Error),
    #[display("invalid letter at {pos}")]
    InvalidCell {
        pos: Pos,
    },
    #[display("the puzzle has no words")]
    NoWords,
    #[display("empty word")]
    EmptyWord,
    #[display("“{word}” can’t be found in the grid")]
    WordNotPlaced {
        word: String,
    },
    #[display("the puzzle has no clues")]
    NoClues,
    #[display(
        "the grid is {found_rows}×{found_cols} but {rows}×{cols} was declared"
    )]
    DimensionMismatch {
        rows: u32,
        cols: u32,
        found_rows: u32,
        found_cols: u32,
    },
    #[display("{number} {orientation} has an invalid answer")]
    InvalidAnswer {
        number: u32,
        orientation: Orientation,
    },
    #[display("{number} {orientation} runs off the grid")]
    ClueOutOfBounds {
        number: u32,
        orientation: Orientation,
    },
    #[display("{number} {orientation} covers the blocked cell at {pos}")]
    ClueBlocked {
        number: u32,
        orientation: Orientation,
        pos: Pos,
    },
    #[display("crossing answers disagree at {pos}")]
    ConflictingAnswers {
        pos: Pos,
    },
    #[display("there are no letters to scramble")]
    EmptyRack,
    #[display("invalid letter at index {index}")]
    InvalidLetter {
        index: usize,
    },
    #[display("“{word}” can’t be made from the letters")]
    UnformableWord {
        word: String,
    },
    #[display("invalid maze character {ch:?} at {pos}")]
    InvalidMazeChar {
        ch: char,
        pos: Pos,
    },
    #[display("the maze has no {what}")]
    MissingEndpoint {
        what: &'static str,
    },
    #[display("the maze has a second {what} at {pos}")]
    DuplicateEndpoint {
        what: &'static str,
        pos: Pos,
    },
    #[display("the {what} at {pos} isn’t on the border")]
    EndpointNotOnBorder {
        what: &'static str,
        pos: Pos,
    },
    #[display("the maze is marked as unsolvable")]
    DeclaredUnsolvable,
    #[display("there is no path from the start to the end")]
    NoPath,
}

// Words are compared in upper case and ignoring spaces so that
// answers like “ice cream” can be matched against a grid of letters
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

// Returns the letter that should be stored for `ch`, or None if it
// isn’t a letter that can go in a single cell
pub fn normalize_letter(ch: char) -> Option<char> {
    if !ch.is_alphabetic() {
        return None;
    }

    let mut upper = ch.to_uppercase();
    let first = upper.next()?;

    upper.next().is_none().then_some(first)
}

fn parse_letter(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let ch = chars.next()?;

    if chars.next().is_some() {
        None
    } else {
        normalize_letter(ch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PuzzleKind {
    #[display("word-search")]
    WordSearch,
    #[display("crossword")]
    Crossword,
    #[display("letter-scramble")]
    Scramble,
    #[display("maze")]
    Maze,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown puzzle kind {name:?}")]
pub struct UnknownPuzzleKind {
    name: String,
}

impl FromStr for PuzzleKind {
    type Err = UnknownPuzzleKind;

    fn from_str(s: &str) -> Result<PuzzleKind, UnknownPuzzleKind> {
        match s {
            "word-search" => Ok(PuzzleKind::WordSearch),
            "crossword" => Ok(PuzzleKind::Crossword),
            "letter-scramble" => Ok(PuzzleKind::Scramble),
            "maze" => Ok(PuzzleKind::Maze),
            _ => Err(UnknownPuzzleKind { name: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedWordSearch {
    pub grid: Vec<Vec<String>>,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedClue {
    pub number: u32,
    pub clue: String,
    pub answer: String,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedClues {
    #[serde(default)]
    pub across: Vec<GeneratedClue>,
    #[serde(default)]
    pub down: Vec<GeneratedClue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedCrossword {
    // null is a blocked cell. Anything else is a cell to fill in.
    pub grid: Vec<Vec<Option<String>>>,
    pub clues: GeneratedClues,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub cols: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScramble {
    pub letters: Vec<String>,
    pub possible_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMaze {
    pub maze_data: String,
    pub is_solvable: bool,
}

#[derive(Debug, Clone)]
pub struct SearchWord {
    // The word as the generator wrote it
    pub text: String,
    // The letters to look for in the grid
    pub key: String,
    pub placement: Placement,
}

#[derive(Debug, Clone)]
pub struct WordSearchData {
    pub grid: Grid<char>,
    pub words: Vec<SearchWord>,
    pub difficulty: Difficulty,
}

impl GeneratedWordSearch {
    pub fn validate(
        self,
        difficulty: Difficulty,
    ) -> Result<WordSearchData, Error> {
        let grid = Grid::from_rows(self.grid)?.try_map(|pos, cell| {
            parse_letter(&cell).ok_or(Error::InvalidCell { pos })
        })?;

        let mut finder = word_finder::Finder::new();
        let mut words = Vec::<SearchWord>::with_capacity(self.words.len());

        for text in self.words {
            let key = normalize_word(&text);

            if key.is_empty() {
                return Err(Error::EmptyWord);
            }

            if words.iter().any(|word| word.key == key) {
                log::warn!("dropping duplicate word “{}”", text);
                continue;
            }

            let Some(placement) = finder.find(&grid, &key, difficulty)
            else {
                return Err(Error::WordNotPlaced { word: text });
            };

            words.push(SearchWord {
                text: text.trim().to_string(),
                key,
                placement,
            });
        }

        if words.is_empty() {
            return Err(Error::NoWords);
        }

        Ok(WordSearchData { grid, words, difficulty })
    }
}

impl WordSearchData {
    pub fn from_json(
        json: &str,
        difficulty: Difficulty,
    ) -> Result<WordSearchData, Error> {
        serde_json::from_str::<GeneratedWordSearch>(json)?.validate(difficulty)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[display("across")]
    Across,
    #[display("down")]
    Down,
}

impl Orientation {
    pub fn direction(self) -> Direction {
        match self {
            Orientation::Across => Direction::East,
            Orientation::Down => Direction::South,
        }
    }

    pub fn toggle(self) -> Orientation {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub number: u32,
    pub text: String,
    pub answer: String,
    pub start: Pos,
    pub orientation: Orientation,
}

impl Clue {
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    // The cells that the answer occupies
    pub fn cells(&self) -> Ray {
        directions::ray(self.start, self.orientation.direction(), self.len())
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells().any(|cell| cell == pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blocked,
    Open(Option<char>),
}

impl Cell {
    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Blocked => None,
            Cell::Open(letter) => letter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrosswordData {
    // Letters of the answers. Open cells that no answer crosses have
    // no letter.
    pub solution: Grid<Cell>,
    // Across clues first, then down clues
    pub clues: Vec<Clue>,
}

fn add_clue(
    solution: &mut Grid<Cell>,
    clue: GeneratedClue,
    orientation: Orientation,
) -> Result<Clue, Error> {
    let number = clue.number;
    let answer = normalize_word(&clue.answer);

    if answer.is_empty() ||
        answer.chars().any(|ch| normalize_letter(ch) != Some(ch))
    {
        return Err(Error::InvalidAnswer { number, orientation });
    }

    let clue = Clue {
        number,
        text: clue.clue,
        answer,
        start: Pos::new(clue.row, clue.col),
        orientation,
    };

    for (pos, letter) in clue.cells().zip(clue.answer.chars()) {
        match solution.get(pos).copied() {
            None => {
                return Err(Error::ClueOutOfBounds { number, orientation });
            },
            Some(Cell::Blocked) => {
                return Err(Error::ClueBlocked { number, orientation, pos });
            },
            Some(Cell::Open(Some(existing))) if existing != letter => {
                return Err(Error::ConflictingAnswers { pos });
            },
            Some(Cell::Open(_)) => {
                *solution.at_mut(pos) = Cell::Open(Some(letter));
            },
        }
    }

    Ok(clue)
}

impl TryFrom<GeneratedCrossword> for CrosswordData {
    type Error = Error;

    fn try_from(data: GeneratedCrossword) -> Result<CrosswordData, Error> {
        let mut solution = Grid::from_rows(data.grid.into_iter().map(|row| {
            row.into_iter().map(|cell| match cell {
                None => Cell::Blocked,
                Some(_) => Cell::Open(None),
            })
        }))?;

        let found_rows = solution.height();
        let found_cols = solution.width();

        if data.rows.is_some_and(|rows| rows != found_rows) ||
            data.cols.is_some_and(|cols| cols != found_cols)
        {
            return Err(Error::DimensionMismatch {
                rows: data.rows.unwrap_or(found_rows),
                cols: data.cols.unwrap_or(found_cols),
                found_rows,
                found_cols,
            });
        }

        let clues = data.clues.across.into_iter()
            .map(|clue| (clue, Orientation::Across))
            .chain(
                data.clues.down.into_iter()
                    .map(|clue| (clue, Orientation::Down))
            )
            .map(|(clue, orientation)| {
                add_clue(&mut solution, clue, orientation)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if clues.is_empty() {
            return Err(Error::NoClues);
        }

        Ok(CrosswordData { solution, clues })
    }
}

impl CrosswordData {
    pub fn from_json(json: &str) -> Result<CrosswordData, Error> {
        serde_json::from_str::<GeneratedCrossword>(json)?.try_into()
    }
}

#[derive(Debug, Clone)]
pub struct ScrambleData {
    pub letters: Vec<char>,
    // Normalized, without duplicates
    pub words: Vec<String>,
}

impl TryFrom<GeneratedScramble> for ScrambleData {
    type Error = Error;

    fn try_from(data: GeneratedScramble) -> Result<ScrambleData, Error> {
        let letters = data.letters.iter()
            .enumerate()
            .map(|(index, letter)| {
                parse_letter(letter).ok_or(Error::InvalidLetter { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if letters.is_empty() {
            return Err(Error::EmptyRack);
        }

        let mut words = Vec::<String>::new();

        for word in data.possible_words {
            let key = normalize_word(&word);

            if key.is_empty() {
                return Err(Error::EmptyWord);
            }

            if !scramble::is_formable(&key, &letters) {
                return Err(Error::UnformableWord { word });
            }

            if words.contains(&key) {
                log::warn!("dropping duplicate word “{}”", word);
                continue;
            }

            words.push(key);
        }

        if words.is_empty() {
            return Err(Error::NoWords);
        }

        Ok(ScrambleData { letters, words })
    }
}

impl ScrambleData {
    pub fn from_json(json: &str) -> Result<ScrambleData, Error> {
        serde_json::from_str::<GeneratedScramble>(json)?.try_into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeCell {
    Wall,
    Open,
    Start,
    End,
}

impl MazeCell {
    pub fn from_char(ch: char) -> Option<MazeCell> {
        match ch {
            '#' => Some(MazeCell::Wall),
            ' ' => Some(MazeCell::Open),
            'S' => Some(MazeCell::Start),
            'E' => Some(MazeCell::End),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            MazeCell::Wall => '#',
            MazeCell::Open => ' ',
            MazeCell::Start => 'S',
            MazeCell::End => 'E',
        }
    }

    pub fn is_wall(self) -> bool {
        self == MazeCell::Wall
    }
}

#[derive(Debug, Clone)]
pub struct MazeData {
    pub cells: Grid<MazeCell>,
    pub start: Pos,
    pub end: Pos,
}

fn find_endpoint(
    cells: &Grid<MazeCell>,
    kind: MazeCell,
    what: &'static str,
) -> Result<Pos, Error> {
    let mut found = cells.positions().filter(|&pos| *cells.at(pos) == kind);

    let Some(pos) = found.next()
    else {
        return Err(Error::MissingEndpoint { what });
    };

    if let Some(pos) = found.next() {
        return Err(Error::DuplicateEndpoint { what, pos });
    }

    if !cells.is_border(pos) {
        return Err(Error::EndpointNotOnBorder { what, pos });
    }

    Ok(pos)
}

impl TryFrom<GeneratedMaze> for MazeData {
    type Error = Error;

    fn try_from(data: GeneratedMaze) -> Result<MazeData, Error> {
        if !data.is_solvable {
            return Err(Error::DeclaredUnsolvable);
        }

        // Short rows are padded with walls
        let cells = Grid::from_text(&data.maze_data, '#')?
            .try_map(|pos, ch| {
                MazeCell::from_char(ch).ok_or(Error::InvalidMazeChar { ch, pos })
            })?;

        let start = find_endpoint(&cells, MazeCell::Start, "start")?;
        let end = find_endpoint(&cells, MazeCell::End, "end")?;

        if maze::solve(&cells, start, end).is_none() {
            return Err(Error::NoPath);
        }

        Ok(MazeData { cells, start, end })
    }
}

impl MazeData {
    pub fn from_json(json: &str) -> Result<MazeData, Error> {
        serde_json::from_str::<GeneratedMaze>(json)?.try_into()
    }
}

#[derive(Debug, Clone)]
pub enum PuzzleData {
    WordSearch(WordSearchData),
    Crossword(CrosswordData),
    Scramble(ScrambleData),
    Maze(MazeData),
}

pub fn parse(
    kind: PuzzleKind,
    json: &str,
    difficulty: Difficulty,
) -> Result<PuzzleData, Error> {
    Ok(match kind {
        PuzzleKind::WordSearch => {
            PuzzleData::WordSearch(WordSearchData::from_json(json, difficulty)?)
        },
        PuzzleKind::Crossword => {
            PuzzleData::Crossword(CrosswordData::from_json(json)?)
        },
        PuzzleKind::Scramble => {
            PuzzleData::Scramble(ScrambleData::from_json(json)?)
        },
        PuzzleKind::Maze => PuzzleData::Maze(MazeData::from_json(json)?),
    })
}
