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

use serde::{Serialize, Deserialize};
use super::directions::Difficulty;

pub const DEFAULT_SCRAMBLE_DURATION: u32 = 5 * 60;
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // Which directions words in a word search may run in
    pub difficulty: Difficulty,
    // Length of a letter scramble game in seconds
    pub scramble_duration: u32,
    // Number of words needed to win a letter scramble. If this isn’t
    // set then every possible word has to be found.
    pub scramble_target: Option<usize>,
    // Minimum distance in pixels for a touch swipe to move in a maze
    pub swipe_threshold: f64,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            difficulty: Difficulty::default(),
            scramble_duration: DEFAULT_SCRAMBLE_DURATION,
            scramble_target: None,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl GameConfig {
    pub fn from_json(s: &str) -> Result<GameConfig, serde_json::Error> {
        serde_json::from_str(s)
    }
}
