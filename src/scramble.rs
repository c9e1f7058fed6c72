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

use std::collections::HashMap;
use serde::Serialize;
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use super::puzzle_data::{self, ScrambleData};
use super::session::{self, Session, Clock};
use super::config::GameConfig;

// Whether `word` can be spelled with `letters` using each letter at
// most once
pub fn is_formable(word: &str, letters: &[char]) -> bool {
    let mut available = HashMap::<char, usize>::new();

    for &letter in letters {
        *available.entry(letter).or_insert(0) += 1;
    }

    word.chars().all(|ch| {
        match available.get_mut(&ch) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            },
            _ => false,
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    // Stays the same when the rack is shuffled
    pub id: usize,
    pub letter: char,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Tap the tile at this position in the rack
    Tap(usize),
    Backspace,
    Submit,
    // A whole word typed on the keyboard
    Guess(String),
    Shuffle {
        seed: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Found(String),
    AlreadyFound(String),
    NotInList(String),
    // Uses a letter more times than it appears in the rack
    Unformable(String),
}

#[derive(Debug, Clone)]
pub struct Scramble {
    tiles: Vec<Tile>,
    words: Vec<String>,
    guess: Vec<usize>,
    found: Vec<String>,
    target: usize,
}

impl Scramble {
    pub fn new(data: ScrambleData, target: Option<usize>) -> Scramble {
        let tiles = data.letters.into_iter()
            .enumerate()
            .map(|(id, letter)| Tile { id, letter, used: false })
            .collect::<Vec<_>>();

        let n_words = data.words.len();
        let target = target.unwrap_or(n_words).clamp(1, n_words.max(1));

        Scramble {
            tiles,
            words: data.words,
            guess: Vec::new(),
            found: Vec::new(),
            target,
        }
    }

    fn tile_by_id(&mut self, id: usize) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id == id)
    }

    pub fn guess(&self) -> String {
        self.guess.iter()
            .filter_map(|&id| self.tiles.iter().find(|tile| tile.id == id))
            .map(|tile| tile.letter)
            .collect()
    }

    fn release_tiles(&mut self) {
        self.guess.clear();

        for tile in self.tiles.iter_mut() {
            tile.used = false;
        }
    }

    fn tap(&mut self, index: usize) -> Option<Outcome> {
        let tile = self.tiles.get_mut(index)?;

        if tile.used {
            return None;
        }

        tile.used = true;
        let id = tile.id;
        self.guess.push(id);

        Some(Outcome::Updated)
    }

    fn backspace(&mut self) -> Option<Outcome> {
        let id = self.guess.pop()?;

        if let Some(tile) = self.tile_by_id(id) {
            tile.used = false;
        }

        Some(Outcome::Updated)
    }

    fn add_found(&mut self, word: String) {
        let length = word.chars().count();
        // Longest first, words of the same length in the order found
        let pos = self.found.iter()
            .position(|w| w.chars().count() < length)
            .unwrap_or(self.found.len());

        self.found.insert(pos, word);
    }

    fn judge(&mut self, word: String) -> Outcome {
        let letters = self.tiles.iter().map(|tile| tile.letter)
            .collect::<Vec<_>>();

        let outcome = if !is_formable(&word, &letters) {
            Outcome::Unformable(word)
        } else if self.found.contains(&word) {
            Outcome::AlreadyFound(word)
        } else if self.words.contains(&word) {
            self.add_found(word.clone());
            Outcome::Found(word)
        } else {
            Outcome::NotInList(word)
        };

        log::debug!("guess judged: {:?}", outcome);

        outcome
    }

    fn submit(&mut self) -> Option<Outcome> {
        let word = self.guess();

        self.release_tiles();

        (!word.is_empty()).then(|| self.judge(word))
    }

    fn submit_word(&mut self, word: &str) -> Option<Outcome> {
        let word = puzzle_data::normalize_word(word);

        self.release_tiles();

        (!word.is_empty()).then(|| self.judge(word))
    }

    fn shuffle(&mut self, seed: u64) -> Option<Outcome> {
        let mut rng = SmallRng::seed_from_u64(seed);

        self.tiles.shuffle(&mut rng);

        Some(Outcome::Updated)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn found(&self) -> &[String] {
        &self.found
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn n_words(&self) -> usize {
        self.words.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tiles: Vec<Tile>,
    pub guess: String,
    pub found: Vec<String>,
    pub target: usize,
    pub total: usize,
}

impl session::Rules for Scramble {
    type Action = Action;
    type Outcome = Outcome;
    type Snapshot = Snapshot;

    fn apply(&mut self, action: Action) -> Option<Outcome> {
        match action {
            Action::Tap(index) => self.tap(index),
            Action::Backspace => self.backspace(),
            Action::Submit => self.submit(),
            Action::Guess(word) => self.submit_word(&word),
            Action::Shuffle { seed } => self.shuffle(seed),
        }
    }

    fn is_won(&self) -> bool {
        self.found.len() >= self.target
    }

    fn reset(&mut self) {
        self.release_tiles();
        self.found.clear();
        self.tiles.sort_unstable_by_key(|tile| tile.id);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: self.tiles.clone(),
            guess: self.guess(),
            found: self.found.clone(),
            target: self.target,
            total: self.words.len(),
        }
    }
}

pub fn new_session(data: ScrambleData, config: &GameConfig) -> Session<Scramble> {
    Session::new(
        Scramble::new(data, config.scramble_target),
        Clock::countdown(config.scramble_duration),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use super::session::Rules;
    use proptest::prelude::*;

    fn scramble(letters: &str, words: &[&str]) -> Scramble {
        Scramble::new(
            ScrambleData {
                letters: letters.chars().collect(),
                words: words.iter().map(|w| w.to_string()).collect(),
            },
            None,
        )
    }

    fn found(word: &str) -> Option<Outcome> {
        Some(Outcome::Found(word.to_string()))
    }

    #[test]
    fn formable() {
        assert!(is_formable("BAA", &['A', 'A', 'B']));
        assert!(is_formable("", &['A']));
        assert!(!is_formable("AAA", &['A', 'A', 'B']));
        assert!(!is_formable("C", &['A', 'A', 'B']));
    }

    #[test]
    fn tap_and_backspace() {
        let mut game = scramble("AAB", &["BAA", "AB"]);

        assert_eq!(game.apply(Action::Tap(2)), Some(Outcome::Updated));
        assert_eq!(game.apply(Action::Tap(0)), Some(Outcome::Updated));
        // The same tile can’t be used twice
        assert_eq!(game.apply(Action::Tap(0)), None);
        assert_eq!(game.apply(Action::Tap(7)), None);
        assert_eq!(&game.guess(), "BA");
        assert!(game.tiles()[0].used);
        assert!(!game.tiles()[1].used);

        assert_eq!(game.apply(Action::Backspace), Some(Outcome::Updated));
        assert_eq!(&game.guess(), "B");
        assert!(!game.tiles()[0].used);

        game.apply(Action::Tap(1));
        game.apply(Action::Tap(0));
        assert_eq!(game.apply(Action::Submit), found("BAA"));

        // Submitting releases every tile
        assert!(game.tiles().iter().all(|tile| !tile.used));
        assert_eq!(&game.guess(), "");

        game.apply(Action::Backspace);
        assert_eq!(game.apply(Action::Backspace), None);
        assert_eq!(game.apply(Action::Submit), None);
    }

    #[test]
    fn outcomes() {
        let mut game = scramble("AAB", &["AB", "BAA"]);

        assert_eq!(
            game.apply(Action::Guess("aaa".to_string())),
            Some(Outcome::Unformable("AAA".to_string())),
        );
        assert_eq!(
            game.apply(Action::Guess("ba".to_string())),
            Some(Outcome::NotInList("BA".to_string())),
        );
        assert_eq!(game.apply(Action::Guess("ab".to_string())), found("AB"));
        assert_eq!(
            game.apply(Action::Guess("AB".to_string())),
            Some(Outcome::AlreadyFound("AB".to_string())),
        );
        assert_eq!(game.apply(Action::Guess("  ".to_string())), None);
        assert_eq!(game.found(), &["AB"]);
        assert!(!game.is_won());

        assert_eq!(game.apply(Action::Guess("baa".to_string())), found("BAA"));
        assert!(game.is_won());
    }

    #[test]
    fn found_order() {
        let mut game = scramble(
            "STONE",
            &["ON", "TO", "STONE", "NOTE", "ONE", "TONE", "NO"],
        );

        for word in ["ON", "NOTE", "ONE", "TO", "STONE", "TONE"] {
            assert_eq!(game.apply(Action::Guess(word.to_string())), found(word));
        }

        assert_eq!(
            game.found(),
            &["STONE", "NOTE", "TONE", "ONE", "ON", "TO"],
        );
    }

    #[test]
    fn shuffle_keeps_guess() {
        let mut game = scramble("ABCDEFGH", &["ACE"]);

        game.apply(Action::Tap(0));
        game.apply(Action::Tap(2));
        game.apply(Action::Tap(4));

        assert_eq!(
            game.apply(Action::Shuffle { seed: 7 }),
            Some(Outcome::Updated),
        );

        assert_eq!(&game.guess(), "ACE");

        let mut letters = game.tiles().iter()
            .map(|tile| tile.letter)
            .collect::<Vec<_>>();
        letters.sort_unstable();
        assert_eq!(letters.into_iter().collect::<String>(), "ABCDEFGH");

        for tile in game.tiles() {
            assert_eq!(tile.used, "ACE".contains(tile.letter));
        }

        // The same seed always gives the same order
        let mut other = scramble("ABCDEFGH", &["ACE"]);
        other.apply(Action::Shuffle { seed: 7 });
        assert_eq!(
            game.tiles().iter().map(|t| t.id).collect::<Vec<_>>(),
            other.tiles().iter().map(|t| t.id).collect::<Vec<_>>(),
        );

        assert_eq!(game.apply(Action::Submit), found("ACE"));

        game.reset();
        assert!(game.found().is_empty());
        assert!(game.tiles().iter().enumerate().all(|(i, tile)| tile.id == i));
    }

    #[test]
    fn target() {
        let data = ScrambleData {
            letters: vec!['A', 'B'],
            words: vec!["A".to_string(), "B".to_string(), "AB".to_string()],
        };

        assert_eq!(Scramble::new(data.clone(), None).target(), 3);
        assert_eq!(Scramble::new(data.clone(), Some(2)).target(), 2);
        assert_eq!(Scramble::new(data.clone(), Some(0)).target(), 1);
        assert_eq!(Scramble::new(data, Some(10)).target(), 3);
    }

    #[test]
    fn countdown() {
        let data = ScrambleData {
            letters: vec!['A', 'B'],
            words: vec!["AB".to_string(), "BA".to_string()],
        };
        let config = GameConfig {
            scramble_duration: 3,
            scramble_target: Some(1),
            ..GameConfig::default()
        };

        let mut session = new_session(data.clone(), &config);
        session.tick();
        session.tick();
        assert!(session.status().is_playing());
        session.tick();
        assert!(session.status().is_over());
        assert_eq!(session.act(Action::Guess("AB".to_string())), None);

        // Reaching the target wins straight away
        let mut session = new_session(data, &config);
        session.tick();
        assert_eq!(session.act(Action::Guess("ba".to_string())), found("BA"));
        assert!(session.status().is_won());
        assert_eq!(session.clock().remaining(), Some(2));
    }

    proptest! {
        #[test]
        fn formable_iff_counts_fit(
            letters in proptest::collection::vec(
                proptest::char::range('A', 'E'),
                0..8,
            ),
            word in "[A-E]{0,8}",
        ) {
            let count = |s: &mut dyn Iterator<Item = char>, ch| {
                s.filter(|&c| c == ch).count()
            };

            let expected = word.chars().all(|ch| {
                count(&mut word.chars(), ch) <=
                    count(&mut letters.iter().copied(), ch)
            });

            prop_assert_eq!(is_formable(&word, &letters), expected);
        }
    }
}
