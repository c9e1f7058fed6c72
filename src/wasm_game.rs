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

// The page owns the DOM, the timer interval and the input events. It
// forwards each event to one of the game objects here and redraws from
// the snapshot.

use wasm_bindgen::prelude::*;
use web_sys::console;
use serde::Serialize;
use super::config::GameConfig;
use super::grid::Pos;
use super::puzzle_data::{CrosswordData, MazeData, ScrambleData, WordSearchData};
use super::session::{self, Session};
use super::{crossword, maze, scramble, word_search};

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from(
            format!("{}: {}", record.target(), record.args())
        );

        match record.level() {
            log::Level::Error => console::error_1(&message),
            log::Level::Warn => console::warn_1(&message),
            log::Level::Info => console::info_1(&message),
            log::Level::Debug | log::Level::Trace => {
                console::debug_1(&message)
            },
        }
    }

    fn flush(&self) {
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn show_error<E: std::fmt::Display>(e: E) -> JsValue {
    let message = e.to_string();
    log::error!("{}", message);
    JsValue::from(message)
}

fn load_config(config: Option<String>) -> Result<GameConfig, JsValue> {
    match config {
        Some(json) => GameConfig::from_json(&json).map_err(show_error),
        None => Ok(GameConfig::default()),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(show_error)?;
    js_sys::JSON::parse(&json)
}

// Methods that every game has because they only touch the session
macro_rules! session_methods {
    ($game:ident) => {
        #[wasm_bindgen]
        impl $game {
            pub fn tick(&mut self) {
                self.session.tick();
            }

            pub fn toggle_pause(&mut self) -> bool {
                self.session.toggle_pause()
            }

            pub fn reset(&mut self) {
                self.session.reset();
            }

            pub fn status(&self) -> String {
                self.session.status().to_string()
            }

            pub fn time_text(&self) -> String {
                session::format_time(self.session.clock().display_seconds())
            }

            pub fn pending_finish(&mut self) -> Option<String> {
                self.session.pending_finish()
                    .map(|status| status.to_string())
            }

            pub fn snapshot(&self) -> Result<JsValue, JsValue> {
                to_js(&self.session.snapshot())
            }
        }
    };
}

#[wasm_bindgen]
pub struct WordSearchGame {
    session: Session<word_search::WordSearch>,
}

impl WordSearchGame {
    fn act(&mut self, action: word_search::Action) -> Option<String> {
        use word_search::Outcome;

        self.session.act(action).map(|outcome| {
            match outcome {
                Outcome::Selecting => "selecting",
                Outcome::Cancelled => "cancelled",
                Outcome::Found(_) => "found",
                Outcome::AlreadyFound(_) => "already-found",
                Outcome::NoMatch => "no-match",
            }.to_string()
        })
    }
}

#[wasm_bindgen]
impl WordSearchGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        puzzle: &str,
        config: Option<String>,
    ) -> Result<WordSearchGame, JsValue> {
        let config = load_config(config)?;
        let data = WordSearchData::from_json(puzzle, config.difficulty)
            .map_err(show_error)?;

        Ok(WordSearchGame {
            session: word_search::new_session(data),
        })
    }

    pub fn select_start(&mut self, row: u32, col: u32) -> bool {
        self.act(word_search::Action::Start(Pos::new(row, col))).is_some()
    }

    pub fn select_extend(&mut self, row: u32, col: u32) -> bool {
        self.act(word_search::Action::Extend(Pos::new(row, col))).is_some()
    }

    pub fn select_commit(&mut self) -> Option<String> {
        self.act(word_search::Action::Commit)
    }

    pub fn select_cancel(&mut self) -> bool {
        self.act(word_search::Action::Cancel).is_some()
    }
}

session_methods!(WordSearchGame);

#[wasm_bindgen]
pub struct CrosswordGame {
    session: Session<crossword::Crossword>,
}

impl CrosswordGame {
    fn act(&mut self, action: crossword::Action) -> bool {
        self.session.act(action).is_some()
    }
}

#[wasm_bindgen]
impl CrosswordGame {
    #[wasm_bindgen(constructor)]
    pub fn new(puzzle: &str) -> Result<CrosswordGame, JsValue> {
        let data = CrosswordData::from_json(puzzle).map_err(show_error)?;

        Ok(CrosswordGame {
            session: crossword::new_session(data),
        })
    }

    pub fn click(&mut self, row: u32, col: u32) -> bool {
        self.act(crossword::Action::Click(Pos::new(row, col)))
    }

    pub fn select_clue(&mut self, index: usize) -> bool {
        self.act(crossword::Action::SelectClue(index))
    }

    // The value of the input box for a cell changed
    pub fn type_char(&mut self, row: u32, col: u32, value: &str) -> bool {
        self.act(crossword::Action::Input {
            pos: Pos::new(row, col),
            letter: value.chars().next(),
        })
    }

    pub fn type_letter(&mut self, letter: char) -> bool {
        self.act(crossword::Action::Type(letter))
    }

    pub fn backspace(&mut self) -> bool {
        self.act(crossword::Action::Backspace)
    }

    // Takes the key name from a KeyboardEvent
    pub fn arrow(&mut self, key: &str) -> bool {
        let arrow = match key {
            "ArrowUp" => crossword::Arrow::Up,
            "ArrowDown" => crossword::Arrow::Down,
            "ArrowLeft" => crossword::Arrow::Left,
            "ArrowRight" => crossword::Arrow::Right,
            _ => return false,
        };

        self.act(crossword::Action::Arrow(arrow))
    }

    // Returns the message to show in the toast
    pub fn check(&mut self) -> Option<String> {
        match self.session.act(crossword::Action::Check)? {
            crossword::Outcome::Checked(report) => Some(report.to_string()),
            crossword::Outcome::Updated => None,
        }
    }
}

session_methods!(CrosswordGame);

#[wasm_bindgen]
pub struct ScrambleGame {
    session: Session<scramble::Scramble>,
}

impl ScrambleGame {
    fn act(&mut self, action: scramble::Action) -> Option<String> {
        use scramble::Outcome;

        self.session.act(action).map(|outcome| {
            match outcome {
                Outcome::Updated => "updated",
                Outcome::Found(_) => "found",
                Outcome::AlreadyFound(_) => "already-found",
                Outcome::NotInList(_) => "not-in-list",
                Outcome::Unformable(_) => "unformable",
            }.to_string()
        })
    }
}

#[wasm_bindgen]
impl ScrambleGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        puzzle: &str,
        config: Option<String>,
    ) -> Result<ScrambleGame, JsValue> {
        let config = load_config(config)?;
        let data = ScrambleData::from_json(puzzle).map_err(show_error)?;

        Ok(ScrambleGame {
            session: scramble::new_session(data, &config),
        })
    }

    pub fn tap_letter(&mut self, index: usize) -> bool {
        self.act(scramble::Action::Tap(index)).is_some()
    }

    pub fn backspace(&mut self) -> bool {
        self.act(scramble::Action::Backspace).is_some()
    }

    pub fn submit(&mut self) -> Option<String> {
        self.act(scramble::Action::Submit)
    }

    pub fn submit_word(&mut self, word: &str) -> Option<String> {
        self.act(scramble::Action::Guess(word.to_string()))
    }

    pub fn shuffle(&mut self) -> bool {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;

        self.act(scramble::Action::Shuffle { seed }).is_some()
    }
}

session_methods!(ScrambleGame);

#[wasm_bindgen]
pub struct MazeGame {
    session: Session<maze::Maze>,
}

#[wasm_bindgen]
impl MazeGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        puzzle: &str,
        config: Option<String>,
    ) -> Result<MazeGame, JsValue> {
        let config = load_config(config)?;
        let data = MazeData::from_json(puzzle).map_err(show_error)?;

        Ok(MazeGame {
            session: maze::new_session(data, &config),
        })
    }

    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        self.session.act(maze::Action::Move { dx, dy }).is_some()
    }

    pub fn key(&mut self, key: &str) -> bool {
        let (dx, dy) = match key {
            "ArrowUp" => (0, -1),
            "ArrowDown" => (0, 1),
            "ArrowLeft" => (-1, 0),
            "ArrowRight" => (1, 0),
            _ => return false,
        };

        self.move_player(dx, dy)
    }

    pub fn swipe(&mut self, dx: f64, dy: f64) -> bool {
        self.session.act(maze::Action::Swipe { dx, dy }).is_some()
    }

    pub fn solution_length(&self) -> Option<usize> {
        self.session.rules().solution().map(|path| path.len() - 1)
    }
}

session_methods!(MazeGame);

#[wasm_bindgen]
pub fn init_puzzlebox(debug: bool) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
    }
}
