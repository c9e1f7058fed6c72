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

use std::{fs, process::ExitCode, ffi::OsString};
use clap::Parser;
use puzzlebox::config::GameConfig;
use puzzlebox::directions::Difficulty;
use puzzlebox::grid::Grid;
use puzzlebox::maze;
use puzzlebox::puzzle_data::{
    self, Cell, CrosswordData, MazeData, PuzzleData, PuzzleKind,
    ScrambleData, WordSearchData,
};
use puzzlebox::session;

#[derive(Parser)]
#[command(name = "check-puzzle")]
struct Cli {
    #[arg(required = true, value_name = "PUZZLE")]
    puzzles: Vec<OsString>,
    #[arg(short, long, value_name = "KIND")]
    kind: PuzzleKind,
    #[arg(short, long, value_name = "LEVEL")]
    difficulty: Option<Difficulty>,
    #[arg(short, long, value_name = "FILE")]
    config: Option<OsString>,
    #[arg(short = 'H', long)]
    human_readable: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn print_grid<T, F>(grid: &Grid<T>, cell_char: F)
    where F: Fn(&T) -> char
{
    for row in grid.rows() {
        for cell in row {
            print!(" {}", cell_char(cell));
        }

        println!();
    }
}

fn print_word_search(data: &WordSearchData) {
    print_grid(&data.grid, |&ch| ch);

    println!("\nDifficulty: {}\n", data.difficulty);

    for word in data.words.iter() {
        println!(
            "{:<16} {} {}",
            word.text,
            word.placement.start,
            word.placement.direction,
        );
    }
}

fn print_crossword(data: &CrosswordData) {
    print_grid(&data.solution, |&cell| match cell {
        Cell::Blocked => '#',
        Cell::Open(letter) => letter.unwrap_or('.'),
    });

    println!();

    for clue in data.clues.iter() {
        println!(
            "{:>3} {:<6} {} {:<16} {}",
            clue.number,
            clue.orientation,
            clue.start,
            clue.answer,
            clue.text,
        );
    }
}

fn print_scramble(data: &ScrambleData, config: &GameConfig) {
    println!("Letters: {}", data.letters.iter().collect::<String>());

    let target = config.scramble_target
        .unwrap_or(data.words.len())
        .clamp(1, data.words.len());

    println!(
        "Find {} of {} words in {}\n",
        target,
        data.words.len(),
        session::format_time(config.scramble_duration),
    );

    let mut words = data.words.iter().collect::<Vec<_>>();
    words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));

    for word in words {
        println!("{}", word);
    }
}

fn print_maze(data: &MazeData) {
    print_grid(&data.cells, |cell| cell.to_char());

    if let Some(path) = maze::solve(&data.cells, data.start, data.end) {
        println!("\nShortest path: {} steps", path.len() - 1);
    }
}

fn summary(data: &PuzzleData) -> String {
    match data {
        PuzzleData::WordSearch(data) => format!(
            "{}×{} grid, {} words",
            data.grid.height(),
            data.grid.width(),
            data.words.len(),
        ),
        PuzzleData::Crossword(data) => format!(
            "{}×{} grid, {} clues",
            data.solution.height(),
            data.solution.width(),
            data.clues.len(),
        ),
        PuzzleData::Scramble(data) => format!(
            "{} letters, {} words",
            data.letters.len(),
            data.words.len(),
        ),
        PuzzleData::Maze(data) => format!(
            "{}×{} maze, {} steps",
            data.cells.height(),
            data.cells.width(),
            maze::solve(&data.cells, data.start, data.end)
                .map_or(0, |path| path.len() - 1),
        ),
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig, String> {
    let mut config = match cli.config {
        Some(ref filename) => {
            let json = fs::read_to_string(filename).map_err(|e| {
                format!("{}: {}", filename.to_string_lossy(), e)
            })?;

            GameConfig::from_json(&json).map_err(|e| {
                format!("{}: {}", filename.to_string_lossy(), e)
            })?
        },
        None => GameConfig::default(),
    };

    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }

    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if cli.verbose { "debug" } else { "warn" })
    ).init();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    log::debug!("using {:?}", config);

    for filename in cli.puzzles.iter() {
        let json = match fs::read_to_string(filename) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", filename.to_string_lossy(), e);
                return ExitCode::FAILURE;
            },
        };

        let data = match puzzle_data::parse(cli.kind, &json, config.difficulty) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{}: {}", filename.to_string_lossy(), e);
                return ExitCode::FAILURE;
            },
        };

        if cli.human_readable {
            println!("{}\n", filename.to_string_lossy());

            match data {
                PuzzleData::WordSearch(ref data) => print_word_search(data),
                PuzzleData::Crossword(ref data) => print_crossword(data),
                PuzzleData::Scramble(ref data) => {
                    print_scramble(data, &config)
                },
                PuzzleData::Maze(ref data) => print_maze(data),
            }

            println!();
        } else {
            println!(
                "{}: {} ok, {}",
                filename.to_string_lossy(),
                cli.kind,
                summary(&data),
            );
        }
    }

    ExitCode::SUCCESS
}
