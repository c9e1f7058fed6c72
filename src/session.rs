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

// The state machine shared by every kind of puzzle.
//
// A `Session` owns the status, the clock and a `Rules` object that
// knows how to apply player actions to one kind of board. Time only
// advances when the host calls `Session::tick` so the session never
// looks at the wall clock itself.

use serde::Serialize;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize,
    derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    #[display("won")]
    Won,
    // The time ran out before the puzzle was finished
    #[display("over")]
    Over,
}

impl Status {
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Won | Status::Over)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Clock {
    Stopwatch {
        elapsed: u32,
    },
    Countdown {
        remaining: u32,
        duration: u32,
    },
}

impl Clock {
    pub fn stopwatch() -> Clock {
        Clock::Stopwatch { elapsed: 0 }
    }

    pub fn countdown(duration: u32) -> Clock {
        Clock::Countdown { remaining: duration, duration }
    }

    // Returns true if a countdown has run out after this tick. A
    // countdown that starts at zero runs out on the first tick.
    fn tick(&mut self) -> bool {
        match self {
            Clock::Stopwatch { elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                false
            },
            Clock::Countdown { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            },
        }
    }

    fn reset(&mut self) {
        match self {
            Clock::Stopwatch { elapsed } => *elapsed = 0,
            Clock::Countdown { remaining, duration } => *remaining = *duration,
        }
    }

    pub fn elapsed(&self) -> u32 {
        match *self {
            Clock::Stopwatch { elapsed } => elapsed,
            Clock::Countdown { remaining, duration } => duration - remaining,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match *self {
            Clock::Stopwatch { .. } => None,
            Clock::Countdown { remaining, .. } => Some(remaining),
        }
    }

    // The number that the timer display should show
    pub fn display_seconds(&self) -> u32 {
        self.remaining().unwrap_or_else(|| self.elapsed())
    }
}

pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// The game-specific half of a session.
//
// `apply` validates an action against the board. Returning `None`
// means the action was rejected and nothing changed. The session
// only forwards actions while it is playing and consults `is_won`
// after every accepted one.
pub trait Rules {
    type Action;
    type Outcome;
    type Snapshot: Serialize;

    fn apply(&mut self, action: Self::Action) -> Option<Self::Outcome>;

    fn is_won(&self) -> bool;

    fn reset(&mut self);

    fn snapshot(&self) -> Self::Snapshot;
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<S> {
    pub status: Status,
    pub seconds: u32,
    pub clock: Clock,
    pub board: S,
}

#[derive(Debug, Clone)]
pub struct Session<R> {
    rules: R,
    status: Status,
    clock: Clock,
    pending_finish: Option<Status>,
}

impl<R: Rules> Session<R> {
    pub fn new(rules: R, clock: Clock) -> Session<R> {
        Session {
            rules,
            status: Status::Playing,
            clock,
            pending_finish: None,
        }
    }

    fn finish(&mut self, status: Status) {
        log::info!(
            "puzzle finished: {:?} after {} seconds",
            status,
            self.clock.elapsed(),
        );
        self.status = status;
        self.pending_finish = Some(status);
    }

    pub fn act(&mut self, action: R::Action) -> Option<R::Outcome> {
        if !self.status.is_playing() {
            return None;
        }

        let outcome = self.rules.apply(action)?;

        if self.rules.is_won() {
            self.finish(Status::Won);
        }

        Some(outcome)
    }

    pub fn tick(&mut self) {
        if !self.status.is_playing() {
            return;
        }

        if self.clock.tick() {
            let status = if self.rules.is_won() {
                Status::Won
            } else {
                Status::Over
            };
            self.finish(status);
        }
    }

    // Returns whether the session is now paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Playing => self.status = Status::Paused,
            Status::Paused => self.status = Status::Playing,
            Status::Won | Status::Over => (),
        }

        log::debug!("pause toggled, status is now {:?}", self.status);

        self.status.is_paused()
    }

    pub fn reset(&mut self) {
        self.rules.reset();
        self.clock.reset();
        self.status = Status::Playing;
        self.pending_finish = None;
        log::debug!("session reset");
    }

    // Reports a transition to Won or Over exactly once
    pub fn pending_finish(&mut self) -> Option<Status> {
        self.pending_finish.take()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn snapshot(&self) -> Snapshot<R::Snapshot> {
        Snapshot {
            status: self.status,
            seconds: self.clock.display_seconds(),
            clock: self.clock,
            board: self.rules.snapshot(),
        }
    }
}
