use std::fmt;
use std::time::Duration;

/// A temporary effect gained by eating special food
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum PowerUp {
    /// The snake may pass through its own body
    Ghost,

    /// The edges of the grid wrap around instead of killing the snake
    Wrap,
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerUp::Ghost => "GHOST",
            PowerUp::Wrap => "WRAP",
        };
        f.pad(name)
    }
}

/// Tracks the single active power-up and when it runs out.
///
/// Times are measured on the session's game clock, which only advances while
/// the game is being played, so a paused game never loses power-up time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PowerUpTimer {
    duration: Duration,
    active: Option<Active>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Active {
    kind: PowerUp,
    expires_at: Duration,
}

impl PowerUpTimer {
    pub(crate) fn new(duration: Duration) -> PowerUpTimer {
        PowerUpTimer {
            duration,
            active: None,
        }
    }

    /// Start `kind` at time `now`, replacing whatever was active.  Durations
    /// do not stack.
    pub(crate) fn activate(&mut self, kind: PowerUp, now: Duration) {
        self.active = Some(Active {
            kind,
            expires_at: now.saturating_add(self.duration),
        });
    }

    /// Expire the active power-up if its time is up.  Returns the power-up
    /// that expired, if any.
    pub(crate) fn tick(&mut self, now: Duration) -> Option<PowerUp> {
        let active = self.active?;
        if now >= active.expires_at {
            self.active = None;
            Some(active.kind)
        } else {
            None
        }
    }

    pub(crate) fn current(&self) -> Option<PowerUp> {
        self.active.map(|a| a.kind)
    }

    /// Return the active power-up along with how much time it has left as of
    /// `now`
    pub(crate) fn remaining(&self, now: Duration) -> Option<(PowerUp, Duration)> {
        self.active.map(|a| (a.kind, a.expires_at.saturating_sub(now)))
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
    }
}
