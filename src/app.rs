use crate::command::Command;
use crate::config::Config;
use crate::game::{Cue, Direction, GameState, Input, Session};
use crate::highscores::HighScores;
use crate::screen;
use crate::swipe::SwipeTracker;
use crate::tuning::Variant;
use crossterm::event::{poll, read, Event};
use log::{debug, info, warn};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::num::NonZeroU32;
use std::time::Instant;

/// The running program: a game session plus everything around it that talks
/// to the terminal and the filesystem
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    session: Session<R>,
    variant: Variant,
    config: Config,
    /// `None` if the high scores file could not be read, in which case it is
    /// left alone rather than overwritten
    high_scores: Option<HighScores>,
    swipe: SwipeTracker,
    /// When the next tick is due.  Only set while the game is being played.
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(
        session: Session<R>,
        variant: Variant,
        config: Config,
        high_scores: Option<HighScores>,
    ) -> App<R> {
        App {
            session,
            variant,
            config,
            high_scores,
            swipe: SwipeTracker::new(),
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        info!("Playing {} variant", self.variant);
        while !self.quitting {
            let snapshot = self.session.snapshot();
            terminal.draw(|frame| screen::draw(&snapshot, frame))?;
            self.process_input()?;
            if self.dispatch_cues() {
                ring_bell()?;
            }
        }
        Ok(())
    }

    /// Wait for either the next input event or, if the game is being played,
    /// the next tick, whichever comes first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if self.session.state() == GameState::Playing {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.session.tuning().tick_interval);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                let _ = self.session.tick();
                self.next_tick = None;
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.next_tick = None;
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let input = match event {
            Event::FocusLost => (self.session.state() == GameState::Playing
                && self.session.tuning().pause_enabled)
                .then_some(Input::TogglePause),
            Event::Mouse(ev) => self.swipe.handle_mouse(ev).map(Input::Move),
            _ => event
                .as_key_press_event()
                .and_then(Command::from_key_event)
                .and_then(|cmd| self.command_input(cmd)),
        };
        if let Some(input) = input {
            self.session.handle(input);
        }
    }

    fn command_input(&mut self, cmd: Command) -> Option<Input> {
        match cmd {
            Command::Quit | Command::Q => {
                self.quitting = true;
                None
            }
            Command::Up => Some(Input::Move(Direction::North)),
            Command::Down => Some(Input::Move(Direction::South)),
            Command::Left => Some(Input::Move(Direction::West)),
            Command::Right => Some(Input::Move(Direction::East)),
            Command::Enter => Some(Input::StartOrRestart),
            Command::Space => match self.session.state() {
                GameState::Start | GameState::GameOver => Some(Input::StartOrRestart),
                GameState::Playing | GameState::Paused => Some(Input::TogglePause),
            },
            Command::Esc | Command::P => Some(Input::TogglePause),
        }
    }

    /// React to the cues the session has emitted since the last call.
    /// Returns `true` if the terminal bell should be rung.
    fn dispatch_cues(&mut self) -> bool {
        let mut bell = false;
        for cue in self.session.take_cues() {
            match cue {
                Cue::UiClick => debug!("Cue: click"),
                Cue::Ate(kind) => debug!("Cue: ate {kind} food"),
                Cue::PowerUpActivated(power_up) => debug!("Cue: {power_up} activated"),
                Cue::Died(collision) => {
                    debug!("Cue: died ({collision:?})");
                    info!(
                        "Final score {} (high score {})",
                        self.session.score(),
                        self.session.high_score()
                    );
                    bell = true;
                }
                Cue::NewHighScore(score) => {
                    debug!("Cue: new high score");
                    self.record_high_score(score);
                }
            }
        }
        bell
    }

    fn record_high_score(&mut self, score: u32) {
        let Some(score) = NonZeroU32::new(score) else {
            return;
        };
        info!("New high score for {} variant: {score}", self.variant);
        let Some(high_scores) = self.high_scores.as_mut() else {
            warn!("Not saving high score: high scores file was unreadable at startup");
            return;
        };
        high_scores.set(self.variant, score);
        if let Err(e) = self.config.save_high_scores(high_scores) {
            warn!("{:#}", anyhow::Error::new(e));
        }
    }
}

fn ring_bell() -> io::Result<()> {
    crossterm::execute!(io::stdout(), crossterm::style::Print('\u{7}'))
}
