use super::direction::Direction;
use super::engine::{Collision, Engine, StepResult};
use super::food::{self, Food, FoodKind};
use super::geometry::{Grid, Point};
use super::power_up::{PowerUp, PowerUpTimer};
use crate::consts;
use crate::tuning::Tuning;
use log::{debug, info, trace};
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    /// Waiting for the first game to be started
    Start,
    Playing,
    Paused,
    GameOver,
}

/// A discrete command from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Input {
    Move(Direction),
    StartOrRestart,
    TogglePause,
}

/// Something happened that the audio & celebration layers may want to react
/// to.  Cues are fire-and-forget; nothing they do feeds back into the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// A menu-like command (start, pause, resume) took effect
    UiClick,
    Ate(FoodKind),
    PowerUpActivated(PowerUp),
    Died(Collision),
    /// The game that just ended beat the previous high score.  Emitted at
    /// most once per game.
    NewHighScore(u32),
}

/// A game of snake from start screen to game over and back again: the
/// simulation plus the score, high score, and lifecycle state wrapped
/// around it.
///
/// All mutation happens in [`Session::handle()`] and [`Session::tick()`].
/// Input only ever touches the pending direction or the lifecycle state;
/// the snake and the food only change inside a tick.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    rng: R,
    tuning: Tuning,
    state: GameState,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    engine: Engine,
    /// The direction to commit at the start of the next tick
    pending: Direction,
    power_up: PowerUpTimer,
    /// Total play time of the current game: one tick interval per executed
    /// tick, so paused time is never counted
    clock: Duration,
    cues: Vec<Cue>,
}

impl Session<rand::rngs::ThreadRng> {
    pub(crate) fn new(tuning: Tuning, high_score: u32) -> Self {
        Session::new_with_rng(tuning, high_score, rand::rng())
    }
}

impl<R: Rng> Session<R> {
    pub(crate) fn new_with_rng(tuning: Tuning, high_score: u32, mut rng: R) -> Session<R> {
        let snake = tuning.initial_snake();
        let food = food::spawn_clear_of(&mut rng, tuning.grid, &snake);
        Session {
            rng,
            tuning,
            state: GameState::Start,
            score: 0,
            high_score,
            new_high_score: false,
            engine: Engine::new(tuning.grid, snake, food),
            pending: Tuning::INITIAL_DIRECTION,
            power_up: PowerUpTimer::new(consts::POWER_UP_DURATION),
            clock: Duration::ZERO,
            cues: Vec::new(),
        }
    }

    /// Apply a command.  Commands that make no sense in the current state are
    /// ignored.
    pub(crate) fn handle(&mut self, input: Input) {
        match input {
            Input::Move(direction) => self.turn(direction),
            Input::StartOrRestart => self.start(),
            Input::TogglePause => self.toggle_pause(),
        }
    }

    /// Run one tick of the game.  Does nothing and returns `None` unless the
    /// game is being played.
    pub(crate) fn tick(&mut self) -> Option<StepResult> {
        if self.state != GameState::Playing {
            return None;
        }
        self.clock = self.clock.saturating_add(self.tuning.tick_interval);
        if let Some(expired) = self.power_up.tick(self.clock) {
            debug!("{expired} power-up expired");
        }
        // One reading of the power-up for the whole step
        let power_up = self.power_up.current();
        let result = self.engine.step(self.pending, power_up);
        trace!("Step {} with {power_up:?}: {result:?}", self.pending);
        if result.grew() {
            debug!("Snake grew to {} cells", self.engine.snake().len());
        }
        match result {
            StepResult::Moved { ate: Some(kind) } => self.eat(kind),
            StepResult::Moved { ate: None } => (),
            StepResult::Died(collision) => self.game_over(collision),
        }
        Some(result)
    }

    fn turn(&mut self, direction: Direction) {
        if self.state == GameState::Playing && !direction.same_axis(self.engine.snake().direction())
        {
            self.pending = direction;
        }
    }

    fn start(&mut self) {
        if matches!(self.state, GameState::Start | GameState::GameOver) {
            self.reset();
            self.state = GameState::Playing;
            self.cues.push(Cue::UiClick);
            info!("New game started");
        }
    }

    fn toggle_pause(&mut self) {
        if !self.tuning.pause_enabled {
            return;
        }
        match self.state {
            GameState::Playing => {
                self.state = GameState::Paused;
                self.cues.push(Cue::UiClick);
                debug!("Game paused");
            }
            GameState::Paused => {
                self.state = GameState::Playing;
                self.cues.push(Cue::UiClick);
                debug!("Game resumed");
            }
            GameState::Start | GameState::GameOver => (),
        }
    }

    fn reset(&mut self) {
        let snake = self.tuning.initial_snake();
        let food = food::spawn_clear_of(&mut self.rng, self.tuning.grid, &snake);
        self.engine = Engine::new(self.tuning.grid, snake, food);
        self.pending = Tuning::INITIAL_DIRECTION;
        self.power_up.clear();
        self.clock = Duration::ZERO;
        self.score = 0;
        self.new_high_score = false;
    }

    fn eat(&mut self, kind: FoodKind) {
        self.score = self.score.saturating_add(self.tuning.score_per_food);
        self.cues.push(Cue::Ate(kind));
        if let Some(power_up) = kind.power_up() {
            self.power_up.activate(power_up, self.clock);
            self.cues.push(Cue::PowerUpActivated(power_up));
            debug!("{power_up} power-up activated");
        }
        let food = food::spawn_clear_of(&mut self.rng, self.engine.grid(), self.engine.snake());
        debug!("Spawned {} food at {}", food.kind, food.position);
        self.engine.set_food(food);
    }

    fn game_over(&mut self, collision: Collision) {
        self.state = GameState::GameOver;
        self.power_up.clear();
        self.cues.push(Cue::Died(collision));
        info!("Game over ({collision:?}) with score {}", self.score);
        if self.score > self.high_score {
            info!(
                "New high score: {} (previous: {})",
                self.score, self.high_score
            );
            self.high_score = self.score;
            self.new_high_score = true;
            self.cues.push(Cue::NewHighScore(self.score));
        }
    }
}

impl<R> Session<R> {
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Remove and return all cues emitted since the last call
    pub(crate) fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Copy out everything needed to draw the current frame
    pub(crate) fn snapshot(&self) -> Snapshot {
        let snake = self.engine.snake();
        Snapshot {
            grid: self.engine.grid(),
            body: snake.body().collect(),
            direction: snake.direction(),
            food: self.engine.food(),
            power_up: self.power_up.remaining(self.clock),
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            state: self.state,
            pause_enabled: self.tuning.pause_enabled,
        }
    }
}

/// A read-only copy of the game as of one frame
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    /// The snake's cells from head to tail
    pub(crate) body: Vec<Point>,
    pub(crate) direction: Direction,
    pub(crate) food: Food,
    /// The active power-up and how much play time it has left
    pub(crate) power_up: Option<(PowerUp, Duration)>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    /// Whether the game that just ended set a new high score
    pub(crate) new_high_score: bool,
    pub(crate) state: GameState,
    pub(crate) pause_enabled: bool,
}

impl Snapshot {
    pub(crate) fn power_up_kind(&self) -> Option<PowerUp> {
        self.power_up.map(|(kind, _)| kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::Snake;
    use crate::tuning::Variant;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn session(tuning: Tuning, high_score: u32) -> Session<ChaCha12Rng> {
        Session::new_with_rng(tuning, high_score, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn playing(variant: Variant) -> Session<ChaCha12Rng> {
        let mut s = session(variant.tuning(), 0);
        s.handle(Input::StartOrRestart);
        assert_eq!(s.state(), GameState::Playing);
        let _ = s.take_cues();
        s
    }

    fn put_food(s: &mut Session<ChaCha12Rng>, x: i32, y: i32, kind: FoodKind) {
        s.engine.set_food(Food {
            position: Point::new(x, y),
            kind,
        });
    }

    /// Move the food somewhere the snake will not reach during a test
    fn park_food(s: &mut Session<ChaCha12Rng>) {
        let y = i32::from(s.tuning.grid.height) - 1;
        put_food(s, 0, y, FoodKind::Normal);
    }

    #[test]
    fn starts_on_start_screen() {
        let mut s = session(Variant::Classic.tuning(), 0);
        assert_eq!(s.state(), GameState::Start);
        assert_eq!(s.tick(), None);
        s.handle(Input::Move(Direction::North));
        assert_eq!(s.pending, Direction::East);
        s.handle(Input::StartOrRestart);
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.take_cues(), [Cue::UiClick]);
        let snap = s.snapshot();
        assert_eq!(snap.body, [Point::new(10, 10)]);
        assert_eq!(snap.direction, Direction::East);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.power_up, None);
        assert!(!snap.body.contains(&snap.food.position));
    }

    #[test]
    fn eat_normal_food() {
        let mut s = playing(Variant::Classic);
        put_food(&mut s, 11, 10, FoodKind::Normal);
        assert_eq!(
            s.tick(),
            Some(StepResult::Moved {
                ate: Some(FoodKind::Normal)
            })
        );
        let snap = s.snapshot();
        assert_eq!(snap.body, [Point::new(11, 10), Point::new(10, 10)]);
        assert_eq!(snap.score, 10);
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.power_up, None);
        assert!(!snap.body.contains(&snap.food.position));
        assert_eq!(s.take_cues(), [Cue::Ate(FoodKind::Normal)]);
    }

    #[test]
    fn neon_scores_fifty() {
        let mut s = playing(Variant::Neon);
        put_food(&mut s, 11, 10, FoodKind::Normal);
        let _ = s.tick();
        assert_eq!(s.score(), 50);
        assert_eq!(s.snapshot().body.len(), 4);
    }

    #[test]
    fn wall_death_keeps_body() {
        let mut s = playing(Variant::Classic);
        s.engine.snake = Snake {
            head: Point::new(0, 10),
            tail: VecDeque::from([Point::new(1, 10)]),
            direction: Direction::West,
        };
        s.pending = Direction::West;
        park_food(&mut s);
        assert_eq!(s.tick(), Some(StepResult::Died(Collision::Wall)));
        let snap = s.snapshot();
        assert_eq!(snap.state, GameState::GameOver);
        assert_eq!(snap.body, [Point::new(0, 10), Point::new(1, 10)]);
        assert_eq!(s.take_cues(), [Cue::Died(Collision::Wall)]);
        // Nothing moves once the game is over
        assert_eq!(s.tick(), None);
        assert_eq!(s.snapshot().body, snap.body);
    }

    #[test]
    fn wrap_power_up_crosses_edge() {
        let mut s = playing(Variant::Classic);
        s.engine.snake = Snake {
            head: Point::new(0, 10),
            tail: VecDeque::from([Point::new(1, 10)]),
            direction: Direction::West,
        };
        s.pending = Direction::West;
        park_food(&mut s);
        s.power_up.activate(PowerUp::Wrap, s.clock);
        assert_eq!(s.tick(), Some(StepResult::Moved { ate: None }));
        let snap = s.snapshot();
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.body, [Point::new(29, 10), Point::new(0, 10)]);
    }

    #[test]
    fn last_legal_turn_wins() {
        let mut s = playing(Variant::Classic);
        park_food(&mut s);
        s.handle(Input::Move(Direction::North));
        s.handle(Input::Move(Direction::South));
        // Same axis as the direction of travel, so ignored
        s.handle(Input::Move(Direction::West));
        s.handle(Input::Move(Direction::East));
        let _ = s.tick();
        assert_eq!(s.snapshot().body[0], Point::new(10, 11));
        assert_eq!(s.snapshot().direction, Direction::South);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut s = playing(Variant::Neon);
        park_food(&mut s);
        s.handle(Input::Move(Direction::West));
        assert_eq!(s.tick(), Some(StepResult::Moved { ate: None }));
        assert_eq!(s.snapshot().body[0], Point::new(11, 10));
    }

    #[test]
    fn turns_check_active_direction_not_pending() {
        let mut s = playing(Variant::Neon);
        park_food(&mut s);
        s.handle(Input::Move(Direction::North));
        // South reverses the pending direction but not the active one
        s.handle(Input::Move(Direction::South));
        let _ = s.tick();
        assert_eq!(s.snapshot().body[0], Point::new(10, 11));
    }

    #[test]
    fn ghost_power_up_expires() {
        let tuning = Tuning {
            grid: Grid::new(200, 20),
            ..Variant::Classic.tuning()
        };
        let mut s = session(tuning, 0);
        s.handle(Input::StartOrRestart);
        put_food(&mut s, 11, 10, FoodKind::Ghost);
        let _ = s.tick();
        park_food(&mut s);
        assert_eq!(
            s.take_cues(),
            [
                Cue::UiClick,
                Cue::Ate(FoodKind::Ghost),
                Cue::PowerUpActivated(PowerUp::Ghost)
            ]
        );
        assert_eq!(
            s.snapshot().power_up,
            Some((PowerUp::Ghost, Duration::from_millis(7000)))
        );
        let ticks = consts::POWER_UP_DURATION.as_millis() / tuning.tick_interval.as_millis();
        for _ in 1..ticks {
            assert_eq!(s.tick(), Some(StepResult::Moved { ate: None }));
            assert_eq!(s.snapshot().power_up_kind(), Some(PowerUp::Ghost));
        }
        let _ = s.tick();
        assert_eq!(s.snapshot().power_up, None);
    }

    #[test]
    fn eating_power_up_food_replaces_active_power_up() {
        let mut s = playing(Variant::Classic);
        s.power_up.activate(PowerUp::Ghost, s.clock);
        put_food(&mut s, 11, 10, FoodKind::Wrap);
        let _ = s.tick();
        assert_eq!(
            s.snapshot().power_up,
            Some((PowerUp::Wrap, consts::POWER_UP_DURATION))
        );
    }

    #[test]
    fn pause_freezes_game_and_power_up() {
        let mut s = playing(Variant::Neon);
        park_food(&mut s);
        s.power_up.activate(PowerUp::Ghost, s.clock);
        let _ = s.tick();
        let before = s.snapshot();
        s.handle(Input::TogglePause);
        assert_eq!(s.state(), GameState::Paused);
        for _ in 0..100 {
            assert_eq!(s.tick(), None);
        }
        s.handle(Input::Move(Direction::North));
        s.handle(Input::StartOrRestart);
        assert_eq!(s.state(), GameState::Paused);
        s.handle(Input::TogglePause);
        assert_eq!(s.state(), GameState::Playing);
        let after = s.snapshot();
        assert_eq!(after.body, before.body);
        assert_eq!(after.power_up, before.power_up);
        assert_eq!(s.pending, Direction::East);
        assert_eq!(s.take_cues(), [Cue::UiClick, Cue::UiClick]);
    }

    #[test]
    fn classic_cannot_pause() {
        let mut s = playing(Variant::Classic);
        s.handle(Input::TogglePause);
        assert_eq!(s.state(), GameState::Playing);
        assert!(s.take_cues().is_empty());
    }

    #[test]
    fn cannot_pause_before_start() {
        let mut s = session(Variant::Neon.tuning(), 0);
        s.handle(Input::TogglePause);
        assert_eq!(s.state(), GameState::Start);
    }

    #[test]
    fn start_is_ignored_while_playing() {
        let mut s = playing(Variant::Classic);
        park_food(&mut s);
        let _ = s.tick();
        s.handle(Input::StartOrRestart);
        assert_eq!(s.snapshot().body, [Point::new(11, 10)]);
        assert!(s.take_cues().is_empty());
    }

    fn die(s: &mut Session<ChaCha12Rng>) {
        park_food(s);
        s.pending = Direction::North;
        s.engine.snake.direction = Direction::North;
        while s.state() == GameState::Playing {
            let _ = s.tick();
        }
    }

    #[test]
    fn new_high_score() {
        let mut s = session(Variant::Classic.tuning(), 5);
        s.handle(Input::StartOrRestart);
        put_food(&mut s, 11, 10, FoodKind::Normal);
        let _ = s.tick();
        die(&mut s);
        assert_eq!(s.high_score(), 10);
        assert!(s.snapshot().new_high_score);
        let cues = s.take_cues();
        assert_eq!(
            cues.iter()
                .filter(|c| matches!(c, Cue::NewHighScore(_)))
                .count(),
            1
        );
        assert_eq!(cues.last(), Some(&Cue::NewHighScore(10)));
    }

    #[rstest]
    #[case(10)]
    #[case(20)]
    fn high_score_not_beaten(#[case] previous: u32) {
        let mut s = session(Variant::Classic.tuning(), previous);
        s.handle(Input::StartOrRestart);
        put_food(&mut s, 11, 10, FoodKind::Normal);
        let _ = s.tick();
        die(&mut s);
        assert_eq!(s.score(), 10);
        assert_eq!(s.high_score(), previous);
        assert!(!s.snapshot().new_high_score);
        assert!(!s
            .take_cues()
            .iter()
            .any(|c| matches!(c, Cue::NewHighScore(_))));
    }

    #[test]
    fn restart_resets_everything() {
        let mut s = playing(Variant::Neon);
        put_food(&mut s, 11, 10, FoodKind::Wrap);
        let _ = s.tick();
        die(&mut s);
        assert_eq!(s.state(), GameState::GameOver);
        assert!(s.snapshot().new_high_score);
        s.handle(Input::StartOrRestart);
        let snap = s.snapshot();
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.high_score, 50);
        assert!(!snap.new_high_score);
        assert_eq!(snap.power_up, None);
        assert_eq!(
            snap.body,
            [Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(snap.direction, Direction::East);
        assert_eq!(s.pending, Direction::East);
        assert_eq!(s.clock, Duration::ZERO);
    }

    #[test]
    fn step_invariants_hold_in_random_play() {
        let mut s = session(Variant::Classic.tuning(), 0);
        let mut moves = ChaCha12Rng::seed_from_u64(!RNG_SEED);
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        let mut deaths = 0;
        for _ in 0..5000 {
            if s.state() != GameState::Playing {
                s.handle(Input::StartOrRestart);
            }
            if moves.random_bool(0.3) {
                s.handle(Input::Move(directions[moves.random_range(0..4)]));
            }
            let before = s.snapshot();
            let Some(result) = s.tick() else {
                panic!("tick should run while playing");
            };
            let after = s.snapshot();
            match result {
                StepResult::Moved { ate } => {
                    let grew = ate.is_some();
                    assert_eq!(grew, after.body[0] == before.food.position);
                    assert_eq!(after.body.len(), before.body.len() + usize::from(grew));
                    let points = if grew { 10 } else { 0 };
                    assert_eq!(after.score, before.score + points);
                    assert!(after.grid.in_bounds(after.body[0]));
                    if let Some(power_up) = ate.and_then(FoodKind::power_up) {
                        assert_eq!(after.power_up_kind(), Some(power_up));
                    }
                }
                StepResult::Died(_) => {
                    deaths += 1;
                    assert_eq!(after.state, GameState::GameOver);
                    assert_eq!(after.body, before.body);
                    assert_eq!(after.score, before.score);
                }
            }
        }
        assert!(deaths > 0);
    }
}
