use crate::config::{ConfigError, GameConfig};
use crate::entity::{Point, Target, TargetId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Bounds rejection sampling in `spawn`. Unreachable with a validated config.
const MAX_SPAWN_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Lives ran out. The board is already reset; the host acknowledges with `Game::reset`.
    GameOver { final_score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
}

impl GameState {
    pub fn new(max_lives: u32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
        }
    }

    /// Returns true when the last life was just lost.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

/// What happened during one `Game::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub crossed: u32,
    pub game_over: bool,
}

pub struct Game {
    // Validated at construction; read-only afterwards
    config: GameConfig,
    pub targets: Vec<Target>,
    pub state: GameState,
    pub phase: Phase,
    next_id: u64,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic game, used by tests and by `--seed` on the CLI.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = GameState::new(config.max_lives);
        Ok(Self {
            targets: Vec::with_capacity(config.max_targets),
            config,
            state,
            phase: Phase::Playing,
            next_id: 0,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// Advance every target by one step and apply road penalties.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase != Phase::Playing {
            return outcome;
        }

        let config = &self.config;
        let rng = &mut self.rng;
        let min = config.min_position();
        let max = config.max_position();
        let mut crossed = 0u32;

        // Retained-list pass: removals never shift the element about to be visited.
        self.targets.retain_mut(|target| {
            let destination = *target
                .destination
                .get_or_insert_with(|| random_destination(rng, config));

            let dx = destination.x - target.position.x;
            let dy = destination.y - target.position.y;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance > config.step {
                target.position.x += dx / distance * config.step;
                target.position.y += dy / distance * config.step;
            } else {
                // Arrived: pick a new goal, stay put this frame
                target.destination = Some(random_destination(rng, config));
            }

            target.position = target.position.clamped(min, max);

            if config.in_road(target.position.y) {
                crossed += 1;
                return false;
            }
            true
        });

        outcome.crossed = crossed;
        if crossed > 0 {
            log::debug!("{} target(s) reached the road", crossed);
        }

        for _ in 0..crossed {
            if self.state.lose_life() {
                self.game_over();
                outcome.game_over = true;
                break;
            }
        }

        outcome
    }

    /// Add one target off the road, unless the board is full.
    pub fn spawn(&mut self) -> Option<TargetId> {
        if self.phase != Phase::Playing || self.targets.len() >= self.config.max_targets {
            return None;
        }

        let min = self.config.min_position();
        let max = self.config.max_position();

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let x = self.rng.gen_range(min.x..=max.x);
            let y = self.rng.gen_range(min.y..=max.y);

            if self.config.in_road(y) {
                continue;
            }

            let id = TargetId(self.next_id);
            self.next_id += 1;
            self.targets.push(Target::new(id, x, y));
            log::debug!("spawned target {} at ({:.1}, {:.1})", id.0, x, y);
            return Some(id);
        }

        log::warn!(
            "could not find an off-road spawn position after {} attempts, skipping",
            MAX_SPAWN_ATTEMPTS
        );
        None
    }

    /// Remove every target within the hit radius of `point`. Returns the number hit.
    pub fn click(&mut self, point: Point) -> u32 {
        if self.phase != Phase::Playing {
            return 0;
        }

        let radius = self.config.hit_radius;
        let before = self.targets.len();
        self.targets
            .retain(|target| target.position.distance_to(point) > radius);

        let hits = (before - self.targets.len()) as u32;
        if hits > 0 {
            self.state.score = self.state.score.saturating_add(hits);
            log::debug!(
                "click at ({:.1}, {:.1}) hit {} target(s), score {}",
                point.x,
                point.y,
                hits,
                self.state.score
            );
        }
        hits
    }

    /// Start a fresh round. Also acknowledges a pending game over.
    pub fn reset(&mut self) {
        self.targets.clear();
        self.state = GameState::new(self.config.max_lives);
        self.phase = Phase::Playing;
        log::info!("game reset");
    }

    fn game_over(&mut self) {
        let final_score = self.state.score;
        log::info!("game over, final score {}", final_score);

        self.targets.clear();
        self.state = GameState::new(self.config.max_lives);
        self.phase = Phase::GameOver { final_score };
    }
}

fn random_destination(rng: &mut StdRng, config: &GameConfig) -> Point {
    Point::new(
        rng.gen_range(0.0..config.width),
        rng.gen_range(0.0..config.height),
    )
}
