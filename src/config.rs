use crate::entity::Point;
use std::fmt;
use std::time::Duration;

/// Tunables for one game. `Default` matches the 800x400 browser canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    /// Half of the road band height; the band is centred on `height / 2`.
    pub road_half_height: f64,
    /// Used for click hit-testing and for the bounds inset.
    pub hit_radius: f64,
    /// Drawn size of a target. Deliberately one unit larger than `hit_radius`.
    pub render_radius: f64,
    pub marker_radius: f64,
    pub marker_spacing: f64,
    pub max_targets: usize,
    pub max_lives: u32,
    pub spawn_interval: Duration,
    /// Distance a target travels per tick.
    pub step: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            road_half_height: 40.0,
            hit_radius: 15.0,
            render_radius: 16.0,
            marker_radius: 10.0,
            marker_spacing: 100.0,
            max_targets: 10,
            max_lives: 10,
            spawn_interval: Duration::from_millis(1000),
            step: 1.0,
        }
    }
}

impl GameConfig {
    pub fn road_center(&self) -> f64 {
        self.height / 2.0
    }

    pub fn road_top(&self) -> f64 {
        self.road_center() - self.road_half_height
    }

    pub fn road_bottom(&self) -> f64 {
        self.road_center() + self.road_half_height
    }

    /// Inclusive on both edges.
    pub fn in_road(&self, y: f64) -> bool {
        y >= self.road_top() && y <= self.road_bottom()
    }

    /// Top-left corner of the area a target centre may occupy.
    pub fn min_position(&self) -> Point {
        Point::new(self.hit_radius, self.hit_radius)
    }

    /// Bottom-right corner of the area a target centre may occupy.
    pub fn max_position(&self) -> Point {
        Point::new(self.width - self.hit_radius, self.height - self.hit_radius)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::CanvasSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.hit_radius > 0.0 && self.render_radius > 0.0 && self.marker_radius >= 0.0) {
            return Err(ConfigError::Radius);
        }
        if self.width <= 2.0 * self.hit_radius || self.height <= 2.0 * self.hit_radius {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.hit_radius,
            });
        }
        if self.road_half_height < 0.0 {
            return Err(ConfigError::RoadBand {
                half_height: self.road_half_height,
            });
        }
        // A spawn needs some y inside the inset area that is not on the road.
        let min = self.min_position();
        let max = self.max_position();
        if self.road_top() <= min.y && self.road_bottom() >= max.y {
            return Err(ConfigError::RoadBand {
                half_height: self.road_half_height,
            });
        }
        if !(self.marker_spacing > 0.0) {
            return Err(ConfigError::MarkerSpacing {
                spacing: self.marker_spacing,
            });
        }
        if self.max_targets == 0 {
            return Err(ConfigError::ZeroMaxTargets);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if !(self.step > 0.0) {
            return Err(ConfigError::Step { step: self.step });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    CanvasSize { width: f64, height: f64 },
    Radius,
    RadiusTooLarge { radius: f64 },
    RoadBand { half_height: f64 },
    MarkerSpacing { spacing: f64 },
    ZeroMaxTargets,
    ZeroLives,
    ZeroSpawnInterval,
    Step { step: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasSize { width, height } => {
                write!(f, "canvas size must be positive, got {}x{}", width, height)
            }
            Self::Radius => write!(f, "target and marker radii must be positive"),
            Self::RadiusTooLarge { radius } => {
                write!(f, "hit radius {} leaves no room on the canvas", radius)
            }
            Self::RoadBand { half_height } => write!(
                f,
                "road band half-height {} leaves no spawnable area",
                half_height
            ),
            Self::MarkerSpacing { spacing } => {
                write!(f, "marker spacing must be positive, got {}", spacing)
            }
            Self::ZeroMaxTargets => write!(f, "max targets must be at least 1"),
            Self::ZeroLives => write!(f, "max lives must be at least 1"),
            Self::ZeroSpawnInterval => write!(f, "spawn interval must be non-zero"),
            Self::Step { step } => write!(f, "step must be positive, got {}", step),
        }
    }
}

impl std::error::Error for ConfigError {}
