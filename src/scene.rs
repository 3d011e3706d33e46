use crate::entity::Point;
use crate::game::{Game, Phase};

/// What a shape represents. Backends choose the actual colour or glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Road,
    Marker,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
}

/// Drawing primitives a backend must provide, in canvas units.
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint);
    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint);
}

/// Read-only snapshot of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
    pub score: u32,
    pub lives: u32,
    pub phase: Phase,
}

impl Scene {
    pub fn from_game(game: &Game) -> Self {
        let config = game.config();
        let mut shapes = Vec::with_capacity(game.targets.len() + 10);

        shapes.push(Shape::Rect {
            x: 0.0,
            y: config.road_top(),
            width: config.width,
            height: config.road_half_height * 2.0,
            paint: Paint::Road,
        });

        // Bicycles parked along the middle of the road
        let mut x = 0.0;
        while x < config.width {
            shapes.push(Shape::Circle {
                center: Point::new(x, config.road_center()),
                radius: config.marker_radius,
                paint: Paint::Marker,
            });
            x += config.marker_spacing;
        }

        shapes.extend(game.targets.iter().map(|target| Shape::Circle {
            center: target.position,
            radius: config.render_radius,
            paint: Paint::Target,
        }));

        Self {
            width: config.width,
            height: config.height,
            shapes,
            score: game.state.score,
            lives: game.state.lives,
            phase: game.phase,
        }
    }

    pub fn draw<S: DrawSurface>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);

        for shape in &self.shapes {
            match *shape {
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    paint,
                } => surface.fill_rect(x, y, width, height, paint),
                Shape::Circle {
                    center,
                    radius,
                    paint,
                } => surface.fill_circle(center, radius, paint),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(f64, f64, f64, f64),
        Rect(f64, f64, f64, f64, Paint),
        Circle(Point, f64, Paint),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl DrawSurface for RecordingSurface {
        fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.calls.push(Call::Clear(x, y, width, height));
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
            self.calls.push(Call::Rect(x, y, width, height, paint));
        }

        fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
            self.calls.push(Call::Circle(center, radius, paint));
        }
    }

    fn game_with_targets() -> Game {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        for _ in 0..4 {
            game.spawn();
        }
        game.tick();
        game
    }

    #[test]
    fn test_scene_layout() {
        let game = game_with_targets();
        let scene = Scene::from_game(&game);

        assert_eq!(
            scene.shapes[0],
            Shape::Rect {
                x: 0.0,
                y: 160.0,
                width: 800.0,
                height: 80.0,
                paint: Paint::Road,
            }
        );

        let markers: Vec<&Shape> = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { paint: Paint::Marker, .. }))
            .collect();
        assert_eq!(markers.len(), 8);
        assert_eq!(
            *markers[3],
            Shape::Circle {
                center: Point::new(300.0, 200.0),
                radius: 10.0,
                paint: Paint::Marker,
            }
        );

        let targets: Vec<&Shape> = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { paint: Paint::Target, .. }))
            .collect();
        assert_eq!(targets.len(), game.targets.len());
        for (shape, target) in targets.iter().zip(&game.targets) {
            assert_eq!(
                **shape,
                Shape::Circle {
                    center: target.position,
                    radius: 16.0,
                    paint: Paint::Target,
                }
            );
        }
    }

    #[test]
    fn test_draw_clears_first() {
        let scene = Scene::from_game(&game_with_targets());
        let mut surface = RecordingSurface::default();

        scene.draw(&mut surface);

        assert_eq!(surface.calls[0], Call::Clear(0.0, 0.0, 800.0, 400.0));
        assert_eq!(surface.calls.len(), scene.shapes.len() + 1);
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let game = game_with_targets();
        let targets_before: Vec<Point> = game.targets.iter().map(|t| t.position).collect();

        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        Scene::from_game(&game).draw(&mut first);
        Scene::from_game(&game).draw(&mut second);

        assert_eq!(first.calls, second.calls);
        let targets_after: Vec<Point> = game.targets.iter().map(|t| t.position).collect();
        assert_eq!(targets_before, targets_after);
    }

    #[test]
    fn test_scene_carries_hud_state() {
        let mut game = game_with_targets();
        game.state.score = 4;
        game.state.lives = 6;

        let scene = Scene::from_game(&game);

        assert_eq!(scene.score, 4);
        assert_eq!(scene.lives, 6);
        assert_eq!(scene.phase, Phase::Playing);
    }
}
