use crate::entity::Point;
use crate::game::Game;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer click, already translated into canvas coordinates.
    Click(Point),
    Quit,
    Restart,
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state. Must not change the game.
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

/// Map a pointer position in page coordinates onto the canvas.
/// `origin` and `displayed` describe the element box on the page, `logical` its drawing size.
pub fn surface_point(client: Point, origin: Point, displayed: (f64, f64), logical: (f64, f64)) -> Point {
    let scale_x = if displayed.0 > 0.0 { logical.0 / displayed.0 } else { 1.0 };
    let scale_y = if displayed.1 > 0.0 { logical.1 / displayed.1 } else { 1.0 };
    Point::new((client.x - origin.x) * scale_x, (client.y - origin.y) * scale_y)
}

/// Route one input to the game. Returns false when the host should shut down.
pub fn apply_input(game: &mut Game, input: Input) -> bool {
    match input {
        Input::Quit => return false,
        Input::Restart => game.reset(),
        // While the game-over banner is up, a click acknowledges it
        Input::Click(_) if game.is_game_over() => game.reset(),
        Input::Click(point) => {
            game.click(point);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::{Target, TargetId};
    use crate::game::{GameState, Phase};

    #[test]
    fn test_surface_point_subtracts_origin() {
        let point = surface_point(
            Point::new(150.0, 90.0),
            Point::new(50.0, 40.0),
            (800.0, 400.0),
            (800.0, 400.0),
        );
        assert_eq!(point, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_surface_point_undoes_css_scaling() {
        // Canvas shown at half size
        let point = surface_point(
            Point::new(60.0, 35.0),
            Point::new(10.0, 10.0),
            (400.0, 200.0),
            (800.0, 400.0),
        );
        assert_eq!(point, Point::new(100.0, 50.0));

        let collapsed = surface_point(Point::new(5.0, 5.0), Point::new(0.0, 0.0), (0.0, 0.0), (800.0, 400.0));
        assert_eq!(collapsed, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_click_scores_while_playing() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        game.targets.push(Target::new(TargetId(0), 100.0, 100.0));

        assert!(apply_input(&mut game, Input::Click(Point::new(100.0, 100.0))));
        assert_eq!(game.state.score, 1);
    }

    #[test]
    fn test_click_acknowledges_game_over() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        game.phase = Phase::GameOver { final_score: 3 };

        assert!(apply_input(&mut game, Input::Click(Point::new(10.0, 10.0))));
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.state, GameState::new(10));
    }

    #[test]
    fn test_quit_stops_host() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        assert!(!apply_input(&mut game, Input::Quit));
    }

    #[test]
    fn test_restart_resets() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        game.spawn();
        game.state.score = 5;

        assert!(apply_input(&mut game, Input::Restart));
        assert!(game.targets.is_empty());
        assert_eq!(game.state.score, 0);
    }
}
