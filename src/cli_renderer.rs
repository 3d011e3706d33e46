use crate::entity::Point;
use crate::game::{Game, Phase};
use crate::renderer::{Input, Renderer};
use crate::scene::{DrawSurface, Paint, Scene};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Lines reserved under the board for score and controls.
pub const INFO_LINES: u16 = 4;

const MIN_COLS: u16 = 20;
const MAX_COLS: u16 = 100;
const MIN_ROWS: u16 = 10;
const MAX_ROWS: u16 = 25;

/// The canvas resampled onto terminal cells. One character per cell.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Option<Paint>>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16, canvas_width: f64, canvas_height: f64) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell_width: canvas_width / cols as f64,
            cell_height: canvas_height / rows as f64,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Largest grid that fits the terminal, leaving room for the info lines.
    pub fn fit_terminal(term_cols: u16, term_rows: u16, canvas_width: f64, canvas_height: f64) -> Self {
        let cols = term_cols.clamp(MIN_COLS, MAX_COLS);
        let rows = term_rows.saturating_sub(INFO_LINES).clamp(MIN_ROWS, MAX_ROWS);
        Self::new(cols, rows, canvas_width, canvas_height)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Canvas coordinates of the middle of a cell.
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }

    /// Translate a terminal click into canvas coordinates.
    pub fn click_point(&self, col: u16, row: u16) -> Option<Point> {
        if col < self.cols && row < self.rows {
            Some(self.cell_center(col, row))
        } else {
            None
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Paint> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    fn set(&mut self, col: u16, row: u16, paint: Option<Paint>) {
        if col < self.cols && row < self.rows {
            let idx = row as usize * self.cols as usize + col as usize;
            self.cells[idx] = paint;
        }
    }

    fn cell_containing(&self, point: Point) -> Option<(u16, u16)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.cell_width) as u16;
        let row = (point.y / self.cell_height) as u16;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    fn paint_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Option<Paint>) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let center = self.cell_center(col, row);
                if center.x >= x && center.x <= x + width && center.y >= y && center.y <= y + height {
                    self.set(col, row, paint);
                }
            }
        }
    }
}

impl DrawSurface for CellGrid {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.paint_rect(x, y, width, height, None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.paint_rect(x, y, width, height, Some(paint));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cell_center(col, row).distance_to(center) <= radius {
                    self.set(col, row, Some(paint));
                }
            }
        }
        // Small circles can fall between cell centres; always show them
        if let Some((col, row)) = self.cell_containing(center) {
            self.set(col, row, Some(paint));
        }
    }
}

pub struct CliRenderer {
    grid: CellGrid,
    // Terminal is in raw mode on the alternate screen
    active: bool,
    last_render: Instant,
    target_frame_time: Duration,
}

impl CliRenderer {
    pub fn new(grid: CellGrid) -> Self {
        Self {
            grid,
            active: false,
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn draw_cell(&self, paint: Option<Paint>, stdout: &mut io::Stdout) -> io::Result<()> {
        match paint {
            None => queue!(stdout, SetBackgroundColor(Color::DarkGrey), Print(" "))?,
            Some(Paint::Road) => queue!(stdout, SetBackgroundColor(Color::Blue), Print(" "))?,
            Some(Paint::Marker) => queue!(
                stdout,
                SetBackgroundColor(Color::Blue),
                SetForegroundColor(Color::White),
                Print("o")
            )?,
            Some(Paint::Target) => queue!(stdout, SetBackgroundColor(Color::Red), Print(" "))?,
        }
        Ok(())
    }

    fn draw_info(&self, scene: &Scene, stdout: &mut io::Stdout) -> io::Result<()> {
        let top = self.grid.rows();

        queue!(
            stdout,
            cursor::MoveTo(0, top + 1),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("Score: {}  Lives: {}", scene.score, scene.lives))
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, top + 2),
            Print("Controls: Click the red targets | Q: Quit | R: Restart")
        )?;

        queue!(stdout, cursor::MoveTo(0, top + 3), terminal::Clear(ClearType::CurrentLine))?;
        if let Phase::GameOver { final_score } = scene.phase {
            queue!(
                stdout,
                SetForegroundColor(Color::Red),
                Print(format!(
                    "GAME OVER! Final score: {}. Click or press R to restart",
                    final_score
                )),
                ResetColor
            )?;
        }

        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        // From here on a failure still needs cleanup to restore the terminal
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();

        let scene = Scene::from_game(game);
        scene.draw(&mut self.grid);

        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                self.draw_cell(self.grid.get(col, row), &mut stdout)?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_info(&scene, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(Duration::from_millis(5))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(Some(Input::Quit)),
                KeyCode::Char('r') | KeyCode::Char('R') => Ok(Some(Input::Restart)),
                _ => Ok(None),
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Ok(self.grid.click_point(column, row).map(Input::Click)),
            _ => Ok(None),
        }
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_without_init_is_noop() {
        let mut renderer = CliRenderer::new(CellGrid::new(80, 20, 800.0, 400.0));

        assert!(!renderer.is_active());
        assert!(renderer.cleanup().is_ok());
        assert!(!renderer.is_active());
    }

    #[test]
    fn test_cell_center_maps_to_canvas() {
        let grid = CellGrid::new(80, 20, 800.0, 400.0);

        assert_eq!(grid.cell_center(0, 0), Point::new(5.0, 10.0));
        assert_eq!(grid.cell_center(79, 19), Point::new(795.0, 390.0));
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let grid = CellGrid::new(80, 20, 800.0, 400.0);

        assert_eq!(grid.click_point(10, 2), Some(Point::new(105.0, 50.0)));
        assert_eq!(grid.click_point(80, 2), None);
        assert_eq!(grid.click_point(3, 21), None);
    }

    #[test]
    fn test_fit_terminal_clamps_grid() {
        let grid = CellGrid::fit_terminal(300, 80, 800.0, 400.0);
        assert_eq!((grid.cols(), grid.rows()), (MAX_COLS, MAX_ROWS));

        let grid = CellGrid::fit_terminal(10, 5, 800.0, 400.0);
        assert_eq!((grid.cols(), grid.rows()), (MIN_COLS, MIN_ROWS));
    }

    #[test]
    fn test_road_fills_middle_rows() {
        let mut grid = CellGrid::new(80, 20, 800.0, 400.0);
        grid.fill_rect(0.0, 160.0, 800.0, 80.0, Paint::Road);

        // Row centres are at 10, 30, ..., so rows 8..=11 lie in [160, 240]
        assert_eq!(grid.get(0, 7), None);
        assert_eq!(grid.get(0, 8), Some(Paint::Road));
        assert_eq!(grid.get(79, 11), Some(Paint::Road));
        assert_eq!(grid.get(0, 12), None);
    }

    #[test]
    fn test_small_circle_marks_its_cell() {
        let mut grid = CellGrid::new(20, 10, 800.0, 400.0);
        // Cells are 40x40, the circle misses every centre
        grid.fill_circle(Point::new(2.0, 2.0), 3.0, Paint::Target);

        assert_eq!(grid.get(0, 0), Some(Paint::Target));
        assert_eq!(grid.get(1, 0), None);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut grid = CellGrid::new(20, 10, 800.0, 400.0);
        grid.fill_circle(Point::new(100.0, 100.0), 16.0, Paint::Target);
        grid.clear_rect(0.0, 0.0, 800.0, 400.0);

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                assert_eq!(grid.get(col, row), None);
            }
        }
    }

    #[test]
    fn test_clicking_a_drawn_target_hits_it() {
        use crate::config::GameConfig;
        use crate::entity::{Target, TargetId};

        let grid = CellGrid::new(80, 20, 800.0, 400.0);
        let mut game = Game::with_seed(GameConfig::default(), 9).unwrap();
        game.targets.push(Target::new(TargetId(0), 103.0, 57.0));

        let mut surface = grid.clone();
        Scene::from_game(&game).draw(&mut surface);
        assert_eq!(surface.get(10, 2), Some(Paint::Target));

        let point = grid.click_point(10, 2).unwrap();
        assert_eq!(game.click(point), 1);
    }
}
