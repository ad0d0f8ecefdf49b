//! Watch command implementation - Interactive TUI viewer.

use super::{seed_or_entropy, CliError};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use degrid::replay::{ReplayEngine, Transcript};
use degrid::sim::{run_game, SimConfig};
use degrid::{Coord, GameEngine, GRID_SIZE};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Execute the watch command.
///
/// Plays a fresh random game (or a saved transcript) and steps through
/// it move by move.
///
/// # Errors
///
/// Returns an error if the transcript cannot be loaded or the TUI fails.
pub(crate) fn execute(
    seed: Option<u64>,
    moves: Option<u32>,
    speed: u64,
    load: Option<PathBuf>,
) -> Result<(), CliError> {
    let transcript = match load {
        Some(path) => Transcript::load(&path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?,
        None => {
            let seed = seed_or_entropy(seed);
            let config = SimConfig {
                max_moves: moves.unwrap_or(1000),
            };
            run_game(seed, &config).transcript
        }
    };

    let engine = ReplayEngine::new(transcript);
    run_tui(engine, speed)
}

/// App state for the TUI.
struct App {
    engine: ReplayEngine,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
}

impl App {
    fn new(engine: ReplayEngine, speed_ms: u64) -> Self {
        Self {
            engine,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
        }
    }

    fn step_forward(&mut self) {
        if !self.engine.is_finished() {
            let _ = self.engine.step_forward();
            self.last_step = Instant::now();
        }
    }

    fn step_backward(&mut self) {
        let _ = self.engine.step_backward();
        self.last_step = Instant::now();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.engine.is_finished()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn run_tui(engine: ReplayEngine, speed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(engine, speed);

    loop {
        // Draw
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Auto-step if needed
        if app.should_auto_step() {
            app.step_forward();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    app.paused = true;
                    app.step_backward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => {
                    app.engine.rewind();
                    app.paused = true;
                }
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_players(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let total = app.engine.transcript().moves.len();
    let status = if app.engine.engine().winner().is_some() {
        "GAME OVER"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Degrid Viewer | Move {}/{} | {} | Speed: {}ms ",
        app.engine.cursor(),
        total,
        status,
        app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine.engine();
    let mut lines: Vec<Line> = Vec::new();

    for y in 0..GRID_SIZE {
        let mut spans = Vec::new();
        for x in 0..GRID_SIZE {
            let coord = Coord::new(x, y);
            if let Some(cell) = engine.board().cell_at(coord) {
                let (glyph, color) = cell_glyph(cell.owner, &cell.color, coord);
                spans.push(Span::styled(glyph, Style::default().fg(color)));
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

/// Glyph and color for one cell: owner digit in the owner's color,
/// `+` for an unclaimed center cell, `.` otherwise.
fn cell_glyph(
    owner: Option<degrid::PlayerId>,
    color: &Option<String>,
    coord: Coord,
) -> (String, Color) {
    match owner {
        Some(id) => {
            let tui_color = color.as_deref().map_or(Color::White, name_to_color);
            (format!("{}", id % 10), tui_color)
        }
        None if coord.is_center() => ("+".to_string(), Color::White),
        None => (".".to_string(), Color::DarkGray),
    }
}

/// Map a player color name onto a terminal color; unknown names are white.
fn name_to_color(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "orange" => Color::Yellow,
        "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "magenta" => Color::LightMagenta,
        "lime" => Color::LightGreen,
        "brown" => Color::LightRed,
        "teal" => Color::LightCyan,
        _ => Color::White,
    }
}

fn render_players(f: &mut Frame, area: Rect, app: &App) {
    let engine: &GameEngine = app.engine.engine();
    let winner = engine.winner();
    let current = engine.turn().current_player;
    let mut lines = Vec::new();

    lines.push(Line::from(""));
    for player in engine.players() {
        let color = name_to_color(&player.color);
        let marker = if winner == Some(player.id) {
            " [WINNER]"
        } else if winner.is_none() && current == player.id {
            " [TURN]"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Player {} ", player.id),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "({}): {} cells{marker}",
                player.name,
                player.owned_cells.len()
            )),
        ]));
    }

    let players_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Players "))
        .wrap(Wrap { trim: false });

    f.render_widget(players_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.is_finished() {
        " [q] Quit  [r] Restart  [←/→] Step "
    } else {
        " [q] Quit  [Space] Pause  [←/→] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
