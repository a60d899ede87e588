use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use blockfall::{Cell, Game, GameEvent, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle in the terminal")]
struct Cli {
    /// Seed for the spawn sequence; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Gravity interval in milliseconds.
    #[arg(long, default_value_t = 500)]
    tick_ms: u64,
}

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const INFO_WIDTH: u16 = 30;

fn cell_color(cell: Cell) -> Option<Color> {
    match cell {
        Cell::Empty => None,
        Cell::I => Some(Color::Cyan),
        Cell::O => Some(Color::Yellow),
        Cell::T => Some(Color::Magenta),
        Cell::S => Some(Color::Green),
        Cell::Z => Some(Color::Red),
        Cell::J => Some(Color::Blue),
        Cell::L => Some(Color::Rgb(255, 165, 0)),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// What the status panel shows besides the game itself.
#[derive(Default)]
struct Status {
    last_message: Option<String>,
}

fn render(frame: &mut Frame, game: &Game, status: &Status) {
    let area = frame.size();

    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let main_area = centered_rect(grid_display_width + INFO_WIDTH, grid_display_height, area);

    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(INFO_WIDTH),
    ])
    .split(main_area);

    render_grid(frame, game, horizontal[0]);
    render_info(frame, game, status, horizontal[1]);

    if game.is_game_over() {
        render_game_over(frame, game, area);
    }
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| match cell_color(cell) {
                    Some(color) => Span::styled(BLOCK_CHAR, Style::default().fg(color)),
                    None => Span::raw(EMPTY_CHAR),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, game: &Game, status: &Status, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Piece", Style::default().fg(Color::Yellow))),
        Line::from(format!("{:?}", game.current_kind())),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", game.total_lines_cleared())),
        Line::from(""),
        Line::from(Span::styled(
            "A/D move  S soft  W hard",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "←/→ rotate  R restart  Q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(message) = &status.last_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, game: &Game, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Lines: {}", game.total_lines_cleared())),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(28, 10, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Main Loop
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = run(&mut game, Duration::from_millis(cli.tick_ms));

    // Always restore the terminal, even if the loop failed.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    result
}

fn run(game: &mut Game, tick_duration: Duration) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut status = Status::default();
    let mut last_tick = Instant::now();

    loop {
        for event in game.take_events() {
            match event {
                GameEvent::Rejected(_) | GameEvent::GameOver => {
                    status.last_message = Some(event.to_string());
                }
                GameEvent::PieceLocked(_) | GameEvent::GameRestarted => {
                    status.last_message = None;
                }
                _ => {}
            }
        }

        terminal.draw(|frame| render(frame, game, &status))?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('r') | KeyCode::Char('R') => game.restart(),
                        KeyCode::Char('a') | KeyCode::Char('A') => {
                            game.move_left();
                        }
                        KeyCode::Char('d') | KeyCode::Char('D') => {
                            game.move_right();
                        }
                        KeyCode::Char('s') | KeyCode::Char('S') => {
                            game.soft_drop();
                        }
                        KeyCode::Char('w') | KeyCode::Char('W') => game.hard_drop(),
                        KeyCode::Left => {
                            game.rotate_ccw();
                        }
                        KeyCode::Right => {
                            game.rotate_cw();
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            game.update();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
