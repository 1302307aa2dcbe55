//! Interactive terminal front end for the merge2048 engine.
//!
//! One thread drives everything: draw a frame, poll for input with a short
//! timeout, apply at most one move per cooldown window so a held key does not
//! register as a burst of moves.

use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use merge_core::engine::{Game, Move};
use merge_core::rules::Rules;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

/// A held key must wait this long between processed moves.
const MOVE_COOLDOWN: Duration = Duration::from_millis(150);
/// Event poll timeout per frame.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
struct Args {
    /// Grid side length.
    #[arg(long, default_value_t = 8)]
    size: usize,
    /// Tile value that counts as a win.
    #[arg(long, default_value_t = 2048)]
    target: u32,
    /// Tiles seeded when a game starts.
    #[arg(long, default_value_t = 8)]
    initial_tiles: usize,
    /// Probability that a spawned tile is a 4 instead of a 2.
    #[arg(long, default_value_t = 0.1)]
    four_chance: f64,
    /// Seed for the tile-spawn RNG (entropy-seeded if omitted).
    #[arg(long)]
    seed: Option<u64>,
}

struct App {
    game: Game,
    rules: Rules,
    rng: StdRng,
    last_move: Instant,
}

impl App {
    fn new(rules: Rules, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = Game::new(rules.clone(), &mut rng);
        Self {
            game,
            rules,
            rng,
            last_move: Instant::now(),
        }
    }

    fn try_move(&mut self, direction: Move) {
        if self.last_move.elapsed() < MOVE_COOLDOWN {
            return;
        }
        if self.game.apply_move(direction, &mut self.rng) {
            self.last_move = Instant::now();
        }
    }

    fn restart(&mut self) {
        self.game = Game::new(self.rules.clone(), &mut self.rng);
        self.last_move = Instant::now();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rules = Rules {
        size: args.size,
        target: args.target,
        initial_tiles: args.initial_tiles,
        four_chance: args.four_chance,
    };
    rules.validate()?;

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, App::new(rules, args.seed));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui(frame, &app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => app.restart(),
                KeyCode::Left | KeyCode::Char('a') => app.try_move(Move::Left),
                KeyCode::Right | KeyCode::Char('d') => app.try_move(Move::Right),
                KeyCode::Up | KeyCode::Char('w') => app.try_move(Move::Up),
                KeyCode::Down | KeyCode::Char('s') => app.try_move(Move::Down),
                _ => {}
            }
        }
    }
    Ok(())
}

fn ui(frame: &mut Frame, app: &App) {
    let board_height = (app.game.size() * 2 - 1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(board_height + 2),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let mut title = vec![Span::raw(format!(
        "Score: {}   Best tile: {}",
        app.game.score(),
        app.game.highest_tile()
    ))];
    if app.game.won() {
        title.push(Span::styled(
            "  YOU WIN",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(title))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("merge2048"));
    frame.render_widget(header, chunks[0]);

    let board = Paragraph::new(board_lines(&app.game))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, chunks[1]);

    let help = if app.game.over() {
        Line::from(Span::styled(
            "GAME OVER - press r to restart, q to quit",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("arrows/WASD move · r restart · q quit")
    };
    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn board_lines(game: &Game) -> Vec<Line<'static>> {
    let size = game.size();
    let mut lines = Vec::with_capacity(size * 2 + 1);
    for row in 0..size {
        if row > 0 {
            lines.push(Line::from(" ".repeat(size * 8)));
        }
        let mut spans = Vec::with_capacity(size * 2);
        for col in 0..size {
            if col > 0 {
                spans.push(Span::raw(" "));
            }
            let value = game.tile(row, col);
            let text = if value == 0 {
                "   ·   ".to_string()
            } else {
                format!("{value:^7}")
            };
            spans.push(Span::styled(text, tile_style(value)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn tile_style(value: u32) -> Style {
    let bg = match value {
        0 => return Style::default().fg(Color::DarkGray),
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(237, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        2048 => Color::Rgb(237, 194, 46),
        _ => Color::Rgb(60, 58, 50),
    };
    let fg = if value >= 8 {
        Color::White
    } else {
        Color::Black
    };
    Style::default().bg(bg).fg(fg)
}
