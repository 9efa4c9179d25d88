use std::io;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use dex_terminal::assets::DirAssets;
use dex_terminal::config::AppConfig;
use dex_terminal::dataset::Dex;
use dex_terminal::format::{RecordView, StatLine, TypeBadge};
use dex_terminal::stat_scale::{BarScale, StatTier};
use dex_terminal::state::AppState;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Char('s') => self.state.begin_search(),
            KeyCode::Char('n') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
                self.state.select_next()
            }
            KeyCode::Char('p') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                self.state.select_prev()
            }
            KeyCode::Esc => {
                if !self.state.query.is_empty() {
                    self.state.clear_query();
                    self.state.push_log("[INFO] Filter cleared");
                }
            }
            KeyCode::Char('?') => self.state.toggle_help(),
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.submit_search(),
            KeyCode::Esc => self.state.end_search(),
            KeyCode::Backspace => self.state.pop_query_char(),
            KeyCode::Down | KeyCode::Right => self.state.select_next(),
            KeyCode::Up | KeyCode::Left => self.state.select_prev(),
            KeyCode::Char(ch) => self.state.push_query_char(ch),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env().with_args(std::env::args().skip(1));
    let dex = Dex::load(&config.data_path)
        .with_context(|| format!("load dex from {}", config.data_path.display()))?;
    let mut state = AppState::new(dex, Box::new(DirAssets::new(config.asset_dir.clone())))
        .with_log_capacity(config.log_lines);
    state.push_log(format!(
        "[INFO] Loaded {} records from {}",
        state.dex.len(),
        config.data_path.display()
    ));
    match config.start.as_deref() {
        Some(name) => {
            if let Err(err) = state.select(name) {
                state.push_log(format!("[WARN] DEX_START: {err}"));
                state.select_first();
            }
        }
        None => state.select_first(),
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app.state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_search_bar(frame, chunks[0], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28),
            Constraint::Length(34),
            Constraint::Min(40),
        ])
        .split(chunks[1]);

    render_picker(frame, body[0], state);
    match &state.view {
        Some(view) => {
            render_identity(frame, body[1], view);
            render_info(frame, body[2], view);
        }
        None => {
            let empty = Paragraph::new("No record selected")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty.clone(), body[1]);
            frame.render_widget(empty, body[2]);
        }
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(12),
        ])
        .split(area);

    let button = |label: &'static str| {
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    };
    frame.render_widget(button("< Previous"), cols[0]);
    frame.render_widget(button("Next >"), cols[2]);

    let (title, style) = if state.search_active {
        ("Search (Enter select, Esc done)", Style::default().fg(Color::Yellow))
    } else {
        ("Search (/)", Style::default())
    };
    let text = if state.search_active {
        format!("{}_", state.query)
    } else if state.query.is_empty() {
        "type / to filter".to_string()
    } else {
        state.query.clone()
    };
    let search = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(search, cols[1]);
}

fn render_picker(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible_names = state.nav.visible();
    let title = format!("Dex {}/{}", visible_names.len(), state.all_names.len());
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if visible_names.is_empty() {
        let empty = Paragraph::new("No matches").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let cursor = state.nav.cursor();
    let lines = picker_window(cursor, visible_names.len(), inner.height as usize)
        .map(|idx| {
            let selected = cursor == Some(idx);
            let style = if selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let prefix = if selected { "> " } else { "  " };
            Line::styled(format!("{prefix}{}", visible_names[idx]), style)
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_identity(frame: &mut Frame, area: Rect, view: &RecordView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let name = Paragraph::new(view.name.clone())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(name, rows[0]);

    let portrait = match &view.portrait {
        Some(asset) => format!("#{:03}\n\n{}", view.portrait_id, asset.path.display()),
        None => format!("#{:03}\n\nimage unavailable", view.portrait_id),
    };
    let portrait = Paragraph::new(portrait)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Portrait").borders(Borders::ALL));
    frame.render_widget(portrait, rows[1]);

    let mut spans = vec![type_badge_span(&view.primary)];
    if let Some(secondary) = &view.secondary {
        spans.push(Span::raw(" "));
        spans.push(type_badge_span(secondary));
    }
    let types = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().title("Type").borders(Borders::ALL));
    frame.render_widget(types, rows[2]);
}

fn type_badge_span(badge: &TypeBadge) -> Span<'static> {
    let mut style = Style::default()
        .fg(Color::Black)
        .bg(type_color(&badge.name))
        .add_modifier(Modifier::BOLD);
    if badge.asset.is_none() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(format!(" {} ", badge.name.to_uppercase()), style)
}

fn render_info(frame: &mut Frame, area: Rect, view: &RecordView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(4),
            Constraint::Length(8),
        ])
        .split(area);

    let entry = Paragraph::new(view.entry.clone())
        .style(Style::default().fg(Color::LightBlue))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Entry").borders(Borders::ALL));
    frame.render_widget(entry, rows[0]);

    let measures = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_labeled_cell(frame, measures[0], "Height", &view.height);
    render_labeled_cell(frame, measures[1], "Weight", &view.weight);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(rows[2]);
    render_stats(frame, bottom[0], &view.stats);

    let catch = if view.catch_known {
        format!("{}\nwith Pokeball", view.catch_rate)
    } else {
        view.catch_rate.clone()
    };
    render_labeled_cell(frame, bottom[1], "Catch Rate", &catch);
}

fn render_labeled_cell(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let cell = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(cell, area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &[StatLine]) {
    const LABEL_WIDTH: u16 = 10;
    let block = Block::default().title("Stats").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width <= LABEL_WIDTH || inner.height == 0 {
        return;
    }

    // Same clamp range as the pixel scale, stretched over the free columns.
    let cells = BarScale::with_width(1, inner.width - LABEL_WIDTH);
    let lines = stats
        .iter()
        .map(|stat| {
            let label = format!("{:<5}{:>4} ", stat.label, stat.value);
            let bar = "█".repeat(cells.scale(stat.value) as usize);
            Line::from(vec![
                Span::raw(label),
                Span::styled(bar, Style::default().fg(tier_color(stat.tier))),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn tier_color(tier: StatTier) -> Color {
    match tier {
        StatTier::Low => Color::Red,
        StatTier::Fair => Color::Rgb(255, 165, 0),
        StatTier::Good => Color::Yellow,
        StatTier::High => Color::Green,
    }
}

fn type_color(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "grass" => Color::Rgb(122, 199, 76),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "bug" => Color::Rgb(166, 185, 26),
        "normal" => Color::Rgb(168, 167, 122),
        "dark" => Color::Rgb(112, 87, 70),
        "poison" => Color::Rgb(163, 62, 161),
        "electric" => Color::Rgb(247, 208, 44),
        "ground" => Color::Rgb(226, 191, 101),
        "ice" => Color::Rgb(150, 217, 214),
        "fairy" => Color::Rgb(214, 133, 173),
        "steel" => Color::Rgb(183, 183, 206),
        "fighting" => Color::Rgb(194, 46, 40),
        "psychic" => Color::Rgb(249, 85, 135),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "flying" => Color::Rgb(169, 143, 243),
        _ => Color::Gray,
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        "type to filter | ↑/↓ Move | Enter Select | Backspace Delete | Esc Done".to_string()
    } else {
        "/ Search | n/p/←/→ Next/Prev | Esc Clear filter | ? Help | q Quit".to_string()
    }
}

/// Rows of the picker to draw: keeps the cursor mid-window where possible and
/// starts at the top when nothing in the filtered list is selected.
fn picker_window(cursor: Option<usize>, total: usize, rows: usize) -> std::ops::Range<usize> {
    let rows = rows.min(total);
    let start = cursor
        .map(|idx| idx.saturating_sub(rows / 2))
        .unwrap_or(0)
        .min(total - rows);
    start..start + rows
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = popup_rect(area, 60, 60);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Dex Terminal - Help",
        "",
        "Browse:",
        "  n / → / j / ↓   Next record",
        "  p / ← / k / ↑   Previous record",
        "  / or s          Search",
        "  Esc             Clear filter",
        "  ?               Toggle help",
        "  q / Ctrl-C      Quit",
        "",
        "Search:",
        "  type            Filter the list",
        "  ↑ / ↓           Step through matches",
        "  Enter           Select the exact name typed",
        "  Esc             Leave the search box",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn popup_rect(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_pct)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_pct)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
