use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use fight_picker::catalog::{self, Fighter, Gender, gender_label};
use fight_picker::config::{self, AppConfig};
use fight_picker::division::{DivisionPage, EMPTY_DIVISION_MESSAGE};
use fight_picker::picker::{FighterSelector, RequestState, rank_label};
use fight_picker::provider::spawn_prediction_provider;
use fight_picker::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};

const ACCENT: Color = Color::Rgb(173, 41, 41);

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(state: AppState, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            _ => {}
        }
        match self.state.screen {
            Screen::WeightClasses => self.on_weight_class_key(key),
            Screen::Division => self.on_division_key(key),
        }
    }

    fn on_weight_class_key(&mut self, key: KeyEvent) {
        let selector = &mut self.state.weight_classes;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => selector.select_next(),
            KeyCode::Char('k') | KeyCode::Up => selector.select_prev(),
            KeyCode::Char('g') | KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                selector.toggle_gender()
            }
            KeyCode::Char('m') => selector.set_gender(Gender::Male),
            KeyCode::Char('f') => selector.set_gender(Gender::Female),
            KeyCode::Enter => self.state.open_selected_weight_class(),
            _ => {}
        }
    }

    fn on_division_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => {
                self.state.back();
                return;
            }
            KeyCode::Char('p') => {
                self.request_prediction();
                return;
            }
            _ => {}
        }
        let Some(picker) = self
            .state
            .division
            .as_mut()
            .and_then(DivisionPage::picker_mut)
        else {
            return;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => picker.hover_next(),
            KeyCode::Char('k') | KeyCode::Up => picker.hover_prev(),
            KeyCode::Char('h') => picker.clear_hover(),
            KeyCode::Enter | KeyCode::Char(' ') => picker.toggle_at_cursor(),
            _ => {}
        }
    }

    fn request_prediction(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Prediction unavailable");
            return;
        };
        let Some(cmd) = self.state.submit_prediction() else {
            return;
        };
        if let ProviderCommand::Predict {
            generation,
            request_id,
            ..
        } = &cmd
        {
            let (generation, request_id) = (*generation, *request_id);
            if tx.send(cmd).is_err() {
                // The worker is gone; settle here so the picker does not stay pending.
                apply_delta(
                    &mut self.state,
                    Delta::PredictionSettled {
                        generation,
                        request_id,
                        outcome: Err("prediction worker unavailable".to_string()),
                    },
                );
            }
        }
    }
}

fn main() -> io::Result<()> {
    config::load_env_files();
    let cfg = AppConfig::from_env();

    let mut boot_logs = Vec::new();
    let catalog = load_catalog(&cfg, &mut boot_logs);
    let mut state = AppState::new(catalog);
    for line in boot_logs {
        state.push_log(line);
    }
    state.push_log(format!("[INFO] Predict endpoint: {}", cfg.predict_url));
    if let Some(route) = std::env::args().nth(1) {
        state.open_route(&route);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_prediction_provider(tx, cmd_rx, cfg.clone());

    let mut app = App::new(state, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn load_catalog(cfg: &AppConfig, logs: &mut Vec<String>) -> Vec<Fighter> {
    if let Some(path) = &cfg.fighter_data_path {
        match catalog::load_catalog_file(path) {
            Ok(fighters) => {
                logs.push(format!(
                    "[INFO] Loaded {} fighters from {}",
                    fighters.len(),
                    path.display()
                ));
                return fighters;
            }
            Err(err) => logs.push(format!("[WARN] Fighter data error: {err:#}")),
        }
    }
    match catalog::embedded_catalog() {
        Ok(fighters) => fighters,
        Err(err) => {
            logs.push(format!("[WARN] Embedded fighter data error: {err:#}"));
            Vec::new()
        }
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::WeightClasses => render_weight_classes(frame, chunks[1], &app.state),
        Screen::Division => render_division(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::WeightClasses => "Pick a Weight Class".to_string(),
        Screen::Division => state
            .division
            .as_ref()
            .map(|page| page.title.clone())
            .unwrap_or_default(),
    };
    format!("FIGHT PREDICTION | {title}")
}

fn footer_text(state: &AppState) -> &'static str {
    match state.screen {
        Screen::WeightClasses => {
            "j/k/↑/↓ Move | g/Tab Male/Female | Enter Select | ? Help | q Quit"
        }
        Screen::Division => {
            "j/k/↑/↓ Move | h Unhover | Space/Enter Pick | p Predict | b/Esc Back | ? Help | q Quit"
        }
    }
}

fn render_weight_classes(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let lead = Paragraph::new("Choose the weight division where you'll pick fighters.")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(lead, sections[0]);

    let selector = &state.weight_classes;
    let toggle = Line::from(
        [Gender::Male, Gender::Female]
            .into_iter()
            .map(|g| {
                let label = format!(" {} ", gender_label(g));
                if g == selector.gender {
                    Span::styled(label, Style::default().fg(Color::Black).bg(Color::White))
                } else {
                    Span::styled(label, Style::default().fg(Color::Gray))
                }
            })
            .collect::<Vec<_>>(),
    );
    frame.render_widget(Paragraph::new(toggle), sections[1]);

    let lines = selector
        .cards()
        .into_iter()
        .enumerate()
        .map(|(idx, card)| {
            let row = format!("{:<24} {:<22} {}", card.name, card.link, card.image_ref);
            if idx == selector.cursor {
                Line::styled(
                    format!("> {row}"),
                    Style::default().fg(Color::White).bg(ACCENT),
                )
            } else {
                Line::raw(format!("  {row}"))
            }
        })
        .collect::<Vec<_>>();
    let grid = Paragraph::new(lines)
        .block(Block::default().title("Weight classes").borders(Borders::ALL));
    frame.render_widget(grid, sections[2]);
}

fn render_division(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(page) = state.division.as_ref() else {
        return;
    };
    let Some(picker) = page.picker() else {
        let empty = Paragraph::new(EMPTY_DIVISION_MESSAGE)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    render_fighter_table(frame, rows[0], picker);

    let submit_style = if picker.can_submit() {
        Style::default().fg(Color::White).bg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let submit = Paragraph::new(format!("[ {} ]", picker.submit_label()))
        .alignment(Alignment::Center)
        .style(submit_style);
    frame.render_widget(submit, rows[1]);

    let result = Paragraph::new(prediction_text(picker))
        .alignment(Alignment::Center)
        .block(Block::default().title("Prediction").borders(Borders::ALL));
    frame.render_widget(result, rows[2]);
}

fn render_fighter_table(frame: &mut Frame, area: Rect, picker: &FighterSelector) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let widths = fighter_columns();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    render_cell_text(frame, cols[0], "Name", header_style);
    render_cell_text(frame, cols[1], "Record", header_style);
    render_cell_text(frame, cols[2], "Rank", header_style);

    let list_area = sections[1];
    let fighters = picker.fighters();
    let visible = list_area.height as usize;
    let (start, end) = visible_range(picker.cursor(), fighters.len(), visible);

    for (i, fighter) in fighters[start..end].iter().enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let style = row_style(picker, fighter);
        frame.render_widget(Block::default().style(style), row_area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        let name_style = if picker.is_active(&fighter.name) {
            style.add_modifier(Modifier::BOLD | Modifier::ITALIC)
        } else {
            style
        };
        render_cell_text(frame, cols[0], picker.row_label(fighter), name_style);
        render_cell_text(frame, cols[1], &fighter.record, style);
        render_cell_text(
            frame,
            cols[2],
            &rank_label(fighter.rating),
            style.add_modifier(Modifier::BOLD),
        );
    }
}

fn row_style(picker: &FighterSelector, fighter: &Fighter) -> Style {
    if picker.is_selected(&fighter.name) {
        Style::default().fg(Color::White).bg(ACCENT)
    } else if picker.hovered() == Some(fighter.name.as_str()) {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else if picker.is_disabled(&fighter.name) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn fighter_columns() -> [Constraint; 3] {
    [
        Constraint::Percentage(55),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
    ]
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn prediction_text(picker: &FighterSelector) -> String {
    match picker.request() {
        RequestState::Idle => match picker.selected().len() {
            2 => "Press p to predict".to_string(),
            n => format!("Pick {} more fighter(s)", 2 - n),
        },
        RequestState::Pending { .. } => "Predicting...".to_string(),
        RequestState::Resolved(_) | RequestState::Failed { .. } => {
            picker.result_lines().join("\n")
        }
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

const HELP_LINES: [&str; 17] = [
    "Fight Prediction - Help",
    "",
    "Weight classes:",
    "  j/k or ↑/↓   Move",
    "  g / Tab      Toggle Male/Female",
    "  m / f        Male / Female",
    "  Enter        Open division",
    "",
    "Division:",
    "  j/k or ↑/↓   Move",
    "  h            Clear highlighted row",
    "  Space/Enter  Pick or unpick fighter (max 2)",
    "  p            Predict fight",
    "  b / Esc      Back",
    "",
    "  ?            Toggle help",
    "  q            Quit",
];

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = HELP_LINES.join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
