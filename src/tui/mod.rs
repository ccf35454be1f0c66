// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive explorer shell (ratatui + crossterm): the supply-chain graph laid out in columns,
//! the edge list, the chat log with its command box, and the attributes drawer of the focused
//! block. All state lives in the shared [`Explorer`]; the app only keeps cursors and the input.

use std::{error::Error, io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::Mutex;

use crate::exec::{Explorer, LoadStatus};
use crate::layout::{layout_graph, GraphLayout};
use crate::model::{BlockId, Ontology};
use crate::state::{InteractionState, Sender};

mod theme;

use theme::TuiTheme;

const CHAT_PAGE: usize = 5;
const COLUMN_MIN_WIDTH: usize = 12;
const COLUMN_MAX_WIDTH: usize = 22;
const EDGE_PANE_MAX_HEIGHT: u16 = 12;

/// Runs the interactive terminal UI until the user quits.
///
/// `on_retry` is called when the user asks to reload a failed ontology; it is expected to
/// start the load in the background and return immediately.
pub fn run(
    explorer: Arc<Mutex<Explorer>>,
    mut on_retry: impl FnMut(),
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(explorer, theme);

    while !app.should_quit {
        app.sync_layout();
        {
            let explorer = app.explorer.clone();
            let explorer = explorer.blocking_lock();
            terminal.draw(|frame| draw(frame, &app, &explorer))?;
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if std::mem::take(&mut app.retry_requested) {
            tracing::info!("ontology reload requested");
            on_retry();
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &App, explorer: &Explorer) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (main_area, footer_area) = (rows[0], rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_area);
    let (left_area, chat_area) = (columns[0], columns[1]);

    let state = explorer.state();
    let drawer_open = state.attributes_drawer_open();
    let (graph_column_area, drawer_area) = if drawer_open {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(left_area);
        (split[0], Some(split[1]))
    } else {
        (left_area, None)
    };

    match explorer.status() {
        LoadStatus::Ready { ontology, .. } => {
            let edge_height = (ontology.edges.len() as u16 + 2).min(EDGE_PANE_MAX_HEIGHT);
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(edge_height)])
                .split(graph_column_area);

            let graph_focused = app.focus == Focus::Graph;
            let source = ontology.meta.source.as_str();
            let graph = Paragraph::new(Text::from(graph_lines(app, ontology, state))).block(
                pane_block(pane_title("Graph", graph_focused, Some(source)), graph_focused, &app.theme),
            );
            frame.render_widget(graph, split[0]);

            let edges_inner = split[1].height.saturating_sub(2) as usize;
            let edges = Paragraph::new(Text::from(edge_lines(app, ontology, state, edges_inner)))
                .block(pane_block(
                    pane_title("Edges", app.focus == Focus::Edges, None),
                    app.focus == Focus::Edges,
                    &app.theme,
                ));
            frame.render_widget(edges, split[1]);

            if let Some(drawer_area) = drawer_area {
                let title = state
                    .selected_block()
                    .map(|id| ontology.block_label_or_id(id.as_str()).to_owned())
                    .unwrap_or_default();
                let drawer = Paragraph::new(Text::from(drawer_lines(app, ontology, state))).block(
                    pane_block(
                        pane_title("Attributes", app.focus == Focus::Drawer, Some(title.as_str())),
                        app.focus == Focus::Drawer,
                        &app.theme,
                    ),
                );
                frame.render_widget(drawer, drawer_area);
            }
        }
        status => {
            let placeholder = Paragraph::new(Text::from(status_lines(status, &app.theme)))
                .block(pane_block(pane_title("Graph", false, None), false, &app.theme));
            frame.render_widget(placeholder, left_area);
        }
    }

    draw_chat(frame, app, state, chat_area);

    let footer = Paragraph::new(footer_line(app.focus, app.toast.as_deref(), &app.theme));
    frame.render_widget(footer, footer_area);
}

fn draw_chat(frame: &mut Frame<'_>, app: &App, state: &InteractionState, area: Rect) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    let (log_area, input_area) = (split[0], split[1]);

    let width = log_area.width.saturating_sub(2) as usize;
    let height = log_area.height.saturating_sub(2) as usize;
    let lines = chat_lines(state, width, &app.theme);
    let end = lines.len().saturating_sub(app.chat_scroll_back.min(lines.len()));
    let start = end.saturating_sub(height);
    let visible = lines[start..end].to_vec();

    let suffix = (app.chat_scroll_back > 0).then(|| format!("↑{}", app.chat_scroll_back));
    let log = Paragraph::new(Text::from(visible)).block(pane_block(
        pane_title("Chat", app.focus == Focus::Chat, suffix.as_deref()),
        app.focus == Focus::Chat,
        &app.theme,
    ));
    frame.render_widget(log, log_area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", app.theme.user_style()),
        Span::styled(app.input.clone(), app.theme.base_style()),
    ]))
    .block(pane_block(" Command ".to_owned(), app.focus == Focus::Chat, &app.theme));
    frame.render_widget(input, input_area);

    if app.focus == Focus::Chat {
        let x = input_area.x + 3 + app.input.chars().count() as u16;
        frame.set_cursor(x.min(input_area.right().saturating_sub(2)), input_area.y + 1);
    }
}

// Extracted pane/footer/text helpers.
include!("chrome.rs");

struct App {
    explorer: Arc<Mutex<Explorer>>,
    theme: TuiTheme,
    layout: GraphLayout,
    layout_source: Option<usize>,
    focus: Focus,
    cursor: Option<BlockId>,
    edge_cursor: usize,
    drawer_cursor: usize,
    input: String,
    chat_scroll_back: usize,
    toast: Option<String>,
    retry_requested: bool,
    should_quit: bool,
}

impl App {
    fn new(explorer: Arc<Mutex<Explorer>>, theme: TuiTheme) -> Self {
        let mut app = Self {
            explorer,
            theme,
            layout: GraphLayout::default(),
            layout_source: None,
            focus: Focus::Chat,
            cursor: None,
            edge_cursor: 0,
            drawer_cursor: 0,
            input: String::new(),
            chat_scroll_back: 0,
            toast: None,
            retry_requested: false,
            should_quit: false,
        };
        app.sync_layout();
        app
    }

    /// Rebuilds the column layout whenever a different ontology snapshot is loaded.
    fn sync_layout(&mut self) {
        let explorer = self.explorer.blocking_lock();
        let ontology = explorer.ontology().cloned();
        drop(explorer);

        let identity = ontology.as_ref().map(|ontology| Arc::as_ptr(ontology) as usize);
        if identity == self.layout_source {
            return;
        }
        self.layout_source = identity;
        self.layout = ontology.as_deref().map(layout_graph).unwrap_or_default();
        self.cursor = self.layout.block_at(0, 0).cloned();
        self.edge_cursor = 0;
        self.drawer_cursor = 0;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('e') => self.export(),
                KeyCode::Char('l') => self.request_retry(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.cycle(self.drawer_open()),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(self.drawer_open()),
            KeyCode::Esc => self.close_drawer(),
            code => match self.focus {
                Focus::Chat => self.handle_chat_key(code),
                Focus::Graph => self.handle_graph_key(code),
                Focus::Edges => self.handle_edges_key(code),
                Focus::Drawer => self.handle_drawer_key(code),
            },
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => {
                if let Some(last) = self.explorer.blocking_lock().state().last_command() {
                    self.input = last.to_owned();
                }
            }
            KeyCode::PageUp => self.chat_scroll_back += CHAT_PAGE,
            KeyCode::PageDown => {
                self.chat_scroll_back = self.chat_scroll_back.saturating_sub(CHAT_PAGE);
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    fn handle_graph_key(&mut self, code: KeyCode) {
        let (dx, dy) = match code {
            KeyCode::Left | KeyCode::Char('h') => (-1, 0),
            KeyCode::Right | KeyCode::Char('l') => (1, 0),
            KeyCode::Up | KeyCode::Char('k') => (0, -1),
            KeyCode::Down | KeyCode::Char('j') => (0, 1),
            KeyCode::Char(' ') => {
                if let Some(id) = self.cursor.clone() {
                    self.explorer.blocking_lock().toggle_block_selection(id);
                }
                return;
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(id) = self.cursor.clone() {
                    self.explorer.blocking_lock().select_block(Some(id));
                    self.drawer_cursor = 0;
                    self.focus = Focus::Drawer;
                }
                return;
            }
            _ => return,
        };
        if let Some(next) = self.layout.step(self.cursor.as_ref(), dx, dy) {
            self.cursor = Some(next.clone());
        }
    }

    fn handle_edges_key(&mut self, code: KeyCode) {
        let mut explorer = self.explorer.blocking_lock();
        let Some(ontology) = explorer.ontology().cloned() else {
            return;
        };
        let last = ontology.edges.len().saturating_sub(1);
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.edge_cursor = self.edge_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.edge_cursor = (self.edge_cursor + 1).min(last),
            KeyCode::Char(' ') => {
                if let Some(edge) = ontology.edges.get(self.edge_cursor) {
                    explorer.toggle_edge_selection(edge.key.clone());
                }
            }
            _ => {}
        }
    }

    fn handle_drawer_key(&mut self, code: KeyCode) {
        let mut explorer = self.explorer.blocking_lock();
        let (Some(ontology), Some(block)) =
            (explorer.ontology().cloned(), explorer.state().selected_block().cloned())
        else {
            return;
        };
        let attributes = ontology.attributes_of(block.as_str()).collect::<Vec<_>>();
        let last = attributes.len().saturating_sub(1);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.drawer_cursor = self.drawer_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.drawer_cursor = (self.drawer_cursor + 1).min(last);
            }
            KeyCode::Char(' ') => {
                if let Some(attr) = attributes.get(self.drawer_cursor) {
                    explorer.toggle_attribute_selection(attr.key.clone());
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            return;
        }
        let outcome = self.explorer.blocking_lock().submit(&text);
        self.chat_scroll_back = 0;
        self.toast = None;
        if outcome.parsed.is_none() {
            self.toast = outcome.replies.first().cloned();
        }
    }

    fn reset(&mut self) {
        self.explorer.blocking_lock().reset();
        self.toast = Some("View reset".to_owned());
    }

    fn export(&mut self) {
        let result = self.explorer.blocking_lock().export();
        self.toast = Some(match result {
            Ok(data) => data.summary(),
            Err(err) => err.to_string(),
        });
    }

    fn close_drawer(&mut self) {
        self.explorer.blocking_lock().close_drawer();
        if self.focus == Focus::Drawer {
            self.focus = Focus::Graph;
        }
    }

    fn request_retry(&mut self) {
        if matches!(self.explorer.blocking_lock().status(), LoadStatus::Failed { .. }) {
            self.retry_requested = true;
            self.toast = Some("Reloading ontology…".to_owned());
        }
    }

    fn drawer_open(&self) -> bool {
        self.explorer.blocking_lock().state().attributes_drawer_open()
    }
}

fn graph_lines(app: &App, ontology: &Ontology, state: &InteractionState) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let columns = app.layout.columns();
    if columns.is_empty() {
        return vec![Line::styled("The ontology has no blocks.", theme.muted_style())];
    }

    let width = columns
        .iter()
        .flat_map(|(_, blocks)| blocks.iter())
        .map(|id| ontology.block_label_or_id(id.as_str()).chars().count() + 4)
        .max()
        .unwrap_or(COLUMN_MIN_WIDTH)
        .clamp(COLUMN_MIN_WIDTH, COLUMN_MAX_WIDTH);

    let header = columns
        .iter()
        .map(|(column, _)| Span::styled(pad_to(column.label(), width), theme.muted_style()))
        .collect::<Vec<_>>();
    let mut lines = vec![Line::from(header), Line::default()];

    let height = columns.iter().map(|(_, blocks)| blocks.len()).max().unwrap_or(0);
    for row in 0..height {
        let spans = columns
            .iter()
            .map(|(_, blocks)| match blocks.get(row) {
                Some(id) => {
                    let selected = state.selection().blocks.contains(id);
                    let marker = if selected { '◼' } else { '◻' };
                    let label = ontology.block_label_or_id(id.as_str());
                    let text = pad_to(&format!("{marker} {label}"), width);
                    Span::styled(text, block_style(app, state, id, selected))
                }
                None => Span::raw(" ".repeat(width)),
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    if let Some(description) = app
        .cursor
        .as_ref()
        .and_then(|id| ontology.block(id.as_str()))
        .and_then(|block| block.description.as_deref())
    {
        lines.push(Line::default());
        lines.push(Line::styled(description.to_owned(), theme.muted_style()));
    }
    lines
}

fn block_style(app: &App, state: &InteractionState, id: &BlockId, selected: bool) -> Style {
    let theme = &app.theme;
    let mut style = if state.highlighted_nodes().contains(id) {
        theme.highlight_style()
    } else if selected {
        theme.selected_style()
    } else {
        theme.base_style()
    };
    if state.selected_block() == Some(id) {
        style = style.patch(theme.focus_style());
    }
    if app.focus == Focus::Graph && app.cursor.as_ref() == Some(id) {
        style = style.patch(theme.cursor_style());
    }
    style
}

fn edge_lines(
    app: &App,
    ontology: &Ontology,
    state: &InteractionState,
    height: usize,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let start = app.edge_cursor.saturating_sub(height.saturating_sub(1));
    ontology
        .edges
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(idx, edge)| {
            let selected = state.selection().edges.contains(&edge.key);
            let marker = if selected { '◼' } else { '◻' };
            let text = format!(
                "{marker} {} → {}  {}",
                ontology.block_label_or_id(edge.from.as_str()),
                ontology.block_label_or_id(edge.to.as_str()),
                edge.label
            );
            let mut style = if state.highlighted_edges().contains(&edge.key) {
                theme.highlight_style()
            } else if selected {
                theme.selected_style()
            } else {
                theme.base_style()
            };
            if app.focus == Focus::Edges && idx == app.edge_cursor {
                style = style.patch(theme.cursor_style());
            }
            Line::styled(text, style)
        })
        .collect()
}

fn drawer_lines(app: &App, ontology: &Ontology, state: &InteractionState) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let Some(block) = state.selected_block() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (idx, attr) in ontology.attributes_of(block.as_str()).enumerate() {
        let selected = state.selection().attributes.contains(&attr.key);
        let marker = if selected { '◼' } else { '◻' };
        let unit = attr.unit.as_deref().map(|unit| format!(" [{unit}]")).unwrap_or_default();
        let mut style = if state.highlighted_attributes().contains(&attr.key) {
            theme.highlight_style()
        } else if selected {
            theme.selected_style()
        } else {
            theme.base_style()
        };
        if app.focus == Focus::Drawer && idx == app.drawer_cursor {
            style = style.patch(theme.cursor_style());
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {}", attr.label), style),
            Span::styled(format!("  {}{unit}", attr.kind.as_str()), theme.muted_style()),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::styled("No attributes.", theme.muted_style()));
    }
    lines
}

/// Chat log rows; text inside ``` fences is rendered in the code style without the fences.
fn chat_lines(state: &InteractionState, width: usize, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in state.messages() {
        let (prefix, prefix_style) = match message.sender {
            Sender::User => ("you", theme.user_style()),
            Sender::System => ("ontolens", theme.muted_style()),
        };
        lines.push(Line::styled(format!("{prefix}:"), prefix_style));

        let mut in_code = false;
        for raw in message.text.split('\n') {
            if raw.trim_start().starts_with("```") {
                in_code = !in_code;
                continue;
            }
            let style = if in_code { theme.code_style() } else { theme.base_style() };
            let indent = if in_code { "    " } else { "  " };
            for row in wrap_text(raw, width.saturating_sub(indent.len())) {
                lines.push(Line::styled(format!("{indent}{row}"), style));
            }
        }
    }
    lines
}

fn status_lines(status: &LoadStatus, theme: &TuiTheme) -> Vec<Line<'static>> {
    match status {
        LoadStatus::Loading => vec![Line::styled("Loading ontology…", theme.muted_style())],
        LoadStatus::Failed { reason } => vec![
            Line::styled("Ontology failed to load", theme.error_style()),
            Line::styled(reason.clone(), theme.error_style()),
            Line::default(),
            Line::styled("Press Ctrl-l to retry.", theme.muted_style()),
        ],
        LoadStatus::Ready { .. } => Vec::new(),
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
