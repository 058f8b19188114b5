//! Interactive catalog browser.
//!
//! A single-line search box drives the search controller on every edit; the
//! table below shows the visible elements in rank order. Enrichment merges
//! arrive over a channel from the worker thread and are applied between input
//! events, so the catalog stays owned by this loop. An enrichment failure
//! only changes the status line; browsing and search keep working.

use crate::catalog::Catalog;
use crate::enrich::{EnrichEvent, EnrichSummary};
use crate::render::{Renderer, TableRenderer};
use crate::search;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const LEGEND: &str = "[type to filter] [backspace edit] [esc quit]";

enum EnrichState {
    Offline,
    Running,
    Done(EnrichSummary),
    Failed,
}

struct App {
    catalog: Catalog,
    renderer: TableRenderer,
    query: String,
    enrich: EnrichState,
    events: Option<Receiver<EnrichEvent>>,
}

impl App {
    /// Apply pending enrichment merges. Returns true if anything changed.
    fn drain_events(&mut self) -> bool {
        let Some(events) = self.events.take() else {
            return false;
        };
        let mut changed = false;
        let mut keep = true;
        loop {
            match events.try_recv() {
                Ok(EnrichEvent::Thumb { name, url }) => {
                    if let Some(row) = self.catalog.set_thumbnail(&name, &url) {
                        self.renderer.attach_asset(row, &url);
                        changed = true;
                    }
                }
                Ok(EnrichEvent::Done(summary)) => {
                    self.enrich = EnrichState::Done(summary);
                    changed = true;
                    keep = false;
                    break;
                }
                Ok(EnrichEvent::Failed(error)) => {
                    tracing::warn!(%error, "enrichment halted");
                    self.enrich = EnrichState::Failed;
                    changed = true;
                    keep = false;
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    keep = false;
                    break;
                }
            }
        }
        if keep {
            self.events = Some(events);
        }
        changed
    }

    fn push_query(&mut self, ch: char) {
        self.query.push(ch);
        self.refresh();
    }

    fn pop_query(&mut self) {
        self.query.pop();
        self.refresh();
    }

    fn refresh(&mut self) {
        search::apply(&self.query, &mut self.catalog, &mut self.renderer);
    }

    fn status_line(&self) -> String {
        let total = self.catalog.elements().len();
        match &self.enrich {
            EnrichState::Offline => "thumbnails: off".to_string(),
            EnrichState::Running => {
                format!("thumbnails: {}/{total} (fetching)", self.catalog.thumbnail_count())
            }
            EnrichState::Done(summary) => {
                format!("thumbnails: {}/{total} ({} batches)", summary.thumbnails, summary.batches)
            }
            EnrichState::Failed => format!(
                "thumbnails: {}/{total} (fetch failed, continuing without the rest)",
                self.catalog.thumbnail_count()
            ),
        }
    }
}

/// Launch the browser over a freshly built catalog. `events` carries merges
/// from the enrichment worker; `None` means enrichment was skipped.
pub fn run(
    catalog: Catalog,
    renderer: TableRenderer,
    events: Option<Receiver<EnrichEvent>>,
) -> Result<()> {
    let enrich = if events.is_some() {
        EnrichState::Running
    } else {
        EnrichState::Offline
    };
    let mut app = App {
        catalog,
        renderer,
        query: String::new(),
        enrich,
        events,
    };
    app.refresh();
    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, app);
    cleanup_terminal(&mut terminal)?;
    result
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut needs_redraw = true;
    loop {
        if app.drain_events() {
            needs_redraw = true;
        }
        if needs_redraw {
            terminal.draw(|frame| render_app(frame, &app))?;
            needs_redraw = false;
        }
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        continue;
                    }
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        KeyCode::Backspace => app.pop_query(),
                        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.push_query(ch)
                        }
                        _ => {}
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}

fn render_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let search_line = Line::from(vec![
        Span::raw(app.query.clone()),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ]);
    let search_box = Paragraph::new(search_line)
        .block(Block::default().borders(Borders::ALL).title("search"));
    frame.render_widget(search_box, chunks[0]);

    let visible = app.renderer.visible_rows();
    let header = Row::new(vec![
        "num", "sym", "name", "weight", "series", "oxidation", "thumb",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = visible
        .iter()
        .map(|state| {
            let thumb = if state.thumbnail.is_some() { "img" } else { "" };
            Row::new(vec![
                Cell::from(state.record.atomic_number.to_string()),
                Cell::from(state.record.symbol.clone()),
                Cell::from(state.record.name.clone()),
                Cell::from(state.record.atomic_weight.to_string()),
                Cell::from(state.record.series.clone()),
                Cell::from(state.record.oxidation_display()),
                Cell::from(thumb),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(5),
    ];
    let title = format!(
        "elements ({} shown, {} hidden)",
        visible.len(),
        app.renderer.hidden_count()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, chunks[1]);

    let status = Line::from(vec![
        Span::styled(app.status_line(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(LEGEND, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[2]);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
