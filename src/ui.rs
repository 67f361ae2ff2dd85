// Interactive terminal front end - client list, tabbed detail view, command line

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use rusqlite::Connection;
use std::io;

use clientbook::commands::{
    ordered_assets, ordered_liabilities, ordered_policies, Effect, Session, Tab,
};
use clientbook::router::CommandRouter;
use clientbook::storage;

pub struct App {
    pub session: Session,
    pub router: CommandRouter,
    input: String,
    message: String,
    message_is_error: bool,
    list_state: TableState,
    active_tab: Tab,
    showing_detail: bool,
    should_exit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut list_state = TableState::default();
        if !session.store.is_empty() {
            list_state.select(Some(0));
        }

        App {
            session,
            router: CommandRouter::new(),
            input: String::new(),
            message: "Welcome to ClientBook. Use the help command to view command usage."
                .to_string(),
            message_is_error: false,
            list_state,
            active_tab: Tab::Contact,
            showing_detail: false,
            should_exit: false,
        }
    }

    /// Submit the input buffer as one command line.
    fn submit(&mut self, conn: &mut Connection) {
        let line = std::mem::take(&mut self.input);
        let reply = self.router.handle(&mut self.session, &line);
        self.message = reply.message.clone();
        self.message_is_error = reply.is_error;

        for effect in &reply.effects {
            match effect {
                Effect::SwitchTab(tab) => self.active_tab = *tab,
                Effect::ShowDetail => self.showing_detail = true,
                Effect::ShowList => self.showing_detail = false,
                Effect::Exit => self.should_exit = true,
                Effect::Refresh | Effect::ShowHelp => {}
                // Grammar swaps never leave the router.
                Effect::InstallGrammar(_) => {}
            }
        }

        if !reply.is_error {
            if let Err(e) = storage::save_persons(conn, &self.session.store) {
                self.message = format!("Failed to save client list: {}", e);
                self.message_is_error = true;
            }
        }

        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.store.displayed().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let i = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(i));
        }
    }

    fn next(&mut self) {
        let len = self.session.store.displayed().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.session.store.displayed().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App, conn: &mut Connection) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, conn);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    conn: &mut Connection,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => {
                    app.submit(conn);
                    if app.should_exit {
                        return Ok(());
                    }
                }
                KeyCode::Backspace => {
                    app.input.pop();
                }
                KeyCode::Down if app.input.is_empty() && !app.showing_detail => app.next(),
                KeyCode::Up if app.input.is_empty() && !app.showing_detail => app.previous(),
                KeyCode::Char(c) => app.input.push(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(f.size());

    draw_header(f, app, chunks[0]);
    if app.showing_detail && app.session.view.is_some() {
        draw_detail(f, app, chunks[1]);
    } else {
        draw_client_list(f, app, chunks[1]);
    }
    draw_message(f, app, chunks[2]);
    draw_input(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    if app.showing_detail && app.session.view.is_some() {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let selected = Tab::ALL
            .iter()
            .position(|t| *t == app.active_tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(Block::default().borders(Borders::ALL).title(" ClientBook "))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    } else {
        let title = Paragraph::new(format!(
            " Clients: {} ",
            app.session.store.displayed().len()
        ))
        .block(Block::default().borders(Borders::ALL).title(" ClientBook "));
        f.render_widget(title, area);
    }
}

fn draw_client_list(f: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new(["#", "Name", "Phone", "Email", "Address", "Tags"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .session
        .store
        .displayed()
        .iter()
        .enumerate()
        .map(|(i, person)| {
            let mut tags: Vec<&str> = person.tags().iter().map(|t| t.as_str()).collect();
            tags.sort_unstable();
            Row::new([
                Cell::from((i + 1).to_string()),
                Cell::from(person.name().as_str().to_string()),
                Cell::from(person.phone().as_str().to_string()),
                Cell::from(person.email().as_str().to_string()),
                Cell::from(person.address().as_str().to_string()),
                Cell::from(tags.join(", ")),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(20),
            Constraint::Length(10),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Client List "))
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, area, &mut app.list_state);
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let subject = match &app.session.view {
        Some(adapter) => adapter.subject(),
        None => return,
    };
    let title = format!(" {} ", subject.name().as_str());

    match app.active_tab {
        Tab::Contact => {
            let rows: Vec<Row> = subject
                .contact_attributes()
                .into_iter()
                .map(|(label, value)| Row::new([Cell::from(label), Cell::from(value)]))
                .collect();
            let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(20)])
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(table, area);
        }
        Tab::Policies => {
            let rows: Vec<Row> = ordered_policies(subject)
                .iter()
                .enumerate()
                .map(|(i, policy)| {
                    let mut cells = vec![Cell::from((i + 1).to_string())];
                    cells.extend(policy.attributes().into_iter().map(|(_, v)| Cell::from(v)));
                    Row::new(cells)
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(4),
                    Constraint::Percentage(25),
                    Constraint::Percentage(20),
                    Constraint::Percentage(19),
                    Constraint::Percentage(18),
                    Constraint::Percentage(14),
                ],
            )
            .header(record_header(&[
                "#",
                "Name",
                "Insurer",
                "Insured Value",
                "Yearly Premium",
                "Commission",
            ]))
            .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(table, area);
        }
        Tab::Liabilities => {
            let records = ordered_liabilities(subject);
            let rows = records
                .iter()
                .enumerate()
                .map(|(i, r)| indexed_row(i, r.attributes()))
                .collect::<Vec<_>>();
            f.render_widget(record_table(rows, title), area);
        }
        Tab::Assets => {
            let records = ordered_assets(subject);
            let rows = records
                .iter()
                .enumerate()
                .map(|(i, r)| indexed_row(i, r.attributes()))
                .collect::<Vec<_>>();
            f.render_widget(record_table(rows, title), area);
        }
        Tab::Notes => {
            let body = if subject.notes().is_empty() {
                "(no notes)".to_string()
            } else {
                subject.notes().as_str().to_string()
            };
            let paragraph = Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(paragraph, area);
        }
    }
}

fn record_header(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.to_vec()).style(Style::default().add_modifier(Modifier::BOLD))
}

fn indexed_row(i: usize, attributes: Vec<(&'static str, String)>) -> Row<'static> {
    let mut cells = vec![Cell::from((i + 1).to_string())];
    cells.extend(attributes.into_iter().map(|(_, v)| Cell::from(v)));
    Row::new(cells)
}

fn record_table(rows: Vec<Row<'static>>, title: String) -> Table<'static> {
    Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(45),
        ],
    )
    .header(record_header(&["#", "Name", "Type", "Value", "Remarks"]))
    .block(Block::default().borders(Borders::ALL).title(title))
}

fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.message_is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let paragraph = Paragraph::new(app.message.clone())
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(paragraph, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(format!("> {}", app.input))
        .block(Block::default().borders(Borders::ALL).title(" Command "));
    f.render_widget(paragraph, area);
}
