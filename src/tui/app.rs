//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the dashboard widgets
//! (form fields, list selection, modal notice), turns key presses into
//! `Action`s and renders the screen from the current task snapshot.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::error;

use crate::db::TaskStore;
use crate::error::Result;
use crate::fields::*;
use crate::state::{Action, AppState, Notice, NoticeLevel};
use crate::tui::{
    colors::{ADD_GREEN, COMPLETE_BLUE, DELETE_RED, SKY_BLUE, SLATE, SOFT_RED},
    enums::{Focus, Screen},
    input::InputField,
    utils::centered_rect,
};
use crate::view::{list_line, overdue_count, status_counts, Progress};

/// Dashboard state for the terminal user interface.
///
/// Task data lives in `AppState`; everything here is widget state.
pub struct App<S: TaskStore> {
    state: AppState<S>,
    screen: Screen,
    focus: Focus,
    name: InputField,
    expiry: InputField,
    priority: Priority,
    list_state: ListState,
    notice: Option<Notice>,
    status_message: String,
}

impl<S: TaskStore> App<S> {
    /// Create a new App, loading the task table from `store`.
    pub fn new(store: S) -> Result<Self> {
        let state = AppState::new(store)?;
        let mut app = App {
            state,
            screen: Screen::Dashboard,
            focus: Focus::Name,
            name: InputField::new(),
            expiry: InputField::new(),
            priority: Priority::default(),
            list_state: ListState::default(),
            notice: None,
            status_message: String::new(),
        };
        app.sync_selection();
        Ok(app)
    }

    /// Keep the list selection inside the current table.
    fn sync_selection(&mut self) {
        let len = self.state.tasks().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn selection(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Dispatch an action and surface its outcome.
    fn apply(&mut self, action: Action) {
        let is_add = matches!(action, Action::Add { .. });
        match self.state.update(action) {
            Ok(notice) => {
                if is_add {
                    self.name.clear();
                    self.expiry.clear();
                    self.status_message = "Task added".to_string();
                }
                self.notice = notice;
            }
            Err(e) => {
                if !e.is_input() {
                    error!(error = %e, "action failed");
                }
                self.notice = Some(Notice::from_error(&e));
            }
        }
        self.sync_selection();
    }

    fn add_from_form(&mut self) {
        self.apply(Action::Add {
            name: self.name.value.clone(),
            priority: self.priority,
            expiry: self.expiry.value.clone(),
        });
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Name => Some(&mut self.name),
            Focus::Expiry => Some(&mut self.expiry),
            _ => None,
        }
    }

    /// Handle one key press.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        // A notice swallows the key that dismisses it.
        if self.notice.take().is_some() {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();

        if self.screen == Screen::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
                self.screen = Screen::Dashboard;
            }
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return false;
            }
            KeyCode::F(5) => {
                self.apply(Action::Refresh);
                self.status_message = "Tasks refreshed".to_string();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Name | Focus::Expiry => self.handle_text_key(key.code),
            Focus::Priority => self.handle_priority_key(key.code),
            Focus::List => return self.handle_list_key(key.code),
        }
        false
    }

    fn handle_text_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.add_from_form();
            return;
        }
        let Some(field) = self.active_input() else {
            return;
        };
        match code {
            KeyCode::Char(c) => field.handle_char(c),
            KeyCode::Backspace => field.handle_backspace(),
            KeyCode::Delete => field.handle_delete(),
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            KeyCode::Home => field.move_cursor_home(),
            KeyCode::End => field.move_cursor_end(),
            _ => {}
        }
    }

    fn handle_priority_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Up => self.priority = self.priority.cycle(false),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.priority = self.priority.cycle(true),
            KeyCode::Char('l') => self.priority = Priority::Low,
            KeyCode::Char('m') => self.priority = Priority::Medium,
            KeyCode::Char('h') => self.priority = Priority::High,
            KeyCode::Enter => self.add_from_form(),
            _ => {}
        }
    }

    /// Returns true if the application should quit.
    fn handle_list_key(&mut self, code: KeyCode) -> bool {
        let len = self.state.tasks().len();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if len > 0 {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < len {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if len > 0 {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Home if len > 0 => self.list_state.select(Some(0)),
            KeyCode::End if len > 0 => self.list_state.select(Some(len - 1)),
            KeyCode::Char('c') | KeyCode::Enter => self.apply(Action::Complete(self.selection())),
            KeyCode::Char('d') | KeyCode::Delete => self.apply(Action::Delete(self.selection())),
            KeyCode::Char('r') => {
                self.apply(Action::Refresh);
                self.status_message = "Tasks refreshed".to_string();
            }
            KeyCode::Char('a') => self.focus = Focus::Name,
            KeyCode::Char('h') | KeyCode::Char('?') => self.screen = Screen::Help,
            _ => {}
        }
        false
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    /// Render a text input with its cursor when focused.
    fn render_input(&self, f: &mut Frame, area: Rect, title: &str, field: &InputField, focus: Focus) {
        let width = usize::from(area.width.saturating_sub(2));
        let offset = field.scroll_offset(width);
        let input = Paragraph::new(field.visible(offset)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.border_style(focus)),
        );
        f.render_widget(input, area);
        if self.focus == focus && self.notice.is_none() && self.screen == Screen::Dashboard {
            let column = u16::try_from(field.cursor - offset).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(column);
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    /// Render the add-task form: name, priority selector and expiry.
    fn render_form(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(24),
                Constraint::Min(16),
            ])
            .split(area);

        self.render_input(f, rows[0], "Task", &self.name, Focus::Name);

        let spans: Vec<Span> = Priority::ALL
            .iter()
            .map(|p| {
                let style = if *p == self.priority {
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Span::styled(format!(" {} ", format_priority(*p)), style)
            })
            .collect();
        let selector = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Priority")
                .borders(Borders::ALL)
                .border_style(self.border_style(Focus::Priority)),
        );
        f.render_widget(selector, rows[1]);

        self.render_input(f, rows[2], "Expiry Date (YYYY-MM-DD)", &self.expiry, Focus::Expiry);
    }

    /// Render the button row; each button names its key.
    fn render_buttons(&self, f: &mut Frame, area: Rect) {
        let button = |label: &'static str, bg: Color| {
            Span::styled(label, Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD))
        };
        let line = Line::from(vec![
            button(" Add Task [Enter] ", ADD_GREEN),
            Span::raw("  "),
            button(" Mark Complete [c] ", COMPLETE_BLUE),
            Span::raw("  "),
            button(" Delete Task [d] ", DELETE_RED),
            Span::raw("  "),
            button(" Refresh [r] ", SLATE),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect) {
        let progress = Progress::of(self.state.tasks());
        let gauge = Gauge::default()
            .block(Block::default().title(progress.label()).borders(Borders::ALL))
            .gauge_style(Style::default().fg(ADD_GREEN).bg(Color::DarkGray))
            .ratio(progress.ratio())
            .label(format!("{}%", progress.percent() as u32));
        f.render_widget(gauge, area);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .state
            .tasks()
            .iter()
            .map(|t| {
                let style = if t.is_completed() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(list_line(t), style))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Tasks")
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::List)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let bars: Vec<Bar> = status_counts(self.state.tasks())
            .into_iter()
            .map(|(status, count)| {
                let color = match status {
                    Status::Pending => SOFT_RED,
                    Status::Completed => SKY_BLUE,
                };
                Bar::default()
                    .value(count)
                    .label(Line::from(format_status(status)))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::default().title("Task Status").borders(Borders::ALL))
            .data(BarGroup::default().bars(&bars))
            .bar_width(11)
            .bar_gap(3);
        f.render_widget(chart, area);
    }

    fn render_dashboard(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // form
                Constraint::Length(1), // buttons
                Constraint::Length(3), // progress
                Constraint::Min(6),    // list + chart
            ])
            .split(area);

        let header = Paragraph::new(Line::from(Span::styled(
            "Task Manager",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        self.render_form(f, chunks[1]);
        self.render_buttons(f, chunks[2]);
        self.render_progress(f, chunks[3]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[4]);
        self.render_list(f, body[0]);
        self.render_chart(f, body[1]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(format!("{:<12}", k), Style::default().add_modifier(Modifier::BOLD));
        let text = vec![
            Line::from(""),
            Line::from(vec![key("Tab"), Span::raw("Next field (Shift+Tab: previous)")]),
            Line::from(vec![key("Enter"), Span::raw("Add task (form) / mark complete (list)")]),
            Line::from(vec![key("Left/Right"), Span::raw("Change priority")]),
            Line::from(vec![key("Up/Down"), Span::raw("Move selection")]),
            Line::from(vec![key("c"), Span::raw("Mark selected task complete")]),
            Line::from(vec![key("d"), Span::raw("Delete selected task")]),
            Line::from(vec![key("r / F5"), Span::raw("Reload tasks from file")]),
            Line::from(vec![key("a"), Span::raw("Jump to the task name field")]),
            Line::from(vec![key("Esc"), Span::raw("Quit (q from the list)")]),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the modal notice over the dashboard.
    fn render_notice(&self, f: &mut Frame, area: Rect, notice: &Notice) {
        let color = match notice.level {
            NoticeLevel::Info => COMPLETE_BLUE,
            NoticeLevel::Warning => Color::Rgb(230, 160, 0),
            NoticeLevel::Error => DELETE_RED,
        };
        let block = Block::default()
            .title(notice.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(notice.message.as_str()),
            Line::from(""),
            Line::from(Span::styled("Press any key to continue", Style::default().fg(Color::DarkGray))),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let hint = match (self.screen, self.focus) {
                (Screen::Help, _) => "Esc to return",
                (_, Focus::List) => "c complete | d delete | r refresh | h help | q quit",
                (_, Focus::Priority) => "Left/Right change priority | Enter add | Tab next",
                _ => "Enter add | Tab next field | Esc quit",
            };
            let tasks = self.state.tasks();
            let overdue = overdue_count(tasks, Local::now().date_naive());
            if overdue > 0 {
                format!("Tasks: {} ({} overdue) | {}", tasks.len(), overdue, hint)
            } else {
                format!("Tasks: {} | {}", tasks.len(), hint)
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.screen {
            Screen::Dashboard => self.render_dashboard(f, chunks[0]),
            Screen::Help => self.render_help(f, chunks[0]),
        }
        if let Some(notice) = &self.notice {
            self.render_notice(f, chunks[0], notice);
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
