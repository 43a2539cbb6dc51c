use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use sugarlog_core::models::{Notification, PlotView, TableView};
use sugarlog_core::service::{Outcome, SugarService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Time,
    Level,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Date, Field::Time, Field::Level];

    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "Date (MM-DD-YYYY)",
            Field::Time => "Time (HH:MM 24-hour format)",
            Field::Level => "Blood Sugar Level (mg/dL)",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Date => Field::Time,
            Field::Time => Field::Level,
            Field::Level => Field::Date,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Date => Field::Level,
            Field::Time => Field::Date,
            Field::Level => Field::Time,
        }
    }
}

#[derive(Debug)]
pub enum Screen {
    Form,
    Table { view: TableView, scroll: usize },
    Plot(PlotView),
}

/// Form state plus whatever view is on screen. Owns no terminal.
pub struct App {
    svc: SugarService,
    date: String,
    time: String,
    level: String,
    pub focus: Field,
    pub screen: Screen,
    pub notice: Option<Notification>,
    quit: bool,
}

impl App {
    pub fn new(svc: SugarService) -> Self {
        Self {
            svc,
            date: String::new(),
            time: String::new(),
            level: String::new(),
            focus: Field::Date,
            screen: Screen::Form,
            notice: None,
            quit: false,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::Level => &self.level,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date,
            Field::Time => &mut self.time,
            Field::Level => &mut self.level,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Submit the form. Fields are cleared only when the reading was stored.
    pub fn on_add(&mut self) {
        let outcome = self.svc.add_entry(&self.date, &self.time, &self.level);
        if outcome.saved.is_some() {
            self.date.clear();
            self.time.clear();
            self.level.clear();
            self.focus = Field::Date;
        }
        self.notice = Some(outcome.notification);
    }

    pub fn on_view(&mut self) {
        match self.svc.view_entries() {
            Outcome::Render(view) => {
                self.notice = None;
                self.screen = Screen::Table { view, scroll: 0 };
            }
            Outcome::Notify(n) => self.notice = Some(n),
        }
    }

    pub fn on_plot(&mut self) {
        match self.svc.plot_entries() {
            Outcome::Render(plot) => {
                self.notice = None;
                self.screen = Screen::Plot(plot);
            }
            Outcome::Notify(n) => self.notice = Some(n),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key.code, ctrl),
            Screen::Table { .. } | Screen::Plot(_) => self.handle_view_key(key.code),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, ctrl: bool) {
        match code {
            KeyCode::Char('a') if ctrl => self.on_add(),
            KeyCode::Char('v') if ctrl => self.on_view(),
            KeyCode::Char('p') if ctrl => self.on_plot(),
            KeyCode::Enter => self.on_add(),
            KeyCode::F(2) => self.on_view(),
            KeyCode::F(3) => self.on_plot(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Backspace => {
                self.field_mut(self.focus).pop();
            }
            KeyCode::Esc => {
                if self.notice.take().is_none() {
                    self.quit = true;
                }
            }
            KeyCode::Char(c) if !ctrl => self.field_mut(self.focus).push(c),
            other => debug!(?other, "unbound key"),
        }
    }

    fn handle_view_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => self.screen = Screen::Form,
            KeyCode::Down | KeyCode::Char('j') => {
                if let Screen::Table { view, scroll } = &mut self.screen {
                    if *scroll + 1 < view.rows.len() {
                        *scroll += 1;
                    }
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Screen::Table { scroll, .. } = &mut self.screen {
                    *scroll = scroll.saturating_sub(1);
                }
            }
            _ => {}
        }
    }
}
