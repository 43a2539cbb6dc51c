mod state;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};
use std::{io, time::Duration};
use tracing::info;

use sugarlog_core::models::PlotView;
use sugarlog_core::service::SugarService;

use state::App;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

const INPUT_POLL: Duration = Duration::from_millis(200);

/// Run the interactive entry form until the user quits.
pub(crate) fn run(svc: SugarService) -> Result<()> {
    let mut app = App::new(svc);
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    info!("interactive shell closed");
    result
}

/// Show a chart full-screen until any key is pressed.
pub(crate) fn show_plot(plot: &PlotView) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = plot_loop(&mut terminal, plot);
    restore_terminal(&mut terminal)?;
    result
}

fn plot_loop(terminal: &mut Term, plot: &PlotView) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(f.size());
            ui::render_plot(f, plot, chunks[0]);
            f.render_widget(
                Paragraph::new("Press any key to close")
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        })?;
        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
