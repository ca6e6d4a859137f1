//! stepwise trace player - Terminal User Interface
//!
//! Plays back recorded algorithm traces with ratatui.
//! App logic lives in `stepwise::tui::player_app`.
//!
//! Usage: stepwise-tui [session.yaml]

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use stepwise::config::VizConfig;
    use stepwise::tui::player_app::PlayerApp;

    // Log lines would tear the alternate screen unless RUST_LOG asks for them.
    stepwise::init_tracing("off");

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match VizConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: stepwise-tui [session.yaml]");
                std::process::exit(1);
            }
        },
        None => VizConfig::default(),
    };

    let app = match PlayerApp::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin stepwise-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Gauge, Paragraph, Wrap},
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};
    use stepwise::tui::player_app::PlayerApp;

    /// Upper bound on how long the loop sleeps waiting for input.
    const IDLE_POLL: Duration = Duration::from_millis(100);

    pub fn run(mut app: PlayerApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut PlayerApp,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| ui(f, app))?;

            let timeout = app
                .session
                .controller()
                .until_next_tick()
                .map_or(IDLE_POLL, |next| next.min(IDLE_POLL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            // Wall time drives the logical clock; controls above may have
            // re-armed the timer, which discards what accrued before them.
            let now = Instant::now();
            app.tick(now.duration_since(last_tick));
            last_tick = now;

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &PlayerApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_narrative(f, chunks[1], app);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[2]);
        render_payload(f, main_chunks[0], app);
        render_controls(f, main_chunks[1]);

        render_progress(f, chunks[3], app);
        render_status_bar(f, chunks[4], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let algorithm = app.session.algorithm().unwrap_or("none");
        let description = app
            .session
            .registry()
            .get(algorithm)
            .map(|a| a.describe().description)
            .unwrap_or_default();
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                format!(" {algorithm} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(description, Style::default().fg(Color::Gray)),
        ])])
        .block(Block::default().borders(Borders::ALL).title("stepwise"));
        f.render_widget(title, area);
    }

    fn render_narrative(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let narrative = Paragraph::new(app.narrative().to_string())
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Step"));
        f.render_widget(narrative, area);
    }

    fn render_payload(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let text = app.view().frame.map_or_else(
            || "Nothing loaded. Press Tab to pick an algorithm.".to_string(),
            |frame| {
                let mut payload = frame.payload().clone();
                if let Some(fields) = payload.as_object_mut() {
                    fields.remove("narrative");
                }
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            },
        );
        let payload = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("State"));
        f.render_widget(payload, area);
    }

    fn render_controls(f: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Green));
        let lines = vec![
            Line::from(vec![key("Space"), Span::raw("  play / pause")]),
            Line::from(vec![key("← →"), Span::raw("    step")]),
            Line::from(vec![key("Home End"), Span::raw(" jump")]),
            Line::from(vec![key("+ -"), Span::raw("    speed")]),
            Line::from(vec![key("r"), Span::raw("      rewind")]),
            Line::from(vec![key("l"), Span::raw("      reload")]),
            Line::from(vec![key("g"), Span::raw("      new input")]),
            Line::from(vec![key("Tab"), Span::raw("    next algorithm")]),
            Line::from(vec![key("q"), Span::raw("      quit")]),
        ];
        let controls =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let view = app.view();
        let label = view
            .cursor
            .map_or_else(String::new, |c| format!("{}/{}", c + 1, view.len));
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(app.progress().clamp(0.0, 1.0))
            .label(label);
        f.render_widget(gauge, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let text = app
            .message
            .as_ref()
            .map_or_else(|| app.status_line(), |m| format!("{} | {m}", app.status_line()));
        let status = Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }
}
