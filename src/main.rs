use anyhow::{anyhow, Context, Result};
use clap::Parser;
use country_bubbles::app::App;
use country_bubbles::config::Cli;
use country_bubbles::data::{self, CountrySource, FileSource};
use country_bubbles::metric::{project, Metric};
use country_bubbles::ui;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.export {
        tracing_subscriber::fmt()
            .with_env_filter(cli.log_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}"))?;
        return export(&cli);
    }

    // The terminal owns stdout, so logs go to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &cli);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Non-interactive mode: project once and print the points as JSON
fn export(cli: &Cli) -> Result<()> {
    let metric: Metric = cli.metric.parse().inspect_err(|e| error!(error = %e, "unknown metric"))?;
    let records = FileSource::new(&cli.data).fetch()?;
    let points = project(metric, &records)?;
    info!(metric = %metric, records = records.len(), points = points.len(), "exporting plot points");

    let json = simd_json::serde::to_string_pretty(&points).context("failed to serialize plot points")?;
    println!("{json}");
    Ok(())
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, cli: &Cli) -> Result<()> {
    let size = terminal.size()?;
    let source = FileSource::new(&cli.data);
    info!(data = %source.path().display(), "starting");
    let mut app = App::new(Box::new(source), size.width, size.height);

    data::load_backdrop(&mut app.backdrop, &cli.map_dir);
    if !app.backdrop.has_data() {
        data::simple_world(&mut app.backdrop);
    }

    // An unknown --metric is shown in the status bar like any other bad selection
    let _ = app.select_metric_key(&cli.metric);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Char(c @ '1'..='6') => {
                        let idx = c as usize - '1' as usize;
                        app.select_metric(Metric::ALL[idx]);
                    }
                    KeyCode::Tab => app.next_metric(),
                    KeyCode::BackTab => app.prev_metric(),
                    KeyCode::Char('R') => app.refresh(),

                    KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Char('j') => app.pan(0, 6),
                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),
                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),
                    KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.backdrop.toggle()
                    }
                    KeyCode::Char('c') => app.quit(),

                    KeyCode::Down => app.select_next_row(),
                    KeyCode::Up => app.select_prev_row(),
                    KeyCode::PageDown => app.page_down(),
                    KeyCode::PageUp => app.page_up(),
                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("exiting");
    Ok(())
}
