//! Spectra - terminal frequency meter
//!
//! Live microphone spectrum with dominant frequency, musical note,
//! 2D bars, a 3D height field and CSV history export.

mod session;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use session::{default_export_path, next_device, Session};
use spectra_analysis::{HistoryError, RangeMode};
use spectra_audio::list_input_devices;
use spectra_input::{Command, InputHandler};
use spectra_settings::Settings;
use spectra_tui::{
    request_session, App, FieldProjection, HeightFieldWidget, HelpWidget, HistoryWidget,
    ImmersiveBackend, ImmersiveMode, LevelWidget, ReadoutWidget, RingWidget, SpectrumBarsWidget,
    StatusBarWidget, TerminalDisplay, Theme, View3d,
};
use spectra_viz::PerformanceTier;

/// Frame rate for UI updates
const FPS: u64 = 30;

/// Width of the readout column
const LEFT_COLUMN: u16 = 40;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("spectra starting");

    let settings = Settings::load();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "spectra exited with error");
    }
    result
}

/// Log to `<data dir>/spectra/spectra.log`; the terminal belongs to the UI
fn init_logging() -> anyhow::Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spectra");
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("spectra.log"))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut app = App::with_settings(settings);
    let mut input_handler = InputHandler::new();
    let mut session = Session::new(app.state.range, app.state.tier);
    let mut immersive = TerminalDisplay;

    let frame_duration = Duration::from_millis(1000 / FPS);
    let mut last_frame = Instant::now();

    app.state.set_message(app.state.labels().subtitle);

    loop {
        if app.should_quit {
            break;
        }

        // Advance the measurement
        if let Err(reason) = session.tick(app.state.toggles) {
            tracing::warn!(%reason, "input source failed");
            session.stop();
            app.state.stop();
            app.state.set_error(format!("Input lost: {}", reason));
        }

        // Render
        terminal.draw(|frame| {
            render_ui(frame, &app, &session);
        })?;

        // Handle input
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = input_handler.handle_key(key) {
                    handle_command(&mut app, &mut session, &mut immersive, cmd);
                }

                // Update mode in app state
                app.state.set_mode(input_handler.mode());
                app.state.command_buffer = input_handler.command_buffer().to_string();
            }
        }

        // Maintain frame rate
        let elapsed = last_frame.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
        last_frame = Instant::now();
    }

    session.stop();
    tracing::info!("spectra shutting down");
    Ok(())
}

fn handle_command(
    app: &mut App,
    session: &mut Session,
    immersive: &mut dyn ImmersiveBackend,
    cmd: Command,
) {
    match cmd {
        // Capture
        Command::Start => {
            if app.state.toggles.running && !app.state.demo {
                return;
            }
            start_capture(app, session);
        }
        Command::Stop => {
            if session.is_active() {
                session.stop();
                app.state.stop();
                app.state.set_message("Stopped");
            }
        }
        Command::ToggleDemo => {
            if session.is_demo() {
                session.stop();
                app.state.stop();
                app.state.set_message("Demo stopped");
            } else {
                session.stop();
                let name = session.start_demo();
                app.state.start(name, true);
                app.state.set_success("Demo tone sweep running");
            }
        }

        // Measurement
        Command::ToggleFreeze => {
            app.state.toggle_freeze();
            let label = app.state.labels().frozen;
            if app.state.toggles.frozen {
                app.state.set_message(format!("Max {}", label));
            } else {
                app.state.clear_message();
            }
        }
        Command::TogglePause => {
            if app.state.toggles.running {
                app.state.toggle_pause();
            }
        }

        // History
        Command::Export(path) => {
            let path = path.unwrap_or_else(default_export_path);
            match session.pipeline().history().write_csv(&path) {
                Ok(rows) => app
                    .state
                    .set_success(format!("Exported {} readings to {}", rows, path.display())),
                Err(HistoryError::Empty) => app.state.set_warning("No data to export"),
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "export failed");
                    app.state.set_error(format!("Export failed: {}", e));
                }
            }
        }

        // View
        Command::ToggleTeacherMode => {
            app.state.toggle_teacher_mode();
            let labels = app.state.labels();
            let label = if app.state.teacher_mode {
                labels.teacher_mode
            } else {
                labels.student_mode
            };
            app.state.set_message(label);
            persist(app);
        }
        Command::Toggle3d => app.state.toggle_3d(),
        Command::CycleView3d => {
            app.state.cycle_view_3d();
            app.state
                .set_message(format!("3D view: {}", app.state.view_3d.name()));
        }
        Command::ToggleHelp => {
            app.state.toggle_help();
            persist(app);
        }

        // Analysis settings
        Command::CycleRange => {
            let range = app.state.range.next();
            set_range(app, session, range);
        }
        Command::SetRange(range) => set_range(app, session, range),
        Command::CyclePerformance => {
            let tier = app.state.tier.next();
            set_tier(app, session, tier);
        }
        Command::SetPerformance(tier) => set_tier(app, session, tier),

        // Input device
        Command::CycleDevice => {
            let devices = list_input_devices();
            match next_device(&devices, app.state.input_device.as_deref()) {
                Some(device) => select_device(app, session, device),
                None => app.state.set_warning("No input devices found"),
            }
        }
        Command::SetDevice(device) => select_device(app, session, device),

        // Appearance
        Command::ToggleTheme => {
            app.state.toggle_theme();
            persist(app);
        }
        Command::SetTheme(choice) => {
            app.state.set_theme(choice);
            persist(app);
        }
        Command::ToggleLanguage => {
            app.state.toggle_language();
            persist(app);
        }
        Command::SetLanguage(language) => {
            app.state.set_language(language);
            persist(app);
        }

        // Immersive sessions
        Command::BeginAr => begin_immersive(app, immersive, ImmersiveMode::Ar),
        Command::BeginVr => begin_immersive(app, immersive, ImmersiveMode::Vr),

        Command::EnterCommandMode | Command::EnterNormalMode => {}
        Command::ExecuteCommand(cmd) => {
            app.state.set_error(format!("Unknown command: {}", cmd));
        }

        Command::Quit => app.quit(),
        Command::Cancel => app.state.clear_message(),
    }
}

/// Open the selected input device and start measuring from it
fn start_capture(app: &mut App, session: &mut Session) {
    let device = app.state.input_device.clone();
    match session.start_mic(device.as_deref()) {
        Ok(name) => {
            app.state.start(name.clone(), false);
            app.state.set_success(format!("Capturing from {}", name));
        }
        Err(e) => {
            tracing::warn!(error = %e, "input capture failed");
            app.state.set_error(format!("Microphone unavailable: {}", e));
        }
    }
}

/// Store the device choice; a running microphone moves over only if the new device opens
fn select_device(app: &mut App, session: &mut Session, device: String) {
    match session.switch_mic(&device) {
        Ok(Some(name)) => {
            app.state.input_device = Some(device);
            app.state.source_name = Some(name.clone());
            app.state.set_success(format!("Capturing from {}", name));
            persist(app);
        }
        Ok(None) => {
            app.state.set_message(format!("Input device: {}", device));
            app.state.input_device = Some(device);
            persist(app);
        }
        Err(e) => {
            tracing::warn!(error = %e, %device, "device switch failed");
            app.state
                .set_error(format!("Cannot switch to {}: {}", device, e));
        }
    }
}

fn set_range(app: &mut App, session: &mut Session, range: RangeMode) {
    app.state.range = range;
    session.pipeline_mut().set_range(range);
    app.state.set_message(format!("Range: {}", range));
    persist(app);
}

fn set_tier(app: &mut App, session: &mut Session, tier: PerformanceTier) {
    app.state.tier = tier;
    session.pipeline_mut().set_tier(tier);
    app.state.set_message(format!("Performance: {}", tier));
    persist(app);
}

fn begin_immersive(app: &mut App, backend: &mut dyn ImmersiveBackend, mode: ImmersiveMode) {
    match request_session(backend, mode) {
        Ok(session) => app
            .state
            .set_success(format!("{} session started", session.mode)),
        Err(e) => app.state.set_warning(e.to_string()),
    }
}

/// Save preferences; best effort, the session carries on either way
fn persist(app: &mut App) {
    if let Err(e) = app.state.settings().save() {
        tracing::warn!(error = %e, "failed to save settings");
        app.state.set_warning(format!("Settings not saved: {}", e));
    }
}

fn render_ui(frame: &mut ratatui::Frame, app: &App, session: &Session) {
    let area = frame.area();
    let state = &app.state;
    let theme = &state.theme;
    let labels = state.labels();
    let pipeline = session.pipeline();

    // Clear with background
    let block = ratatui::widgets::Block::default().style(theme.normal());
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(10),   // Main content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], labels.title, theme);

    // Help sits beside the views rather than over them
    let help_width = if state.show_help { 36 } else { 0 };
    let columns = Layout::horizontal([
        Constraint::Length(LEFT_COLUMN),
        Constraint::Min(20),
        Constraint::Length(help_width),
    ])
    .split(chunks[1]);

    // Left column: readout, level, history
    let left = if state.teacher_mode {
        Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(columns[0])
    } else {
        Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(columns[0])
    };

    let readout = ReadoutWidget::new(pipeline.readout(), labels, theme)
        .samples(pipeline.history().len())
        .toggles(state.toggles);
    frame.render_widget(readout, left[0]);

    let level_title = format!(" {} ", labels.level.to_uppercase());
    let level = LevelWidget::new(pipeline.readout().loudness, theme).title(&level_title);
    frame.render_widget(level, left[1]);

    if !state.teacher_mode {
        let history_title = format!(" {} ", labels.history.to_uppercase());
        let history = HistoryWidget::new(pipeline.history(), theme).title(&history_title);
        frame.render_widget(history, left[2]);
    }

    // Right column: 2D bars, then the 3D panel
    let right = if state.show_3d {
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).split(columns[1])
    } else {
        Layout::vertical([Constraint::Min(0), Constraint::Length(0)]).split(columns[1])
    };

    let (canvas_w, canvas_h) = SpectrumBarsWidget::canvas_size(right[0]);
    let bars = pipeline.bars(canvas_w, canvas_h);
    let spectrum_title = format!(" {} [{}] ", labels.spectrum.to_uppercase(), state.range);
    let spectrum = SpectrumBarsWidget::new(&bars, theme).title(&spectrum_title);
    frame.render_widget(spectrum, right[0]);

    if state.show_3d {
        render_3d(frame, right[1], app, session);
    }

    if state.show_help {
        frame.render_widget(HelpWidget::new(theme), columns[2]);
    }

    // Status bar
    let idle_hint = if state.toggles.running {
        format!("{}  |  ? help  : commands", labels.stop)
    } else {
        format!("{}  |  ? help  : commands", labels.start)
    };
    let summary = format!(
        "{} | {} | {}",
        state.source_name.as_deref().unwrap_or("-"),
        state.range,
        state.tier
    );
    let status = StatusBarWidget::new(state.mode, &state.command_buffer, theme)
        .message(state.message.as_deref(), state.message_type)
        .idle_hint(&idle_hint)
        .summary(summary);
    frame.render_widget(status, chunks[2]);
}

fn render_3d(frame: &mut ratatui::Frame, area: Rect, app: &App, session: &Session) {
    let state = &app.state;
    let theme = &state.theme;
    let labels = state.labels();
    let pipeline = session.pipeline();

    match state.view_3d {
        View3d::Waterfall | View3d::Surface => {
            let projection = if state.view_3d == View3d::Waterfall {
                FieldProjection::Waterfall
            } else {
                FieldProjection::Surface
            };
            let title = format!(
                " {} · {} ",
                labels.field.to_uppercase(),
                state.view_3d.name()
            );
            let widget = HeightFieldWidget::new(pipeline.field(), theme)
                .projection(projection)
                .title(&title);
            frame.render_widget(widget, area);
        }
        View3d::Ring => {
            let live = session.is_active() && state.toggles.running;
            let heights = pipeline.ring_heights(live, session.elapsed_secs());
            let title = format!(" {} ", labels.ring.to_uppercase());
            let widget = RingWidget::new(pipeline.ring(), &heights, theme).title(&title);
            frame.render_widget(widget, area);
        }
    }
}

fn render_title(frame: &mut ratatui::Frame, area: Rect, title: &str, theme: &Theme) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let title_text = format!(" SPECTRA · {} ", title);
    let text_width = title_text.chars().count();
    let padding = (area.width as usize).saturating_sub(text_width) / 2;
    let padded = format!(
        "{:═<pad$}{}{:═<rest$}",
        "",
        title_text,
        "",
        pad = padding,
        rest = (area.width as usize).saturating_sub(padding + text_width)
    );

    let line = Line::from(Span::styled(padded, theme.title()));
    frame.render_widget(Paragraph::new(line), area);
}
