//! Main application logic and TUI event loop.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{info, warn};

use crate::cli::AppConfig;
use crate::data::{compute_stats, parse_entry, DataStore, Stats, Storage};
use crate::selection::RowSelection;
use crate::ui::{
    chart::DistanceChart,
    widgets::{EntryForm, EntryFormPanel, EntryTable, StatusBar, StatusMessage},
    ConfirmDialog, HelpOverlay, PathPrompt, Theme,
};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default file name offered when saving without a current file
const DEFAULT_FILE_NAME: &str = "runs.txt";

/// Which panel receives keys in the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Form,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Open,
    Save,
}

/// What the screen is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Chart(Stats),
    ConfirmOverwrite,
    Prompt { action: FileAction, input: String },
}

/// Application state
pub struct App {
    config: AppConfig,
    theme: Theme,

    // Data
    store: DataStore,
    current_file: Option<PathBuf>,
    /// Stats from the last time the chart was opened
    last_stats: Option<Stats>,

    // UI state
    form: EntryForm,
    selection: RowSelection,
    focused: FocusedPanel,
    mode: Mode,
    show_help: bool,

    should_quit: bool,
    message: Option<StatusMessage>,
}

impl App {
    /// Create a new App, loading the configured file if it exists
    pub fn new(config: AppConfig) -> Self {
        let mut app = App {
            config,
            theme: Theme::default(),
            store: DataStore::new(),
            current_file: None,
            last_stats: None,
            form: EntryForm::default(),
            selection: RowSelection::new(),
            focused: FocusedPanel::Form,
            mode: Mode::Normal,
            show_help: false,
            should_quit: false,
            message: None,
        };

        if let Some(path) = app.config.file.clone() {
            if path.exists() {
                if let Err(e) = app.open_file(&path) {
                    app.set_error(format!("{e:#}"));
                }
            } else {
                app.set_info(format!("{} will be created on save", path.display()));
                app.current_file = Some(path);
            }
        }

        app
    }

    /// Set an error message to display (non-fatal)
    pub fn set_error(&mut self, text: String) {
        warn!("{text}");
        self.message = Some(StatusMessage {
            text,
            is_error: true,
            at: Local::now().format("%H:%M:%S").to_string(),
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(StatusMessage {
            text,
            is_error: false,
            at: Local::now().format("%H:%M:%S").to_string(),
        });
    }

    /// Validate the form and add its entry to the store
    fn submit_form(&mut self) {
        let (day, distance) = match parse_entry(&self.form.day, &self.form.distance) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };

        match self.store.add(day, distance) {
            Ok(()) => {
                self.form.reset();
                self.selection.clear_marks();
                self.selection.clamp(self.store.len());
                self.message = None;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Delete the marked rows, or the cursor row if none are marked
    fn delete_selected(&mut self) {
        let targets = self.selection.targets(self.store.len());
        if targets.is_empty() {
            return;
        }
        let count = targets.len();
        self.store.delete_indices(targets);
        self.selection.clear_marks();
        self.selection.clamp(self.store.len());
        self.set_info(format!("Deleted {count} entries"));
    }

    /// Replace the store with the contents of `path`.
    ///
    /// The store is only touched once the file has been read in full.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let entries = Storage::load(path).context("Open failed")?;
        let kept = self.store.replace_with(entries);
        self.selection = RowSelection::new();
        self.current_file = Some(path.to_path_buf());
        self.set_info(format!("Loaded {kept} entries from {}", path.display()));
        Ok(())
    }

    /// Write the store to `path`, overwriting it
    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        Storage::save(path, self.store.entries()).context("Save failed")?;
        self.current_file = Some(path.to_path_buf());
        self.set_info(format!(
            "Saved {} entries to {}",
            self.store.len(),
            path.display()
        ));
        Ok(())
    }

    fn begin_open(&mut self) {
        if !self.store.is_empty() && self.config.confirm_overwrite {
            self.mode = Mode::ConfirmOverwrite;
        } else {
            self.open_prompt(FileAction::Open);
        }
    }

    fn begin_save(&mut self) {
        if self.store.is_empty() {
            self.set_info("Nothing to save".to_string());
            return;
        }
        self.open_prompt(FileAction::Save);
    }

    fn open_prompt(&mut self, action: FileAction) {
        let input = match (&self.current_file, action) {
            (Some(path), _) => path.display().to_string(),
            (None, FileAction::Save) => DEFAULT_FILE_NAME.to_string(),
            (None, FileAction::Open) => String::new(),
        };
        self.mode = Mode::Prompt { action, input };
    }

    /// Compute stats over the current distances and switch to the chart
    fn show_chart(&mut self) {
        if self.store.is_empty() {
            self.set_info("No entries yet".to_string());
            return;
        }
        let stats = compute_stats(&self.store.distances());
        info!(count = self.store.len(), total = stats.total, "chart opened");
        self.last_stats = Some(stats);
        self.mode = Mode::Chart(stats);
    }

    fn toggle_confirm_overwrite(&mut self) {
        self.config.confirm_overwrite = !self.config.confirm_overwrite;
        let state = if self.config.confirm_overwrite { "on" } else { "off" };
        self.set_info(format!("Ask before overwrite: {state}"));
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        // Global shortcuts
        if ctrl && matches!(key, KeyCode::Char('q') | KeyCode::Char('c')) {
            self.should_quit = true;
            return Ok(());
        }

        if self.show_help {
            if matches!(
                key,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1)
            ) {
                self.show_help = false;
            }
            return Ok(());
        }

        match self.mode.clone() {
            Mode::Prompt { action, input } => self.handle_prompt_input(action, input, key),
            Mode::ConfirmOverwrite => {
                match key {
                    KeyCode::Char('y') | KeyCode::Char('Y') => self.open_prompt(FileAction::Open),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.mode = Mode::Normal
                    }
                    _ => {}
                }
                Ok(())
            }
            Mode::Chart(_) => {
                match key {
                    KeyCode::Esc | KeyCode::Char('c') => self.mode = Mode::Normal,
                    KeyCode::Char('d') if ctrl => self.mode = Mode::Normal,
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
                        self.show_help = true
                    }
                    _ => {}
                }
                Ok(())
            }
            Mode::Normal => {
                if ctrl {
                    match key {
                        KeyCode::Char('o') => self.begin_open(),
                        KeyCode::Char('s') => self.begin_save(),
                        KeyCode::Char('d') => self.show_chart(),
                        _ => {}
                    }
                    return Ok(());
                }
                match self.focused {
                    FocusedPanel::Form => self.handle_form_input(key),
                    FocusedPanel::Table => self.handle_table_input(key),
                }
                Ok(())
            }
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.form.push(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Tab | KeyCode::BackTab => self.form.active = self.form.active.toggle(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc | KeyCode::Down => self.focused = FocusedPanel::Table,
            _ => {}
        }
    }

    fn handle_table_input(&mut self, key: KeyCode) {
        let len = self.store.len();
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('a') | KeyCode::Tab | KeyCode::BackTab => {
                self.focused = FocusedPanel::Form
            }
            KeyCode::Down | KeyCode::Char('j') => self.selection.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.selection.prev(len),
            KeyCode::Char(' ') if len > 0 => {
                self.selection.toggle_cursor();
            }
            KeyCode::Char('u') => self.selection.clear_marks(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('c') => self.show_chart(),
            KeyCode::Char('o') => self.toggle_confirm_overwrite(),
            _ => {}
        }
    }

    fn handle_prompt_input(
        &mut self,
        action: FileAction,
        mut input: String,
        key: KeyCode,
    ) -> Result<()> {
        match key {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return Ok(());
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    return Ok(());
                }
                let path = PathBuf::from(trimmed);
                return match action {
                    FileAction::Open => self.open_file(&path),
                    FileAction::Save => self.save_file(&path),
                };
            }
            _ => {}
        }
        self.mode = Mode::Prompt { action, input };
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        // Main layout: body, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Body
                Constraint::Length(3), // Status bar
            ])
            .split(size);

        if let Mode::Chart(stats) = &self.mode {
            let days = self.store.days();
            let distances = self.store.distances();
            let chart = DistanceChart::new(&days, &distances, stats, &self.theme);
            chart.render(frame, main_chunks[0], true);
        } else {
            let body_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Entry form
                    Constraint::Min(3),    // Table
                ])
                .split(main_chunks[0]);

            let form = EntryFormPanel::new(&self.form, &self.theme);
            form.render(frame, body_chunks[0], self.focused == FocusedPanel::Form);

            let table = EntryTable::new(
                self.store.entries(),
                self.selection.cursor(),
                self.selection.marked(),
                &self.theme,
            );
            table.render(frame, body_chunks[1], self.focused == FocusedPanel::Table);
        }

        let status_bar = StatusBar::new(
            self.store.len(),
            self.last_stats.as_ref(),
            self.message.as_ref(),
            self.config.confirm_overwrite,
            &self.theme,
        );
        status_bar.render(frame, main_chunks[1]);

        match &self.mode {
            Mode::Prompt { action, input } => {
                let title = match action {
                    FileAction::Open => "Open file",
                    FileAction::Save => "Save file",
                };
                PathPrompt::new(title, input, &self.theme).render(frame, size);
            }
            Mode::ConfirmOverwrite => {
                ConfirmDialog::new("Replace the current list?", &self.theme).render(frame, size);
            }
            _ => {}
        }

        // Render help overlay if active
        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    info!(file = ?config.file, "starting runlog-tui");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(config);

    // Main loop - always restore the terminal afterwards
    let result = run_main_loop(&mut terminal, &mut app);

    restore_terminal();
    terminal.show_cursor().ok();

    info!("runlog-tui exited");
    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Render - if this fails, we should exit
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Ignore release/repeat events reported by some terminals
                if key.kind == KeyEventKind::Press {
                    if let Err(e) = app.handle_input(key.code, key.modifiers) {
                        // Show the error but keep running
                        app.set_error(format!("{e:#}"));
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Entry;

    fn test_app() -> App {
        App::new(AppConfig {
            file: None,
            confirm_overwrite: true,
            log_path: PathBuf::from("test.log"),
        })
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_input(key, KeyModifiers::NONE).unwrap();
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_input(KeyCode::Char(c), KeyModifiers::CONTROL).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_run(app: &mut App, day: &str, distance: &str) {
        app.focused = FocusedPanel::Form;
        app.form.reset();
        type_text(app, day);
        press(app, KeyCode::Tab);
        type_text(app, distance);
        press(app, KeyCode::Enter);
    }

    fn is_error(app: &App) -> bool {
        app.message.as_ref().map(|m| m.is_error).unwrap_or(false)
    }

    #[test]
    fn test_add_run_through_form() {
        let mut app = test_app();
        add_run(&mut app, "3", "2,5");

        assert_eq!(app.store.entries(), &[Entry::new(3, 2.5)]);
        assert!(app.form.day.is_empty());
        assert!(app.form.distance.is_empty());
        assert!(!is_error(&app));
    }

    #[test]
    fn test_duplicate_day_reports_error() {
        let mut app = test_app();
        add_run(&mut app, "1", "5");
        add_run(&mut app, "1", "7");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.distances(), vec![5.0]);
        assert!(is_error(&app));
        // Rejected input stays in the form
        assert_eq!(app.form.day, "1");
    }

    #[test]
    fn test_invalid_input_reports_error() {
        let mut app = test_app();
        add_run(&mut app, "1", "-2");
        assert!(app.store.is_empty());
        assert!(is_error(&app));

        add_run(&mut app, "x", "2");
        assert!(app.store.is_empty());
        assert!(is_error(&app));
    }

    #[test]
    fn test_delete_marked_rows() {
        let mut app = test_app();
        for day in ["1", "2", "3", "4"] {
            add_run(&mut app, day, "1");
        }
        press(&mut app, KeyCode::Esc); // focus table
        press(&mut app, KeyCode::Char(' ')); // mark row 0
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' ')); // mark row 2
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.store.days(), vec![2, 4]);
        assert!(app.selection.marked().is_empty());
    }

    #[test]
    fn test_delete_cursor_row_when_nothing_marked() {
        let mut app = test_app();
        add_run(&mut app, "1", "1");
        add_run(&mut app, "2", "1");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Up); // wraps to last row
        press(&mut app, KeyCode::Delete);

        assert_eq!(app.store.days(), vec![1]);
        assert_eq!(app.selection.cursor(), 0);
    }

    #[test]
    fn test_chart_needs_entries() {
        let mut app = test_app();
        ctrl(&mut app, 'd');
        assert_eq!(app.mode, Mode::Normal);

        add_run(&mut app, "1", "1");
        add_run(&mut app, "2", "3");
        ctrl(&mut app, 'd');
        match app.mode {
            Mode::Chart(stats) => {
                assert_eq!(stats.total, 4.0);
                assert_eq!(stats.mean, 2.0);
            }
            ref other => panic!("expected chart, got {other:?}"),
        }
        assert!(app.last_stats.is_some());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_save_and_open_through_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week.txt");
        let path_text = path.display().to_string();

        let mut app = test_app();
        add_run(&mut app, "2", "4.5");
        add_run(&mut app, "1", "3");

        ctrl(&mut app, 's');
        match &mut app.mode {
            Mode::Prompt { action, input } => {
                assert_eq!(*action, FileAction::Save);
                assert_eq!(input.as_str(), DEFAULT_FILE_NAME);
                input.clear();
            }
            other => panic!("expected save prompt, got {other:?}"),
        }
        type_text(&mut app, &path_text);
        press(&mut app, KeyCode::Enter);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1;3\n2;4.5\n");

        let mut fresh = test_app();
        ctrl(&mut fresh, 'o');
        assert!(matches!(fresh.mode, Mode::Prompt { action: FileAction::Open, .. }));
        type_text(&mut fresh, &path_text);
        press(&mut fresh, KeyCode::Enter);
        assert_eq!(fresh.store.entries(), app.store.entries());
        assert_eq!(fresh.current_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_open_asks_before_overwrite() {
        let mut app = test_app();
        add_run(&mut app, "1", "1");

        ctrl(&mut app, 'o');
        assert_eq!(app.mode, Mode::ConfirmOverwrite);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Normal);

        ctrl(&mut app, 'o');
        press(&mut app, KeyCode::Char('y'));
        assert!(matches!(app.mode, Mode::Prompt { action: FileAction::Open, .. }));
    }

    #[test]
    fn test_open_without_confirm_when_disabled() {
        let mut app = test_app();
        add_run(&mut app, "1", "1");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('o'));
        assert!(!app.config.confirm_overwrite);

        ctrl(&mut app, 'o');
        assert!(matches!(app.mode, Mode::Prompt { action: FileAction::Open, .. }));
    }

    #[test]
    fn test_failed_open_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        add_run(&mut app, "1", "1");

        let result = app.open_file(&dir.path().join("missing.txt"));
        assert!(result.is_err());
        assert_eq!(app.store.days(), vec![1]);
    }

    #[test]
    fn test_save_empty_store_is_refused() {
        let mut app = test_app();
        ctrl(&mut app, 's');
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.message.as_ref().map(|m| m.text.as_str()),
            Some("Nothing to save")
        );
    }

    #[test]
    fn test_startup_loads_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.txt");
        std::fs::write(&path, "3;2.5\n\nx;y\n3;9.9\n1;4\n").unwrap();

        let app = App::new(AppConfig {
            file: Some(path.clone()),
            confirm_overwrite: true,
            log_path: PathBuf::from("test.log"),
        });
        assert_eq!(app.store.entries(), &[Entry::new(1, 4.0), Entry::new(3, 2.5)]);
        assert_eq!(app.current_file, Some(path));
    }
}
