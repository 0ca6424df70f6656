use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::RemoteConfig;
use crate::panel::{Diagnostics, FilePanel, MemoryDiagnostics};
use crate::remote::RemoteClient;

use super::input::Input;
use super::view;

pub(super) fn run(remote: RemoteConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let client = RemoteClient::new(remote)?;
    let mut app = App::new(client);

    // Initial load on mount; a failure leaves the registry empty.
    app.panel.refresh();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

pub(super) struct App {
    pub(super) panel: FilePanel<RemoteClient>,

    // Internal log of swallowed failures. Never rendered: a failed command
    // changes nothing on screen.
    pub(super) diagnostics: MemoryDiagnostics,

    pub(super) selected: usize,
    pub(super) rename_input: Option<Input>,
    pub(super) upload_input: Option<Input>,
    pub(super) quit: bool,
}

impl App {
    fn new(client: RemoteClient) -> Self {
        let diagnostics = MemoryDiagnostics::default();
        Self {
            panel: FilePanel::new(client, Box::new(diagnostics.clone())),
            diagnostics,
            selected: 0,
            rename_input: None,
            upload_input: None,
            quit: false,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.panel.registry().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn start_edit_selected(&mut self) {
        let Some(record) = self.panel.registry().records().get(self.selected).cloned() else {
            return;
        };
        self.rename_input = Some(Input::from_text(&record.name));
        self.panel.start_edit(&record);
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| view::draw(f, app)).context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.upload_input.is_some() {
        handle_upload_key(app, key);
        return;
    }
    if app.panel.session().is_some() {
        handle_rename_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit = true;
        }
        KeyCode::Char('r') => {
            app.panel.refresh();
            app.clamp_selection();
        }
        KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.selected + 1 < app.panel.registry().len() {
                app.selected += 1;
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.start_edit_selected();
        }
        KeyCode::Char('d') => {
            if let Some(record) = app.panel.registry().records().get(app.selected) {
                let id = record.id.clone();
                app.panel.delete(&id);
                app.clamp_selection();
            }
        }
        KeyCode::Char('u') => {
            app.upload_input = Some(Input::default());
        }
        _ => {}
    }
}

// Rename has no cancel transition: the only ways out are committing or
// starting an edit on a different row.
fn handle_rename_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.rename_input = None;
            app.panel.commit_rename();
            app.clamp_selection();
        }
        KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
            app.start_edit_selected();
        }
        KeyCode::Down => {
            if app.selected + 1 < app.panel.registry().len() {
                app.selected += 1;
            }
            app.start_edit_selected();
        }
        KeyCode::Left => {
            if let Some(input) = app.rename_input.as_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.rename_input.as_mut() {
                input.move_right();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.rename_input.as_mut() {
                input.backspace();
                let draft = input.buf.clone();
                app.panel.update_draft(&draft);
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.rename_input.as_mut() {
                input.delete();
                let draft = input.buf.clone();
                app.panel.update_draft(&draft);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.rename_input.as_mut() {
                input.insert_char(c);
                let draft = input.buf.clone();
                app.panel.update_draft(&draft);
            }
        }
        _ => {}
    }
}

fn handle_upload_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            submit_upload(app);
        }
        KeyCode::Esc => {
            app.upload_input = None;
        }
        KeyCode::Left => {
            if let Some(input) = app.upload_input.as_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.upload_input.as_mut() {
                input.move_right();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.upload_input.as_mut() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.upload_input.as_mut() {
                input.delete();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.upload_input.as_mut() {
                input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn submit_upload(app: &mut App) {
    let Some(input) = app.upload_input.take() else {
        return;
    };
    let path = std::path::PathBuf::from(input.buf.trim());
    match std::fs::read(&path) {
        Ok(bytes) => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unnamed")
                .to_string();
            app.panel.upload(&name, bytes);
            app.clamp_selection();
        }
        Err(err) => {
            let err = anyhow::Error::new(err).context(format!("read {}", path.display()));
            app.diagnostics.record("upload", &err);
        }
    }
}
