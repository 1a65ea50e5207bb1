use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use studysheet::ai::Credentials;
use studysheet::ai_worker::spawn_ai_worker;
use studysheet::logger;
use studysheet::models::{App, AppState, Document, INITIAL_CONTENT, INITIAL_TITLE};
use studysheet::ui::{draw_quit_confirmation, draw_workspace};
use studysheet::workspace::{apply_ai_response, handle_workspace_input};

fn main() -> io::Result<()> {
    logger::init();
    logger::log("studysheet starting");

    let credentials = Credentials::from_env();
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let _worker = spawn_ai_worker(credentials.clone(), response_tx, request_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let document = Document::new(INITIAL_TITLE, INITIAL_CONTENT);
    let mut app = App::new(
        document,
        credentials.is_configured(),
        request_tx,
        response_rx,
    );
    let mut app_state = AppState::Workspace;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Workspace => draw_workspace(f, &mut app),
            AppState::QuitConfirm => draw_quit_confirmation(f),
        })?;

        // Merge any finished AI work before handling the next key
        while let Ok(response) = app.ai_rx.try_recv() {
            apply_ai_response(&mut app, response);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }

                match app_state {
                    AppState::Workspace => {
                        handle_workspace_input(&mut app, key, &mut app_state)?;
                    }
                    AppState::QuitConfirm => match key.code {
                        KeyCode::Char('y') => break,
                        KeyCode::Char('n') | KeyCode::Esc => {
                            app_state = AppState::Workspace;
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("studysheet exiting");
    Ok(())
}
