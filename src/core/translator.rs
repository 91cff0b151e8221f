use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{
    msg::{search::SearchMsg, system::SystemMsg, ui::UiMsg, Msg},
    raw_msg::RawMsg,
    state::AppState,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on context
        RawMsg::Key(key) => translate_key_event(key, state),

        // Network events
        RawMsg::SearchFinished { seq, outcome } => {
            vec![Msg::Search(SearchMsg::Finished { seq, outcome })]
        }

        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    // Handle global key bindings first
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return vec![Msg::System(SystemMsg::Quit)];
    }

    if state.ui.has_alert() {
        translate_alert_keys(key)
    } else {
        translate_form_keys(key, state)
    }
}

/// The alert is blocking: only dismissal gets through
fn translate_alert_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => vec![Msg::Ui(UiMsg::DismissAlert)],
        _ => vec![],
    }
}

fn translate_form_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    match key.code {
        KeyCode::Enter => {
            if state.search.enabled {
                vec![Msg::Ui(UiMsg::SubmitQuery)]
            } else {
                vec![]
            }
        }
        KeyCode::Esc => vec![Msg::System(SystemMsg::Quit)],
        KeyCode::Up => vec![Msg::Ui(UiMsg::ScrollUp)],
        KeyCode::Down => vec![Msg::Ui(UiMsg::ScrollDown)],
        KeyCode::PageUp => vec![Msg::Ui(UiMsg::PageUp)],
        KeyCode::PageDown => vec![Msg::Ui(UiMsg::PageDown)],
        _ => vec![Msg::Ui(UiMsg::ProcessInputKey(key))],
    }
}
