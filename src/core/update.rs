use crate::{
    core::{
        cmd::Cmd,
        input_engine::{InputEngine, NoopInputEngine},
        msg::{search::SearchMsg, ui::UiMsg, Msg},
        state::{AppState, Freshness},
    },
    domain::search::FETCH_FAILURE_MESSAGE,
};

/// Collaborators the update function needs but must not own
pub struct UpdateContext<'a> {
    pub input: &'a dyn InputEngine,
}

impl Default for UpdateContext<'static> {
    fn default() -> Self {
        static NOOP: NoopInputEngine = NoopInputEngine;
        Self { input: &NOOP }
    }
}

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, state: AppState) -> (AppState, Vec<Cmd>) {
    update_with_context(msg, state, &UpdateContext::default())
}

/// Update function with injected collaborators (input editing engine)
pub fn update_with_context(
    msg: Msg,
    mut state: AppState,
    ctx: &UpdateContext<'_>,
) -> (AppState, Vec<Cmd>) {
    match msg {
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        Msg::Ui(UiMsg::ProcessInputKey(key)) => {
            if !state.ui.has_alert() {
                state.ui.input = ctx.input.apply_keys(&state.ui.input, &[key]);
            }
            (state, vec![])
        }

        Msg::Ui(UiMsg::SubmitQuery) => {
            if state.ui.has_alert() {
                return (state, vec![]);
            }
            let raw_query = state.ui.input.content.clone();
            let commands = state.search.update(SearchMsg::Submit(raw_query));
            (state, commands)
        }

        Msg::Ui(ui_msg) => {
            let commands = state.ui.update(ui_msg);
            (state, commands)
        }

        Msg::Search(SearchMsg::Finished { seq, outcome }) => {
            match state.search.settle(seq) {
                Freshness::Stale => {
                    log::debug!("Discarding response of superseded search #{seq}");
                }
                Freshness::Current => match outcome {
                    Ok(response) => {
                        log::info!("Search #{seq} completed");
                        state.search.render(response);
                        state.ui.results_scroll = 0;
                    }
                    Err(e) => {
                        log::error!("Error: search #{seq} failed: {e}");
                        state.ui.alert = Some(FETCH_FAILURE_MESSAGE.to_string());
                    }
                },
            }
            (state, vec![Cmd::RequestRender])
        }

        Msg::Search(search_msg) => {
            let commands = state.search.update(search_msg);
            (state, commands)
        }
    }
}
