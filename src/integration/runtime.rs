use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::{Cmd, TuiCommand},
        cmd_executor::CmdExecutor,
        msg::Msg,
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::{update_with_context, UpdateContext},
    },
    infrastructure::{search_service::SearchOperation, tui::textarea_engine::TuiTextAreaEngine},
};

/// Message queue and update loop of the Elm architecture
///
/// Raw events are translated into domain messages, folded into the state by
/// `update`, and the resulting commands are handed to the [`CmdExecutor`].
pub struct Runtime {
    ctx: UpdateContext<'static>,
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: Option<CmdExecutor>,
}

impl Runtime {
    /// Create a new Runtime without a command executor
    pub fn new(initial_state: AppState) -> Self {
        static ENGINE: TuiTextAreaEngine = TuiTextAreaEngine;
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();

        Self {
            ctx: UpdateContext { input: &ENGINE },
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            msg_tx,
            msg_rx,
            raw_msg_tx,
            raw_msg_rx,
            cmd_executor: None,
        }
    }

    /// Create a new Runtime whose search commands go to the SearchService
    pub fn new_with_search_executor(
        initial_state: AppState,
        search_sender: mpsc::UnboundedSender<SearchOperation>,
    ) -> Self {
        let mut runtime = Self::new(initial_state);
        runtime.cmd_executor = Some(CmdExecutor::new_with_search(search_sender));
        runtime
    }

    /// Set a command executor that is not attached to any service
    pub fn set_executor(&mut self) {
        self.cmd_executor = Some(CmdExecutor::new());
    }

    /// Route search commands to the SearchService, creating the executor if needed
    pub fn set_search_executor(&mut self, search_sender: mpsc::UnboundedSender<SearchOperation>) {
        match &mut self.cmd_executor {
            Some(executor) => executor.set_search_sender(search_sender),
            None => self.cmd_executor = Some(CmdExecutor::new_with_search(search_sender)),
        }
    }

    /// Add TUI command sender support to existing executor (for TuiCommand execution)
    pub fn add_tui_sender(
        &mut self,
        tui_sender: mpsc::UnboundedSender<TuiCommand>,
    ) -> Result<(), String> {
        let executor = self.executor_mut()?;
        executor.set_tui_sender(tui_sender);
        Ok(())
    }

    /// Add render request sender for orchestrated rendering in AppRunner
    pub fn add_render_request_sender(
        &mut self,
        render_sender: mpsc::UnboundedSender<()>,
    ) -> Result<(), String> {
        let executor = self.executor_mut()?;
        executor.set_render_request_sender(render_sender);
        Ok(())
    }

    fn executor_mut(&mut self) -> Result<&mut CmdExecutor, String> {
        self.cmd_executor.as_mut().ok_or_else(|| {
            "No executor available. Use set_executor() or new_with_search_executor() first."
                .to_string()
        })
    }

    /// Get sender for message transmission
    pub fn get_sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Get raw message sender (handed to background services)
    pub fn get_raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_msg_tx.clone()
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Queue a domain message
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Queue a raw message
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Take pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>, String> {
        let commands = self.pending_commands();
        let Some(executor) = &self.cmd_executor else {
            return Err(
                "No command executor available. Use set_executor() to configure.".to_string(),
            );
        };
        if commands.is_empty() {
            return Ok(vec![]);
        }
        Ok(executor.execute_commands(&commands))
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::trace!("Processing {msg:?}");
        }
        let (new_state, commands) =
            update_with_context(msg, std::mem::take(&mut self.state), &self.ctx);
        self.state = new_state;
        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    fn translate(&mut self, raw_msg: RawMsg) {
        let domain_msgs = translate_raw_to_domain(raw_msg, &self.state);
        self.msg_queue.extend(domain_msgs);
    }

    /// Process all queued messages
    ///
    /// Raw messages are translated one at a time against the state left by the
    /// previous one, so an alert raised by one event already captures the next key.
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        loop {
            while let Some(msg) = self.msg_queue.pop_front() {
                all_commands.extend(self.process_message(msg));
            }

            if let Ok(msg) = self.msg_rx.try_recv() {
                self.msg_queue.push_back(msg);
            } else if let Some(raw_msg) = self.raw_msg_queue.pop_front() {
                self.translate(raw_msg);
            } else if let Ok(raw_msg) = self.raw_msg_rx.try_recv() {
                self.translate(raw_msg);
            } else {
                break;
            }
        }

        all_commands
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>, String> {
        let _commands = self.process_all_messages();
        self.execute_pending_commands()
    }

    /// Get runtime statistics
    pub fn get_stats(&self) -> RuntimeStats {
        let has_search_support = self
            .cmd_executor
            .as_ref()
            .map(|executor| executor.get_stats().has_search_sender)
            .unwrap_or(false);

        RuntimeStats {
            queued_messages: self.msg_queue.len() + self.raw_msg_queue.len(),
            queued_commands: self.cmd_queue.len(),
            in_flight_searches: self.state.search.in_flight,
            result_count: self.state.search.results.result_count(),
            is_alert_shown: self.state.ui.has_alert(),
            has_executor: self.cmd_executor.is_some(),
            has_search_support,
        }
    }
}

/// Runtime statistics
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub queued_messages: usize,
    pub queued_commands: usize,
    pub in_flight_searches: usize,
    pub result_count: usize,
    pub is_alert_shown: bool,
    pub has_executor: bool,
    pub has_search_support: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::msg::{search::SearchMsg, system::SystemMsg, ui::UiMsg};
    use crate::domain::search::{SearchError, SearchResponse, SearchResult, FETCH_FAILURE_MESSAGE};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> RawMsg {
        RawMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(runtime: &mut Runtime, text: &str) {
        for c in text.chars() {
            runtime.send_raw_msg(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_runtime_creation() {
        let runtime = Runtime::new(AppState::default());
        let stats = runtime.get_stats();

        assert_eq!(stats.queued_messages, 0);
        assert_eq!(stats.queued_commands, 0);
        assert_eq!(stats.in_flight_searches, 0);
        assert!(!stats.has_executor);
        assert!(!stats.has_search_support);
    }

    #[test]
    fn test_typing_and_submitting_emits_search() {
        let mut runtime = Runtime::new(AppState::default());

        type_text(&mut runtime, "  rust  ");
        runtime.send_raw_msg(key(KeyCode::Enter));
        let commands = runtime.process_all_messages();

        assert_eq!(runtime.state().ui.input.content, "  rust  ");
        assert_eq!(
            commands,
            vec![Cmd::Search {
                seq: 1,
                query: "rust".to_string()
            }]
        );
        assert_eq!(runtime.get_stats().in_flight_searches, 1);
    }

    #[test]
    fn test_blank_submit_shows_validation() {
        let mut runtime = Runtime::new(AppState::default());

        type_text(&mut runtime, "   ");
        runtime.send_raw_msg(key(KeyCode::Enter));
        let commands = runtime.process_all_messages();

        assert!(commands.is_empty());
        assert!(runtime.state().search.validation_message.is_some());
    }

    #[test]
    fn test_alert_raised_by_failure_captures_following_keys() {
        let mut runtime = Runtime::new(AppState::default());
        runtime.send_msg(Msg::Search(SearchMsg::Submit("rust".to_string())));
        runtime.process_all_messages();

        runtime.send_raw_msg(RawMsg::SearchFinished {
            seq: 1,
            outcome: Err(SearchError::Status(500)),
        });
        type_text(&mut runtime, "x");
        runtime.process_all_messages();

        assert_eq!(
            runtime.state().ui.alert.as_deref(),
            Some(FETCH_FAILURE_MESSAGE)
        );
        assert_eq!(runtime.state().ui.input.content, "");

        runtime.send_raw_msg(key(KeyCode::Esc));
        runtime.process_all_messages();
        assert!(!runtime.get_stats().is_alert_shown);
        assert!(!runtime.state().system.should_quit);
    }

    #[test]
    fn test_external_raw_sender() {
        let mut runtime = Runtime::new(AppState::default());
        runtime.send_msg(Msg::Search(SearchMsg::Submit("rust".to_string())));
        runtime.process_all_messages();

        runtime
            .get_raw_sender()
            .send(RawMsg::SearchFinished {
                seq: 1,
                outcome: Ok(SearchResponse::Results(vec![SearchResult::new("a", 0.9)])),
            })
            .expect("send");
        runtime.process_all_messages();

        assert_eq!(runtime.get_stats().result_count, 1);
        assert_eq!(runtime.get_stats().in_flight_searches, 0);
    }

    #[test]
    fn test_external_msg_sender() {
        let mut runtime = Runtime::new(AppState::default());
        runtime
            .get_sender()
            .send(Msg::Ui(UiMsg::SetQuery("prefilled".to_string())))
            .expect("send");

        runtime.process_all_messages();

        assert_eq!(runtime.state().ui.input.content, "prefilled");
    }

    #[test]
    fn test_execute_without_executor_fails() {
        let mut runtime = Runtime::new(AppState::default());
        runtime.send_msg(Msg::System(SystemMsg::Quit));
        assert!(runtime.run_update_cycle().is_err());
        assert!(runtime.add_tui_sender(mpsc::unbounded_channel().0).is_err());
    }

    #[test]
    fn test_search_commands_reach_service_channel() {
        let (search_tx, mut search_rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new_with_search_executor(AppState::default(), search_tx);
        assert!(runtime.get_stats().has_search_support);

        runtime.send_msg(Msg::Search(SearchMsg::Submit("vectors".to_string())));
        let log = runtime.run_update_cycle().expect("executor present");

        assert_eq!(log, vec!["✓ Executed: Search".to_string()]);
        assert_eq!(
            search_rx.try_recv().ok(),
            Some(SearchOperation::Search {
                seq: 1,
                query: "vectors".to_string()
            })
        );
        assert_eq!(runtime.get_stats().queued_commands, 0);
    }

    #[test]
    fn test_quit_cancels_searches() {
        let (search_tx, mut search_rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new_with_search_executor(AppState::default(), search_tx);

        runtime.send_raw_msg(RawMsg::Quit);
        runtime.run_update_cycle().expect("executor present");

        assert!(runtime.state().system.should_quit);
        assert_eq!(search_rx.try_recv().ok(), Some(SearchOperation::CancelAll));
    }
}
