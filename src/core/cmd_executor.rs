use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::{
    core::cmd::{Cmd, TuiCommand},
    infrastructure::search_service::SearchOperation,
};

/// Command executor that routes Elm commands to the services owned by the host
#[derive(Clone, Default)]
pub struct CmdExecutor {
    search_sender: Option<mpsc::UnboundedSender<SearchOperation>>,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
    render_req_sender: Option<mpsc::UnboundedSender<()>>,
}

impl CmdExecutor {
    /// Create a new command executor without any service attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new command executor routing search commands to the SearchService
    pub fn new_with_search(search_sender: mpsc::UnboundedSender<SearchOperation>) -> Self {
        Self {
            search_sender: Some(search_sender),
            ..Default::default()
        }
    }

    pub fn set_search_sender(&mut self, search_sender: mpsc::UnboundedSender<SearchOperation>) {
        self.search_sender = Some(search_sender);
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    /// Inject render request sender for AppRunner-orchestrated rendering.
    pub fn set_render_request_sender(&mut self, sender: mpsc::UnboundedSender<()>) {
        self.render_req_sender = Some(sender);
    }

    /// Execute a single command
    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::Search { seq, query } => {
                if let Some(sender) = &self.search_sender {
                    sender.send(SearchOperation::Search {
                        seq: *seq,
                        query: query.clone(),
                    })?;
                } else {
                    log::warn!("Search #{seq} ignored: SearchService not available");
                }
            }

            Cmd::CancelSearches => {
                if let Some(sender) = &self.search_sender {
                    // The service may already be gone during shutdown
                    let _ = sender.send(SearchOperation::CancelAll);
                }
            }

            Cmd::Tui(TuiCommand::Resize { width, height }) => {
                if let Some(tx) = &self.tui_sender {
                    let _ = tx.send(TuiCommand::Resize {
                        width: *width,
                        height: *height,
                    });
                } else {
                    log::warn!(
                        "CmdExecutor: TUI sender not configured; dropping Resize command {width}x{height}"
                    );
                }
            }

            Cmd::RequestRender => {
                if let Some(rtx) = &self.render_req_sender {
                    let _ = rtx.send(());
                }
            }

            Cmd::LogError { message } => {
                log::error!("Elm command error: {message}");
            }

            Cmd::LogInfo { message } => {
                log::info!("Elm command info: {message}");
            }

            Cmd::Batch(commands) => {
                for cmd in commands {
                    self.execute_command(cmd)?;
                }
            }
        }

        Ok(())
    }

    /// Execute multiple commands, collecting a human readable log
    pub fn execute_commands(&self, commands: &[Cmd]) -> Vec<String> {
        commands
            .iter()
            .map(|cmd| match self.execute_command(cmd) {
                Ok(()) => format!("✓ Executed: {}", cmd.name()),
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {e}", cmd.name());
                    log::error!("{error_msg}");
                    error_msg
                }
            })
            .collect()
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> CmdExecutorStats {
        CmdExecutorStats {
            has_search_sender: self.search_sender.is_some(),
            is_search_sender_closed: self.search_sender.as_ref().map(|s| s.is_closed()),
        }
    }
}

/// Command executor statistics
#[derive(Debug, Clone)]
pub struct CmdExecutorStats {
    pub has_search_sender: bool,
    pub is_search_sender_closed: Option<bool>,
}
