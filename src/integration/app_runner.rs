use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd::TuiCommand,
        msg::{search::SearchMsg, ui::UiMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
    },
    infrastructure::{
        config::Config,
        search_client::{ConfigurationError, HttpSearchClient, SearchBackend},
        search_service::SearchService,
        tui::{self, TuiLike},
    },
    integration::runtime::Runtime,
    presentation::components::{
        chart_surface, AppLayout, Components, ResultsListComponent, MIN_CHART_HEIGHT,
        MIN_CHART_WIDTH,
    },
};

/// Drives the Elm runtime from terminal events and renders the components
///
/// Generic over the terminal so tests can run the whole loop on a `TestTui`.
pub struct AppRunner<T: TuiLike> {
    runtime: Runtime,
    tui: T,
    components: Components,
    // Search service lifecycle; absent when the endpoint could not be resolved
    search_cancel: Option<CancellationToken>,
    search_handle: Option<JoinHandle<()>>,
    // Host-side requests emitted by the CmdExecutor
    tui_cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
    render_req_rx: mpsc::UnboundedReceiver<()>,
    render_requested: bool,
    startup_errors: Vec<ConfigurationError>,
}

impl<T: TuiLike> AppRunner<T> {
    /// Build the runner with an HTTP client for the configured endpoint
    pub fn new(config: &Config, tui: T) -> Result<Self> {
        let backend = HttpSearchClient::new(&config.endpoint, config.request_timeout())
            .map(|client| Arc::new(client) as Arc<dyn SearchBackend>);
        Self::build(config, tui, backend)
    }

    /// Build the runner around any search backend
    pub fn with_backend(config: &Config, tui: T, backend: Arc<dyn SearchBackend>) -> Result<Self> {
        Self::build(config, tui, Ok(backend))
    }

    fn build(
        config: &Config,
        tui: T,
        backend: Result<Arc<dyn SearchBackend>, ConfigurationError>,
    ) -> Result<Self> {
        let mut runtime = Runtime::new(AppState::new_with_config(config));
        runtime.set_executor();

        let (tui_cmd_tx, tui_cmd_rx) = mpsc::unbounded_channel();
        let (render_req_tx, render_req_rx) = mpsc::unbounded_channel();
        runtime
            .add_tui_sender(tui_cmd_tx)
            .map_err(color_eyre::eyre::Report::msg)?;
        runtime
            .add_render_request_sender(render_req_tx)
            .map_err(color_eyre::eyre::Report::msg)?;

        let mut startup_errors = Vec::new();
        let mut search_cancel = None;
        let mut search_handle = None;

        match backend {
            Ok(backend) => {
                let (op_tx, cancel, service) =
                    SearchService::new(backend, runtime.get_raw_sender());
                runtime.set_search_executor(op_tx);
                search_handle = Some(service.run());
                search_cancel = Some(cancel);
            }
            Err(e) => startup_errors.push(e),
        }

        let area = tui.size()?;
        if chart_surface(area).is_none() {
            startup_errors.push(ConfigurationError::ChartSurfaceUnavailable {
                width: area.width,
                height: area.height,
                min_width: MIN_CHART_WIDTH,
                min_height: MIN_CHART_HEIGHT,
            });
        }

        for error in &startup_errors {
            log::error!("Configuration error: {error}");
            runtime.send_msg(Msg::Search(SearchMsg::Disable(error.to_string())));
        }

        Ok(Self {
            runtime,
            tui,
            components: Components::new(),
            search_cancel,
            search_handle,
            tui_cmd_rx,
            render_req_rx,
            render_requested: true,
            startup_errors,
        })
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn state(&self) -> &AppState {
        self.runtime.state()
    }

    pub fn tui(&self) -> &T {
        &self.tui
    }

    pub fn tui_mut(&mut self) -> &mut T {
        &mut self.tui
    }

    /// Problems found while resolving the endpoint and the chart surface
    pub fn startup_errors(&self) -> &[ConfigurationError] {
        &self.startup_errors
    }

    /// Put text into the query input before the first frame
    pub fn prefill_query(&mut self, query: impl Into<String>) {
        self.runtime
            .send_msg(Msg::Ui(UiMsg::SetQuery(query.into())));
    }

    /// Run the main loop until the state asks to quit
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        let result = loop {
            match self.tui.next().await {
                Some(event) => self.handle_event(event),
                None => {
                    log::info!("Terminal event stream closed");
                    self.runtime.send_raw_msg(RawMsg::Quit);
                }
            }

            if let Err(e) = self.step() {
                break Err(e);
            }
            if self.state().system.should_quit {
                break Ok(());
            }
        };

        self.shutdown().await;
        self.tui.exit()?;
        result
    }

    /// Handle at most one terminal event and run one update cycle
    ///
    /// Returns whether the application should quit.
    pub async fn run_once(&mut self) -> Result<bool> {
        if let Some(event) = self.tui.next().await {
            self.handle_event(event);
        }
        self.step()?;
        Ok(self.state().system.should_quit)
    }

    fn handle_event(&mut self, event: tui::Event) {
        match event {
            tui::Event::Quit | tui::Event::Closed => self.runtime.send_raw_msg(RawMsg::Quit),
            tui::Event::Tick => self.runtime.send_raw_msg(RawMsg::Tick),
            tui::Event::Render | tui::Event::Init => self.render_requested = true,
            tui::Event::Resize(w, h) => self.runtime.send_raw_msg(RawMsg::Resize(w, h)),
            tui::Event::Key(key) => self.runtime.send_raw_msg(RawMsg::Key(key)),
            tui::Event::Paste(text) => {
                // The query is one line; pasted line breaks become spaces
                for c in text.chars() {
                    let c = if c == '\n' || c == '\r' { ' ' } else { c };
                    self.runtime
                        .send_raw_msg(RawMsg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
                }
            }
            tui::Event::Error => log::warn!("Terminal reported an input error"),
            tui::Event::FocusGained | tui::Event::FocusLost => {}
        }
    }

    /// Update cycle followed by the host reactions it requested
    fn step(&mut self) -> Result<()> {
        if let Err(e) = self.runtime.run_update_cycle() {
            log::error!("Runtime error: {e}");
        }

        while let Ok(cmd) = self.tui_cmd_rx.try_recv() {
            match cmd {
                TuiCommand::Resize { width, height } => {
                    self.tui.resize(Rect::new(0, 0, width, height))?;
                    self.render_requested = true;
                }
            }
        }
        while self.render_req_rx.try_recv().is_ok() {
            self.render_requested = true;
        }

        if self.render_requested {
            self.render()?;
        }
        Ok(())
    }

    /// Draw the current state
    pub fn render(&mut self) -> Result<()> {
        self.sync_results_layout()?;
        self.render_requested = false;

        let state = self.runtime.state();
        let components = &self.components;
        self.tui
            .draw(&mut |f: &mut tui::Frame<'_>| components.render(f, state))?;
        Ok(())
    }

    /// Tell the state how tall the results are, so scrolling can be clamped
    fn sync_results_layout(&mut self) -> Result<()> {
        let layout = AppLayout::new(self.tui.size()?);
        let (lines, viewport) = ResultsListComponent::measure(self.state(), layout.results);
        let ui = &self.state().ui;
        if ui.results_lines != lines || ui.results_viewport != viewport {
            self.runtime
                .send_msg(Msg::Ui(UiMsg::ResultsLayout { lines, viewport }));
            self.runtime.process_all_messages();
        }
        Ok(())
    }

    /// Abort in-flight searches and stop the search service
    pub async fn shutdown(&mut self) {
        if let Some(cancel) = self.search_cancel.take() {
            cancel.cancel();
        }
        if let Some(handle) = self.search_handle.take() {
            if let Err(e) = handle.await {
                log::error!("SearchService did not stop cleanly: {e}");
            }
        }
    }
}
