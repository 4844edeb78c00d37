//! Zellij plugin wrapper and entry point.
//!
//! Everything host-specific lives here: permissions, subscriptions, running
//! commands, CLI pipes and hiding the pane. The library decides *what* to do;
//! this shim turns Zellij events into [`zofi::Event`]s and executes the
//! returned [`Action`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build the session and renderer
//! 2. **Permissions**: once granted, load the corpus for the mode
//!    - `run`: run the `$PATH` scan; its output arrives as `RunCommandResult`
//!    - `drun`: read the application catalog
//!    - `dmenu`: wait for `zellij pipe` input
//! 3. **Update**: keys go through the keymap; results feed the session
//! 4. **Render**: draw the session and record the realized page size
//! 5. **Visible**: reopening a finished launcher starts a fresh session
//!
//! An invalid `mode` is fatal: the plugin logs it, hides itself and ignores all
//! further input.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zofi::infrastructure::{self, PATH_SCAN_SCRIPT};
use zofi::{handle_event, Action, Config, Corpus, Event, KeyEvent, LaunchMode, Renderer, Session};

register_plugin!(State);

/// Context key tagging the commands this plugin runs.
const CONTEXT_KEY: &str = "zofi";
const CONTEXT_SCAN: &str = "path-scan";
const CONTEXT_LAUNCH: &str = "launch";

struct State {
    session: Session,
    renderer: Renderer,
    config: Config,
    /// Set when the configuration cannot be used at all.
    fatal: Option<String>,
    /// CLI pipe waiting for a dmenu selection.
    pipe_source: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        let (session, renderer) = zofi::initialize(&config);
        Self {
            session,
            renderer,
            config,
            fatal: None,
            pipe_source: None,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = match Config::from_zellij(&configuration) {
            Ok(config) => config,
            Err(e) => {
                let fallback = Config {
                    trace_level: configuration
                        .get("trace_level")
                        .cloned()
                        .unwrap_or_else(|| Config::default().trace_level),
                    ..Config::default()
                };
                zofi::observability::init_tracing(&fallback);
                tracing::error!(error = %e, "unusable configuration, zofi is disabled");
                self.fatal = Some(e.to_string());
                hide_self();
                return;
            }
        };
        zofi::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load", mode = ?config.mode).entered();

        let (session, renderer) = zofi::initialize(&config);
        self.session = session;
        self.renderer = renderer;
        self.config = config;

        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
            PermissionType::ReadCliPipes,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete, waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        if self.fatal.is_some() {
            return false;
        }

        let _span = tracing::debug_span!("plugin_update", event_type = %Self::event_name(&event))
            .entered();

        match event {
            zellij_tile::prelude::Event::Key(key) => self.dispatch(&Event::Key(KeyEvent::from(&key))),
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match context.get(CONTEXT_KEY).map(String::as_str) {
                    Some(CONTEXT_SCAN) => {
                        let event = Self::map_scan_result(exit_code, &stdout, &stderr);
                        self.dispatch(&event)
                    }
                    Some(CONTEXT_LAUNCH) => {
                        if exit_code != Some(0) {
                            tracing::warn!(
                                exit_code = ?exit_code,
                                stderr = %String::from_utf8_lossy(&stderr),
                                "launched command failed"
                            );
                        }
                        false
                    }
                    _ => false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status)
            }
            zellij_tile::prelude::Event::Visible(true) if self.session.is_finished() => {
                self.restart_session();
                true
            }
            _ => false,
        }
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if self.fatal.is_some() || self.config.mode != LaunchMode::Dmenu {
            return false;
        }

        let PipeSource::Cli(source) = &pipe_message.source else {
            tracing::debug!(name = %pipe_message.name, "ignoring non-cli pipe message");
            return false;
        };

        let _span = tracing::debug_span!("plugin_pipe", source = %source).entered();

        if self.pipe_source.as_deref() != Some(source.as_str()) {
            tracing::debug!("new dmenu invocation");
            self.release_pipe();
            self.session = Session::new(self.config.mode, self.config.fuzzy_match);
            self.pipe_source = Some(source.clone());
        }
        block_cli_pipe_input(source);

        let lines = pipe_message
            .payload
            .as_deref()
            .map(infrastructure::piped_lines)
            .unwrap_or_default();
        self.dispatch(&Event::Piped { lines })
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if self.fatal.is_some() {
            return;
        }
        print!("{}", self.renderer.render(&mut self.session, rows, cols));
    }
}

impl State {
    /// Runs an event through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.session, event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
                self.load_corpus()
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied, launcher cannot load entries");
                false
            }
        }
    }

    /// Starts loading entries for the configured mode.
    fn load_corpus(&mut self) -> bool {
        match self.config.mode {
            LaunchMode::Run => {
                Self::trigger_path_scan();
                false
            }
            LaunchMode::Drun => {
                let path = self.config.apps_path();
                match infrastructure::load_apps(&path) {
                    Ok(apps) => self.dispatch(&Event::CorpusLoaded(Corpus::Apps(apps))),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load application catalog");
                        false
                    }
                }
            }
            LaunchMode::Dmenu => false,
        }
    }

    fn trigger_path_scan() {
        tracing::debug!("scanning $PATH for executables");
        let context = BTreeMap::from([(CONTEXT_KEY.to_string(), CONTEXT_SCAN.to_string())]);
        run_command(&["sh", "-c", PATH_SCAN_SCRIPT], context);
    }

    fn map_scan_result(exit_code: Option<i32>, stdout: &[u8], stderr: &[u8]) -> Event {
        if exit_code == Some(0) {
            let paths = String::from_utf8_lossy(stdout)
                .lines()
                .map(ToString::to_string)
                .collect();
            Event::CommandsScanned { paths }
        } else {
            Event::ScanFailed {
                error: String::from_utf8_lossy(stderr).into_owned(),
            }
        }
    }

    /// Replaces a finished session with a fresh one over the same entries.
    fn restart_session(&mut self) {
        tracing::debug!("launcher reopened");
        self.session = Session::with_corpus(
            self.config.mode,
            self.session.corpus().clone(),
            self.config.fuzzy_match,
        );
        if self.config.mode == LaunchMode::Run {
            Self::trigger_path_scan();
        }
    }

    /// Lets a waiting `zellij pipe` exit without output.
    fn release_pipe(&mut self) {
        if let Some(source) = self.pipe_source.take() {
            unblock_cli_pipe_input(&source);
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::Close => {
                self.release_pipe();
                hide_self();
            }
            Action::Launch { command } => {
                tracing::info!(command = %command, "launching");
                let context = BTreeMap::from([(CONTEXT_KEY.to_string(), CONTEXT_LAUNCH.to_string())]);
                run_command(&["sh", "-c", command.as_str()], context);
                hide_self();
            }
            Action::Emit { line } => {
                match self.pipe_source.take() {
                    Some(source) => {
                        cli_pipe_output(&source, &format!("{line}\n"));
                        unblock_cli_pipe_input(&source);
                    }
                    None => tracing::warn!("selection made with no pipe to answer"),
                }
                hide_self();
            }
        }
    }

    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            _ => "Other".to_string(),
        }
    }
}
