use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use catalog_core::{initial_query_from_url, update, AppState, Msg};
use catalog_logging::{catalog_error, catalog_info, catalog_warn};
use chrono::{DateTime, Local};
use url::Url;

use super::config::{self, AppConfig};
use super::effects::{EffectRunner, MsgSink};
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the app loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let (config, config_error) = match config::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::builtin()?, Some(err)),
    };
    logging::initialize(config.log_destination, config.log_level, &config.log_file);
    if let Some(err) = config_error {
        catalog_warn!("Using default configuration: {}", err);
        eprintln!("Warning: {err}; using defaults");
    }
    catalog_info!(
        "Starting catalog_app api={} page={}",
        config.client.base_url,
        config.page_url
    );

    let initial_query = initial_query_from_args(std::env::args().skip(1).collect());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let sink = Arc::new(MsgSink::new(event_tx.clone()));
    let runner = EffectRunner::new(&config, sink)
        .inspect_err(|err| catalog_error!("Failed to start catalog client: {}", err))
        .context("failed to start catalog client")?;
    spawn_input_reader(event_tx);

    let mut app = App::new(runner);
    if let Some(query) = &initial_query {
        app.runner.set_initial_address(query);
    }
    println!("{HELP}");
    app.dispatch(Msg::Mounted { initial_query });

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => app.dispatch(msg),
            AppEvent::Input(line) => {
                let categories = app.state.view().categories;
                match parse_command(&line, &categories) {
                    Command::Dispatch(msg) => app.dispatch(msg),
                    Command::ShowLink => println!("{}", app.runner.address()),
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                    Command::Invalid(reason) => println!("{reason}"),
                }
            }
            AppEvent::InputClosed => break,
        }
        let _ = io::stdout().flush();
    }

    catalog_info!("Exiting catalog_app");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    refreshed_at: Option<DateTime<Local>>,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            refreshed_at: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let is_page = matches!(msg, Msg::PageLoaded { .. });
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);

        if state.consume_dirty() {
            if is_page {
                self.refreshed_at = Some(Local::now());
            }
            for line in render(&state.view(), self.refreshed_at) {
                println!("{line}");
            }
        }
        self.state = state;
    }
}

/// The first argument may be a page address carrying `?q=`; otherwise all
/// arguments form the initial search term.
fn initial_query_from_args(args: Vec<String>) -> Option<String> {
    let first = args.first()?;
    if let Ok(url) = Url::parse(first) {
        return initial_query_from_url(&url);
    }
    let joined = args.join(" ");
    let joined = joined.trim();
    (!joined.is_empty()).then(|| joined.to_string())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    catalog_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}
