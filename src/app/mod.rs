use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Context};

use crate::wallet::{AgentClient, WalletSnapshot, load_snapshot_file};

use graph::Camera;
use layout::{Generation, LayoutEngine};
use selection::{CopyFeedback, Selection};

mod graph;
mod layout;
mod render_utils;
mod selection;
mod ui;

pub use layout::DEFAULT_MAX_STEPS;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Startup configuration resolved from the command line.
#[derive(Clone, Debug)]
pub struct LaunchOptions {
    pub address: Option<String>,
    pub api_base_url: String,
    pub timeout: Duration,
    pub snapshot: Option<PathBuf>,
    pub max_steps: usize,
}

pub struct BubbleMapApp {
    options: LaunchOptions,
    address_input: String,
    engine: LayoutEngine,
    state: AppState,
}

type LoadResult = Result<WalletSnapshot, String>;

#[derive(Clone, Debug)]
enum SnapshotSource {
    Agent { address: String },
    File(PathBuf),
}

impl SnapshotSource {
    fn describe(&self) -> String {
        match self {
            Self::Agent { address } => address.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

enum AppState {
    Idle,
    Loading {
        source: SnapshotSource,
        rx: Receiver<LoadResult>,
    },
    Ready(Box<ViewModel>),
    Error {
        source: SnapshotSource,
        message: String,
    },
}

struct ViewModel {
    snapshot: WalletSnapshot,
    generation: Generation,
    camera: Camera,
    selection: Selection,
    copy_feedback: CopyFeedback,
}

impl BubbleMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let mut app = Self {
            address_input: options.address.clone().unwrap_or_default(),
            engine: LayoutEngine::new(options.max_steps),
            state: AppState::Idle,
            options,
        };

        let initial = match (&app.options.snapshot, &app.options.address) {
            (Some(path), _) => Some(SnapshotSource::File(path.clone())),
            (None, Some(address)) if !address.trim().is_empty() => Some(SnapshotSource::Agent {
                address: address.trim().to_owned(),
            }),
            _ => None,
        };
        if let Some(source) = initial {
            app.start_load(source);
        }

        app
    }

    fn spawn_load(&self, source: SnapshotSource) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let base_url = self.options.api_base_url.clone();
        let timeout = self.options.timeout;

        thread::spawn(move || {
            let result = match source {
                SnapshotSource::Agent { address } => AgentClient::new(&base_url, timeout)
                    .and_then(|client| client.analyze(&address))
                    .map_err(|error| error.to_string()),
                SnapshotSource::File(path) => {
                    load_snapshot_file(&path).map_err(|error| format!("{error:#}"))
                }
            };
            let _ = tx.send(result);
        });

        rx
    }

    /// Starts a fetch, replacing any pending one; its result will be ignored.
    fn start_load(&mut self, source: SnapshotSource) {
        tracing::info!(source = %source.describe(), "loading wallet snapshot");
        self.engine.clear();
        let rx = self.spawn_load(source.clone());
        self.state = AppState::Loading { source, rx };
    }

    fn is_loading(&self) -> bool {
        matches!(self.state, AppState::Loading { .. })
    }
}

impl eframe::App for BubbleMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let is_loading = self.is_loading();
        let mut submitted = None;
        egui::TopBottomPanel::top("address_bar")
            .resizable(false)
            .show(ctx, |ui| {
                submitted = ui::draw_address_bar(ui, &mut self.address_input, is_loading);
            });
        if let Some(address) = submitted {
            self.start_load(SnapshotSource::Agent { address });
        }

        let mut transition = None;
        let mut reload = None;

        match &mut self.state {
            AppState::Idle => {
                egui::CentralPanel::default().show(ctx, ui::draw_instructions);
            }
            AppState::Loading { source, rx } => {
                match rx.try_recv() {
                    Ok(Ok(snapshot)) => {
                        tracing::info!(
                            address = %snapshot.address,
                            valid = snapshot.is_valid,
                            network = snapshot.has_network(),
                            "wallet snapshot loaded"
                        );
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            snapshot,
                            &mut self.engine,
                        ))));
                    }
                    Ok(Err(message)) => {
                        tracing::warn!(source = %source.describe(), %message, "wallet snapshot load failed");
                        transition = Some(AppState::Error {
                            source: source.clone(),
                            message,
                        });
                    }
                    Err(TryRecvError::Empty) => {
                        ctx.request_repaint_after(LOAD_POLL_INTERVAL);
                    }
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error {
                            source: source.clone(),
                            message: "Background load worker disconnected".to_owned(),
                        });
                    }
                }

                egui::CentralPanel::default().show(ctx, ui::draw_loading);
            }
            AppState::Ready(model) => {
                model.show(ctx, &mut self.engine);
            }
            AppState::Error { source, message } => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    retry = ui::draw_error(ui, &source.describe(), message);
                });
                if retry {
                    reload = Some(source.clone());
                }
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
        if let Some(source) = reload {
            self.start_load(source);
        }
    }
}
