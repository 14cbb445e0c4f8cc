use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{Color32, Context, Pos2, Vec2};

use crate::data::{
    load_graph_file, run_investigation, InvestigationReport, NodeGroup, RelationGraph,
};

mod graph;
mod highlight;
mod physics;
mod render_utils;
mod ui;
mod viewport;

use physics::LayoutConfig;
use viewport::Viewport;

pub struct RiskVizApp {
    data_path: Option<PathBuf>,
    state: AppState,
}

enum AppState {
    Query {
        input: String,
    },
    Loading {
        query: String,
        rx: Receiver<Result<LoadedInvestigation, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct LoadedInvestigation {
    query: String,
    report: Option<InvestigationReport>,
    graph: RelationGraph,
}

struct ViewModel {
    graph: RelationGraph,
    query: String,
    report: Option<InvestigationReport>,
    cache: Option<RenderGraph>,
    layout: LayoutConfig,
    viewport: Viewport,
    pointer: PointerState,
    hovered: Option<usize>,
    connected: HashSet<usize>,
    selected: Option<String>,
    search: String,
    search_matches: HashSet<usize>,
    last_surface: Option<Vec2>,
    new_query_requested: bool,
}

/// Pointer-interaction state machine. A node is either simulator-owned or
/// drag-owned, never both; `Dragging` is the only state that writes pins.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PointerState {
    Idle,
    Dragging { index: usize, grab: Vec2 },
    Panning,
}

/// Live simulation state for the current dataset, rebuilt wholesale on every
/// data swap. Node order matches [`RelationGraph::nodes`].
struct RenderGraph {
    nodes: Vec<SimNode>,
    edges: Vec<(usize, usize)>,
    edge_labels: Vec<String>,
    degrees: Vec<usize>,
    alpha: f32,
    alpha_target: f32,
    physics_scratch: PhysicsScratch,
    view_scratch: ViewScratch,
}

struct SimNode {
    id: String,
    group: NodeGroup,
    base_color: Color32,
    radius: f32,
    world_pos: Vec2,
    velocity: Vec2,
    /// Set while drag-owned; the simulator holds the node here and leaves
    /// movement to the interaction controller.
    pinned: Option<Vec2>,
}

#[derive(Default)]
struct PhysicsScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    collision_radii: Vec<f32>,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

impl RenderGraph {
    fn reheat(&mut self) {
        self.alpha_target = physics::DRAG_ALPHA_TARGET;
        self.alpha = self.alpha.max(self.alpha_target);
    }

    fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Furthest node edge from the world origin; the viewport's pan-clamp
    /// extent.
    fn content_extent(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.world_pos.length() + node.radius)
            .fold(0.0, f32::max)
    }
}

impl ViewModel {
    fn new(loaded: LoadedInvestigation) -> Self {
        let cache = RenderGraph::from_graph(&loaded.graph);
        Self {
            graph: loaded.graph,
            query: loaded.query,
            report: loaded.report,
            cache,
            layout: LayoutConfig::default(),
            viewport: Viewport::default(),
            pointer: PointerState::Idle,
            hovered: None,
            connected: HashSet::new(),
            selected: None,
            search: String::new(),
            search_matches: HashSet::new(),
            last_surface: None,
            new_query_requested: false,
        }
    }

}

fn resolve_investigation(query: &str, path: Option<&Path>) -> anyhow::Result<LoadedInvestigation> {
    let (report, spec) = match path {
        Some(path) => (None, load_graph_file(path)?),
        None => {
            let (report, spec) = run_investigation(query);
            (Some(report), spec)
        }
    };

    let graph = RelationGraph::build(spec)?;
    log::info!(
        "investigation resolved: {} nodes, {} links",
        graph.node_count(),
        graph.links().len()
    );

    Ok(LoadedInvestigation {
        query: query.to_owned(),
        report,
        graph,
    })
}

impl RiskVizApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: Option<PathBuf>,
        query: Option<String>,
    ) -> Self {
        let state = match query {
            Some(query) => Self::start_load(query, data_path.clone()),
            None if data_path.is_some() => Self::start_load(String::new(), data_path.clone()),
            None => AppState::Query {
                input: String::new(),
            },
        };

        Self { data_path, state }
    }

    fn spawn_load(
        query: String,
        path: Option<PathBuf>,
    ) -> Receiver<Result<LoadedInvestigation, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result =
                resolve_investigation(&query, path.as_deref()).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(query: String, path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(query.clone(), path),
            query,
        }
    }
}

impl eframe::App for RiskVizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Query { input } => {
                if let Some(query) = ui::query_screen(ctx, input) {
                    transition = Some(Self::start_load(query, self.data_path.clone()));
                }
            }
            AppState::Loading { query, rx } => {
                match rx.try_recv() {
                    Ok(Ok(loaded)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(loaded))));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("background resolver disconnected".to_owned()));
                    }
                }

                ui::loading_screen(ctx, query);
            }
            AppState::Ready(model) => {
                model.show(ctx);
                if model.new_query_requested {
                    transition = Some(AppState::Query {
                        input: String::new(),
                    });
                }
            }
            AppState::Error(error) => {
                if ui::error_screen(ctx, error) {
                    transition = Some(match &self.data_path {
                        Some(path) => Self::start_load(String::new(), Some(path.clone())),
                        None => AppState::Query {
                            input: String::new(),
                        },
                    });
                }
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
