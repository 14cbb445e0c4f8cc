mod graph;
mod load;
mod mock;
mod model;

pub use graph::{LinkRecord, RelationGraph};
pub use load::load_graph_file;
pub use mock::{run_investigation, Finding, FindingStatus, InvestigationReport, RiskLevel};
pub use model::{GraphSpec, LinkSpec, NodeGroup, NodeSpec};
