use super::model::{GraphSpec, LinkSpec, NodeGroup, NodeSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FindingStatus {
    Found,
    Clear,
}

#[derive(Clone, Debug)]
pub struct Finding {
    pub source: &'static str,
    pub status: FindingStatus,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
        }
    }
}

#[derive(Clone, Debug)]
pub struct InvestigationReport {
    pub summary: String,
    pub findings: Vec<Finding>,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

/// Canned resolution of an investigation query: a per-source findings report
/// plus the relationship dataset the viewer renders. Stands in for the
/// upstream search services.
pub fn run_investigation(query: &str) -> (InvestigationReport, GraphSpec) {
    let subject = extract_subject(query);
    (mock_report(&subject), mock_graph(&subject))
}

/// Best-effort subject name from free-form query text: the longest
/// capitalized run of words, else a placeholder.
fn extract_subject(query: &str) -> String {
    let mut best: Option<String> = None;
    let mut current: Vec<&str> = Vec::new();

    for word in query.split_whitespace() {
        let cleaned = word.trim_matches(|c: char| !c.is_alphanumeric());
        let capitalized = cleaned.chars().next().is_some_and(char::is_uppercase);
        if capitalized && cleaned.len() >= 2 {
            current.push(cleaned);
        } else {
            current.clear();
        }

        if !current.is_empty() {
            let candidate = current.join(" ");
            if best.as_ref().is_none_or(|b| candidate.len() > b.len()) {
                best = Some(candidate);
            }
        }
    }

    best.unwrap_or_else(|| "Jordan Hale".to_owned())
}

fn mock_report(subject: &str) -> InvestigationReport {
    InvestigationReport {
        summary: format!("Database search results for {subject}:"),
        findings: vec![
            Finding {
                source: "Court ruling registry",
                status: FindingStatus::Found,
                content: "2 related cases on record: one fraud conviction, one banking-act \
                          violation"
                    .to_owned(),
            },
            Finding {
                source: "Financial supervisory authority",
                status: FindingStatus::Found,
                content: "Listed on the financial fraud watchlist, valid through December 2024"
                    .to_owned(),
            },
            Finding {
                source: "Corporate registry",
                status: FindingStatus::Found,
                content: "Director of 3 companies, 2 of which have been dissolved".to_owned(),
            },
            Finding {
                source: "International sanctions lists",
                status: FindingStatus::Clear,
                content: "No matching records".to_owned(),
            },
            Finding {
                source: "News media",
                status: FindingStatus::Found,
                content: "5 related reports, mainly covering an investment fraud scheme"
                    .to_owned(),
            },
        ],
        risk_level: RiskLevel::High,
        recommendation: format!(
            "Proceed with caution: {subject} carries an elevated financial fraud risk."
        ),
    }
}

fn mock_graph(subject: &str) -> GraphSpec {
    let surname = subject.split_whitespace().last().unwrap_or(subject);

    let nodes = vec![
        NodeSpec::new(subject, NodeGroup::Person, 20.0).with_color("#ff6b6b"),
        NodeSpec::new("Fraud case 2023", NodeGroup::Case, 15.0),
        NodeSpec::new("Banking act violation 2022", NodeGroup::Case, 15.0),
        NodeSpec::new("Fraud", NodeGroup::Crime, 12.0),
        NodeSpec::new("Unlicensed banking", NodeGroup::Crime, 12.0),
        NodeSpec::new(format!("{surname} Sr."), NodeGroup::Family, 14.0),
        NodeSpec::new(format!("{surname} (spouse)"), NodeGroup::Family, 14.0),
        NodeSpec::new("Co-defendant M. Wells", NodeGroup::Associate, 13.0),
        NodeSpec::new("ABC Investments Ltd.", NodeGroup::Company, 16.0),
        NodeSpec::new("XYZ Technologies Inc.", NodeGroup::Company, 16.0),
    ];

    let links = vec![
        LinkSpec::new(subject, "Fraud case 2023", "charged in"),
        LinkSpec::new(subject, "Banking act violation 2022", "charged in"),
        LinkSpec::new("Fraud case 2023", "Fraud", "convicted of"),
        LinkSpec::new("Banking act violation 2022", "Unlicensed banking", "convicted of"),
        LinkSpec::new(subject, format!("{surname} Sr."), "child of"),
        LinkSpec::new(subject, format!("{surname} (spouse)"), "married to"),
        LinkSpec::new(subject, "Co-defendant M. Wells", "co-defendant"),
        LinkSpec::new(subject, "ABC Investments Ltd.", "director of"),
        LinkSpec::new(subject, "XYZ Technologies Inc.", "former director of"),
        LinkSpec::new("Fraud case 2023", "ABC Investments Ltd.", "involves"),
    ];

    GraphSpec { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RelationGraph;

    #[test]
    fn generated_dataset_always_validates() {
        let (_report, spec) = run_investigation("Check the risk profile of Alex Moreau");
        let graph = RelationGraph::build(spec).unwrap();

        assert!(graph.resolve("Alex Moreau").is_some());
        assert_eq!(graph.dropped_link_count(), 0);
        assert!(!graph.neighbors("Alex Moreau").is_empty());
    }

    #[test]
    fn subject_falls_back_when_query_has_no_name() {
        let (report, spec) = run_investigation("risk check");
        assert!(report.summary.contains("Jordan Hale"));
        assert!(spec.nodes.iter().any(|node| node.id == "Jordan Hale"));
    }

    #[test]
    fn subject_is_longest_capitalized_run() {
        assert_eq!(
            extract_subject("look into Maria del Carmen Ruiz for me"),
            "Carmen Ruiz"
        );
        assert_eq!(extract_subject("investigate Li Wei now"), "Li Wei");
    }
}
