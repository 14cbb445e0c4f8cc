use serde::Deserialize;

/// Entity category of a graph node. Determines the default color, the
/// legend entry and the tooltip description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Person,
    Case,
    Crime,
    Family,
    Associate,
    Company,
}

impl NodeGroup {
    pub const ALL: [NodeGroup; 6] = [
        Self::Person,
        Self::Case,
        Self::Crime,
        Self::Family,
        Self::Associate,
        Self::Company,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "Person of interest",
            Self::Case => "Court case",
            Self::Crime => "Offense",
            Self::Family => "Family member",
            Self::Associate => "Associate",
            Self::Company => "Company",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Person => "Primary subject of the investigation",
            Self::Case => "Court ruling on record",
            Self::Crime => "Offense named in a ruling",
            Self::Family => "Family relationship to the subject",
            Self::Associate => "Person linked through shared proceedings",
            Self::Company => "Registered corporate entity",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub group: NodeGroup,
    pub size: f32,
    /// Optional "#rrggbb" override; the group palette applies otherwise.
    #[serde(default)]
    pub color: Option<String>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, group: NodeGroup, size: f32) -> Self {
        Self {
            id: id.into(),
            group,
            size,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkSpec {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

impl LinkSpec {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
        }
    }
}

/// Wire shape of a dataset: `{"nodes": [...], "links": [...]}`. Supplied
/// wholesale per query result, then validated into a [`RelationGraph`].
///
/// [`RelationGraph`]: super::RelationGraph
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}
