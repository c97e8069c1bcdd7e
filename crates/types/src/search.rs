use serde::{Deserialize, Serialize};

/// Lifecycle state of the entity search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "payload", rename_all = "camelCase")]
pub enum SearchState {
    #[default]
    Idle,
    Fetching,
    /// Candidates returned by the provider, in provider order
    Fetched(Vec<String>),
    /// Human-readable failure reason
    Failed(String),
}

impl SearchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching)
    }

    /// Results when the state is `Fetched`.
    pub fn results(&self) -> Option<&[String]> {
        match self {
            Self::Fetched(results) => Some(results),
            _ => None,
        }
    }

    /// Failure reason when the state is `Failed`.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// One query lifecycle of the search workflow.
///
/// `generation` increases every time a session starts or is abandoned; a
/// provider response is only applied when it carries the current generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub query: String,
    pub generation: u64,
    pub state: SearchState,
}
