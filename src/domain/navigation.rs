// Tab navigation state machine
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab: {0}")]
pub struct UnknownTabError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Overview,
    AiChampions,
    References,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::AiChampions, Tab::References];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::AiChampions => "ai_champions",
            Tab::References => "references",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::AiChampions => "AI Champions",
            Tab::References => "Reference Customers",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = UnknownTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| UnknownTabError(s.to_string()))
    }
}

/// Holds the single active tab. Starts on `Overview`; every tab is reachable
/// from every other and there is no terminal state.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    active: Tab,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Switch to the tab named by `tab_id`. An unrecognized id leaves the
    /// active tab untouched.
    pub fn select_tab(&mut self, tab_id: &str) -> Result<Tab, UnknownTabError> {
        let tab = tab_id.parse::<Tab>()?;
        self.active = tab;
        Ok(tab)
    }
}
