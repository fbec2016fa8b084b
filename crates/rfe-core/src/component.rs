use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Downstream subsystem that can be the primary recipient of a field.
///
/// The registry is closed: anything that fails [`Component::from_name`] is
/// routed to [`Component::All`] at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    All,
    NeuralArchitecture,
    MemoryVessel,
    SecurityTrauma,
    CommerceIntegration,
    PromptEngine,
    IntegrationLayer,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::All,
        Component::NeuralArchitecture,
        Component::MemoryVessel,
        Component::SecurityTrauma,
        Component::CommerceIntegration,
        Component::PromptEngine,
        Component::IntegrationLayer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::All => "all",
            Component::NeuralArchitecture => "neural-architecture",
            Component::MemoryVessel => "memory-vessel",
            Component::SecurityTrauma => "security-trauma",
            Component::CommerceIntegration => "commerce-integration",
            Component::PromptEngine => "prompt-engine",
            Component::IntegrationLayer => "integration-layer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Validate a component name, falling back to [`Component::All`].
    pub fn parse_or_all(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!("unknown component '{name}', routing to all");
            Component::All
        })
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown component '{s}'"))
    }
}

/// What the user is doing right now, as reported by the state bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UserActivity {
    #[default]
    Idle,
    Browsing,
    Checkout,
    Other,
}

impl UserActivity {
    pub fn name(self) -> &'static str {
        match self {
            UserActivity::Idle => "idle",
            UserActivity::Browsing => "browsing",
            UserActivity::Checkout => "checkout",
            UserActivity::Other => "other",
        }
    }

    /// Unknown activity names map to [`UserActivity::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "idle" => UserActivity::Idle,
            "browsing" => UserActivity::Browsing,
            "checkout" => UserActivity::Checkout,
            _ => UserActivity::Other,
        }
    }
}

impl fmt::Display for UserActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for UserActivity {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl FromStr for UserActivity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
