//! Recommendation scenarios

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of recommendation call a filter is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendScenario {
    /// Items recommended to a user
    ItemsToUser,
    /// Items related to a context item
    ItemsToItem,
    /// Users likely to engage with an item
    UsersToItem,
}

impl RecommendScenario {
    /// Only item-to-item calls carry a context item
    pub fn allows_context_item(&self) -> bool {
        matches!(self, RecommendScenario::ItemsToItem)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendScenario::ItemsToUser => "items_to_user",
            RecommendScenario::ItemsToItem => "items_to_item",
            RecommendScenario::UsersToItem => "users_to_item",
        }
    }
}

impl fmt::Display for RecommendScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
