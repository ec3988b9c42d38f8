// src/collections.rs
use crate::error::SeedError;
use std::fmt;
use std::str::FromStr;

/// A collection the seeder knows how to populate.
///
/// Fixture names are the camelCase stems of the files under the data
/// directory; collection names are the pluralised lowercase names the
/// documents live under in MongoDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedCollection {
    Communities,
    Users,
    Organizations,
    ActionItemCategories,
    Events,
    Posts,
    AppUserProfiles,
}

impl SeedCollection {
    /// Every registered collection. `--format` clears all of them.
    pub const ALL: [Self; 7] = [
        Self::Communities,
        Self::Users,
        Self::Organizations,
        Self::ActionItemCategories,
        Self::Events,
        Self::Posts,
        Self::AppUserProfiles,
    ];

    /// Loaded when `--items` is not given, in this order.
    pub const DEFAULT_ITEMS: [Self; 5] = [
        Self::Users,
        Self::Organizations,
        Self::Posts,
        Self::Events,
        Self::AppUserProfiles,
    ];

    pub const fn fixture_name(self) -> &'static str {
        match self {
            Self::Communities => "communities",
            Self::Users => "users",
            Self::Organizations => "organizations",
            Self::ActionItemCategories => "actionItemCategories",
            Self::Events => "events",
            Self::Posts => "posts",
            Self::AppUserProfiles => "appUserProfiles",
        }
    }

    pub const fn collection_name(self) -> &'static str {
        match self {
            Self::Communities => "communities",
            Self::Users => "users",
            Self::Organizations => "organizations",
            Self::ActionItemCategories => "actionitemcategories",
            Self::Events => "events",
            Self::Posts => "posts",
            Self::AppUserProfiles => "appuserprofiles",
        }
    }

    pub fn default_items() -> Vec<String> {
        Self::DEFAULT_ITEMS
            .iter()
            .map(|c| c.fixture_name().to_string())
            .collect()
    }
}

impl FromStr for SeedCollection {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.fixture_name() == s)
            .ok_or_else(|| SeedError::UnknownCollection(s.to_string()))
    }
}

impl fmt::Display for SeedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fixture_name())
    }
}
