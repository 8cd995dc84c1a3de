use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Search envelope
// ---------------------------------------------------------------------------

/// Wrapper returned by `GET /search/users`; the follower/following endpoints
/// return a bare array instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: Option<bool>,
    pub items: Vec<Account>,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A GitHub user or organization as returned by the search and
/// follower/following endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub node_id: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    pub url: String,
    pub html_url: String,
    #[serde(default)]
    pub followers_url: Option<String>,
    #[serde(default)]
    pub following_url: Option<String>,
    #[serde(default)]
    pub gists_url: Option<String>,
    #[serde(default)]
    pub starred_url: Option<String>,
    #[serde(default)]
    pub subscriptions_url: Option<String>,
    #[serde(default)]
    pub organizations_url: Option<String>,
    #[serde(default)]
    pub repos_url: Option<String>,
    #[serde(default)]
    pub events_url: Option<String>,
    #[serde(default)]
    pub received_events_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_view_type: Option<String>,
    #[serde(default)]
    pub site_admin: bool,
    /// Relevance score; present on search results but not on
    /// follower/following listings.
    #[serde(default)]
    pub score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Extended profile
// ---------------------------------------------------------------------------

/// The full profile from `GET /user/{id}`, fetched lazily per detail-screen
/// visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub node_id: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    pub url: String,
    pub html_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub site_admin: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hireable: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
