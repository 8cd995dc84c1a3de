use crate::api::types::{Account, AccountProfile, SearchResponse};
use crate::api::{GithubClient, GithubError};

impl GithubClient {
    /// Search accounts matching a query. Results keep the server's order.
    pub async fn search_users(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<Account>, GithubError> {
        let per_page = per_page.clamp(1, 100);
        let path = format!(
            "/search/users?q={}&per_page={per_page}",
            urlencoding::encode(query),
        );
        let resp: SearchResponse = self.get_json(&path).await?;
        Ok(resp.items)
    }

    /// Fetch the full profile of an account by numeric ID.
    pub async fn get_user(&self, id: u64) -> Result<AccountProfile, GithubError> {
        self.get_json(&format!("/user/{id}")).await
    }

    /// Fetch the accounts following a user.
    pub async fn get_followers(&self, id: u64) -> Result<Vec<Account>, GithubError> {
        self.get_json(&format!("/user/{id}/followers")).await
    }

    /// Fetch the accounts a user is following.
    pub async fn get_following(&self, id: u64) -> Result<Vec<Account>, GithubError> {
        self.get_json(&format!("/user/{id}/following")).await
    }
}
