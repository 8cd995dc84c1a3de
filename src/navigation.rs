use thiserror::Error;

use crate::api::types::Account;

/// A selected [`Account`] crosses the screen transition as a URL-safe
/// string: JSON, percent-encoded. Decoding must return a value equal in
/// every field to the original.

#[derive(Debug, Error)]
pub enum NavError {
    #[error("account did not serialize: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("navigation argument did not parse: {0}")]
    Decode(String),
}

pub fn encode_account(account: &Account) -> Result<String, NavError> {
    let json = serde_json::to_string(account)?;
    Ok(urlencoding::encode(&json).into_owned())
}

pub fn decode_account(arg: &str) -> Result<Account, NavError> {
    let json = urlencoding::decode(arg).map_err(|e| NavError::Decode(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| NavError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            login: "denreyes".to_string(),
            id: 9638030,
            node_id: Some("MDQ6VXNlcjk2MzgwMzA=".to_string()),
            avatar_url: "https://avatars.githubusercontent.com/u/9638030?v=4".to_string(),
            gravatar_id: Some(String::new()),
            url: "https://api.github.com/users/denreyes".to_string(),
            html_url: "https://github.com/denreyes".to_string(),
            followers_url: Some("https://api.github.com/users/denreyes/followers".to_string()),
            following_url: Some(
                "https://api.github.com/users/denreyes/following{/other_user}".to_string(),
            ),
            gists_url: Some("https://api.github.com/users/denreyes/gists{/gist_id}".to_string()),
            starred_url: Some(
                "https://api.github.com/users/denreyes/starred{/owner}{/repo}".to_string(),
            ),
            subscriptions_url: Some(
                "https://api.github.com/users/denreyes/subscriptions".to_string(),
            ),
            organizations_url: Some("https://api.github.com/users/denreyes/orgs".to_string()),
            repos_url: Some("https://api.github.com/users/denreyes/repos".to_string()),
            events_url: Some(
                "https://api.github.com/users/denreyes/events{/privacy}".to_string(),
            ),
            received_events_url: Some(
                "https://api.github.com/users/denreyes/received_events".to_string(),
            ),
            kind: "User".to_string(),
            user_view_type: Some("public".to_string()),
            site_admin: false,
            score: Some(0.95),
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let account = sample_account();
        let encoded = encode_account(&account).unwrap();
        let decoded = decode_account(&encoded).unwrap();
        assert_eq!(decoded, account);
    }

    #[test]
    fn round_trip_with_absent_optionals() {
        let account = Account {
            node_id: None,
            gravatar_id: None,
            followers_url: None,
            following_url: None,
            gists_url: None,
            starred_url: None,
            subscriptions_url: None,
            organizations_url: None,
            repos_url: None,
            events_url: None,
            received_events_url: None,
            user_view_type: None,
            score: None,
            ..sample_account()
        };
        let encoded = encode_account(&account).unwrap();
        let decoded = decode_account(&encoded).unwrap();
        assert_eq!(decoded, account);
    }

    #[test]
    fn encoded_argument_is_url_safe() {
        let encoded = encode_account(&sample_account()).unwrap();
        assert!(!encoded.contains('{'));
        assert!(!encoded.contains('"'));
        assert!(!encoded.contains(' '));
    }

    #[test]
    fn garbage_argument_is_rejected() {
        assert!(decode_account("not%20json").is_err());
    }
}
