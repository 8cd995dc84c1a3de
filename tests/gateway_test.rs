//! Integration tests for the GitHub data gateway against a mock server.
//!
//! Covers the four read operations and the failure taxonomy: network,
//! not-found, decode, unknown.

use octoscout::api::{GithubClient, GithubError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn account_json(login: &str, id: u64) -> serde_json::Value {
    serde_json::json!({
        "login": login,
        "id": id,
        "node_id": format!("node-{id}"),
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "type": "User",
        "user_view_type": "public",
        "site_admin": false,
        "score": 1.0
    })
}

#[tokio::test]
async fn search_sends_query_and_preserves_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "den"))
        .and(query_param("per_page", "30"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [account_json("denreyes", 9638030), account_json("dennis", 42)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let accounts = client.search_users("den", 30).await.unwrap();

    let logins: Vec<&str> = accounts.iter().map(|a| a.login.as_str()).collect();
    assert_eq!(logins, vec!["denreyes", "dennis"]);
}

#[tokio::test]
async fn search_percent_encodes_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "den reyes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 0,
            "incomplete_results": false,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let accounts = client.search_users("den reyes", 30).await.unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn user_profile_decodes_extended_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/9638030"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "denreyes",
            "id": 9638030,
            "node_id": "MDQ6VXNlcjk2MzgwMzA=",
            "gravatar_id": "",
            "avatar_url": "https://avatars.githubusercontent.com/u/9638030?v=4",
            "url": "https://api.github.com/users/denreyes",
            "html_url": "https://github.com/denreyes",
            "type": "User",
            "site_admin": false,
            "name": "Den Reyes",
            "company": null,
            "blog": "http://www.denreyes.com/",
            "location": "Toronto, CA",
            "email": null,
            "hireable": true,
            "bio": null,
            "twitter_username": null,
            "public_repos": 32,
            "public_gists": 0,
            "followers": 8,
            "following": 5,
            "created_at": "2014-11-09T09:23:24Z",
            "updated_at": "2024-10-06T11:19:17Z"
        })))
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let profile = client.get_user(9638030).await.unwrap();

    assert_eq!(profile.login, "denreyes");
    assert_eq!(profile.name.as_deref(), Some("Den Reyes"));
    assert_eq!(profile.company, None);
    assert_eq!(profile.location.as_deref(), Some("Toronto, CA"));
    assert_eq!(profile.followers, 8);
    assert_eq!(profile.following, 5);
    assert_eq!(
        profile.created_at.unwrap().to_rfc3339(),
        "2014-11-09T09:23:24+00:00"
    );
}

#[tokio::test]
async fn followers_and_following_decode_bare_arrays() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/9638030/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            account_json("alice", 1),
            account_json("bob", 2)
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/9638030/following"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([account_json("carol", 3)])),
        )
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();

    let followers = client.get_followers(9638030).await.unwrap();
    assert_eq!(followers.len(), 2);
    assert_eq!(followers[0].login, "alice");

    let following = client.get_following(9638030).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].login, "carol");
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not Found"
        })))
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let err = client.get_user(1).await.unwrap_err();
    assert!(matches!(err, GithubError::NotFound));
}

#[tokio::test]
async fn malformed_payload_maps_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("surprise, not json"))
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let err = client.get_user(1).await.unwrap_err();
    assert!(matches!(err, GithubError::Decode(_)));
}

#[tokio::test]
async fn other_statuses_map_to_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), None).unwrap();
    let err = client.get_user(1).await.unwrap_err();
    match err {
        GithubError::Unknown { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "boom");
        }
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_maps_to_network() {
    // Nothing listens on this port.
    let client = GithubClient::with_base_url("http://127.0.0.1:1", None).unwrap();
    let err = client.get_user(1).await.unwrap_err();
    assert!(matches!(err, GithubError::Network(_)));
}

#[tokio::test]
async fn token_is_sent_as_bearer_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/1"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::with_base_url(server.uri(), Some("t0ken")).unwrap();
    let _ = client.get_user(1).await;
}
