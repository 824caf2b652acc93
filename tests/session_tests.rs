use care_console::api::{ListSource, ResourceEndpoint, RestClient};
use care_console::config::ConsoleConfig;
use care_console::demo::{self, DemoState};
use care_console::entities::Caregiver;
use care_console::list::ListQuery;
use care_console::session::{RouteDecision, RouteGuard, SessionTokens, demo_token};
use chrono::{Duration, Utc};
use std::net::SocketAddr;

/// Mirrors route entry: the guard runs first and only an allowed route fetches.
async fn enter_route(
    path: &str,
    cookie: &str,
    endpoint: &ResourceEndpoint<Caregiver>,
) -> RouteDecision {
    let tokens = SessionTokens::from_cookie_header(cookie);
    let decision = RouteGuard::new().check(path, &tokens, Utc::now());
    if decision == RouteDecision::Allow {
        let key = ListQuery::for_entity::<Caregiver>(10).key::<Caregiver>();
        endpoint.fetch(&key).await.unwrap();
    }
    decision
}

async fn demo_endpoint() -> (DemoState, ResourceEndpoint<Caregiver>) {
    let state = DemoState::seeded().unwrap();
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let (local, _server) = demo::spawn(addr, state.clone()).await.unwrap();
    let client = RestClient::new(ConsoleConfig::new(&demo::base_url(local))).unwrap();
    (state, ResourceEndpoint::new(client))
}

#[tokio::test]
async fn expired_refresh_cookie_redirects_before_any_request() {
    let (state, endpoint) = demo_endpoint().await;
    let expired = demo_token(Utc::now() - Duration::hours(2)).unwrap();
    let cookie = format!("accessToken=abc; refreshToken={expired}");

    let decision = enter_route("/", &cookie, &endpoint).await;

    assert_eq!(decision, RouteDecision::Redirect("/signin"));
    assert!(state.requests().is_empty());
}

#[tokio::test]
async fn missing_or_garbled_cookie_also_redirects() {
    let (state, endpoint) = demo_endpoint().await;

    for cookie in ["", "refreshToken=not-a-jwt", "theme=dark"] {
        assert_eq!(
            enter_route("/caregivers", cookie, &endpoint).await,
            RouteDecision::Redirect("/signin"),
            "cookie {cookie:?}"
        );
    }
    assert!(state.requests().is_empty());
}

#[tokio::test]
async fn live_session_enters_and_fetches_once() {
    let (state, endpoint) = demo_endpoint().await;
    let live = demo_token(Utc::now() + Duration::hours(2)).unwrap();

    let decision = enter_route("/caregivers", &format!("refreshToken={live}"), &endpoint).await;

    assert_eq!(decision, RouteDecision::Allow);
    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/v1/caregivers");
}

#[tokio::test]
async fn sign_in_page_is_always_reachable() {
    let (state, endpoint) = demo_endpoint().await;
    let tokens = SessionTokens::default();
    assert_eq!(
        RouteGuard::new().check("/signin", &tokens, Utc::now()),
        RouteDecision::Allow
    );
    drop(endpoint);
    assert!(state.requests().is_empty());
}
