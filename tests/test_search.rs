mod common;

use serde_json::Value;

fn slugs(body: &Value) -> Vec<&str> {
    body["posts"]
        .as_array()
        .expect("posts should be an array")
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect()
}

fn blog() -> common::TestEnv {
    let env = common::TestEnv::start();
    let street = env.category("street-food", "Street Food");
    let restaurants = env.category("restaurants", "Restaurants");
    env.post("bangkok-street-food", "Bangkok Street Food", "Bangkok", Some(street.as_str()), None);
    env.post("roman-trattorias", "Roman Trattorias", "Rome", Some(restaurants.as_str()), None);
    env
}

#[tokio::test]
async fn search_by_query_returns_matching_posts() {
    let env = blog();
    let server = env.server();

    let response = server.get("/api/search").add_query_param("q", "food").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(slugs(&body), vec!["bangkok-street-food"]);
    assert_eq!(body["total"], 1);
    assert_eq!(body["query"], "food");
}

#[tokio::test]
async fn search_by_location_only() {
    let env = blog();
    let server = env.server();

    let response = server
        .get("/api/search")
        .add_query_param("q", "")
        .add_query_param("location", "Rome")
        .await;

    let body: Value = response.json();
    assert_eq!(slugs(&body), vec!["roman-trattorias"]);
    assert_eq!(body["filters"]["location"], "Rome");
    assert!(body["filters"].get("category").is_none());
}

#[tokio::test]
async fn search_without_parameters_returns_everything() {
    let env = blog();
    let server = env.server();

    let body: Value = server.get("/api/search").await.json();
    assert_eq!(slugs(&body), vec!["bangkok-street-food", "roman-trattorias"]);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn search_combines_query_and_category() {
    let env = blog();
    let server = env.server();

    let body: Value = server
        .get("/api/search")
        .add_query_param("q", "roman")
        .add_query_param("category", "street-food")
        .await
        .json();

    assert!(slugs(&body).is_empty());
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn search_on_empty_store_is_empty_not_error() {
    let env = common::TestEnv::start();
    let server = env.server();

    let body: Value = server.get("/api/search").add_query_param("q", "anything").await.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn facets_list_categories_and_sorted_locations() {
    let env = blog();
    env.post("bangkok-canals", "Bangkok Canals", "Bangkok", None, None);
    let server = env.server();

    let body: Value = server.get("/api/search/facets").await.json();
    assert_eq!(body["locations"], serde_json::json!(["Bangkok", "Rome"]));
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);
}
