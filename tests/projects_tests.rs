mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

fn project(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A portfolio project with enough detail",
    })
}

#[actix_rt::test]
async fn create_applies_defaults() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/projects", &project("Portfolio")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Project created successfully");
    assert_eq!(body["data"]["featured"], false);
    assert_eq!(body["data"]["technologies"], json!([]));
    assert!(body["data"]["_id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
}

#[actix_rt::test]
async fn create_then_get_round_trips() {
    let app = TestApp::spawn().await;
    let payload = json!({
        "title": "Snow shader",
        "description": "WebGL snowfall rendered behind the landing page",
        "technologies": ["rust", "wgpu"],
        "link": "https://example.com/snow",
        "imageUrl": "",
        "startDate": "2024-02-01T00:00:00.000Z",
        "featured": true,
    });

    let created = app.create("/api/projects", &payload).await;
    let id = created["_id"].as_str().unwrap();

    let response = app.get(&format!("/api/projects/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let fetched = &body["data"];

    assert_eq!(fetched, &created);
    for key in ["title", "description", "technologies", "link", "imageUrl", "featured"] {
        assert_eq!(fetched[key], payload[key], "field {} changed", key);
    }
    assert_eq!(fetched["startDate"], "2024-02-01T00:00:00Z");
}

#[actix_rt::test]
async fn short_title_and_description_are_both_reported() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/projects", &json!({"title": "AI", "description": "short"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation Failed");
    let fields = detail_fields(&body);
    assert!(fields.contains(&"title".to_string()));
    assert!(fields.contains(&"description".to_string()));
}

#[actix_rt::test]
async fn unknown_field_is_rejected_even_when_rest_is_valid() {
    let app = TestApp::spawn().await;

    let mut payload = project("Portfolio");
    payload["stars"] = json!(5);

    let response = app.post_json("/api/projects", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(detail_fields(&body), vec!["stars"]);
}

#[actix_rt::test]
async fn invalid_url_is_rejected() {
    let app = TestApp::spawn().await;

    let mut payload = project("Portfolio");
    payload["link"] = json!("not a url");

    let response = app.post_json("/api/projects", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(detail_fields(&body), vec!["link"]);
}

#[actix_rt::test]
async fn epoch_dates_past_year_9999_are_rejected() {
    let app = TestApp::spawn().await;

    let mut payload = project("Far future");
    payload["startDate"] = json!(253_402_300_800_000i64);
    let response = app.post_json("/api/projects", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(detail_fields(&body), vec!["startDate"]);

    payload["startDate"] = json!(253_402_300_799_999i64);
    let created = app.create("/api/projects", &payload).await;
    assert_eq!(created["startDate"], "9999-12-31T23:59:59.999Z");

    let resubmitted = app
        .put_json(&format!("/api/projects/{}", created["_id"].as_str().unwrap()), &json!({
            "title": created["title"],
            "description": created["description"],
            "startDate": created["startDate"],
        }))
        .await;
    assert_eq!(resubmitted.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn pagination_splits_twenty_five_into_three_pages() {
    let app = TestApp::spawn().await;
    for i in 0..25 {
        app.create("/api/projects", &project(&format!("Project {:02}", i))).await;
    }

    for page in 1..=3 {
        let response = app.get(&format!("/api/projects?page={}&limit=10&sort=title", page)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();

        assert_eq!(body["pagination"], json!({"total": 25, "page": page, "limit": 10, "pages": 3}));
        let expected = if page == 3 { 5 } else { 10 };
        assert_eq!(body["data"].as_array().unwrap().len(), expected);
    }

    let body: Value = app.get("/api/projects?page=3&limit=10&sort=title").await.json().await.unwrap();
    assert_eq!(body["data"][0]["title"], "Project 20");
}

#[actix_rt::test]
async fn defaults_apply_to_unparseable_paging() {
    let app = TestApp::spawn().await;
    app.create("/api/projects", &project("Portfolio")).await;

    let body: Value = app.get("/api/projects?page=abc&limit=xyz").await.json().await.unwrap();
    assert_eq!(body["pagination"], json!({"total": 1, "page": 1, "limit": 10, "pages": 1}));
}

#[actix_rt::test]
async fn featured_filter_only_returns_featured_projects() {
    let app = TestApp::spawn().await;
    let mut featured = project("Featured one");
    featured["featured"] = json!(true);
    app.create("/api/projects", &featured).await;
    app.create("/api/projects", &project("Regular one")).await;

    let body: Value = app.get("/api/projects?featured=true").await.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Featured one");

    let body: Value = app.get("/api/projects?featured=false").await.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn newest_projects_are_listed_first_by_default() {
    let app = TestApp::spawn().await;
    app.create("/api/projects", &project("First")).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.create("/api/projects", &project("Second")).await;

    let body: Value = app.get("/api/projects").await.json().await.unwrap();
    assert_eq!(body["data"][0]["title"], "Second");
    assert_eq!(body["data"][1]["title"], "First");
}

#[actix_rt::test]
async fn unknown_sort_field_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/projects?sort=password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid sort field: password");
    assert!(body["details"]["allowed"].as_array().unwrap().contains(&json!("title")));
}

#[actix_rt::test]
async fn malformed_id_is_distinct_from_missing() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/projects/not-an-id").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid ID format");
    assert_eq!(body["details"], "not-an-id");

    let response = app.get(&format!("/api/projects/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Project not found"}));
}

#[actix_rt::test]
async fn update_replaces_the_whole_document() {
    let app = TestApp::spawn().await;
    let mut original = project("Portfolio");
    original["featured"] = json!(true);
    original["link"] = json!("https://example.com");
    let created = app.create("/api/projects", &original).await;
    let id = created["_id"].as_str().unwrap();

    let response = app
        .put_json(&format!("/api/projects/{}", id), &project("Portfolio v2"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["message"], "Project updated successfully");
    let updated = &body["data"];
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["title"], "Portfolio v2");
    assert_eq!(updated["featured"], false);
    assert_eq!(updated["link"], Value::Null);
}

#[actix_rt::test]
async fn update_of_missing_project_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .put_json(&format!("/api/projects/{}", uuid::Uuid::new_v4()), &project("Portfolio"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_returns_document_then_404() {
    let app = TestApp::spawn().await;
    let created = app.create("/api/projects", &project("Portfolio")).await;
    let path = format!("/api/projects/{}", created["_id"].as_str().unwrap());

    let response = app.delete(&path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Project deleted successfully");
    assert_eq!(body["data"], created);

    let response = app.delete(&path).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(&path).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn malformed_json_is_operational_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.admin_token())
        .header("Content-Type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid JSON payload");
}

#[actix_rt::test]
async fn trailing_slash_reaches_collection() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/projects/").await;
    assert_eq!(response.status(), StatusCode::OK);
}
