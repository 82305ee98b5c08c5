
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn public_lists_serve_the_bundled_dataset() {
    let app = TestApp::spawn().await;

    let projects = app.get_json("/projects").await;
    assert_eq!(projects.as_array().unwrap().len(), 5);
    assert_eq!(projects[0]["title"], "Tech Hub Institute");

    let categories = app.get_json("/certificates/categories").await;
    assert_eq!(categories[0], "All");

    let all = app.get_json("/certificates").await;
    let filtered = app.get_json("/certificates?category=All").await;
    assert_eq!(all, filtered);
}

#[actix_rt::test]
async fn project_create_update_delete() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_post(&token, "/admin/projects", json!({
        "title": "  Shop Front ",
        "description": "Storefront rebuild",
        "technologies": "React, Node.js, react",
        "link": "https://shop.example.com"
    })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["title"], "Shop Front");
    let id = created["id"].as_i64().unwrap();
    assert!(id > 5);

    let projects = app.get_json("/projects").await;
    assert_eq!(projects.as_array().unwrap().len(), 6);

    let response = app.admin_patch(&token, &format!("/admin/projects/{id}"), json!({"price": "$900"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["price"], "$900");
    assert_eq!(updated["title"], "Shop Front");

    let response = app.admin_patch(&token, "/admin/projects/999999", json!({"price": "$1"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.admin_delete(&token, &format!("/admin/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.get_json("/projects").await.as_array().unwrap().len(), 5);
}

#[actix_rt::test]
async fn bad_bodies_are_rejected_with_400() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_post(&token, "/admin/projects", json!({"title": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "title");

    let response = app.admin_post(&token, "/admin/projects", json!({"title": "X", "owner": "me"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.client
        .post(app.url("/admin/projects"))
        .bearer_auth(&token)
        .header("Content-Type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn drafts_stay_private_until_published() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_post(&token, "/admin/blog/posts", json!({
        "title": "Tuning Postgres",
        "excerpt": "Indexes first",
        "content": "Body",
        "category": "Database",
        "tags": "sql, performance"
    })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let post: Value = response.json().await.unwrap();
    let id = post["id"].as_i64().unwrap();
    assert_eq!(post["published"], false);

    let page = app.get_json("/blog/posts").await;
    assert_eq!(page["total"], 0);
    let response = app.client.get(app.url(&format!("/blog/posts/{id}"))).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.admin_post(&token, &format!("/admin/blog/posts/{id}/publish"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = app.get_json("/blog/posts?category=Database").await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["posts"][0]["title"], "Tuning Postgres");
    assert_eq!(app.get_json("/blog/posts?category=React").await["total"], 0);

    let categories = app.get_json("/blog/categories").await;
    assert_eq!(categories, json!(["All", "Database"]));

    let admin_list: Value = app.admin_get(&token, "/admin/blog/posts").await.json().await.unwrap();
    assert_eq!(admin_list.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn category_rename_and_delete_carry_posts_along() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let post: Value = app.admin_post(&token, "/admin/blog/posts", json!({
        "title": "Pipelines",
        "category": "DevOps",
        "published": true
    })).await.json().await.unwrap();
    let id = post["id"].as_i64().unwrap();

    let response = app.admin_post(&token, "/admin/blog/categories", json!({"name": "Rust"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = app.admin_post(&token, "/admin/blog/categories", json!({"name": "Rust"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.client
        .put(app.url("/admin/blog/categories/DevOps"))
        .bearer_auth(&token)
        .json(&json!({"name": "Rust"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.client
        .put(app.url("/admin/blog/categories/DevOps"))
        .bearer_auth(&token)
        .json(&json!({"name": "Platform"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let renamed: Value = app.get_json(&format!("/blog/posts/{id}")).await;
    assert_eq!(renamed["category"], "Platform");

    let response = app.admin_delete(&token, "/admin/blog/categories/Platform").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let moved: Value = app.get_json(&format!("/blog/posts/{id}")).await;
    assert_eq!(moved["category"], "Uncategorized");

    let categories: Value = app.admin_get(&token, "/admin/blog/categories").await.json().await.unwrap();
    assert!(!categories.as_array().unwrap().iter().any(|c| c == "Platform"));
}

#[actix_rt::test]
async fn export_is_served_as_a_dated_attachment() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_get(&token, "/admin/export").await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("portfolio-data-"));
    assert!(disposition.contains(".json"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["projects"].as_array().unwrap().len(), 5);
    assert_eq!(body["analytics"]["siteVisits"], 1250);
}

#[actix_rt::test]
async fn admin_can_overwrite_analytics_counters() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_patch(&token, "/admin/analytics", json!({"siteVisits": 4000})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot: Value = app.admin_get(&token, "/admin/analytics").await.json().await.unwrap();
    assert_eq!(snapshot["siteVisits"], 4000);
    assert_eq!(snapshot["monthlyGrowth"]["visits"], 89);
}
