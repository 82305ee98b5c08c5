
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn page_load_counts_a_visit_and_opens_a_session() {
    let app = TestApp::spawn().await;

    let response = app.client.post(app.url("/visits")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let visit: Value = response.json().await.unwrap();

    assert_eq!(visit["siteVisits"], 1251);
    assert_eq!(visit["onlineUsers"], 1);
    assert!(visit["sessionId"].is_string());

    let response = app.client.post(app.url("/visits")).send().await.unwrap();
    let second: Value = response.json().await.unwrap();
    assert_eq!(second["siteVisits"], 1252);
    assert_eq!(second["onlineUsers"], 2);
    assert_ne!(second["sessionId"], visit["sessionId"]);
}

#[actix_rt::test]
async fn hidden_and_departed_sessions_stop_counting() {
    let app = TestApp::spawn().await;

    let visit: Value = app.client.post(app.url("/visits")).send().await.unwrap().json().await.unwrap();
    let session_id = visit["sessionId"].as_str().unwrap().to_string();
    let presence = format!("/presence/{session_id}");

    let hidden: Value = app.client
        .post(app.url(&format!("{presence}/visibility")))
        .json(&json!({"visible": false}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hidden["onlineUsers"], 0);

    let beat: Value = app.client.put(app.url(&presence)).send().await.unwrap().json().await.unwrap();
    assert_eq!(beat["onlineUsers"], 1);

    let response = app.client.delete(app.url(&presence)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let left: Value = response.json().await.unwrap();
    assert_eq!(left["onlineUsers"], 0);

    assert_eq!(app.state.content.analytics().online_users, 0);
}

#[actix_rt::test]
async fn presence_ids_must_be_uuids() {
    let app = TestApp::spawn().await;

    let response = app.client.put(app.url("/presence/not-a-uuid")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn contact_and_hire_forms_go_through_the_relay() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/contact"))
        .json(&json!({
            "name": "Jane",
            "email": "jane@example.com",
            "message": "Hello there"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Message sent successfully! I'll get back to you soon.");

    let response = app.client
        .post(app.url("/hire"))
        .json(&json!({
            "name": "Sam",
            "email": "sam@example.com",
            "contact": "+1 555 0100",
            "description": "Landing page"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Thank you! I will contact you soon.");

    let response = app.client
        .post(app.url("/contact"))
        .json(&json!({"name": "", "email": "bad", "message": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn newsletter_subscription() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/blog/subscribe"))
        .json(&json!({"email": "reader@blog.io"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.client
        .post(app.url("/blog/subscribe"))
        .json(&json!({"email": "reader"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn health_reports_storage_and_relay() {
    let app = TestApp::spawn().await;

    let health = app.get_json("/health").await;

    assert_eq!(health["storage_backend"], "memory");
    assert_eq!(health["relay"], "simulated");
}
