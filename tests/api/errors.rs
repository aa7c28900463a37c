use std::time::Duration;

use wiremock::matchers::{any, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

const MOUNTAIN_PROJECT_MESSAGE: &str =
    "An error occurred fetching data from the Mountain Project API.";
const REQUEST_FAILED_MESSAGE: &str =
    "Something went wrong on our end. Please try again later.";

#[tokio::test]
async fn unknown_pages_return_404() {
    let app = spawn_app().await;

    let resp = app.get_index("not_a_page").await;

    assert_eq!(resp.status().as_u16(), 404);
    let html_page = resp.text().await.unwrap();
    assert!(html_page.contains(
        "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again."
    ));
}

#[tokio::test]
async fn unreadable_user_reply_returns_403() {
    let app = spawn_app().await;

    Mock::given(path("/data/get-user"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
        )
        .expect(1)
        .mount(&app.mp_server)
        .await;

    let resp = app
        .post_data(&serde_json::json!({"email": "someone@example.com"}))
        .await;

    assert_eq!(resp.status().as_u16(), 403);
    assert!(resp.text().await.unwrap().contains(MOUNTAIN_PROJECT_MESSAGE));
}

#[tokio::test]
async fn rejected_api_key_returns_403() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.mp_server)
        .await;

    let resp = app
        .post_data(&serde_json::json!({"email": "someone@example.com"}))
        .await;

    assert_eq!(resp.status().as_u16(), 403);
    assert!(resp.text().await.unwrap().contains(MOUNTAIN_PROJECT_MESSAGE));
}

#[tokio::test]
async fn malformed_tick_export_returns_403() {
    let app = spawn_app().await;

    Mock::given(path("/data/get-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"id": 7, "name": "alex"}),
        ))
        .mount(&app.mp_server)
        .await;
    Mock::given(path("/user/7/alex/tick-export"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Date,Route,Pitches\nsometime,Route,1\n"),
        )
        .expect(1)
        .mount(&app.mp_server)
        .await;

    let resp = app
        .post_data(&serde_json::json!({"email": "alex@example.com"}))
        .await;

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn slow_mountain_project_returns_400() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_secs(30)),
        )
        .mount(&app.mp_server)
        .await;

    let resp = app
        .post_data(&serde_json::json!({"email": "someone@example.com"}))
        .await;

    assert_eq!(resp.status().as_u16(), 400);
    assert!(resp.text().await.unwrap().contains(REQUEST_FAILED_MESSAGE));
}
