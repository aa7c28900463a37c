use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{assert_is_redirect_to, spawn_app, TestApp, TEST_ACCOUNT};

const TICK_EXPORT: &str = "\
Date,Route,Rating,Notes,URL,Pitches,Location,Avg Stars,Your Stars,Style,Lead Style,Route Type,Your Rating,Length,Rating Code
2019-05-12,Snake Dike,5.7 R,,https://example.com/1,8,Yosemite,3.8,-1,Lead,Onsight,\"Trad, Alpine\",,800,2700
2019-06-01,Midnight Lightning,V8,,https://example.com/2,1,Yosemite,4,-1,Send,,Boulder,,,20800
2020-07-04,Pocket Pool,5.10a,,https://example.com/3,1,Smith Rock,2.5,-1,Lead,Redpoint,Sport,,,3100
";

async fn mount_climber(app: &TestApp, email: &str) {
    Mock::given(path("/data/get-user"))
        .and(method("GET"))
        .and(query_param("email", email))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"id": 200123, "name": "Lynn Hill"}),
        ))
        .named("get user")
        .expect(1)
        .mount(&app.mp_server)
        .await;

    Mock::given(path("/user/200123/Lynn%20Hill/tick-export"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TICK_EXPORT))
        .named("tick export")
        .expect(1)
        .mount(&app.mp_server)
        .await;
}

#[tokio::test]
async fn valid_email_renders_statistics() {
    let app = spawn_app().await;
    mount_climber(&app, "lynn@example.com").await;

    let resp = app
        .post_data(&serde_json::json!({
            "email": "lynn@example.com",
            "units": "feet",
        }))
        .await;

    assert_eq!(resp.status().as_u16(), 200);
    let html_page = resp.text().await.unwrap();
    assert!(html_page.contains("<h1>Lynn Hill</h1>"));
    assert!(html_page.contains("Total height climbed: 883 feet"));
    assert!(html_page.contains("Total pitches climbed: 10"));
    assert!(html_page.contains("<h2>Trad grades by year</h2>"));
    assert!(html_page.contains(
        "<tr><td>2019</td><td>5.7 R (1)</td><td>5.7 R</td><td>5.7 R</td></tr>"
    ));
}

#[tokio::test]
async fn meters_are_reported_when_requested() {
    let app = spawn_app().await;
    mount_climber(&app, "lynn@example.com").await;

    let resp = app
        .post_data(&serde_json::json!({
            "email": "lynn@example.com",
            "units": "meters",
        }))
        .await;

    let html_page = resp.text().await.unwrap();
    assert!(html_page.contains("Total height climbed: 269 meters"));
}

#[tokio::test]
async fn test_account_button_uses_the_configured_account() {
    let app = spawn_app().await;
    mount_climber(&app, TEST_ACCOUNT).await;

    let resp = app.post_data(&serde_json::json!({"test": "yes"})).await;

    assert_eq!(resp.status().as_u16(), 200);
    let html_page = resp.text().await.unwrap();
    assert!(html_page.contains("Total height climbed: 883 feet"));
}

#[tokio::test]
async fn empty_email_is_rejected_before_calling_mountain_project() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mp_server)
        .await;

    let resp = app
        .post_data(&serde_json::json!({"email": "", "units": "feet"}))
        .await;

    assert_eq!(resp.status().as_u16(), 400);
    let html_page = resp.text().await.unwrap();
    assert!(html_page.contains(
        r#"<div id="status" style="color: red">You must enter an email address.</div>"#
    ));
    assert!(html_page.contains(r#"<button type="submit" id="vbutton" style="">"#));
}

#[tokio::test]
async fn invalid_emails_are_rejected_with_the_form() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mp_server)
        .await;

    let test_cases = vec![
        ("not-an-email", "missing at"),
        ("a@b", "no top level domain"),
        ("user@.com", "empty domain label"),
    ];

    for (email, desc) in test_cases {
        let resp = app
            .post_data(&serde_json::json!({"email": email, "units": "feet"}))
            .await;

        assert_eq!(
            400,
            resp.status().as_u16(),
            "the api did not return a 400 for {}",
            desc
        );
        let html_page = resp.text().await.unwrap();
        assert!(html_page.contains(
            r#"<div id="status" style="color: red">Please enter a valid email address.</div>"#
        ));
        // the visitor's input is kept in the form
        assert!(html_page.contains(&format!(r#"value="{}""#, email)));
    }
}

#[tokio::test]
async fn get_data_redirects_to_index() {
    let app = spawn_app().await;

    let resp = app.get_data().await;

    assert_is_redirect_to(&resp, "/");
}
