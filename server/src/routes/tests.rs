//! Router Tests
//!
//! Drive the full router (CSRF layer included) with `tower::ServiceExt::oneshot`.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use super::csrf::{CSRF_COOKIE, CSRF_FIELD, CSRF_HEADER};
use super::{router, AppState};
use crate::config::Config;
use crate::repository::{init_db, DbState};

const TOKEN: &str = "testtoken";
const BOUNDARY: &str = "homebase-test-boundary";

struct TestApp {
    app: Router,
    _media: tempfile::TempDir,
    media_dir: PathBuf,
}

async fn test_app() -> TestApp {
    let media = tempfile::tempdir().unwrap();
    let db = init_db(&PathBuf::from(":memory:")).await.unwrap();
    let config = Config {
        media_dir: media.path().to_path_buf(),
        static_dir: media.path().join("dist"),
        ..Config::default()
    };
    TestApp {
        app: router(AppState::new(db, config)),
        media_dir: media.path().to_path_buf(),
        _media: media,
    }
}

fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn save_request(entity: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(format!("/chores/{}/save/", entity))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, TOKEN))
        .header(CSRF_HEADER, TOKEN)
        .header("X-Requested-With", "XMLHttpRequest")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn save(app: &Router, entity: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
    send(app, save_request(entity, multipart(fields, None))).await
}

#[tokio::test]
async fn test_health_ok() {
    let t = test_app().await;
    let (status, body) = send(&t.app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["database"], "ok");
}

#[tokio::test]
async fn test_health_reports_missing_database() {
    let media = tempfile::tempdir().unwrap();
    let config = Config { media_dir: media.path().to_path_buf(), ..Config::default() };
    let app = router(AppState::new(DbState::new(), config));
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
    assert_eq!(body["services"]["database"], "error");
}

#[tokio::test]
async fn test_first_response_sets_csrf_cookie() {
    let t = test_app().await;
    let response = t
        .app
        .clone()
        .oneshot(Request::get("/chores/location/json/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("csrftoken="));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_save_without_token_is_forbidden() {
    let t = test_app().await;
    let request = Request::post("/chores/location/save/")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, TOKEN))
        .body(Body::from(multipart(&[("name", "Garage")], None)))
        .unwrap();
    let (status, _) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_then_update_location() {
    let t = test_app().await;
    let (status, body) = save(&t.app, "location", &[("name", "Garage"), ("description", ""), ("notes", "[]")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["location"]["name"], "Garage");
    assert_eq!(body["location"]["notes"], serde_json::json!([]));
    let id = body["location"]["id"].as_u64().unwrap().to_string();

    let (status, body) = save(
        &t.app,
        "location",
        &[("id", id.as_str()), ("name", "Garage"), ("notes", r#"["Door code 1234"]"#)],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["id"].as_u64().unwrap().to_string(), id);
    assert_eq!(body["location"]["notes"][0], "Door code 1234");

    let (status, list) = send(&t.app, Request::get("/chores/location/json/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validation_errors() {
    let t = test_app().await;
    let (status, body) = save(&t.app, "location", &[("name", "  ")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0]["message"], "This field is required.");

    save(&t.app, "location", &[("name", "Attic")]).await;
    let (status, body) = save(&t.app, "location", &[("name", "Attic")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0]["code"], "unique");

    let (status, body) = save(&t.app, "equipment", &[("name", "Ladder"), ("count", "-1"), ("location", "42")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["count"][0]["code"], "min_value");
    assert_eq!(body["errors"]["location"][0]["code"], "invalid_choice");

    let (status, body) = save(&t.app, "equipment", &[("name", "Ladder"), ("count", "5000000000")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["count"][0]["code"], "max_value");
    assert_eq!(
        body["errors"]["count"][0]["message"],
        "Ensure this value is less than or equal to 4294967295."
    );
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let t = test_app().await;
    let (status, _) = send(&t.app, Request::get("/chores/task/42/json/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = save(&t.app, "task", &[("id", "42"), ("name", "Ghost")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_with_steps_and_equipment() {
    let t = test_app().await;
    let (_, mop) = save(&t.app, "equipment", &[("name", "Mop"), ("count", "1")]).await;
    let mop_id = mop["equipment"]["id"].as_u64().unwrap().to_string();

    let steps = r#"[{"name":"Wash","description":"","order":1},{"name":"Dry","description":"","order":0}]"#;
    let (status, body) = save(
        &t.app,
        "task",
        &[("name", "Floors"), ("steps", steps), ("equipment", mop_id.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["steps"][0]["name"], "Dry");
    assert_eq!(body["task"]["steps"][1]["order"], 1);
    assert_eq!(body["task"]["equipment"][0]["name"], "Mop");

    let id = body["task"]["id"].as_u64().unwrap();
    let (status, loaded) = send(
        &t.app,
        Request::get(format!("/chores/task/{}/json/", id)).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, body["task"]);

    let (status, body) = save(&t.app, "task", &[("name", "Windows"), ("equipment", "999")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["equipment"][0]["code"], "invalid_choice");
}

#[tokio::test]
async fn test_equipment_image_upload() {
    let t = test_app().await;
    let body = multipart(&[("name", "Drill")], Some(("image", "drill.png", "image/png", &b"\x89PNG drill"[..])));
    let (status, body) = send(&t.app, save_request("equipment", body)).await;
    assert_eq!(status, StatusCode::OK);

    let url = body["equipment"]["image_url"].as_str().unwrap();
    assert!(url.starts_with("/media/equipment/"));
    let file_name = url.rsplit('/').next().unwrap();
    assert!(t.media_dir.join("equipment").join(file_name).exists());

    let (status, served) = {
        let response = t.app.clone().oneshot(Request::get(url).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        (status, to_bytes(response.into_body(), usize::MAX).await.unwrap())
    };
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&served[..], b"\x89PNG drill");

    let text = multipart(&[("name", "Saw")], Some(("image", "saw.txt", "text/plain", &b"not an image"[..])));
    let (status, body) = send(&t.app, save_request("equipment", text)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["image"][0]["code"], "invalid_image");
}

#[tokio::test]
async fn test_delete_form_redirects() {
    let t = test_app().await;
    let (_, body) = save(&t.app, "location", &[("name", "Porch")]).await;
    let id = body["location"]["id"].as_u64().unwrap();

    let request = Request::post(format!("/chores/location/{}/delete/", id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, TOKEN))
        .body(Body::from(format!("{}={}", CSRF_FIELD, TOKEN)))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/chores/");

    let (status, _) = send(
        &t.app,
        Request::get(format!("/chores/location/{}/json/", id)).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn chore_form_request(body: &str) -> Request<Body> {
    Request::post("/chores/chore/save/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, TOKEN))
        .body(Body::from(format!("{}={}&{}", CSRF_FIELD, TOKEN, body)))
        .unwrap()
}

#[tokio::test]
async fn test_chore_form_post_saves_and_redirects() {
    let t = test_app().await;
    let (_, mop) = save(&t.app, "equipment", &[("name", "Mop")]).await;
    let mop_id = mop["equipment"]["id"].as_u64().unwrap();

    let body = format!(
        "name=Mop+kitchen&points=3&is_recurring=on&recurrence=W&recurrence_day_of_week=SAT\
         &equipment={}&notes=%5B%22Move+the+chairs%22%5D",
        mop_id
    );
    let response = t.app.clone().oneshot(chore_form_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/chores/");

    let (status, chores) = send(&t.app, Request::get("/chores/chore/json/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chores[0]["name"], "Mop kitchen");
    assert_eq!(chores[0]["points"], 3);
    assert_eq!(chores[0]["recurrence"], "W");
    assert_eq!(chores[0]["recurrence_day_of_week"], "SAT");
    assert_eq!(chores[0]["equipment"][0]["name"], "Mop");
    assert_eq!(chores[0]["notes"][0], "Move the chairs");
}

#[tokio::test]
async fn test_chore_form_validation() {
    let t = test_app().await;
    let (status, body) = send(
        &t.app,
        chore_form_request("name=&points=-2&is_recurring=on&recurrence=W&tasks=77"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0]["code"], "required");
    assert_eq!(body["errors"]["points"][0]["code"], "min_value");
    assert_eq!(body["errors"]["tasks"][0]["code"], "invalid_choice");
    assert_eq!(body["errors"]["__all__"][0]["message"], "Weekly recurrence requires a weekday selection.");

    let (_, chores) = send(&t.app, Request::get("/chores/chore/json/").body(Body::empty()).unwrap()).await;
    assert_eq!(chores, serde_json::json!([]));
}

#[tokio::test]
async fn test_chore_form_needs_token_field() {
    let t = test_app().await;
    let request = Request::post("/chores/chore/save/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, format!("{}={}", CSRF_COOKIE, TOKEN))
        .body(Body::from("name=Dust&csrfmiddlewaretoken=wrong"))
        .unwrap();
    let (status, body) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "CSRF verification failed.");
}
