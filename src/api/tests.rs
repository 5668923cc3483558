use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::configure;
use crate::config::AppConfig;
use crate::middleware::RequestMetrics;
use crate::state::AppState;
use crate::utils::random::ScriptedRandom;

const JUNIOR: &str = "題目,選項1.,選項2.,選項3.,選項4.,標準答案\napple,蘋果,香蕉,橘子,葡萄,1\n";
const GACHA: &str = "角色,圖片,稀有度\n小貓,/img/cat.png,稀有\n";

/// Fresh data directory holding only the junior and gacha tables.
fn data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vocab-gacha-api-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("國中2000單字.csv"), JUNIOR).unwrap();
    std::fs::write(dir.join("轉蛋.csv"), GACHA).unwrap();
    dir
}

fn state(dir: &Path, roll: f64) -> AppState {
    let dir = dir.to_string_lossy().into_owned();
    let config = AppConfig::from_lookup(|key| (key == "DATA_DIR").then(|| dir.clone()));
    AppState::with_random(config, Arc::new(ScriptedRandom::new(vec![roll], vec![0])))
}

macro_rules! app {
    ($state:expr) => {{
        let app_state: AppState = $state;
        test::init_service(
            App::new()
                .wrap(RequestMetrics)
                .configure(|cfg| app_state.attach(cfg))
                .configure(configure),
        )
        .await
    }};
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_account_flow() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    let (status, body) = post_json!(app, "/register", json!({"username": "alice", "password": "pw1"}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "username": "alice"}));

    let (_, body) = post_json!(app, "/get_cans", json!({"username": "alice"}));
    assert_eq!(body, json!({"success": true, "cans": 0}));

    let (_, body) = post_json!(app, "/update_cans", json!({"username": "alice", "cans": 5}));
    assert_eq!(body, json!({"success": true, "cans": 5}));

    let (_, body) = post_json!(app, "/login", json!({"username": "alice", "password": "wrong"}));
    assert_eq!(body, json!({"success": false, "message": "帳號不存在或密碼錯誤"}));

    let (_, body) = post_json!(app, "/login", json!({"username": "alice", "password": "pw1"}));
    assert_eq!(body, json!({"success": true, "username": "alice", "cans": 5}));

    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("users.json")).unwrap()).unwrap();
    assert_eq!(stored, json!([{"username": "alice", "password": "pw1", "cans": 5}]));
}

#[actix_web::test]
async fn test_account_failures_keep_200() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    let (status, body) = post_json!(app, "/login", json!({"username": "x", "password": "y"}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "找不到使用者資料檔");

    let (_, body) = post_json!(app, "/get_cans", json!({"username": "x"}));
    assert_eq!(body, json!({"success": false, "message": "帳號不存在"}));

    let (_, body) = post_json!(app, "/update_cans", json!({"username": "x", "cans": 1}));
    assert_eq!(body["message"], "使用者資料不存在");

    let (_, body) = post_json!(app, "/register", json!({"username": "x"}));
    assert_eq!(body["message"], "帳號或密碼不可為空");

    let (_, body) = post_json!(app, "/register", json!({"username": "abcdefghijk", "password": "p"}));
    assert_eq!(body["message"], "暱稱不可以超過10個字");

    let (_, _) = post_json!(app, "/register", json!({"username": "x", "password": "p"}));
    let (_, body) = post_json!(app, "/register", json!({"username": "x", "password": "q"}));
    assert_eq!(body, json!({"success": false, "message": "帳號已存在"}));

    let (_, body) = post_json!(app, "/update_cans", json!({"username": "x"}));
    assert_eq!(body["message"], "更新失敗");
}

#[actix_web::test]
async fn test_corrupt_store_on_login() {
    let dir = data_dir();
    std::fs::write(dir.join("users.json"), "not json").unwrap();
    let app = app!(state(&dir, 0.5));

    let (status, body) = post_json!(app, "/login", json!({"username": "x", "password": "y"}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "使用者資料檔格式錯誤"}));
}

#[actix_web::test]
async fn test_malformed_body_is_rejected_as_json() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    let (status, body) = post_json!(app, "/update_cans", json!({"username": "x", "cans": -3}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_next_question() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    for uri in ["/next_question", "/next_question?file=junior", "/next_question?file=whatever"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "question": "apple",
                "option1": "蘋果",
                "option2": "香蕉",
                "option3": "橘子",
                "option4": "葡萄",
                "correct_answer": 1
            })
        );
    }

    let req = test::TestRequest::get().uri("/next_question?file=senior").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "題目檔不存在"}));
}

#[actix_web::test]
async fn test_earn_pages() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/earn").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(page.contains("<h2 id=\"question\">apple</h2>"));

    let req = test::TestRequest::get().uri("/earn?file=senior").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert_eq!(text, super::questions::MSG_TABLE_MISSING_TEXT);
}

#[actix_web::test]
async fn test_draw_gacha() {
    let dir = data_dir();

    let app = app!(state(&dir, 0.5));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/draw_gacha").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"character": "小貓", "image": "/img/cat.png", "rarity": "稀有"}));

    // The table has no super-rare rows, so a rare roll must fail.
    let app = app!(state(&dir, 0.01));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/draw_gacha").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "沒有符合稀有度 '超激稀有' 的角色"}));

    std::fs::remove_file(dir.join("轉蛋.csv")).unwrap();
    let app = app!(state(&dir, 0.5));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/draw_gacha").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "找不到轉蛋資料檔（轉蛋.csv）"}));
}

#[actix_web::test]
async fn test_pages_and_health() {
    let dir = data_dir();
    let app = app!(state(&dir, 0.5));

    for uri in ["/", "/gachapon"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["data_files"]["junior_questions"], true);
    assert_eq!(body["data_files"]["senior_questions"], false);
    assert_eq!(body["data_files"]["users"], false);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(text.contains("# TYPE http_requests_total counter"));
}
