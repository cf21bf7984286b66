use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use serde_json::{json, Value};

use reach_server::database::ReachDatabase;
use reach_server::seed;

#[macro_use]
mod common;

#[actix_web::test]
async fn register_then_login() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "ada lovelace",
            "email": "Ada@Analytical.io",
            "password": "engine",
            "company": "Analytical",
        }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: Value = read_body_json(resp).await;
    assert_eq!(user["avatar"], "AL");
    assert_eq!(user["role"], "admin");
    assert!(user.get("password").is_none());

    let req = TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": "Other", "email": "ada@analytical.io", "password": "x" }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001004");

    let req = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ADA@analytical.io", "password": "engine" }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = read_body_json(resp).await;
    assert_eq!(user["company"], "Analytical");
    assert!(user.get("password").is_none());

    let req = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@analytical.io", "password": "Engine" }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn seeded_demo_users_can_log_in() {
    let db = ReachDatabase::in_memory();
    seed::seed(&db).await.unwrap();
    let app = init_app!(db);

    let req = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "manager@glimmora.com", "password": "manager123" }))
        .to_request();
    let user: Value = read_body_json(call_service(&app, req).await).await;

    assert_eq!(user["name"], "Sarah Chen");
    assert_eq!(user["role"], "campaign_manager");
}

#[actix_web::test]
async fn team_invites_are_per_company() {
    let db = ReachDatabase::in_memory();
    seed::seed(&db).await.unwrap();
    let app = init_app!(db);

    let invite = |caller: &str, email: &str| {
        TestRequest::post()
            .uri("/api/team")
            .insert_header(("x-user-email", caller))
            .set_json(json!({ "name": "New Hire", "email": email }))
            .to_request()
    };

    let resp = call_service(&app, invite("admin@glimmora.com", "hire@acme.io")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let member: Value = read_body_json(resp).await;
    assert!(member["id"].as_str().unwrap().starts_with("tm-"));
    assert_eq!(member["role"], "viewer");
    assert_eq!(member["status"], "invited");
    assert_eq!(member["company"], "Glimmora Inc");

    let resp = call_service(&app, invite("manager@glimmora.com", "HIRE@acme.io")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = call_service(&app, invite("stranger@acme.io", "someone@acme.io")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let team = |caller: &str| {
        TestRequest::get()
            .uri("/api/team")
            .insert_header(("x-user-email", caller))
            .to_request()
    };
    let glimmora: Vec<Value> =
        read_body_json(call_service(&app, team("analyst@glimmora.com")).await).await;
    let demo_corp: Vec<Value> =
        read_body_json(call_service(&app, team("demo@glimmora.com")).await).await;
    assert_eq!(glimmora.len(), 1);
    assert!(demo_corp.is_empty());

    let uri = format!("/api/team/{}", member["id"].as_str().unwrap());
    let resp = call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
