use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use serde_json::{json, Value};

use reach_server::database::ReachDatabase;

#[macro_use]
mod common;

const OWNER: &str = "owner@acme.io";

#[actix_web::test]
async fn create_campaign_sets_up_placements() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::post()
        .uri("/api/campaigns")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({
            "name": "Spring Launch",
            "objective": "conversion",
            "platforms": ["google", "meta"],
            "budget": "1500",
        }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let campaign: Value = read_body_json(resp).await;

    assert_eq!(campaign["id"], "camp-001");
    assert_eq!(campaign["userEmail"], OWNER);
    assert_eq!(campaign["status"], "active");
    assert_eq!(campaign["budget"]["total"], 1500.0);
    assert_eq!(campaign["budget"]["daily"], 1500.0);
    assert_eq!(campaign["budget"]["type"], "daily");
    assert_eq!(campaign["targeting"]["ageRange"], json!([18, 55]));

    let req = TestRequest::get()
        .uri("/api/placements?campaignId=camp-001")
        .insert_header(("x-user-email", OWNER))
        .to_request();
    let placements: Vec<Value> = read_body_json(call_service(&app, req).await).await;

    let summary: Vec<(&str, &str, &str)> = placements
        .iter()
        .map(|p| {
            (
                p["id"].as_str().unwrap(),
                p["platform"].as_str().unwrap(),
                p["type"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("pl-001", "Google", "Search"),
            ("pl-002", "Google", "Display"),
            ("pl-003", "Meta", "Feed"),
            ("pl-004", "Meta", "Stories"),
        ]
    );
    assert!(placements
        .iter()
        .all(|p| p["campaignName"] == "Spring Launch" && p["creativeName"].is_null()));
}

#[actix_web::test]
async fn campaign_detail_includes_recommendations() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::post()
        .uri("/api/campaigns")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({ "name": "Fresh" }))
        .to_request();
    call_service(&app, req).await;

    let req = TestRequest::get()
        .uri("/api/campaigns/camp-001")
        .insert_header(("x-user-email", OWNER))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = read_body_json(resp).await;

    assert_eq!(detail["name"], "Fresh");
    let titles: Vec<&str> = detail["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Improve Click-Through Rate",
            "Improve Return on Ad Spend",
            "A/B Test Ad Variations",
        ]
    );
}

#[actix_web::test]
async fn campaigns_are_scoped_to_the_caller() {
    let app = init_app!(ReachDatabase::in_memory());

    for caller in [OWNER, "admin@glimmora.com", "manager@glimmora.com"] {
        let req = TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("x-user-email", caller))
            .set_json(json!({ "name": caller }))
            .to_request();
        call_service(&app, req).await;
    }

    let list = |caller: Option<&str>| {
        let mut req = TestRequest::get().uri("/api/campaigns");
        if let Some(caller) = caller {
            req = req.insert_header(("x-user-email", caller));
        }
        req.to_request()
    };

    let own: Vec<Value> = read_body_json(call_service(&app, list(Some(OWNER))).await).await;
    let demo: Vec<Value> =
        read_body_json(call_service(&app, list(Some("demo@glimmora.com"))).await).await;
    let everyone: Vec<Value> = read_body_json(call_service(&app, list(None)).await).await;

    assert_eq!(own.len(), 1);
    assert_eq!(demo.len(), 2);
    assert_eq!(everyone.len(), 3);

    let req = TestRequest::get()
        .uri("/api/campaigns/camp-002")
        .insert_header(("x-user-email", OWNER))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4041001");
}

#[actix_web::test]
async fn update_and_status_change() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::post()
        .uri("/api/campaigns")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({ "name": "Before" }))
        .to_request();
    call_service(&app, req).await;

    let req = TestRequest::put()
        .uri("/api/campaigns/camp-001")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({
            "name": "After",
            "budgetAmount": 9000,
            "budgetType": "lifetime",
            "targeting": { "gender": "female" },
        }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = read_body_json(resp).await;
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["budget"]["total"], 9000.0);
    assert_eq!(updated["budget"]["daily"], 300.0);
    assert_eq!(updated["targeting"]["gender"], "female");
    assert_eq!(updated["targeting"]["ageRange"], json!([18, 55]));

    let req = TestRequest::patch()
        .uri("/api/campaigns/camp-001/status")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({ "status": "paused" }))
        .to_request();
    let paused: Value = read_body_json(call_service(&app, req).await).await;
    assert_eq!(paused["status"], "paused");

    let req = TestRequest::patch()
        .uri("/api/campaigns/camp-001/status")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001003");
}

#[actix_web::test]
async fn delete_campaign_then_missing() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::post()
        .uri("/api/campaigns")
        .insert_header(("x-user-email", OWNER))
        .set_json(json!({}))
        .to_request();
    call_service(&app, req).await;

    let delete = || {
        TestRequest::delete()
            .uri("/api/campaigns/camp-001")
            .insert_header(("x-user-email", OWNER))
            .to_request()
    };

    let resp = call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_requests_use_error_envelope() {
    let app = init_app!(ReachDatabase::in_memory());

    let req = TestRequest::get().uri("/api/campaigns/banana").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001001");

    let req = TestRequest::post()
        .uri("/api/campaigns")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001000");

    let req = TestRequest::get().uri("/api/nowhere").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4041000");
}
