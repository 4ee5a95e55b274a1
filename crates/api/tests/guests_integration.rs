//! Integration tests for RSVPs, wishes, guest listings and the dashboard.

mod common;

use axum::http::StatusCode;
use common::{parse_id, TestContext};
use domain::models::AdminRole;
use serde_json::{json, Value};
use uuid::Uuid;

fn rsvp(wedding_id: Option<Uuid>, name: &str, attendance: &str, guest_count: i32) -> Value {
    json!({
        "weddingId": wedding_id,
        "name": name,
        "attendance": attendance,
        "guestCount": guest_count,
        "message": "  Selamat!  "
    })
}

#[tokio::test]
async fn test_rsvp_normalizes_party_size() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;

    let (status, body) = ctx
        .post(
            "/api/v1/rsvp",
            None,
            rsvp(Some(owner.wedding_id), "Dewi", "tidak-hadir", 3),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["guestCount"].is_null());
    assert_eq!(body["message"], "Selamat!");

    let (status, body) = ctx
        .post("/api/v1/rsvp", None, rsvp(Some(owner.wedding_id), "Eko", "hadir", 21))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "guestCount");
}

#[tokio::test]
async fn test_rsvp_requires_active_wedding() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;

    let (status, _) = ctx
        .post("/api/v1/rsvp", None, rsvp(Some(Uuid::new_v4()), "Dewi", "hadir", 2))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.patch(
        &format!("/api/v1/weddings/{}/active", owner.wedding_id),
        Some(&admin),
        json!({ "isActive": false }),
    )
    .await;

    let (status, _) = ctx
        .post("/api/v1/rsvp", None, rsvp(Some(owner.wedding_id), "Dewi", "hadir", 2))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .post(
            "/api/v1/wishes",
            None,
            json!({ "weddingId": owner.wedding_id, "name": "Dewi", "message": "Barakallah" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_list_is_tenant_scoped() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let other = ctx.create_owner(&admin).await;

    for (name, attendance) in [("Fajar", "hadir"), ("Gita", "belum-pasti")] {
        let (status, _) = ctx
            .post("/api/v1/rsvp", None, rsvp(Some(owner.wedding_id), name, attendance, 2))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    ctx.post("/api/v1/rsvp", None, rsvp(Some(other.wedding_id), "Hana", "hadir", 1))
        .await;

    let (status, body) = ctx
        .get(
            &format!("/api/v1/guests?wedding_id={}", owner.wedding_id),
            Some(&owner.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gita", "Fajar"]);

    let (_, body) = ctx
        .get(
            &format!(
                "/api/v1/guests?wedding_id={}&attendance=hadir&search=faj",
                owner.wedding_id
            ),
            Some(&owner.token),
        )
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .get(
            &format!("/api/v1/guests?wedding_id={}", other.wedding_id),
            Some(&owner.token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx.get("/api/v1/guests", Some(&owner.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx.get("/api/v1/guests", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .get(&format!("/api/v1/guests?wedding_id={}", owner.wedding_id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_counts_one_wedding() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let uri = format!("/api/v1/admin/dashboard?wedding_id={}", owner.wedding_id);

    let (status, body) = ctx.get(&uri, Some(&owner.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["attendingPercent"], 0.0);

    for (name, attendance, count) in [
        ("A", "hadir", 3),
        ("B", "hadir", 2),
        ("C", "tidak-hadir", 4),
        ("D", "belum-pasti", 1),
    ] {
        ctx.post("/api/v1/rsvp", None, rsvp(Some(owner.wedding_id), name, attendance, count))
            .await;
    }
    ctx.post(
        "/api/v1/wishes",
        None,
        json!({ "weddingId": owner.wedding_id, "name": "A", "message": "Bahagia selalu" }),
    )
    .await;

    let (status, body) = ctx.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["attending"], 2);
    assert_eq!(body["notAttending"], 1);
    assert_eq!(body["uncertain"], 1);
    assert_eq!(body["expectedAttendees"], 5);
    assert_eq!(body["totalWishes"], 1);
    assert_eq!(body["attendingPercent"], 50.0);
    assert_eq!(body["uncertainPercent"], 25.0);

    let other = ctx.create_owner(&admin).await;
    let (status, _) = ctx.get(&uri, Some(&other.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wishes_are_public_and_moderated_by_owner() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let other = ctx.create_owner(&admin).await;

    let mut ids = Vec::new();
    for message in ["Semoga sakinah", "Selamat menempuh hidup baru"] {
        let (status, body) = ctx
            .post(
                "/api/v1/wishes",
                None,
                json!({ "weddingId": owner.wedding_id, "name": " Indah ", "message": message }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["name"], "Indah");
        ids.push(parse_id(&body["id"]));
    }

    let listing = format!("/api/v1/wishes?wedding_id={}", owner.wedding_id);
    let (status, body) = ctx.get(&listing, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["message"], "Selamat menempuh hidup baru");

    let (_, body) = ctx
        .get(&format!("{}&search=SAKINAH", listing), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .delete(&format!("/api/v1/wishes/{}", ids[0]), Some(&other.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .delete(&format!("/api/v1/wishes/{}", ids[0]), Some(&owner.token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = ctx.get(&listing, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_global_wishes_are_admin_moderated() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let message = format!("Global wish {}", Uuid::new_v4());

    let (status, body) = ctx
        .post("/api/v1/wishes", None, json!({ "name": "Joko", "message": message }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["weddingId"].is_null());
    let wish_id = parse_id(&body["id"]);

    let (_, body) = ctx.get("/api/v1/wishes", None).await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["message"] == message.as_str()));

    let (status, _) = ctx
        .delete(&format!("/api/v1/wishes/{}", wish_id), Some(&owner.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .delete(&format!("/api/v1/wishes/{}", wish_id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_submissions_are_rate_limited_per_client() {
    let Some(ctx) = TestContext::with_media(
        Default::default(),
        &[("security.submission_rate_limit_per_minute", "2")],
    )
    .await
    else {
        return;
    };
    use tower::ServiceExt;

    let submit = |client: &'static str| {
        let mut request = common::json_request(
            axum::http::Method::POST,
            "/api/v1/wishes",
            None,
            Some(json!({ "name": "Kiki", "message": "Selamat" })),
        );
        request
            .headers_mut()
            .insert("x-forwarded-for", client.parse().unwrap());
        ctx.app.clone().oneshot(request)
    };

    assert_eq!(submit("198.51.100.1").await.unwrap().status(), StatusCode::CREATED);
    assert_eq!(submit("198.51.100.1").await.unwrap().status(), StatusCode::CREATED);

    let limited = submit("198.51.100.1").await.unwrap();
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key("retry-after"));

    assert_eq!(submit("198.51.100.2").await.unwrap().status(), StatusCode::CREATED);

    // Reads are never limited
    let (status, _) = ctx.get("/api/v1/wishes", None).await;
    assert_eq!(status, StatusCode::OK);
}
