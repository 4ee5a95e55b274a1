//! Integration tests for the tenant registry: resolution, setup, theme,
//! menu and lifecycle.

mod common;

use axum::http::StatusCode;
use common::{parse_id, TestContext, TEST_PASSWORD};
use domain::models::AdminRole;
use serde_json::json;
use uuid::Uuid;

/// Creates a user without a wedding and logs in as them.
async fn bare_user(ctx: &TestContext, admin: &str) -> (Uuid, String) {
    let email = format!("bare_{}@example.com", Uuid::new_v4().simple());
    let (status, body) = ctx
        .post(
            "/api/v1/users",
            Some(admin),
            json!({ "email": email, "password": TEST_PASSWORD, "name": "Citra" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["wedding"].is_null());
    let token = ctx.login(&email, TEST_PASSWORD).await;
    (parse_id(&body["user"]["id"]), token)
}

fn unique_slug(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

#[tokio::test]
async fn test_slug_lookup_is_normalized() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;

    let (status, body) = ctx
        .get(
            &format!("/api/v1/weddings/{}", owner.slug.to_uppercase()),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wedding"]["slug"], owner.slug);
    assert_eq!(
        body["navigation"],
        json!(["home", "details", "rsvp", "gallery", "wishes"])
    );
}

#[tokio::test]
async fn test_unknown_and_inactive_slugs_are_not_found() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;

    let (status, _) = ctx.get("/api/v1/weddings/no-such-wedding", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx
        .patch(
            &format!("/api/v1/weddings/{}/active", owner.wedding_id),
            Some(&admin),
            json!({ "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (status, _) = ctx
        .get(&format!("/api/v1/weddings/{}", owner.slug), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still manages a deactivated wedding
    let (status, _) = ctx
        .get(
            &format!("/api/v1/weddings/{}/menu", owner.wedding_id),
            Some(&owner.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ctx
        .get(&format!("/api/v1/weddings/{}/menu", owner.wedding_id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_sets_up_own_wedding_once() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let (user_id, token) = bare_user(&ctx, &admin).await;
    let slug = unique_slug("citra-dodi");

    let (status, body) = ctx.get("/api/v1/weddings/mine", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);

    let request = json!({
        "userId": user_id,
        "slug": format!("  {}  ", slug.to_uppercase()),
        "coupleName": "Citra & Dodi",
        "weddingDate": "2026-03-14"
    });
    let (status, body) = ctx.post("/api/v1/weddings", Some(&token), request.clone()).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["slug"], slug);
    assert_eq!(body["theme"], "rose");

    // The tenant is resolved per request, so the same token sees it
    let (status, body) = ctx.get("/api/v1/weddings/mine", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], slug);

    let mut second = request;
    second["slug"] = json!(unique_slug("citra-again"));
    let (status, body) = ctx.post("/api/v1/weddings", Some(&token), second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already owns a wedding");
}

#[tokio::test]
async fn test_user_cannot_create_wedding_for_someone_else() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let (_, token) = bare_user(&ctx, &admin).await;
    let (other_id, _) = bare_user(&ctx, &admin).await;

    let (status, _) = ctx
        .post(
            "/api/v1/weddings",
            Some(&token),
            json!({
                "userId": other_id,
                "slug": unique_slug("not-mine"),
                "coupleName": "X & Y",
                "weddingDate": "2026-03-14"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wedding_created_with_custom_styling() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let (user_id, _) = bare_user(&ctx, &admin).await;

    let (status, body) = ctx
        .post(
            "/api/v1/weddings",
            Some(&admin),
            json!({
                "userId": user_id,
                "slug": unique_slug("styled"),
                "coupleName": "Eka & Fajar",
                "weddingDate": "2026-05-02",
                "primaryColor": "#1d4ed8",
                "fontFamily": "Cormorant Garamond"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["theme"], "rose");
    assert_eq!(body["primaryColor"], "#1d4ed8");
    assert_eq!(body["secondaryColor"], "#ec4899");
    assert_eq!(body["fontFamily"], "Cormorant Garamond");
}

#[tokio::test]
async fn test_theme_update_is_tenant_scoped() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let other = ctx.create_owner(&admin).await;
    let theme = json!({
        "theme": "sage",
        "primaryColor": "#84a98c",
        "secondaryColor": "#cad2c5",
        "fontFamily": "Playfair Display"
    });

    let (status, body) = ctx
        .patch(
            &format!("/api/v1/weddings/{}/theme", owner.wedding_id),
            Some(&owner.token),
            theme.clone(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "sage");
    assert_eq!(body["fontFamily"], "Playfair Display");

    let (status, body) = ctx
        .patch(
            &format!("/api/v1/weddings/{}/theme", other.wedding_id),
            Some(&owner.token),
            theme.clone(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You do not have access to this resource");

    // Same answer whether or not the wedding exists
    let (status, _) = ctx
        .patch(
            &format!("/api/v1/weddings/{}/theme", Uuid::new_v4()),
            Some(&owner.token),
            theme.clone(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .patch(
            &format!("/api/v1/weddings/{}/theme", owner.wedding_id),
            None,
            theme,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_order_must_be_a_permutation() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let uri = format!("/api/v1/weddings/{}/menu", owner.wedding_id);

    let (status, body) = ctx
        .patch(
            &uri,
            Some(&owner.token),
            json!({ "customOrder": "home,details,rsvp,gallery" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "customOrder");

    let (status, body) = ctx
        .patch(
            &uri,
            Some(&owner.token),
            json!({ "customOrder": " wishes , home,gallery,details,rsvp", "showGallery": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["customOrder"], "wishes,home,gallery,details,rsvp");
    assert_eq!(body["showGallery"], false);
    assert_eq!(body["showWishes"], true);

    let (status, body) = ctx
        .get(&format!("/api/v1/weddings/{}", owner.slug), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"], json!(["wishes", "home", "details", "rsvp"]));
}

#[tokio::test]
async fn test_default_wedding_is_active() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    ctx.create_owner(&admin).await;

    let (status, body) = ctx.get("/api/v1/weddings/default", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], true);

    let (status, body) = ctx.get("/api/v1/weddings", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|w| w["isActive"] == true));
}

#[tokio::test]
async fn test_admin_deletes_wedding_with_content() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.admin_token(AdminRole::Admin).await;
    let owner = ctx.create_owner(&admin).await;
    let marker = Uuid::new_v4().simple().to_string();

    let (status, body) = ctx
        .post(
            &format!("/api/v1/weddings/{}/gallery", owner.wedding_id),
            Some(&owner.token),
            json!({ "imageUrl": "https://img.example.com/a.jpg", "caption": "Akad" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    for wedding_id in [Some(owner.wedding_id), None] {
        let (status, body) = ctx
            .post(
                "/api/v1/rsvp",
                None,
                json!({
                    "weddingId": wedding_id,
                    "name": marker,
                    "attendance": "hadir",
                    "guestCount": 2
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);

        let (status, body) = ctx
            .post(
                "/api/v1/wishes",
                None,
                json!({ "weddingId": wedding_id, "name": marker, "message": "Selamat menempuh hidup baru" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    let (status, _) = ctx
        .delete(&format!("/api/v1/weddings/{}", owner.wedding_id), Some(&owner.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .delete(&format!("/api/v1/weddings/{}", owner.wedding_id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for table in ["menu_configs", "events", "gallery_photos", "guests", "wishes"] {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE wedding_id = $1", table))
                .bind(owner.wedding_id)
                .fetch_one(&ctx.pool)
                .await
                .unwrap();
        assert_eq!(count, 0, "{} rows survived the wedding", table);
    }

    // Rows without a tenant are untouched
    for table in ["guests", "wishes"] {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE wedding_id IS NULL AND name = $1",
            table
        ))
        .bind(&marker)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
        assert_eq!(count, 1, "global {} row was removed", table);
    }

    let owner_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(owner.user_id)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(owner_rows, 1);

    let (status, _) = ctx
        .delete(&format!("/api/v1/weddings/{}", owner.wedding_id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
