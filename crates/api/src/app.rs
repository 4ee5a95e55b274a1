use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use domain::services::MediaStorage;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    login_rate_limit, metrics_handler, metrics_middleware, security_headers_middleware,
    submission_rate_limit, trace_id, RateLimiterState,
};
use crate::routes::{
    auth, dashboard, events, gallery, guests, health, rsvp, users, weddings, wishes,
};
use crate::services::build_media_storage;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub media: Arc<dyn MediaStorage>,
    pub submission_limiter: Option<Arc<RateLimiterState>>,
    pub login_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    pub fn new(
        config: Config,
        pool: PgPool,
        media: Arc<dyn MediaStorage>,
    ) -> Result<Self, JwtError> {
        let jwt = Arc::new(config.jwt_config()?);

        // A limit of 0 disables the limiter
        let submission_limiter =
            RateLimiterState::new(config.security.submission_rate_limit_per_minute).map(Arc::new);
        let login_limiter =
            RateLimiterState::new(config.security.login_rate_limit_per_minute).map(Arc::new);

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt,
            media,
            submission_limiter,
            login_limiter,
        })
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let media = build_media_storage(&config.media);
    let state = AppState::new(config, pool, media)?;
    Ok(router(state))
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let submission_limit =
        middleware::from_fn_with_state(state.clone(), submission_rate_limit);
    let login_limit = middleware::from_fn_with_state(state.clone(), login_rate_limit);

    let auth_routes = Router::new()
        .route(
            "/api/v1/auth/login",
            post(auth::login).route_layer(login_limit),
        )
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me));

    // Platform administration
    let user_routes = Router::new()
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/v1/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/v1/users/:id/password", put(users::update_password))
        .route("/api/v1/users/:id/active", patch(users::set_user_active))
        .route("/api/v1/admins", post(users::create_admin));

    // Every route under /weddings names its segment `:wedding`; the slug
    // lookup reads it as a string, the rest as an id.
    let wedding_routes = Router::new()
        .route(
            "/api/v1/weddings",
            get(weddings::list_active_weddings).post(weddings::create_wedding),
        )
        .route("/api/v1/weddings/mine", get(weddings::my_wedding))
        .route("/api/v1/weddings/default", get(weddings::default_wedding))
        .route(
            "/api/v1/weddings/:wedding",
            get(weddings::get_wedding_data).delete(weddings::delete_wedding),
        )
        .route(
            "/api/v1/weddings/:wedding/theme",
            patch(weddings::update_theme),
        )
        .route(
            "/api/v1/weddings/:wedding/menu",
            get(weddings::get_menu_config).patch(weddings::update_menu_config),
        )
        .route(
            "/api/v1/weddings/:wedding/active",
            patch(weddings::set_wedding_active),
        )
        .route(
            "/api/v1/weddings/:wedding/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/v1/weddings/:wedding/gallery",
            get(gallery::list_gallery).post(gallery::create_photo),
        )
        .route(
            "/api/v1/weddings/:wedding/gallery/upload-signature",
            post(gallery::upload_signature),
        );

    let content_routes = Router::new()
        .route(
            "/api/v1/events/:id",
            patch(events::update_event).delete(events::delete_event),
        )
        .route(
            "/api/v1/gallery/:id",
            patch(gallery::update_photo).delete(gallery::delete_photo),
        );

    // Guest interactions. Only the public writes are rate limited.
    let guest_routes = Router::new()
        .route(
            "/api/v1/rsvp",
            post(rsvp::submit_rsvp).route_layer(submission_limit.clone()),
        )
        .route("/api/v1/guests", get(guests::list_guests))
        .route(
            "/api/v1/wishes",
            post(wishes::submit_wish)
                .route_layer(submission_limit)
                .merge(get(wishes::list_wishes)),
        )
        .route(
            "/api/v1/wishes/:id",
            delete(wishes::delete_wish),
        )
        .route("/api/v1/admin/dashboard", get(dashboard::get_dashboard));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(user_routes)
        .merge(wedding_routes)
        .merge(content_routes)
        .merge(guest_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
