use axum::Router;
use axum::extract::MatchedPath;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http as api;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::auth::signup,
            api::auth::signin,
            api::users::me,
            api::users::edit_user,
            api::bookmarks::list_bookmarks,
            api::bookmarks::get_bookmark,
            api::bookmarks::create_bookmark,
            api::bookmarks::edit_bookmark,
            api::bookmarks::delete_bookmark,
            api::health::health,
        ),
        components(schemas(
            api::auth::AuthRequest,
            api::auth::AuthResponse,
            api::users::UserResponse,
            api::users::EditUserRequest,
            api::bookmarks::Bookmark,
            api::bookmarks::CreateBookmarkRequest,
            api::bookmarks::EditBookmarkRequest,
            api::error::ErrorBody,
            api::health::HealthResp,
        )),
        modifiers(&BearerSecurity),
        security(("bearer" = [])),
        tags(
            (name = "Auth", description = "Signup and signin"),
            (name = "Users", description = "Current user profile"),
            (name = "Bookmarks", description = "Per-user bookmarks"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        // Unparseable FRONTEND_URL falls through to mirroring, same as development
        _ if !cfg.is_production => base.allow_origin(AllowOrigin::mirror_request()),
        _ => base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        ))),
    }
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .merge(api::health::routes(ctx.clone()))
        .nest("/auth", api::auth::routes(ctx.clone()))
        .nest("/users", api::users::routes(ctx.clone()))
        .merge(api::bookmarks::routes(ctx.clone()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&ctx.cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
