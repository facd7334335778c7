use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler, redirect_handler, root_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/healthz", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/links", post(create_link_handler).get(list_links_handler))
                    .route(
                        "/links/{code}",
                        get(get_link_handler).delete(delete_link_handler),
                    ),
            )
            // public redirect, matched after every static route
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .layer(Self::cors())
            .with_state(state)
    }

    fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}
