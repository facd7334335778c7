use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, DeleteLinkResponse, LinkResponse, LinkSummaryResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinylink_core::RegistryError;
use tracing::debug;

pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    let Json(request) = payload?;
    let link = state.registry().create_link(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::new(link, state.base_url())),
    ))
}

pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkSummaryResponse>>> {
    let links = state.registry().list_links().await?;

    Ok(Json(
        links
            .into_iter()
            .map(|overview| LinkSummaryResponse::new(overview, state.base_url()))
            .collect(),
    ))
}

pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>> {
    let link = state.registry().get_stats(&code).await?;
    Ok(Json(LinkResponse::new(link, state.base_url())))
}

pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>> {
    state.registry().delete_link(&code).await?;
    Ok(Json(DeleteLinkResponse {
        message: "Link deleted",
    }))
}

/// Public redirect: `302 Found` to the long URL.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.registry().resolve(&code).await {
        Ok(long_url) => {
            debug!(code = %code, "redirecting");
            (StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response()
        }
        Err(RegistryError::NotFound(_)) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
