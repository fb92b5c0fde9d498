use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use extcheck_contracts::routes::extensions::BATCH_SEGMENT;
use extcheck_contracts::{
    AddCustomExtensionQuery, ApiResponse, ExtensionListResponse,
    ExtensionResponse, FixedBatchRequest,
};

use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn add_custom_handler(
    State(state): State<AppState>,
    query: Result<Query<AddCustomExtensionQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<ExtensionResponse>>> {
    let Query(query) = query?;
    let record = state
        .extensions()
        .add_custom(query.custom_extension.as_deref())
        .await?;

    Ok(Json(
        ApiResponse::ok(ExtensionResponse::from(record))
            .with_message("Extension added."),
    ))
}

pub async fn delete_custom_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.extensions().deactivate_custom(&name).await?;
    Ok(Json(ApiResponse::message("Extension removed.")))
}

pub async fn save_fixed_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<ExtensionResponse>>> {
    save_fixed(&state, &name).await
}

pub async fn delete_fixed_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    delete_fixed(&state, &name).await
}

/// `POST` on the batch path: the static route wins over the item route, so
/// the fixed extension named like the segment is saved here.
pub async fn save_batch_named_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ExtensionResponse>>> {
    save_fixed(&state, BATCH_SEGMENT).await
}

/// `DELETE` counterpart of [`save_batch_named_handler`].
pub async fn delete_batch_named_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<()>>> {
    delete_fixed(&state, BATCH_SEGMENT).await
}

async fn save_fixed(
    state: &AppState,
    name: &str,
) -> AppResult<Json<ApiResponse<ExtensionResponse>>> {
    let record = state.extensions().save_fixed(name).await?;
    Ok(Json(
        ApiResponse::ok(ExtensionResponse::from(record))
            .with_message("Fixed extension saved."),
    ))
}

async fn delete_fixed(
    state: &AppState,
    name: &str,
) -> AppResult<Json<ApiResponse<()>>> {
    state.extensions().delete_fixed(name).await?;
    Ok(Json(ApiResponse::message("Fixed extension released.")))
}

pub async fn batch_fixed_handler(
    State(state): State<AppState>,
    payload: Result<Json<FixedBatchRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let Json(request) = payload?;
    state
        .extensions()
        .batch_update_fixed(request.checked, request.unchecked)
        .await?;
    Ok(Json(ApiResponse::message("Batch update completed.")))
}

pub async fn list_extensions_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ExtensionListResponse>>> {
    let listing = state.extensions().list_active().await?;
    Ok(Json(ApiResponse::ok(listing)))
}
