use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::{info, warn};

use market_types::api::{
    CreateProductRequest, DataResponse, DeleteProductRequest, MessageResponse, ProductDetail,
    ProductSummary, UpdateProductRequest,
};

use crate::error::{Action, ApiError};
use crate::extract::JsonBody;
use crate::ownership::{authorize, find_by_id};
use crate::validation::{
    validate_create_fields, validate_delete_fields, validate_identifier, validate_update_fields,
};
use crate::{AppState, with_store};

const CREATED_MESSAGE: &str = "판매 상품을 등록하였습니다.";
const UPDATED_MESSAGE: &str = "상품 정보가 성공적으로 수정되었습니다.";
const DELETED_MESSAGE: &str = "상품을 삭제하였습니다.";

/// GET /products — every listing, newest first.
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let listings = with_store(&state, |store| store.find()).await?;
    let data: Vec<ProductSummary> = listings.into_iter().map(ProductSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_identifier(&product_id)?;
    let listing = find_by_id(&state, id).await?;
    Ok(Json(DataResponse {
        data: ProductDetail::from(listing),
    }))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = validate_create_fields(req)?;
    let listing = with_store(&state, move |store| store.create(new)).await?;

    info!("Product {} listed by {}", listing.id, listing.author);
    Ok(Json(MessageResponse::new(CREATED_MESSAGE)))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    JsonBody(req): JsonBody<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_identifier(&product_id)?;
    let update = validate_update_fields(req)?;

    let listing = find_by_id(&state, id).await?;
    authorize(state.ownership.as_ref(), &listing, &update.password, Action::Update)?;

    // Not atomic with the lookup above; a concurrent delete leaves nothing to match.
    let matched = with_store(&state, move |store| store.update_one(&id, update)).await?;
    if matched == 0 {
        warn!("Product {} vanished between lookup and update", id);
    }

    info!("Product {} updated", id);
    Ok(Json(MessageResponse::new(UPDATED_MESSAGE)))
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    JsonBody(req): JsonBody<DeleteProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_identifier(&product_id)?;
    let password = validate_delete_fields(req)?;

    let listing = find_by_id(&state, id).await?;
    authorize(state.ownership.as_ref(), &listing, &password, Action::Delete)?;

    let removed = with_store(&state, move |store| store.delete_one(&id)).await?;
    if removed == 0 {
        warn!("Product {} vanished between lookup and delete", id);
    }

    info!("Product {} deleted", id);
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
