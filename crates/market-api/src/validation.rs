//! Presence and format checks run before any store access.

use market_db::models::{ListingUpdate, NewListing};
use market_types::api::{
    CreateProductRequest, DeleteProductRequest, NumericInput, UpdateProductRequest,
};
use market_types::{ObjectId, Password};

use crate::error::ApiError;

pub fn validate_identifier(raw: &str) -> Result<ObjectId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidInput)
}

pub fn validate_create_fields(req: CreateProductRequest) -> Result<NewListing, ApiError> {
    Ok(NewListing {
        title: required_text(req.title)?,
        content: required_text(req.content)?,
        author: required_text(req.author)?,
        password: required_password(req.password)?,
    })
}

pub fn validate_update_fields(req: UpdateProductRequest) -> Result<ListingUpdate, ApiError> {
    Ok(ListingUpdate {
        title: required_text(req.title)?,
        content: required_text(req.content)?,
        password: required_password(req.password)?,
        status: required_text(req.status)?,
    })
}

pub fn validate_delete_fields(req: DeleteProductRequest) -> Result<Password, ApiError> {
    required_password(req.password)
}

fn required_text(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ApiError::InvalidInput),
    }
}

fn required_password(value: Option<NumericInput>) -> Result<Password, ApiError> {
    match value {
        Some(input) if !input.is_blank() => input.to_password().ok_or(ApiError::InvalidInput),
        _ => Err(ApiError::InvalidInput),
    }
}
