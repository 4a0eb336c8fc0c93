use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use market_types::api::MessageResponse;

/// Mutation a failed ownership check was guarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Delete,
}

impl Action {
    fn denial_message(self) -> &'static str {
        match self {
            Action::Update => "상품을 수정할 권한이 존재하지 않습니다.",
            Action::Delete => "상품을 삭제할 권한이 존재하지 않습니다.",
        }
    }
}

/// Every failure a product handler can answer with. The display text is the
/// client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("데이터 형식이 올바르지 않습니다.")]
    InvalidInput,
    #[error("상품 조회에 실패하였습니다.")]
    NotFound,
    #[error("{}", .0.denial_message())]
    Unauthorized(Action),
    #[error("서버 내부 오류가 발생하였습니다.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            error!("Internal error: {:#}", cause);
        }
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
