//! # Cart HTTP Handlers
//!
//! 장바구니 저장소 연산을 HTTP 엔드포인트로 노출합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/carts/{user_id}/items` | 상품 추가 | 204 No Content |
//! | `GET` | `/api/v1/carts/{user_id}` | 장바구니 조회 | 200 OK |
//! | `DELETE` | `/api/v1/carts/{user_id}` | 장바구니 비우기 | 204 No Content |
//!
//! 저장소 장애는 `503 Service Unavailable`로 응답하며, 호출자가 재시도할 수 있습니다.

use actix_web::{HttpResponse, delete, get, post, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::carts::{AddItemRequest, CartResponse};
use crate::repositories::carts::CartStore;

#[post("/{user_id}/items")]
pub async fn add_item(
    store: web::Data<CartStore>,
    user_id: web::Path<String>,
    payload: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    store.add_item(&user_id, &request.product_id, request.quantity).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/{user_id}")]
pub async fn get_cart(
    store: web::Data<CartStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = store.get_cart(&user_id).await?;

    Ok(HttpResponse::Ok().json(CartResponse::from_cart(&user_id, cart)))
}

#[delete("/{user_id}")]
pub async fn empty_cart(
    store: web::Data<CartStore>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    store.empty_cart(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
