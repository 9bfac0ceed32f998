use serde::{Deserialize, Serialize};
use validator::Validate;

/// 장바구니 상품 추가 요청
///
/// 저장소 자체는 수량 상한을 두지 않으며, HTTP 계층에서는 양수만 허용합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, max = 128, message = "상품 ID는 1-128자 사이여야 합니다"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "수량은 1 이상이어야 합니다"))]
    pub quantity: i32,
}
