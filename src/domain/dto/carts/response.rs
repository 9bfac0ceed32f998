use serde::{Deserialize, Serialize};

use crate::domain::models::cart::{Cart, CartItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

impl CartResponse {
    /// 저장된 레코드를 응답으로 변환합니다.
    ///
    /// 빈 레코드(캐시 미스, 비운 장바구니)는 `user_id`가 비어 있으므로
    /// 요청 경로의 사용자 ID로 채웁니다.
    pub fn from_cart(user_id: &str, cart: Cart) -> Self {
        let Cart { user_id: stored_user_id, items } = cart;
        let user_id = if stored_user_id.is_empty() {
            user_id.to_string()
        } else {
            stored_user_id
        };

        Self {
            user_id,
            items: items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_takes_request_user_id() {
        let response = CartResponse::from_cart("u1", Cart::default());
        assert_eq!(response.user_id, "u1");
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_items_are_mapped_in_order() {
        let mut cart = Cart::with_item("u1", "P1", 2);
        cart.add_item("P2", 1);

        let response = CartResponse::from_cart("u1", cart);
        assert_eq!(
            response.items,
            vec![
                CartItemResponse { product_id: "P1".to_string(), quantity: 2 },
                CartItemResponse { product_id: "P2".to_string(), quantity: 1 },
            ]
        );
    }
}
