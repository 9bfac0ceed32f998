//! # 장바구니 도메인 모델
//!
//! 캐시에 저장되는 장바구니 레코드의 protobuf 메시지 정의와 병합 규칙입니다.
//!
//! ## 저장 형식
//!
//! ```text
//! message CartItem {
//!   string product_id = 1;
//!   int32  quantity   = 2;
//! }
//!
//! message Cart {
//!   string            user_id = 1;
//!   repeated CartItem items   = 2;
//! }
//! ```
//!
//! 필드 번호는 기존 레코드와의 호환을 위해 고정이며, 새 필드는 뒤에만 추가합니다.

use prost::Message;

use crate::caching::CacheError;

#[derive(Clone, PartialEq, Message)]
pub struct CartItem {
    #[prost(string, tag = "1")]
    pub product_id: String,
    #[prost(int32, tag = "2")]
    pub quantity: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct Cart {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(message, repeated, tag = "2")]
    pub items: Vec<CartItem>,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

impl Cart {
    /// 상품 하나만 담긴 새 장바구니를 만듭니다.
    pub fn with_item(user_id: impl Into<String>, product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            user_id: user_id.into(),
            items: vec![CartItem::new(product_id, quantity)],
        }
    }

    /// 상품을 추가합니다.
    ///
    /// 같은 `product_id`가 이미 있으면 수량을 더하고(상한에서 포화),
    /// 없으면 끝에 새 항목을 붙입니다.
    pub fn add_item(&mut self, product_id: &str, quantity: i32) {
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::new(product_id, quantity)),
        }
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<i32> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CacheError> {
        Ok(Cart::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_merges_same_product() {
        let mut cart = Cart::with_item("u1", "P1", 2);
        cart.add_item("P2", 1);
        cart.add_item("P1", 3);

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.quantity_of("P1"), Some(5));
        assert_eq!(cart.quantity_of("P2"), Some(1));
        // 삽입 순서 유지
        assert_eq!(cart.items[0].product_id, "P1");
        assert_eq!(cart.items[1].product_id, "P2");
    }

    #[test]
    fn test_add_item_saturates_instead_of_overflowing() {
        let mut cart = Cart::with_item("u1", "P1", i32::MAX - 1);
        cart.add_item("P1", 10);

        assert_eq!(cart.quantity_of("P1"), Some(i32::MAX));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut cart = Cart::with_item("user-42", "OLJCESPC7Z", 1);
        for i in 0..20 {
            cart.add_item(&format!("SKU-{}", i), i + 1);
        }

        let decoded = Cart::from_bytes(&cart.to_bytes()).expect("decode");

        assert_eq!(decoded.user_id, "user-42");
        assert_eq!(decoded.items.len(), 21);
        for item in &cart.items {
            assert_eq!(decoded.quantity_of(&item.product_id), Some(item.quantity));
        }
    }

    #[test]
    fn test_empty_cart_encodes_to_empty_record() {
        let bytes = Cart::default().to_bytes();
        assert!(bytes.is_empty());

        let decoded = Cart::from_bytes(&bytes).expect("decode");
        assert!(decoded.is_empty());
        assert!(decoded.user_id.is_empty());
    }

    #[test]
    fn test_wire_format_matches_field_numbers() {
        let cart = Cart::with_item("u", "p", 3);
        // 0x0a = field 1 (len), 0x12 = field 2 (len); item: 0x0a "p", 0x10 = field 2 varint
        assert_eq!(
            cart.to_bytes(),
            vec![0x0a, 0x01, b'u', 0x12, 0x05, 0x0a, 0x01, b'p', 0x10, 0x03]
        );
    }

    #[test]
    fn test_garbage_record_fails_to_decode() {
        let result = Cart::from_bytes(&[0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }
}
