pub mod order_service;
pub mod promo_service;
pub mod summary;
