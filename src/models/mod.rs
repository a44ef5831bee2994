pub mod category;
pub mod content;
pub mod order;
pub mod outbox;
pub mod product;
pub mod promo_code;
pub mod review;
pub mod settings;
