//! Domain types for the shop-registry server.

pub mod shop_two;

pub use shop_two::ShopTwo;
