//! Shop service models

pub mod cart;
pub mod favorite;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

// Re-export for convenience
pub use cart::{Cart, CartItem, CartItemDetail, SetCartItem};
pub use favorite::Favorite;
pub use order::{NewOrderStatus, Order, OrderStatus, SetOrderStatus};
pub use product::{
    AttachCharacteristic, Characteristic, NewCharacteristic, NewProduct, Product,
    ProductCharacteristic, ProductCharacteristicValue, UpdateProduct,
};
pub use role::{NewRole, Role};
pub use user::{LoginCredentials, NewUser, User, UserResponse};
