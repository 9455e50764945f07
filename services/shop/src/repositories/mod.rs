//! Repositories for database operations

pub mod cart;
pub mod favorite;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

pub use cart::CartRepository;
pub use favorite::FavoriteRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
