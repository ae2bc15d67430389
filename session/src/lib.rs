pub mod model;
pub mod store;

pub use model::TokenState;
pub use store::TokenStore;
