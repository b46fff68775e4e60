pub mod contact_repo;
pub mod product_repo;

pub use contact_repo::*;
pub use product_repo::*;
