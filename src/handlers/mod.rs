pub mod contact;
pub mod products;
