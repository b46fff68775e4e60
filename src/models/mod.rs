pub mod contact_message;
pub mod product;

pub use contact_message::*;
pub use product::*;
