pub mod contact_service;
pub mod mailer;
pub mod product_service;

pub use contact_service::*;
pub use mailer::*;
pub use product_service::*;
