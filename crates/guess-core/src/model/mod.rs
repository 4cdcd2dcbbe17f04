pub mod catalog;
pub mod question;
pub mod version;
