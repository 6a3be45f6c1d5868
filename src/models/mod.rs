pub mod reminder;
pub mod summary;
pub mod user;
