pub mod author;
pub mod post;
pub mod user;
