pub mod extract;
pub mod post;
pub mod user;
