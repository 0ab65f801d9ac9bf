mod handler;
mod model;

pub use handler::{add_post, get_posts, remove_post};
pub use model::{CreatePostRequest, DeletePostResponse};
