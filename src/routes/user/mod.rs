mod handler;
mod model;

pub use handler::{login, signup};
pub use model::{LoginResponse, UserInfo, UserLogin, UserWithToken};
