pub mod auth;
pub mod feed;
pub mod health;
pub mod posts;
pub mod search;
pub mod users;

pub use auth::{error_page, github, login, signup};
pub use feed::get_feed;
pub use health::{health, liveness};
pub use posts::{get_post, like_post};
pub use search::{list_languages, search_posts};
pub use users::get_user;
