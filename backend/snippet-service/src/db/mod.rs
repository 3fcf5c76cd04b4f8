use sqlx::migrate::Migrator;

pub mod post_repo;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
