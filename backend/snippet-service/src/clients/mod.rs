pub mod identity;

pub use identity::{IdentityClient, IdentityUser, Session, UserMetadata};
