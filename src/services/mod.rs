pub mod link_service;

pub use link_service::{CreatedLink, LinkService, MAX_KEY_ATTEMPTS};
