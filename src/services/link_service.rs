//! Link service
//!
//! Business logic between the HTTP handlers and the expiring store:
//! target validation, short code allocation and lookup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{Result, TinylinkError};
use crate::store::ExpiringStore;
use crate::utils::{CodeGenerator, UuidCodeGenerator, validate_url};

/// How many fresh codes to try before giving up on a create
pub const MAX_KEY_ATTEMPTS: usize = 5;

/// A freshly stored link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub code: String,
    pub target: String,
}

pub struct LinkService {
    store: Arc<dyn ExpiringStore>,
    generator: Arc<dyn CodeGenerator>,
}

impl LinkService {
    pub fn new(store: Arc<dyn ExpiringStore>) -> Self {
        Self::with_generator(store, Arc::new(UuidCodeGenerator))
    }

    pub fn with_generator(
        store: Arc<dyn ExpiringStore>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self { store, generator }
    }

    /// Validate `target`, allocate a short code and store the mapping.
    ///
    /// Collisions with a live code are never overwritten: a new code is drawn,
    /// up to [`MAX_KEY_ATTEMPTS`] times.
    pub async fn create(&self, target: &str) -> Result<CreatedLink> {
        let url = validate_url(target).map_err(|e| TinylinkError::validation(e.to_string()))?;

        // `Location` only carries visible ASCII, non-ASCII targets are kept in
        // their normalized (punycode / percent-encoded) form
        let trimmed = target.trim();
        let target = if trimmed.is_ascii() {
            trimmed.to_string()
        } else {
            String::from(url)
        };

        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let code = self.generator.new_key();

            if self.store.insert_if_absent(&code, target.clone()).await? {
                info!("Created short link {} -> {}", code, target);
                return Ok(CreatedLink { code, target });
            }

            warn!(
                "Short code collision on {} (attempt {}/{}), regenerating",
                code, attempt, MAX_KEY_ATTEMPTS
            );
        }

        Err(TinylinkError::key_collision(format!(
            "no free short code after {} attempts",
            MAX_KEY_ATTEMPTS
        )))
    }

    /// Resolve a code to its target; expired and unknown codes are `NotFound`
    pub async fn resolve(&self, code: &str) -> Result<String> {
        match self.store.get(code).await {
            Some(target) => Ok(target),
            None => {
                debug!("No live link for code: {}", code);
                Err(TinylinkError::not_found(format!(
                    "Bad request: no url found for this shortner {}",
                    code
                )))
            }
        }
    }
}
