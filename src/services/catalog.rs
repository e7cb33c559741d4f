use std::sync::Arc;

use crate::models::BreedRecord;
use crate::services::cache::{CacheError, CacheKey, CacheManager};
use crate::services::store::{BreedStore, StoreError};

/// Cached view of the full breed list
///
/// The recommendations endpoint scores every breed on each request, so the
/// full list is read through the cache. Admin writes call [`invalidate`].
///
/// [`invalidate`]: BreedCatalog::invalidate
#[derive(Clone)]
pub struct BreedCatalog {
    store: Arc<dyn BreedStore>,
    cache: Arc<CacheManager>,
}

impl BreedCatalog {
    pub fn new(store: Arc<dyn BreedStore>, cache: Arc<CacheManager>) -> Self {
        Self { store, cache }
    }

    pub async fn all_breeds(&self) -> Result<Vec<BreedRecord>, StoreError> {
        let key = CacheKey::all_breeds();

        match self.cache.get::<Vec<BreedRecord>>(&key).await {
            Ok(breeds) => return Ok(breeds),
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Breed cache read failed, falling back to store: {}", e),
        }

        let breeds = self.store.all_breeds().await?;

        if let Err(e) = self.cache.set(&key, &breeds).await {
            tracing::warn!("Failed to cache breed list: {}", e);
        }

        tracing::debug!("Loaded {} breeds from store", breeds.len());
        Ok(breeds)
    }

    pub async fn invalidate(&self) {
        if let Err(e) = self.cache.delete(&CacheKey::all_breeds()).await {
            tracing::warn!("Failed to invalidate breed cache: {}", e);
        }
    }
}
