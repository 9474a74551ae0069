//! Catalog Service - Session cache of races, classes and backgrounds
//!
//! The catalog is fetched once and reused until explicitly invalidated. A
//! failed fetch records a readable error and keeps whatever was loaded before.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ApiError, GameDataPort};
use crate::domain::entities::{Background, CharClass, Race};
use crate::domain::value_objects::CUSTOM_SLUG_PREFIX;

/// Snapshot of the loaded game data
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub races: Vec<Race>,
    pub classes: Vec<CharClass>,
    pub backgrounds: Vec<Background>,
    pub loaded: bool,
    pub error: Option<String>,
}

impl Catalog {
    pub fn race(&self, slug: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.slug == slug)
    }

    pub fn class(&self, slug: &str) -> Option<&CharClass> {
        self.classes.iter().find(|c| c.slug == slug)
    }

    pub fn background(&self, slug: &str) -> Option<&Background> {
        self.backgrounds.iter().find(|b| b.slug == slug)
    }

    /// Display name for a race slug; custom races show their own name
    pub fn race_name(&self, slug: &str) -> String {
        display_name(slug, self.race(slug).map(|r| r.name.as_str()))
    }

    pub fn class_name(&self, slug: &str) -> String {
        display_name(slug, self.class(slug).map(|c| c.name.as_str()))
    }

    pub fn background_name(&self, slug: &str) -> String {
        display_name(slug, self.background(slug).map(|b| b.name.as_str()))
    }
}

fn display_name(slug: &str, found: Option<&str>) -> String {
    if let Some(custom) = slug.strip_prefix(CUSTOM_SLUG_PREFIX) {
        return custom.to_string();
    }
    found.unwrap_or(slug).to_string()
}

pub struct CatalogService {
    game_data: Arc<dyn GameDataPort>,
    cache: RwLock<Catalog>,
}

impl CatalogService {
    pub fn new(game_data: Arc<dyn GameDataPort>) -> Self {
        Self {
            game_data,
            cache: RwLock::new(Catalog::default()),
        }
    }

    /// Load all three collections unless already loaded
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        if self.cache.read().await.loaded {
            debug!("Catalog already loaded");
            return Ok(());
        }

        let fetched = futures_util::try_join!(
            self.game_data.list_races(),
            self.game_data.list_classes(),
            self.game_data.list_backgrounds(),
        );

        let mut cache = self.cache.write().await;
        match fetched {
            Ok((races, classes, backgrounds)) => {
                info!(
                    races = races.len(),
                    classes = classes.len(),
                    backgrounds = backgrounds.len(),
                    "Loaded game data"
                );
                *cache = Catalog {
                    races,
                    classes,
                    backgrounds,
                    loaded: true,
                    error: None,
                };
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load game data");
                cache.error = Some(format!("Failed to load game data: {e}"));
                Err(e)
            }
        }
    }

    /// Force the next `fetch_all` to hit the backend
    pub async fn invalidate(&self) {
        self.cache.write().await.loaded = false;
    }

    pub async fn snapshot(&self) -> Catalog {
        self.cache.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeGameData {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    #[async_trait]
    impl GameDataPort for FakeGameData {
        async fn list_races(&self) -> Result<Vec<Race>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            Ok(vec![Race {
                slug: "elf".to_string(),
                name: "Elf".to_string(),
                ..Default::default()
            }])
        }

        async fn list_classes(&self) -> Result<Vec<CharClass>, ApiError> {
            Ok(vec![CharClass {
                slug: "wizard".to_string(),
                name: "Wizard".to_string(),
                ..Default::default()
            }])
        }

        async fn list_backgrounds(&self) -> Result<Vec<Background>, ApiError> {
            Ok(vec![Background {
                slug: "sage".to_string(),
                name: "Sage".to_string(),
                ..Default::default()
            }])
        }
    }

    #[tokio::test]
    async fn test_fetch_all_is_cached_until_invalidated() {
        let port = Arc::new(FakeGameData::default());
        let service = CatalogService::new(port.clone());

        service.fetch_all().await.unwrap();
        service.fetch_all().await.unwrap();
        assert_eq!(port.calls.load(Ordering::SeqCst), 1);

        service.invalidate().await;
        service.fetch_all().await.unwrap();
        assert_eq!(port.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_contents() {
        let port = Arc::new(FakeGameData::default());
        let service = CatalogService::new(port.clone());
        service.fetch_all().await.unwrap();

        port.failing.store(true, Ordering::SeqCst);
        service.invalidate().await;
        assert!(service.fetch_all().await.is_err());

        let catalog = service.snapshot().await;
        assert_eq!(catalog.races.len(), 1);
        assert!(!catalog.loaded);
        assert!(catalog.error.as_deref().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_name_lookups() {
        let service = CatalogService::new(Arc::new(FakeGameData::default()));
        service.fetch_all().await.unwrap();
        let catalog = service.snapshot().await;

        assert_eq!(catalog.race_name("elf"), "Elf");
        assert_eq!(catalog.race_name("custom__Shadowkin"), "Shadowkin");
        assert_eq!(catalog.class_name("wizard"), "Wizard");
        assert_eq!(catalog.class_name("artificer"), "artificer");
        assert_eq!(catalog.background_name("sage"), "Sage");
    }
}
