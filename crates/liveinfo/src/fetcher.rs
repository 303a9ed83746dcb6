//! The live-info fetcher: cache, fetch, parse, fall back.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use parkguide_config::LiveInfoConfig;
use parkguide_core::ParkInfo;
use parkguide_core::error::FetchError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CachedInfo, InfoCache};
use crate::parser::parse_park_info;
use crate::source::{HoursSource, HttpHoursSource};

/// Returns today's [`ParkInfo`], never an error.
///
/// Within the freshness window the cached value is returned unchanged and no
/// request is made. On a miss the source is fetched once (concurrent misses
/// wait for the same refresh), and the live value or the fallback is cached.
/// Page rendering uses [`get_or_revalidate`](Self::get_or_revalidate) and
/// never waits on a refresh once something is cached.
pub struct LiveInfoFetcher {
    /// `None` when live data is disabled
    source: Option<Arc<dyn HoursSource>>,
    cache: InfoCache,
    refresh_lock: Mutex<()>,
    timeout: Duration,
    offset: FixedOffset,
    pinned_date: Option<NaiveDate>,
}

impl LiveInfoFetcher {
    pub fn new(source: Arc<dyn HoursSource>, freshness: Duration, timeout: Duration) -> Self {
        Self {
            source: Some(source),
            cache: InfoCache::new(freshness),
            refresh_lock: Mutex::new(()),
            timeout,
            offset: default_offset(),
            pinned_date: None,
        }
    }

    /// A fetcher that always serves the fallback without network access.
    pub fn disabled() -> Self {
        Self {
            source: None,
            cache: InfoCache::new(Duration::from_secs(3600)),
            refresh_lock: Mutex::new(()),
            timeout: Duration::from_secs(10),
            offset: default_offset(),
            pinned_date: None,
        }
    }

    /// Build the fetcher described by `config`.
    pub fn from_config(config: &LiveInfoConfig) -> Result<Self, FetchError> {
        let offset =
            FixedOffset::east_opt(config.utc_offset_hours * 3600).unwrap_or_else(default_offset);

        if !config.enabled {
            info!("Live park info disabled, serving fallback hours");
            return Ok(Self {
                offset,
                ..Self::disabled()
            });
        }

        let source = HttpHoursSource::new(&config.source_url, config.timeout_secs)?;
        Ok(Self::new(
            Arc::new(source),
            Duration::from_secs(config.freshness_secs),
            Duration::from_secs(config.timeout_secs),
        )
        .with_offset(offset))
    }

    /// Use the park's UTC offset when deciding what "today" is.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Always parse the entry for `date` instead of the current day.
    pub fn with_pinned_date(mut self, date: NaiveDate) -> Self {
        self.pinned_date = Some(date);
        self
    }

    /// Today's date at the park.
    pub fn today(&self) -> NaiveDate {
        self.pinned_date
            .unwrap_or_else(|| Utc::now().with_timezone(&self.offset).date_naive())
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Today's park info: cached while fresh, otherwise refreshed.
    pub async fn get(&self) -> ParkInfo {
        if let Some(cached) = self.cache.fresh() {
            debug!(age_secs = cached.age().as_secs(), "Serving cached park info");
            return cached.info.clone();
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(cached) = self.cache.fresh() {
            return cached.info.clone();
        }

        self.refresh_locked().await
    }

    /// Today's park info for page rendering.
    ///
    /// A stale entry is served as is while a background task refreshes it,
    /// so only the very first call (nothing cached yet) waits on the source.
    pub async fn get_or_revalidate(self: &Arc<Self>) -> ParkInfo {
        match self.cache.current() {
            Some(cached) if cached.age() < self.cache.freshness() => cached.info.clone(),
            Some(stale) => {
                self.spawn_refresh();
                stale.info.clone()
            }
            None => self.get().await,
        }
    }

    fn spawn_refresh(self: &Arc<Self>) {
        let fetcher = Arc::clone(self);
        tokio::spawn(async move {
            // A refresh already in flight will replace the entry.
            let Ok(_guard) = fetcher.refresh_lock.try_lock() else {
                return;
            };
            if fetcher.cache.fresh().is_some() {
                return;
            }
            debug!("Refreshing stale park info in the background");
            fetcher.refresh_locked().await;
        });
    }

    /// Fetch now regardless of the cache age.
    pub async fn refresh(&self) -> ParkInfo {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// The cached entry, if any, without fetching.
    pub fn cached(&self) -> Option<Arc<CachedInfo>> {
        self.cache.current()
    }

    async fn refresh_locked(&self) -> ParkInfo {
        let info = match &self.source {
            None => ParkInfo::fallback(),
            Some(source) => match self.fetch_live(source.as_ref()).await {
                Ok(info) => {
                    info!(hours = %info.hours, fireworks = %info.fireworks, "Fetched live park info");
                    info
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Live park info unavailable, using fallback");
                    ParkInfo::fallback()
                }
            },
        };

        self.cache.replace(info.clone());
        info
    }

    async fn fetch_live(&self, source: &dyn HoursSource) -> Result<ParkInfo, FetchError> {
        let html = tokio::time::timeout(self.timeout, source.fetch())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))??;
        parse_park_info(&html, self.today())
    }
}

fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap_or_else(|| Utc.fix())
}
