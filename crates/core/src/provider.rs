//! Weather data sources
//!
//! A provider either has a record or it does not. Network errors, malformed
//! payloads and missing files all collapse to `None`; the animation keeps running
//! with whatever effect it already has.

use crate::core_types::{WeatherCondition, WeatherData};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Refetch interval used when a cache is not given another one
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Source of weather observations
pub trait WeatherProvider {
    /// Fetch the current observation, `None` when none is available
    fn fetch(&mut self) -> Option<WeatherData>;
}

impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    fn fetch(&mut self) -> Option<WeatherData> {
        (**self).fetch()
    }
}

/// Provider that always returns the same record
#[derive(Debug, Clone)]
pub struct StaticProvider {
    weather: WeatherData,
}

impl StaticProvider {
    pub fn new(weather: WeatherData) -> Self {
        Self { weather }
    }

    /// Provider for a condition's representative record
    pub fn preset(condition: WeatherCondition) -> Self {
        Self::new(WeatherData::preset(condition))
    }
}

impl WeatherProvider for StaticProvider {
    fn fetch(&mut self) -> Option<WeatherData> {
        Some(self.weather.clone())
    }
}

/// Owned cache in front of another provider
///
/// A cached record is served until it is older than `ttl`. When the inner
/// provider fails, the stale record is kept (so a later call can still fall back
/// to it via [`CachedProvider::cached`]) but `None` is reported for this fetch.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    cached: Option<(Instant, WeatherData)>,
}

impl<P: WeatherProvider> CachedProvider<P> {
    /// Cache with the default 300 s lifetime
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Last successfully fetched record, however old
    pub fn cached(&self) -> Option<&WeatherData> {
        self.cached.as_ref().map(|(_, weather)| weather)
    }

    /// Whether a cached record exists and is younger than the TTL at `now`
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|(at, _)| now.saturating_duration_since(*at) < self.ttl)
    }

    /// Fetch as of `now`, serving the cache while it is fresh
    pub fn fetch_at(&mut self, now: Instant) -> Option<WeatherData> {
        if self.is_fresh(now) {
            debug!("serving cached weather");
            return self.cached().cloned();
        }
        self.refresh_at(now)
    }

    /// Bypass the cache and query the inner provider as of `now`
    pub fn refresh_at(&mut self, now: Instant) -> Option<WeatherData> {
        if let Some(weather) = self.inner.fetch() {
            debug!(condition = %weather.condition, location = %weather.location, "weather fetched");
            self.cached = Some((now, weather.clone()));
            Some(weather)
        } else {
            warn!("weather provider returned no data");
            None
        }
    }

    /// Bypass the cache and query the inner provider now
    pub fn refresh(&mut self) -> Option<WeatherData> {
        self.refresh_at(Instant::now())
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: WeatherProvider> WeatherProvider for CachedProvider<P> {
    fn fetch(&mut self) -> Option<WeatherData> {
        self.fetch_at(Instant::now())
    }
}
