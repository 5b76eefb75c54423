//! Location fallback chain.
//!
//! The weather client takes a city or coordinates; where those come from
//! is the caller's business. This module hosts that caller-side chain: a
//! list of best-effort sources tried in order, each bounded by its own
//! deadline, with IP lookup as the shipped last resort. A miss anywhere
//! just moves on; only an all-miss yields `None`.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use crate::client::fetch_location_by_ip;
use crate::model::LocationHint;

/// Deadline applied to each source before the chain moves on.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Best-effort lookup; `None` means "try the next source".
    async fn locate(&self) -> Option<LocationHint>;
}

/// IP-based geolocation, used when no better source is available.
#[derive(Debug, Default)]
pub struct IpLookupSource;

#[async_trait]
impl LocationSource for IpLookupSource {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn locate(&self) -> Option<LocationHint> {
        fetch_location_by_ip().await
    }
}

/// Try each source in order; the first hit wins.
pub async fn resolve_location(
    sources: &[Box<dyn LocationSource>],
    per_source_timeout: Duration,
) -> Option<LocationHint> {
    for source in sources {
        match timeout(per_source_timeout, source.locate()).await {
            Ok(Some(hint)) => {
                debug!("location source '{}' resolved {}", source.name(), hint.city);
                return Some(hint);
            }
            Ok(None) => debug!("location source '{}' had no answer", source.name()),
            Err(_) => debug!("location source '{}' timed out", source.name()),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl LocationSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn locate(&self) -> Option<LocationHint> {
            Some(LocationHint {
                city: self.0.to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
        }
    }

    struct Miss;

    #[async_trait]
    impl LocationSource for Miss {
        fn name(&self) -> &'static str {
            "miss"
        }

        async fn locate(&self) -> Option<LocationHint> {
            None
        }
    }

    struct Hang;

    #[async_trait]
    impl LocationSource for Hang {
        fn name(&self) -> &'static str {
            "hang"
        }

        async fn locate(&self) -> Option<LocationHint> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            None
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_hit_wins() {
        let sources: Vec<Box<dyn LocationSource>> =
            vec![Box::new(Fixed("Accra")), Box::new(Fixed("Kumasi"))];

        let hint = resolve_location(&sources, DEFAULT_SOURCE_TIMEOUT).await.unwrap();
        assert_eq!(hint.city, "Accra");
    }

    #[tokio::test(start_paused = true)]
    async fn misses_fall_through_to_the_next_source() {
        let sources: Vec<Box<dyn LocationSource>> =
            vec![Box::new(Miss), Box::new(Fixed("Kumasi"))];

        let hint = resolve_location(&sources, DEFAULT_SOURCE_TIMEOUT).await.unwrap();
        assert_eq!(hint.city, "Kumasi");
    }

    #[tokio::test(start_paused = true)]
    async fn a_hanging_source_times_out_and_falls_through() {
        let sources: Vec<Box<dyn LocationSource>> =
            vec![Box::new(Hang), Box::new(Fixed("Kumasi"))];

        let hint = resolve_location(&sources, Duration::from_secs(10)).await.unwrap();
        assert_eq!(hint.city, "Kumasi");
    }

    #[tokio::test(start_paused = true)]
    async fn all_misses_yield_none() {
        let sources: Vec<Box<dyn LocationSource>> = vec![Box::new(Miss), Box::new(Miss)];
        assert!(resolve_location(&sources, DEFAULT_SOURCE_TIMEOUT).await.is_none());
    }
}
