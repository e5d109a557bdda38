//! Reference Cache Config

use std::time::Duration;

use clap::Args;

use crate::cache::{CachePolicy, StalePolicy};

/// Reference-data cache settings.
#[derive(Debug, Clone, Copy, Args)]
pub struct CacheConfig {
    /// How long catalog reads stay fresh, in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 300, global = true)]
    pub cache_ttl_secs: u64,

    /// How long a finished fetch keeps absorbing identical requests, in milliseconds
    #[arg(long, env = "CACHE_COALESCE_GRACE_MS", default_value_t = 100, global = true)]
    pub cache_coalesce_grace_ms: u64,

    /// Serve expired catalog data while a refresh runs in the background
    #[arg(long, env = "CACHE_SERVE_STALE", default_value_t = false, global = true)]
    pub cache_serve_stale: bool,
}

impl CacheConfig {
    /// The cache policy these settings describe.
    pub const fn policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            coalesce_grace: Duration::from_millis(self.cache_coalesce_grace_ms),
            stale: if self.cache_serve_stale {
                StalePolicy::ServeStaleWhileRevalidate
            } else {
                StalePolicy::Reject
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::{DEFAULT_COALESCE_GRACE, DEFAULT_TTL};

    use super::*;

    #[test]
    fn defaults_match_cache_defaults() {
        let config = CacheConfig {
            cache_ttl_secs: 300,
            cache_coalesce_grace_ms: 100,
            cache_serve_stale: false,
        };

        assert_eq!(config.policy(), CachePolicy::default());
        assert_eq!(config.policy().ttl, DEFAULT_TTL);
        assert_eq!(config.policy().coalesce_grace, DEFAULT_COALESCE_GRACE);
    }

    #[test]
    fn serve_stale_switch_enables_revalidation() {
        let config = CacheConfig {
            cache_ttl_secs: 60,
            cache_coalesce_grace_ms: 0,
            cache_serve_stale: true,
        };

        assert_eq!(config.policy().stale, StalePolicy::ServeStaleWhileRevalidate);
        assert_eq!(config.policy().ttl, Duration::from_secs(60));
    }
}
