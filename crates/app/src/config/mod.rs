//! Application configuration

use bloom::geo::Coordinates;
use clap::Args;

pub mod cache;
pub mod logging;

pub use cache::CacheConfig;
pub use logging::{LogFormat, LoggingConfig};

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(flatten)]
    pub store: StoreConfig,

    #[command(flatten)]
    pub cache: CacheConfig,
}

/// Where the shop is. Delivery distances are measured from here.
#[derive(Debug, Clone, Copy, Args)]
pub struct StoreConfig {
    /// Shop latitude in signed decimal degrees
    #[arg(
        long,
        env = "STORE_LATITUDE",
        default_value_t = -6.2,
        allow_negative_numbers = true,
        global = true
    )]
    pub store_latitude: f64,

    /// Shop longitude in signed decimal degrees
    #[arg(
        long,
        env = "STORE_LONGITUDE",
        default_value_t = 106.816_666,
        allow_negative_numbers = true,
        global = true
    )]
    pub store_longitude: f64,
}

impl StoreConfig {
    /// The shop as a coordinate pair.
    pub const fn origin(&self) -> Coordinates {
        Coordinates::new(self.store_latitude, self.store_longitude)
    }
}
