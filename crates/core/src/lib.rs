pub mod config;
pub mod domain;
pub mod errors;

pub use config::{
    AppConfig, ConfigError, ConfigOverrides, DatabaseConfig, LoadOptions, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use domain::listing::CarListing;
pub use domain::preferences::{
    capitalize_first, BodyStyle, Brand, Color, ConstraintSet, FuelKind,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
