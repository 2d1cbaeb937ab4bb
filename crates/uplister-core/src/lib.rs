use std::path::PathBuf;

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod product;
pub mod slug;
pub mod taxonomy;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{NormalizedProduct, Specification, SubmissionOutcome, SubmissionStatus};
pub use slug::{product_slug, slugify};
pub use taxonomy::{TaxonPath, Taxonomy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}
