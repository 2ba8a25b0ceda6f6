#![deny(unsafe_code)]

pub mod doctor;
pub mod document;
pub mod edit;
pub mod error;
pub mod resolver;
pub mod snapshot;
pub mod store;

pub use crate::doctor::DoctorReport;
pub use crate::document::{CategoryDoc, ConfigDocument, SeriesDoc, ViewDoc};
pub use crate::error::{ConfigError, EditError, ResolveError};
pub use crate::resolver::{AmbiguousConfigWarning, ConfigSource, Resolution, resolve};
pub use crate::snapshot::{CONFIG_ENV_VAR, ConfigHandle, ConfigSnapshot, default_config_path};
pub use crate::store::ConfigStore;
