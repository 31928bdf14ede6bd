//! Installed package metadata layer
//!
//! This module answers "which version of package X is installed?" by reading
//! the distribution records Python installers leave in `site-packages`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌───────────────┐
//! │  Discovery  │────▶│  SitePackages    │────▶│ CoreMetadata  │
//! │ (env paths) │     │ (dist-info scan) │     │ (METADATA hdr)│
//! └─────────────┘     └──────────────────┘     └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Registry trait for resolving installed versions
//! - [`site_packages`]: Registry backed by site-packages directories
//! - [`discovery`]: Search path discovery from the environment
//! - [`core_metadata`]: `METADATA` / `PKG-INFO` header parser
//! - [`error`]: Error types for lookups

pub mod core_metadata;
pub mod discovery;
pub mod error;
pub mod registry;
pub mod site_packages;

pub use error::MetadataError;
pub use registry::MetadataRegistry;
pub use site_packages::SitePackagesRegistry;
