//! gbpcli - command-line client for Gentoo Build Publisher.
//!
//! The crate talks to a build publisher's GraphQL API and exposes its
//! operations as subcommands. Subcommands come from a registry that holds the
//! built-in commands plus any plugins declared through the
//! `gbpcli.subcommands/1` extension point.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing, built-in commands and dispatch
//! - [`client`] - GraphQL API client
//! - [`config`] - Layered configuration (flags, environment, file)
//! - [`error`] - Error types, result alias and exit codes
//! - [`model`] - Machines, builds, tags and packages
//! - [`registry`] - Subcommand registry and plugin manifests
//! - [`secrets`] - Output masking for credentials
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use gbpcli::model::{BuildId, PackageDiff, Package};
//!
//! let id: BuildId = "lighthouse.3113".parse().unwrap();
//! assert_eq!(id.number(), 3113);
//!
//! let left = vec![Package::new("app-misc/foo-1.0").unwrap()];
//! let right = vec![Package::new("app-misc/foo-1.1").unwrap()];
//! assert!(!PackageDiff::between(&left, &right).is_empty());
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod secrets;
pub mod ui;

pub use error::{GbpError, Result};
