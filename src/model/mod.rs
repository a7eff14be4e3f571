//! Domain model for the build publisher.
//!
//! Every type here is an immutable value built from a validated identifier
//! or from a remote response. State changes happen by re-fetching through
//! [`ApiClient`](crate::client::ApiClient), never by mutating a held value.
//!
//! - [`Machine`] / [`MachineName`] - a host whose builds are tracked
//! - [`Build`] / [`BuildId`] - one build attempt, identified by machine + number
//! - [`Package`] / [`PackageDiff`] - build contents and their comparison
//! - [`Tag`] / [`TagName`] - a movable named pointer to a build

pub mod build;
pub mod machine;
pub mod package;
pub mod tag;

pub use build::{Build, BuildId, BuildInfo};
pub use machine::{Machine, MachineName};
pub use package::{Package, PackageChange, PackageDiff};
pub use tag::{Tag, TagName};
