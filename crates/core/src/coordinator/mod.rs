//! Release coordinator: pack once, then distribute.
//!
//! The coordinator owns the archive produced by the packager for its whole
//! lifetime, so packing twice hands back the same path instead of building
//! a new archive.
//!
//! ```text
//! Start -> Packaging -> PackFailed
//!                    -> Packaged -> Distributing -> DistributeFailed
//!                                                -> Deployed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use webstatic_core::coordinator::ReleaseCoordinator;
//!
//! let mut coordinator = ReleaseCoordinator::new(packager, distributor)
//!     .with_policy(FailurePolicy::StopOnError);
//!
//! let report = coordinator.run().await?;
//! println!("Deployed {} to {} host(s)", report.release, report.hosts.len());
//! ```

mod error;
mod runner;
mod types;

pub use error::CoordinatorError;
pub use runner::ReleaseCoordinator;
pub use types::RunState;
