//! Testing utilities and mock implementations.
//!
//! Mocks for the packager and remote executor traits, so the coordinator and
//! distributor can be exercised without `tar`, `ssh` or real hosts.
//!
//! # Example
//!
//! ```rust,ignore
//! use webstatic_core::testing::{MockPackager, MockRemoteExecutor};
//!
//! let packager = MockPackager::new(dir.path().join("web_static_1.tgz"));
//! let executor = MockRemoteExecutor::new();
//!
//! // Make the extract step fail on the second host
//! executor.fail_command("web-02", "tar -xzf").await;
//! ```

mod mock_executor;
mod mock_packager;

pub use mock_executor::{MockCall, MockRemoteExecutor};
pub use mock_packager::MockPackager;
