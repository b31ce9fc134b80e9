pub mod config;
pub mod coordinator;
pub mod distributor;
pub mod packager;
pub mod process;
pub mod remote;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    DeployConfig,
};
pub use coordinator::{CoordinatorError, ReleaseCoordinator, RunState};
pub use distributor::{
    DeployStep, DistributeError, DistributionReport, Distributor, FailureKind, FailurePolicy,
    HostFailure, HostOutcome, HostStatus, RemoteLayout,
};
pub use packager::{PackError, PackageConfig, Packager, TarPackager};
pub use process::{CommandOutput, ProcessError};
pub use remote::{
    create_executor, LocalExecutor, RemoteConfig, RemoteError, RemoteExecutor, SshExecutor,
    Transport,
};
