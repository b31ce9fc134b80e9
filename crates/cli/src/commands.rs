//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use webstatic_core::{
    create_executor, Config, CoordinatorError, DistributionReport, Distributor, HostStatus,
    Packager, ReleaseCoordinator, RemoteExecutor, TarPackager,
};

type Coordinator = ReleaseCoordinator<TarPackager, Box<dyn RemoteExecutor>>;

fn build_coordinator(config: &Config) -> Result<Coordinator> {
    let content_dir = config
        .package
        .content_dir_name()
        .ok_or_else(|| anyhow!("Cannot determine content directory name"))?;

    let distributor = Distributor::new(
        create_executor(&config.remote),
        config.remote.hosts.clone(),
        config.layout.clone(),
        content_dir,
    );

    Ok(
        ReleaseCoordinator::new(TarPackager::new(config.package.clone()), distributor)
            .with_policy(config.deploy.on_host_failure),
    )
}

/// `webstatic pack`
pub async fn pack(config: &Config) -> Result<()> {
    let packager = TarPackager::new(config.package.clone());
    let archive = packager
        .pack()
        .await
        .with_context(|| format!("Failed to pack {:?}", config.package.source_dir))?;

    println!("{}", archive.display());
    Ok(())
}

/// `webstatic deploy <ARCHIVE>`
pub async fn deploy(config: &Config, archive: &Path, json: bool) -> Result<()> {
    let mut coordinator = build_coordinator(config)?;
    let result = coordinator.deploy(archive).await;
    finish(result, json, &mut std::io::stdout().lock())
}

/// `webstatic release`
pub async fn release(config: &Config, json: bool) -> Result<()> {
    let mut coordinator = build_coordinator(config)?;
    let result = coordinator.run().await;
    if let Some(archive) = coordinator.archive() {
        info!("Packed {}", archive.display());
    }
    finish(result, json, &mut std::io::stdout().lock())
}

/// `webstatic config`
pub fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

/// Prints the report, and the success line only when every host deployed.
fn finish(
    result: Result<DistributionReport, CoordinatorError>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match result {
        Ok(report) => {
            print_report(&report, json, out)?;
            writeln!(out, "New version deployed!")?;
            Ok(())
        }
        Err(e) => {
            if let Some(report) = e.report() {
                print_report(report, json, out)?;
            }
            Err(e.into())
        }
    }
}

fn print_report(report: &DistributionReport, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("Failed to render report as JSON")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    for line in report_lines(report) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn report_lines(report: &DistributionReport) -> Vec<String> {
    let mut lines = vec![format!("Release {}", report.release)];
    for outcome in &report.hosts {
        let line = match &outcome.status {
            HostStatus::Deployed => {
                format!("  {:<20} deployed ({} ms)", outcome.host, outcome.duration_ms)
            }
            HostStatus::Failed(failure) => format!(
                "  {:<20} failed at {}: {}",
                outcome.host, failure.step, failure.message
            ),
            HostStatus::Skipped => format!("  {:<20} skipped", outcome.host),
        };
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use webstatic_core::{DeployStep, FailureKind, HostFailure, HostOutcome, PackError};

    fn report() -> DistributionReport {
        DistributionReport {
            release: "web_static_20240307104334".to_string(),
            hosts: vec![
                HostOutcome {
                    host: "web-01".to_string(),
                    status: HostStatus::Deployed,
                    duration_ms: 120,
                },
                HostOutcome {
                    host: "web-02".to_string(),
                    status: HostStatus::Failed(HostFailure {
                        step: DeployStep::Upload,
                        kind: FailureKind::Transport,
                        message: "connection refused".to_string(),
                    }),
                    duration_ms: 5,
                },
                HostOutcome {
                    host: "web-03".to_string(),
                    status: HostStatus::Skipped,
                    duration_ms: 0,
                },
            ],
        }
    }

    #[test]
    fn test_report_lines() {
        let lines = report_lines(&report());

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Release web_static_20240307104334");
        assert!(lines[1].contains("web-01") && lines[1].ends_with("deployed (120 ms)"));
        assert!(lines[2].contains("failed at upload: connection refused"));
        assert!(lines[3].ends_with("skipped"));
    }

    fn deployed_report() -> DistributionReport {
        let mut report = report();
        report.hosts.truncate(1);
        report
    }

    fn finish_output(
        result: Result<DistributionReport, CoordinatorError>,
        json: bool,
    ) -> (Result<()>, String) {
        let mut out = Vec::new();
        let status = finish(result, json, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_finish_success_prints_message() {
        let (status, output) = finish_output(Ok(deployed_report()), false);

        assert!(status.is_ok());
        assert!(output.contains("web-01"));
        assert!(output.ends_with("New version deployed!\n"));
    }

    #[test]
    fn test_finish_rollout_failure_prints_report_only() {
        let error = CoordinatorError::Rollout { report: report() };
        let (status, output) = finish_output(Err(error), false);

        let err = status.unwrap_err();
        assert!(err.to_string().contains("failed on 2 of 3 host(s)"));
        assert!(output.contains("failed at upload: connection refused"));
        assert!(!output.contains("New version deployed!"));
    }

    #[test]
    fn test_finish_pack_failure_prints_nothing() {
        let error = CoordinatorError::Pack(PackError::SourceNotFound {
            path: PathBuf::from("web_static"),
        });
        let (status, output) = finish_output(Err(error), false);

        assert!(status.is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_finish_json_report() {
        let (status, output) = finish_output(Ok(deployed_report()), true);

        assert!(status.is_ok());
        let json = output.trim_end().trim_end_matches("New version deployed!");
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["release"], "web_static_20240307104334");
        assert_eq!(value["hosts"][0]["status"], "deployed");
    }

    #[test]
    fn test_build_coordinator_uses_config_policy() {
        let mut config = Config::default();
        config.deploy.on_host_failure = webstatic_core::FailurePolicy::ContinueOnError;

        let coordinator = build_coordinator(&config).unwrap();

        assert_eq!(coordinator.policy(), config.deploy.on_host_failure);
        assert_eq!(coordinator.distributor().hosts(), config.remote.hosts.as_slice());
        assert_eq!(coordinator.distributor().executor().name(), "ssh");
    }

    #[test]
    fn test_show_config_renders_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(rendered.contains("[remote]"));
        assert!(show_config(&Config::default()).is_ok());
    }
}
