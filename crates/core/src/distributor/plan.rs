//! Shell commands that install one release on a host.

use std::path::{Path, PathBuf};

use super::error::DistributeError;
use super::layout::RemoteLayout;
use super::types::DeployStep;
use crate::packager::release_name;
use crate::process::shell_quote;

/// A shell command tagged with the step it implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    pub step: DeployStep,
    pub command: String,
}

/// Everything needed to install one archive, resolved against a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Archive base file name, e.g. `web_static_20240307104334.tgz`.
    pub file_name: String,
    /// Release folder name, e.g. `web_static_20240307104334`.
    pub release: String,
    /// Where the archive is uploaded to.
    pub staged_archive: PathBuf,
    /// Directory the archive is extracted into.
    pub release_dir: PathBuf,
    /// Directory the archive's own top-level folder lands in after extraction.
    pub nested_dir: PathBuf,
    /// The `current` symlink.
    pub current_link: PathBuf,
}

impl ReleasePlan {
    /// Resolves the plan for `archive` under `layout`.
    ///
    /// `content_dir` is the top-level folder stored in the archive.
    pub fn new(
        archive: &Path,
        layout: &RemoteLayout,
        content_dir: &str,
    ) -> Result<Self, DistributeError> {
        let invalid = || DistributeError::InvalidArchiveName {
            path: archive.to_path_buf(),
        };

        let file_name = archive
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(invalid)?
            .to_string();
        let release = release_name(archive).ok_or_else(invalid)?;
        let release_dir = layout.release_dir(&release);

        Ok(Self {
            staged_archive: layout.staged_archive(&file_name),
            nested_dir: release_dir.join(content_dir),
            current_link: layout.current_link(),
            release_dir,
            file_name,
            release,
        })
    }

    /// Commands to run after the upload, in order.
    pub fn commands(&self) -> Vec<RemoteCommand> {
        let staged = quote_path(&self.staged_archive);
        // Trailing slash so the link resolves to the directory itself
        let release_dir_slash = shell_quote(&format!("{}/", self.release_dir.display()));
        let nested = quote_path(&self.nested_dir);
        let current = quote_path(&self.current_link);

        vec![
            RemoteCommand {
                step: DeployStep::CreateReleaseDir,
                command: format!("mkdir -p {}", release_dir_slash),
            },
            RemoteCommand {
                step: DeployStep::Extract,
                command: format!("tar -xzf {} -C {}", staged, release_dir_slash),
            },
            RemoteCommand {
                step: DeployStep::RemoveStagedArchive,
                command: format!("rm {}", staged),
            },
            RemoteCommand {
                step: DeployStep::FlattenLayout,
                command: format!("mv {}/* {}", nested, release_dir_slash),
            },
            RemoteCommand {
                step: DeployStep::RemoveNestedDir,
                command: format!("rm -rf {}", nested),
            },
            RemoteCommand {
                step: DeployStep::UnlinkCurrent,
                command: format!("rm -rf {}", current),
            },
            RemoteCommand {
                step: DeployStep::LinkCurrent,
                command: format!("ln -s {} {}", release_dir_slash, current),
            },
        ]
    }
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> ReleasePlan {
        ReleasePlan::new(
            Path::new("versions/web_static_20240307104334.tgz"),
            &RemoteLayout::default(),
            "web_static",
        )
        .unwrap()
    }

    #[test]
    fn test_plan_paths() {
        let plan = plan();
        assert_eq!(plan.file_name, "web_static_20240307104334.tgz");
        assert_eq!(plan.release, "web_static_20240307104334");
        assert_eq!(
            plan.staged_archive,
            PathBuf::from("/tmp/web_static_20240307104334.tgz")
        );
        assert_eq!(
            plan.release_dir,
            PathBuf::from("/data/web_static/releases/web_static_20240307104334")
        );
        assert_eq!(
            plan.nested_dir,
            PathBuf::from("/data/web_static/releases/web_static_20240307104334/web_static")
        );
        assert_eq!(plan.current_link, PathBuf::from("/data/web_static/current"));
    }

    #[test]
    fn test_plan_commands_match_layout() {
        let commands: Vec<String> = plan().commands().into_iter().map(|c| c.command).collect();
        let r = "/data/web_static/releases/web_static_20240307104334";
        assert_eq!(
            commands,
            vec![
                format!("mkdir -p {}/", r),
                format!("tar -xzf /tmp/web_static_20240307104334.tgz -C {}/", r),
                "rm /tmp/web_static_20240307104334.tgz".to_string(),
                format!("mv {}/web_static/* {}/", r, r),
                format!("rm -rf {}/web_static", r),
                "rm -rf /data/web_static/current".to_string(),
                format!("ln -s {}/ /data/web_static/current", r),
            ]
        );
    }

    #[test]
    fn test_plan_step_order() {
        let steps: Vec<DeployStep> = plan().commands().into_iter().map(|c| c.step).collect();
        assert_eq!(
            steps,
            vec![
                DeployStep::CreateReleaseDir,
                DeployStep::Extract,
                DeployStep::RemoveStagedArchive,
                DeployStep::FlattenLayout,
                DeployStep::RemoveNestedDir,
                DeployStep::UnlinkCurrent,
                DeployStep::LinkCurrent,
            ]
        );
    }

    #[test]
    fn test_plan_quotes_unusual_paths() {
        let layout = RemoteLayout::new("/srv/my site", "/tmp");
        let plan = ReleasePlan::new(Path::new("out/site_1.tgz"), &layout, "site").unwrap();
        let commands = plan.commands();
        assert_eq!(
            commands[3].command,
            "mv '/srv/my site/releases/site_1/site'/* '/srv/my site/releases/site_1/'"
        );
    }

    #[test]
    fn test_plan_invalid_archive_name() {
        let result = ReleasePlan::new(Path::new(".tgz"), &RemoteLayout::default(), "web_static");
        assert!(matches!(
            result,
            Err(DistributeError::InvalidArchiveName { .. })
        ));
    }
}
