//! Git plumbing: sync edits to the remote and restore a fresh checkout.
//!
//! Git is driven as an external `git` process through [`GitRunner`], so
//! the sequences can be tested against a scripted runner.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("could not run git: {0}")]
    Spawn(#[source] io::Error),
    #[error("git {command} failed:\n{stderr}")]
    Failed { command: String, stderr: String },
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs `git` subcommands.
pub trait GitRunner {
    /// Run `git <args>` inside `dir` and return its stdout.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Failed`] with stderr when git exits non-zero.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError>;
}

/// The `git` executable on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(dir = %dir.display(), ?args, "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(GitError::Spawn)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(GitError::Failed {
                command: args.join(" "),
                stderr,
            })
        }
    }
}

/// Parameters of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub remote: String,
    pub message: String,
    /// Stash local changes and `pull --rebase` before committing.
    pub pull_first: bool,
}

/// What a sync run actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub stashed: bool,
    pub pulled: bool,
    pub committed: bool,
}

impl SyncReport {
    pub fn summary(&self) -> String {
        let mut steps = Vec::new();
        if self.pulled {
            steps.push("pulled");
        }
        steps.push(if self.committed {
            "committed"
        } else {
            "nothing to commit"
        });
        steps.push("pushed");
        steps.join(", ")
    }
}

const AUTO_STASH_MESSAGE: &str = "Auto-stash before pull";

fn stash_count(git: &dyn GitRunner, repo: &Path) -> Result<usize, GitError> {
    Ok(git.run(repo, &["stash", "list"])?.lines().count())
}

/// Stash if dirty, pull with rebase, restore the stash, stage tracked
/// changes, commit and push.
///
/// The first failing step aborts the sequence. Steps already applied are
/// not rolled back.
///
/// # Errors
///
/// Returns the [`GitError`] of the failing step.
pub fn sync(git: &dyn GitRunner, repo: &Path, options: &SyncOptions) -> Result<SyncReport, GitError> {
    let mut report = SyncReport::default();

    if options.pull_first {
        let dirty = !git.run(repo, &["status", "--porcelain"])?.trim().is_empty();
        if dirty {
            let before = stash_count(git, repo)?;
            git.run(repo, &["stash", "push", "-m", AUTO_STASH_MESSAGE])?;
            report.stashed = stash_count(git, repo)? > before;
        }

        git.run(repo, &["pull", "--rebase", options.remote.as_str()])?;
        report.pulled = true;

        if report.stashed {
            git.run(repo, &["stash", "pop"])?;
        }
    }

    git.run(repo, &["add", "--update"])?;
    let staged = git.run(repo, &["diff", "--cached", "--name-only"])?;
    if staged.trim().is_empty() {
        tracing::info!(repo = %repo.display(), "nothing staged, skipping commit");
    } else {
        git.run(repo, &["commit", "-m", options.message.as_str()])?;
        report.committed = true;
    }

    git.run(repo, &["push", options.remote.as_str(), "HEAD"])?;
    tracing::info!(repo = %repo.display(), ?report, "sync finished");
    Ok(report)
}

/// Delete `folder` and clone `repo_url` into it again.
///
/// # Errors
///
/// Returns [`GitError::Remove`] if the folder cannot be deleted and the
/// clone's [`GitError`] if cloning fails.
pub fn restore_repository(git: &dyn GitRunner, folder: &Path, repo_url: &str) -> Result<(), GitError> {
    if folder.exists() {
        remove_tree(folder).map_err(|source| GitError::Remove {
            path: folder.to_path_buf(),
            source,
        })?;
        tracing::info!(folder = %folder.display(), "deleted existing checkout");
    }

    let parent = folder
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    std::fs::create_dir_all(&parent).map_err(|source| GitError::Remove {
        path: parent.clone(),
        source,
    })?;

    let target = folder.to_string_lossy();
    git.run(&parent, &["clone", repo_url, target.as_ref()])?;
    tracing::info!(folder = %folder.display(), repo_url, "cloned repository");
    Ok(())
}

// Git marks pack files read-only, which makes a plain remove fail on Windows.
fn remove_tree(path: &Path) -> io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            make_writable(path)?;
            std::fs::remove_dir_all(path)
        }
        other => other,
    }
}

fn make_writable(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.file_type().is_symlink() {
        return Ok(());
    }
    let mut perms = meta.permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    std::fs::set_permissions(path, perms)?;

    if meta.is_dir() {
        for entry in std::fs::read_dir(path)? {
            make_writable(&entry?.path())?;
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fake::FakeGit;
    use super::*;
    use tempfile::tempdir;

    fn options(pull_first: bool) -> SyncOptions {
        SyncOptions {
            remote: "origin".to_string(),
            message: "Update leaderboard data".to_string(),
            pull_first,
        }
    }

    #[test]
    fn test_sync_clean_tree_skips_stash() {
        let git = FakeGit::new().respond("diff --cached --name-only", "src/data.ts\n");
        let report = sync(&git, Path::new("."), &options(true)).unwrap();
        assert_eq!(
            git.calls(),
            [
                "status --porcelain",
                "pull --rebase origin",
                "add --update",
                "diff --cached --name-only",
                "commit -m Update leaderboard data",
                "push origin HEAD",
            ]
        );
        assert!(!report.stashed);
        assert!(report.pulled);
        assert!(report.committed);
    }

    #[test]
    fn test_sync_dirty_tree_stashes_and_pops() {
        let git = FakeGit::new()
            .respond("status --porcelain", " M src/data.ts\n")
            .respond("stash list", "")
            .respond("stash list", "stash@{0}: On main: Auto-stash before pull\n")
            .respond("diff --cached --name-only", "src/data.ts\n");
        let report = sync(&git, Path::new("."), &options(true)).unwrap();
        let calls = git.calls();
        let pull = calls.iter().position(|c| c == "pull --rebase origin").unwrap();
        let pop = calls.iter().position(|c| c == "stash pop").unwrap();
        assert!(calls.contains(&"stash push -m Auto-stash before pull".to_string()));
        assert!(pull < pop);
        assert!(report.stashed);
    }

    #[test]
    fn test_sync_does_not_pop_unrelated_stash() {
        let git = FakeGit::new()
            .respond("status --porcelain", "?? notes.txt\n")
            .respond("stash list", "stash@{0}: older work\n");
        let report = sync(&git, Path::new("."), &options(true)).unwrap();
        assert!(!report.stashed);
        assert!(!git.calls().contains(&"stash pop".to_string()));
    }

    #[test]
    fn test_sync_without_pull_goes_straight_to_commit() {
        let git = FakeGit::new().respond("diff --cached --name-only", "a.tsx\n");
        sync(&git, Path::new("."), &options(false)).unwrap();
        assert_eq!(git.calls()[0], "add --update");
    }

    #[test]
    fn test_sync_nothing_staged_still_pushes() {
        let git = FakeGit::new();
        let report = sync(&git, Path::new("."), &options(false)).unwrap();
        assert!(!report.committed);
        assert!(!git.calls().iter().any(|c| c.starts_with("commit")));
        assert_eq!(git.calls().last().unwrap(), "push origin HEAD");
        assert_eq!(report.summary(), "nothing to commit, pushed");
    }

    #[test]
    fn test_sync_failure_aborts_remaining_steps() {
        let git = FakeGit::new().fail("pull --rebase origin", "CONFLICT (content)");
        let err = sync(&git, Path::new("."), &options(true)).unwrap_err();
        assert!(err.to_string().contains("CONFLICT (content)"));
        assert_eq!(git.calls().last().unwrap(), "pull --rebase origin");
        assert!(!git.calls().contains(&"push origin HEAD".to_string()));
    }

    #[test]
    fn test_restore_deletes_folder_then_clones() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("leader_board");
        std::fs::create_dir_all(folder.join(".git/objects")).unwrap();
        std::fs::write(folder.join(".git/objects/pack"), "x").unwrap();

        let git = FakeGit::new();
        restore_repository(&git, &folder, "https://example.com/repo.git").unwrap();

        assert!(!folder.exists());
        assert_eq!(
            git.calls(),
            [format!(
                "clone https://example.com/repo.git {}",
                folder.to_string_lossy()
            )]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_make_writable_clears_readonly_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("pack.idx");
        std::fs::write(&file, "x").unwrap();
        let mut perms = std::fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&file, perms).unwrap();

        make_writable(dir.path()).unwrap();
        assert!(!std::fs::metadata(&file).unwrap().permissions().readonly());
    }
}
