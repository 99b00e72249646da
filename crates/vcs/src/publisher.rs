//! Job publishing: clone, write, commit, push.

use std::cell::RefCell;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use git2::{
    build::RepoBuilder, Cred, FetchOptions, Oid, PushOptions, RemoteCallbacks, Repository,
    Signature,
};
use pipeline::{JobPublisher, PublishError};

use crate::GitError;

/// Username GitHub expects alongside a token for HTTPS git access.
const TOKEN_USERNAME: &str = "x-access-token";

/// Where and as whom jobs are committed.
#[derive(Clone)]
pub struct PublisherSettings {
    /// Clone URL of the trigger repository (HTTPS URL or local path).
    pub remote_url: String,
    /// Branch that receives job commits.
    pub branch: String,
    /// Path of the job file, relative to the repository root.
    pub job_path: PathBuf,
    /// Token for HTTPS authentication; `None` for unauthenticated remotes.
    pub token: Option<String>,
    pub author_name: String,
    pub author_email: String,
}

impl std::fmt::Debug for PublisherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherSettings")
            .field("remote_url", &self.remote_url)
            .field("branch", &self.branch)
            .field("job_path", &self.job_path)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("author_name", &self.author_name)
            .field("author_email", &self.author_email)
            .finish()
    }
}

/// [`JobPublisher`] that commits each job to a fresh clone of the trigger
/// repository and pushes it.
///
/// Every publish works in its own temporary directory, which is removed when
/// the publish finishes, so concurrent deliveries never share a working tree.
#[derive(Debug, Clone)]
pub struct GitJobPublisher {
    settings: Arc<PublisherSettings>,
}

impl GitJobPublisher {
    pub fn new(settings: PublisherSettings) -> Result<Self, GitError> {
        validate_job_path(&settings.job_path)?;
        Ok(Self {
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &PublisherSettings {
        &self.settings
    }
}

fn validate_job_path(path: &Path) -> Result<(), GitError> {
    let mut components = path.components().peekable();
    if components.peek().is_none()
        || !components.all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(GitError::InvalidJobPath(path.display().to_string()));
    }
    Ok(())
}

#[async_trait]
impl JobPublisher for GitJobPublisher {
    async fn publish(&self, job: &str, message: &str) -> Result<(), PublishError> {
        let settings = Arc::clone(&self.settings);
        let job = job.to_owned();
        let message = message.to_owned();
        let span = tracing::Span::current();

        let commit = tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            publish_blocking(&settings, &job, &message)
        })
        .await
        .map_err(|e| PublishError::Interrupted {
            message: e.to_string(),
        })??;

        tracing::info!(commit = %commit, "Published benchmark job");
        Ok(())
    }
}

/// Clones the trigger branch into a temporary directory, writes the job file,
/// commits it on top of the branch head and pushes the branch.
///
/// The commit is created even if the tree is identical to its parent's.
pub fn publish_blocking(
    settings: &PublisherSettings,
    contents: &str,
    message: &str,
) -> Result<Oid, GitError> {
    let workdir = tempfile::tempdir()?;
    tracing::debug!(remote = %settings.remote_url, branch = %settings.branch, "Cloning trigger repository");

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(remote_callbacks(settings.token.as_deref()));
    let repo = RepoBuilder::new()
        .branch(&settings.branch)
        .fetch_options(fetch_options)
        .clone(&settings.remote_url, workdir.path())?;

    let file = workdir.path().join(&settings.job_path);
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file, contents)?;

    let commit = commit_job(&repo, settings, message)?;
    push(&repo, settings)?;
    Ok(commit)
}

fn commit_job(
    repo: &Repository,
    settings: &PublisherSettings,
    message: &str,
) -> Result<Oid, GitError> {
    let mut index = repo.index()?;
    index.add_path(&settings.job_path)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let parent = repo.head()?.peel_to_commit()?;
    let signature = Signature::now(&settings.author_name, &settings.author_email)?;
    Ok(repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &[&parent],
    )?)
}

fn push(repo: &Repository, settings: &PublisherSettings) -> Result<(), GitError> {
    let mut remote = repo.find_remote("origin")?;
    let refspec = format!("refs/heads/{0}:refs/heads/{0}", settings.branch);

    let rejection: Rc<RefCell<Option<(String, String)>>> = Rc::new(RefCell::new(None));
    let rejection_clone = Rc::clone(&rejection);

    let mut callbacks = remote_callbacks(settings.token.as_deref());
    callbacks.push_update_reference(move |refname, status| {
        if let Some(msg) = status {
            *rejection_clone.borrow_mut() = Some((refname.to_string(), msg.to_string()));
        }
        Ok(())
    });

    let mut push_options = PushOptions::new();
    push_options.remote_callbacks(callbacks);
    remote.push(&[refspec.as_str()], Some(&mut push_options))?;

    let rejected = rejection.borrow_mut().take();
    if let Some((refname, message)) = rejected {
        return Err(GitError::Rejected { refname, message });
    }
    Ok(())
}

/// Token authentication that gives up after one rejected attempt instead of
/// letting libgit2 ask again forever.
fn remote_callbacks(token: Option<&str>) -> RemoteCallbacks<'_> {
    let mut callbacks = RemoteCallbacks::new();
    if let Some(token) = token {
        let mut attempted = false;
        callbacks.credentials(move |_url, _username, _allowed| {
            if attempted {
                return Err(git2::Error::from_str("token was rejected by the remote"));
            }
            attempted = true;
            Cred::userpass_plaintext(TOKEN_USERNAME, token)
        });
    }
    callbacks
}
