//! Schema source backed by a blob in a local git repository.

use super::{SchemaSource, SchemeParams, SourceError};
use git2::{Commit, ErrorCode, ObjectType, Repository};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

const SCHEME: &str = "local-git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    repository: PathBuf,
    file: String,
    commitish: Option<String>,
}

impl GitSource {
    pub fn new(
        repository: impl Into<PathBuf>,
        file: impl Into<String>,
        commitish: Option<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            file: file.into(),
            commitish,
        }
    }

    /// Build from `local-git://<repo-path>?file=<in-repo-path>[&commitish=<ref>]`.
    ///
    /// A non-empty authority is read as the first component of a relative
    /// repository path, so `local-git://repo?file=x.sql` names `./repo`.
    pub fn from_url(identifier: &str, url: &Url) -> Result<Self, SourceError> {
        let path = urlencoding::decode(url.path())
            .map_err(|_| SourceError::invalid(identifier, "repository path is not valid UTF-8"))?;
        let repository = match url.host_str().filter(|host| !host.is_empty()) {
            Some(host) => format!("{host}{path}"),
            None => path.into_owned(),
        };
        if repository.is_empty() {
            return Err(SourceError::MissingParameter {
                scheme: SCHEME,
                name: "repository path",
            });
        }

        let params = SchemeParams::from_query(url.query().unwrap_or(""));
        params.reject_unknown(SCHEME, &["file", "commitish"])?;
        let file = params.require(SCHEME, "file")?;
        let file = file.trim_start_matches('/');
        if file.is_empty() {
            return Err(SourceError::InvalidParameter {
                scheme: SCHEME,
                name: "file".to_string(),
                reason: "must name a file inside the repository".to_string(),
            });
        }

        Ok(Self::new(
            repository,
            file,
            params.get("commitish").map(str::to_string),
        ))
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn commitish(&self) -> Option<&str> {
        self.commitish.as_deref()
    }

    fn resolve_commit<'r>(&self, repo: &'r Repository) -> Result<Commit<'r>, SourceError> {
        let resolved = match &self.commitish {
            Some(rev) => repo
                .revparse_single(rev)
                .and_then(|object| object.peel_to_commit()),
            None => repo.head().and_then(|head| head.peel_to_commit()),
        };
        resolved.map_err(|err| SourceError::RefNotFound {
            commitish: self.commitish.as_deref().unwrap_or("HEAD").to_string(),
            message: err.message().to_string(),
        })
    }

    fn repository_error(&self, err: git2::Error) -> SourceError {
        SourceError::Repository {
            path: self.repository.clone(),
            message: err.message().to_string(),
        }
    }
}

impl SchemaSource for GitSource {
    fn write_schema(&self, sink: &mut dyn Write) -> Result<u64, SourceError> {
        let repo =
            Repository::open(&self.repository).map_err(|err| SourceError::RepositoryOpen {
                path: self.repository.clone(),
                message: err.message().to_string(),
            })?;

        let commit = self.resolve_commit(&repo)?;
        let commit_id = commit.id().to_string();
        debug!(commit = %commit_id, file = %self.file, "resolved commit");

        let tree = commit.tree().map_err(|err| self.repository_error(err))?;
        let entry = tree
            .get_path(Path::new(&self.file))
            .map_err(|err| match err.code() {
                ErrorCode::NotFound => SourceError::PathNotFound {
                    path: self.file.clone(),
                    commit: commit_id.clone(),
                },
                _ => self.repository_error(err),
            })?;

        if entry.kind() != Some(ObjectType::Blob) {
            return Err(SourceError::NotABlob {
                path: self.file.clone(),
                commit: commit_id,
            });
        }

        let blob = repo
            .find_blob(entry.id())
            .map_err(|err| self.repository_error(err))?;
        sink.write_all(blob.content())
            .map_err(|source| SourceError::Io {
                what: "repository blob",
                source,
            })?;

        debug!(bytes = blob.size(), "read schema blob");
        Ok(blob.size() as u64)
    }
}

impl fmt::Display for GitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}://{}?file={}",
            self.repository.display(),
            self.file
        )?;
        if let Some(commitish) = &self.commitish {
            write!(f, "&commitish={commitish}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use std::fs;
    use tempfile::TempDir;

    fn parse(identifier: &str) -> Result<GitSource, SourceError> {
        GitSource::from_url(identifier, &Url::parse(identifier).unwrap())
    }

    fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
        let workdir = repo.workdir().unwrap();
        let path = workdir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Schema Author", "author@example.com").unwrap();

        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn read(source: &GitSource) -> Result<String, SourceError> {
        let mut buf = Vec::new();
        source.write_schema(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_parse_identifier() {
        let source =
            parse("local-git:///srv/repo?file=db/schema.sql&commitish=release-1").unwrap();
        assert_eq!(source.repository(), Path::new("/srv/repo"));
        assert_eq!(source.file(), "db/schema.sql");
        assert_eq!(source.commitish(), Some("release-1"));
    }

    #[test]
    fn test_parse_without_commitish() {
        let source = parse("local-git:///srv/repo?file=schema.sql").unwrap();
        assert_eq!(source.commitish(), None);

        let source = parse("local-git:///srv/repo?file=schema.sql&commitish=").unwrap();
        assert_eq!(source.commitish(), None);
    }

    #[test]
    fn test_parse_decodes_path() {
        let source = parse("local-git:///srv/my%20repo?file=%2Fschema.sql").unwrap();
        assert_eq!(source.repository(), Path::new("/srv/my repo"));
        assert_eq!(source.file(), "schema.sql");
    }

    #[test]
    fn test_parse_requires_file() {
        let err = parse("local-git:///srv/repo?commitish=main").unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingParameter { name: "file", .. }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_parameter() {
        let err = parse("local-git:///srv/repo?file=a.sql&branch=main").unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn test_read_head_and_explicit_commit() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let first = commit_file(&repo, "schema.sql", "CREATE TABLE a (id INT);\n", "first");
        let second = commit_file(&repo, "schema.sql", "CREATE TABLE b (id INT);\n", "second");

        let head = GitSource::new(dir.path(), "schema.sql", None);
        let pinned = GitSource::new(dir.path(), "schema.sql", Some(second.to_string()));
        let old = GitSource::new(dir.path(), "schema.sql", Some(first.to_string()));

        assert_eq!(read(&head).unwrap(), "CREATE TABLE b (id INT);\n");
        assert_eq!(read(&head).unwrap(), read(&pinned).unwrap());
        assert_eq!(read(&old).unwrap(), "CREATE TABLE a (id INT);\n");
    }

    #[test]
    fn test_read_nested_path_and_short_ref() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_file(&repo, "db/schema.sql", "CREATE TABLE t (id INT);\n", "init");

        let short = oid.to_string()[..8].to_string();
        let source = GitSource::new(dir.path(), "db/schema.sql", Some(short));
        assert_eq!(read(&source).unwrap(), "CREATE TABLE t (id INT);\n");
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "schema.sql", "CREATE TABLE t (id INT);\n", "init");

        let err = read(&GitSource::new(dir.path(), "missing.sql", None)).unwrap_err();
        assert!(matches!(err, SourceError::PathNotFound { .. }), "{err:?}");
    }

    #[test]
    fn test_directory_path_is_not_a_blob() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "db/schema.sql", "CREATE TABLE t (id INT);\n", "init");

        let err = read(&GitSource::new(dir.path(), "db", None)).unwrap_err();
        assert!(matches!(err, SourceError::NotABlob { .. }), "{err:?}");
    }

    #[test]
    fn test_unknown_ref() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "schema.sql", "CREATE TABLE t (id INT);\n", "init");

        let source = GitSource::new(dir.path(), "schema.sql", Some("no-such-branch".into()));
        let err = read(&source).unwrap_err();
        assert!(matches!(err, SourceError::RefNotFound { .. }), "{err:?}");
    }

    #[test]
    fn test_unborn_head_is_ref_not_found() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();

        let err = read(&GitSource::new(dir.path(), "schema.sql", None)).unwrap_err();
        assert!(
            matches!(err, SourceError::RefNotFound { ref commitish, .. } if commitish == "HEAD")
        );
    }

    #[test]
    fn test_not_a_repository() {
        let dir = TempDir::new().unwrap();
        let err = read(&GitSource::new(dir.path(), "schema.sql", None)).unwrap_err();
        assert!(matches!(err, SourceError::RepositoryOpen { .. }), "{err:?}");
    }
}
