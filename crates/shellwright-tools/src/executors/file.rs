//! File executor - read, write and delete

use crate::dispatcher::Executor;
use crate::error::{Error, Result};
use crate::invocation::{required_str, Parameters};
use crate::paths::normalize_path;
use crate::schema::Capability;
use tracing::debug;

/// Executes `file` invocations
///
/// Paths are normalized before any filesystem access, for every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExecutor;

impl FileExecutor {
    /// Create a new file executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Executor for FileExecutor {
    fn capability(&self) -> Capability {
        Capability::File
    }

    async fn execute(&self, parameters: Parameters) -> Result<String> {
        let action = required_str(&parameters, Capability::File, "action")?;
        let raw_path = required_str(&parameters, Capability::File, "path")?;
        let path = normalize_path(raw_path);

        debug!(action = %action, path = %path.display(), "File operation");

        match action {
            "read" => Ok(tokio::fs::read_to_string(&path).await?),
            "write" => {
                let content = required_str(&parameters, Capability::File, "content")?;
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, content).await?;
                Ok(format!("Successfully wrote to {}", path.display()))
            }
            "delete" => {
                let metadata = match tokio::fs::symlink_metadata(&path).await {
                    Ok(metadata) => metadata,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Ok(format!("File does not exist: {}", path.display()));
                    }
                    Err(e) => return Err(Error::Io(e)),
                };
                // Directories are only removed when empty
                if metadata.is_dir() {
                    tokio::fs::remove_dir(&path).await?;
                } else {
                    tokio::fs::remove_file(&path).await?;
                }
                Ok(format!("Successfully deleted {}", path.display()))
            }
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}
