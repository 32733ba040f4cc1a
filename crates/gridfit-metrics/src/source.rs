//! Node metrics sources.
//!
//! Anything that talks to a cluster (credentials, kubeconfig contexts,
//! subprocesses) stays behind `MetricsSource`; the planner is never
//! reachable from here and never reaches back.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{MetricsError, MetricsResult};
use crate::node_metrics::NodeMetricsList;

/// API path of the node metrics listing.
pub const NODE_METRICS_PATH: &str = "/apis/metrics.k8s.io/v1beta1/nodes";

/// Produces a node metrics listing.
pub trait MetricsSource {
    fn fetch(&self) -> MetricsResult<NodeMetricsList>;
}

/// Reads a `NodeMetricsList` JSON document from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSource for FileSource {
    fn fetch(&self) -> MetricsResult<NodeMetricsList> {
        debug!(path = %self.path.display(), "reading node metrics");
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(NodeMetricsList::from_json(&raw)?)
    }
}

/// Queries the metrics API through `kubectl get --raw`, reusing whatever
/// kubeconfig and credentials kubectl is set up with.
#[derive(Debug, Clone)]
pub struct KubectlSource {
    binary: PathBuf,
    context: Option<String>,
}

impl Default for KubectlSource {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("kubectl"),
            context: None,
        }
    }
}

impl KubectlSource {
    pub fn new(context: Option<String>) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Use a kubectl binary other than the one on `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(context) = &self.context {
            cmd.arg("--context").arg(context);
        }
        cmd.arg("get").arg("--raw").arg(NODE_METRICS_PATH);
        cmd
    }
}

impl MetricsSource for KubectlSource {
    fn fetch(&self) -> MetricsResult<NodeMetricsList> {
        let mut cmd = self.command();
        debug!("Running: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| MetricsError::Command(format!("failed to run {}: {e}", self.binary.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MetricsError::Command(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_source_reads_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        std::fs::write(
            &path,
            r#"{"items": [{"metadata": {"name": "n1"}, "usage": {"cpu": "1000000n", "memory": "512Ki"}}]}"#,
        )
        .unwrap();

        let list = FileSource::new(&path).fetch().unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].name(), "n1");
    }

    #[test]
    fn file_source_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json")).fetch().unwrap_err();
        assert!(matches!(err, MetricsError::Io(_)));
    }

    #[test]
    fn file_source_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSource::new(&path).fetch().unwrap_err();
        assert!(matches!(err, MetricsError::Parse(_)));
    }

    #[test]
    fn kubectl_command_line() {
        let cmd = KubectlSource::new(Some("staging".to_string())).command();
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(cmd.get_program(), "kubectl");
        assert_eq!(args, vec!["--context", "staging", "get", "--raw", NODE_METRICS_PATH]);
    }

    #[test]
    fn missing_kubectl_binary_is_command_error() {
        let source = KubectlSource::default().with_binary("/nonexistent/gridfit-kubectl");
        assert!(matches!(source.fetch(), Err(MetricsError::Command(_))));
    }
}
