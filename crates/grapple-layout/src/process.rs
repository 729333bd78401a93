//! External layout programs
//!
//! The request is written to the program's stdin as JSON and the response is
//! read from its stdout, so any layout engine with a small wrapper script
//! (ELK, Graphviz, ...) can act as an oracle.

use crate::{LayoutOracle, LayoutRequest, LayoutResponse, OracleError};
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Oracle backed by an external program speaking JSON over stdin/stdout
///
/// # Examples
///
/// ```no_run
/// use grapple_layout::ProcessOracle;
///
/// let oracle = ProcessOracle::new("node").arg("scripts/elk-layout.js");
/// ```
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    program: String,
    args: Vec<String>,
}

impl ProcessOracle {
    /// Create an oracle running `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program being run
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl LayoutOracle for ProcessOracle {
    type Error = OracleError;

    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResponse, Self::Error> {
        let payload = serde_json::to_vec(&request)?;
        debug!(program = %self.program, bytes = payload.len(), "Running layout process");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("layout process stdin unavailable"))?;

        // Feed stdin while draining stdout so neither side blocks on a full pipe
        let write = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(OracleError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            // A successful program may answer without reading the whole request
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!(program = %self.program, "Layout process closed stdin early");
            }
            other => other?,
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{LayoutOptions, OracleNode};

    fn request() -> LayoutRequest {
        LayoutRequest {
            nodes: vec![OracleNode {
                id: "a".to_string(),
                width: 180.0,
                height: 60.0,
            }],
            edges: vec![],
            layout_options: LayoutOptions::default(),
        }
    }

    fn shell(script: &str) -> ProcessOracle {
        ProcessOracle::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_reads_response_from_stdout() {
        let oracle = shell(r#"cat > /dev/null; echo '{"nodes":[{"id":"a","x":5,"y":7}]}'"#);
        let response = oracle.layout(request()).await.unwrap();
        assert_eq!(response.nodes[0].id, "a");
        assert_eq!(response.nodes[0].x, 5.0);
        assert_eq!(response.nodes[0].y, 7.0);
    }

    #[tokio::test]
    async fn test_request_is_sent_on_stdin() {
        // Only answers when the serialized request arrives on stdin
        let oracle = shell(
            r#"grep -q '"layoutOptions"' && echo '{"nodes":[{"id":"a","x":0,"y":0}]}'"#,
        );
        let response = oracle.layout(request()).await.unwrap();
        assert_eq!(response.nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_answer_without_reading_large_request() {
        let mut large = request();
        large.nodes = (0..20_000)
            .map(|i| OracleNode {
                id: format!("node-{i:05}"),
                width: 180.0,
                height: 60.0,
            })
            .collect();

        // Exits without touching stdin, so the write side sees a closed pipe
        let oracle = shell(r#"echo '{"nodes":[{"id":"node-00000","x":1,"y":2}]}'"#);
        let response = oracle.layout(large).await.unwrap();
        assert_eq!(response.nodes.len(), 1);
        assert_eq!(response.nodes[0].x, 1.0);
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let oracle = shell("cat > /dev/null; echo boom >&2; exit 3");
        match oracle.layout(request()).await {
            Err(OracleError::ProcessFailed { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("expected ProcessFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_output() {
        let oracle = shell("cat > /dev/null; echo not-json");
        assert!(matches!(
            oracle.layout(request()).await,
            Err(OracleError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let oracle = ProcessOracle::new("/nonexistent/grapple-layout-engine");
        assert!(matches!(oracle.layout(request()).await, Err(OracleError::Process(_))));
    }
}
