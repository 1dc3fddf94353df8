use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use adrscope_core::ingest::fixtures as lines;

/// Assembles a synthetic simulation log and writes it to a temp dir.
#[derive(Debug, Default)]
pub struct LogBuilder {
    /// (node number, x, y) in table order.
    nodes: Vec<(u32, f64, f64)>,
    events: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location row. Rows become devices 1, 2, ... in the order they
    /// are added; `node` is only the number printed on the row.
    pub fn device(mut self, node: u32, x: f64, y: f64) -> Self {
        self.nodes.push((node, x, y));
        self
    }

    pub fn event(mut self, line: impl Into<String>) -> Self {
        self.events.push(line.into());
        self
    }

    pub fn render(&self) -> String {
        let mut out = vec![
            "Creating gateway helper".to_string(),
            "Installing applications".to_string(),
            "LOCATIONS START".to_string(),
        ];
        out.extend(
            self.nodes
                .iter()
                .map(|(node, x, y)| format!("{node} {x} {y} 1.2")),
        );
        out.push("LOCATIONS END".to_string());
        out.extend(self.events.iter().cloned());
        out.join("\n") + "\n"
    }

    /// Writes the log as `sim.log` inside a fresh temp dir. Keep the
    /// `TempDir` alive for as long as the file is needed.
    pub fn write(&self) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("sim.log");
        write_file(&path, &self.render());
        (dir, path)
    }
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("failed to write log fixture");
}
