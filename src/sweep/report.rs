use crate::config::SweepConfig;
use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Throughput measurements collected over one sweep: one row per tool,
/// one column per concurrency level.
#[derive(Debug, Clone)]
pub struct ResultTable {
    concurrencies: Vec<u32>,
    rows: IndexMap<String, Vec<f64>>,
}

impl ResultTable {
    pub fn new(concurrencies: Vec<u32>) -> Self {
        Self {
            concurrencies,
            rows: IndexMap::new(),
        }
    }

    /// Append one measurement to a tool's row. Rows stay positionally
    /// aligned with the concurrency sequence because the driver pushes
    /// every tool exactly once per level.
    pub fn push(&mut self, tool: &str, throughput: f64) {
        self.rows.entry(tool.to_string()).or_default().push(throughput);
    }

    pub fn concurrencies(&self) -> &[u32] {
        &self.concurrencies
    }

    pub fn get(&self, tool: &str) -> Option<&[f64]> {
        self.rows.get(tool).map(|row| row.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.rows.iter().map(|(name, row)| (name.as_str(), row.as_slice()))
    }

    /// The tab-separated comparison table: a `concurrency` header row,
    /// then one row per tool in insertion order.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("concurrency");
        for c in &self.concurrencies {
            out.push('\t');
            out.push_str(&c.to_string());
        }
        out.push('\n');

        for (name, row) in &self.rows {
            out.push_str(name);
            for value in row {
                out.push('\t');
                out.push_str(&format_throughput(*value));
            }
            out.push('\n');
        }

        out
    }

    /// Save the sweep as a JSON report alongside the TSV on stdout.
    pub fn save_report(&self, path: &Path, config: &SweepConfig) -> Result<()> {
        let report = SweepReport {
            generated_at: Utc::now(),
            url: config.url.clone(),
            requests: config.requests,
            concurrencies: self.concurrencies.clone(),
            tools: self
                .rows
                .iter()
                .map(|(name, row)| ToolRow {
                    name: name.clone(),
                    throughput: row.clone(),
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SweepReport {
    generated_at: DateTime<Utc>,
    url: String,
    requests: u64,
    concurrencies: Vec<u32>,
    tools: Vec<ToolRow>,
}

#[derive(Debug, Serialize)]
struct ToolRow {
    name: String,
    throughput: Vec<f64>,
}

/// Whole numbers keep one decimal place (`100.0`, not `100`) so the
/// table reads as throughput rather than a count.
fn format_throughput(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tab_separated_rows() {
        let mut table = ResultTable::new(vec![1, 10]);
        table.push("ab", 100.0);
        table.push("ab", 95.5);
        assert_eq!(table.render(), "concurrency\t1\t10\nab\t100.0\t95.5\n");
    }

    #[test]
    fn renders_tools_in_insertion_order() {
        let mut table = ResultTable::new(vec![1]);
        table.push("hey", 75.0);
        table.push("ab", 50.0);
        table.push("go-ab", 60.25);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec![
            "concurrency\t1",
            "hey\t75.0",
            "ab\t50.0",
            "go-ab\t60.25",
        ]);
    }

    #[test]
    fn formats_whole_and_fractional_throughput() {
        assert_eq!(format_throughput(100.0), "100.0");
        assert_eq!(format_throughput(0.0), "0.0");
        assert_eq!(format_throughput(1234.56), "1234.56");
        assert_eq!(format_throughput(95.5), "95.5");
    }
}
