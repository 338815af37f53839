use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

const AB_PATTERN: &str = r"Requests per second:\s+([\d.]+)\s+\[#/sec\]";
const HEY_PATTERN: &str = r"Requests/sec:\s+([\d.]+)";

/// One external load generator: how to invoke it and how to read its
/// self-reported throughput back out of its output.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub command: String,
    pub extra_args: Vec<String>,
    pattern: Regex,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        extra_args: Vec<String>,
        pattern: &str,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid throughput pattern for tool '{}'", name))?;
        Ok(Self {
            name,
            command: command.into(),
            extra_args,
            pattern,
        })
    }

    /// Argument vector for one invocation. All supported tools share the
    /// `-n <requests> -c <concurrency> <url>` convention; anything
    /// tool-specific (like ab's `-q`) goes in front via `extra_args`.
    pub fn argv(&self, requests: u64, concurrency: u32, url: &str) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push("-n".to_string());
        args.push(requests.to_string());
        args.push("-c".to_string());
        args.push(concurrency.to_string());
        args.push(url.to_string());
        args
    }

    /// Pull the requests-per-second figure out of the tool's output.
    /// `None` when no line matches or the capture is not a number.
    pub fn extract(&self, output: &str) -> Option<f64> {
        self.pattern
            .captures(output)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}

/// The stock tool set: Apache `ab`, its Go clone, and `hey`.
pub fn builtin_tools() -> Result<Vec<ToolDescriptor>> {
    Ok(vec![
        ToolDescriptor::new("ab", "ab", vec!["-q".to_string()], AB_PATTERN)?,
        ToolDescriptor::new("go-ab", "go-ab", vec!["-q".to_string()], AB_PATTERN)?,
        ToolDescriptor::new("hey", "hey", Vec::new(), HEY_PATTERN)?,
    ])
}

#[derive(Debug, Deserialize)]
struct ToolFile {
    tools: Vec<ToolSpec>,
}

#[derive(Debug, Deserialize)]
struct ToolSpec {
    name: String,
    /// Binary to invoke; defaults to the display name.
    command: Option<String>,
    #[serde(default)]
    args: Vec<String>,
    pattern: String,
}

/// Load a custom tool set from a YAML file, replacing the built-in one.
pub fn load_tool_file(path: &Path) -> Result<Vec<ToolDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tool file: {}", path.display()))?;
    let file: ToolFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse tool file: {}", path.display()))?;

    if file.tools.is_empty() {
        anyhow::bail!("Tool file {} defines no tools", path.display());
    }

    file.tools
        .into_iter()
        .map(|spec| {
            let command = spec.command.unwrap_or_else(|| spec.name.clone());
            ToolDescriptor::new(spec.name, command, spec.args, &spec.pattern)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extracts_ab_style_throughput() {
        let tool = ToolDescriptor::new("ab", "ab", vec!["-q".to_string()], AB_PATTERN).unwrap();
        let output = "\
Concurrency Level:      10
Time taken for tests:   0.810 seconds
Requests per second:    1234.56 [#/sec] (mean)
Time per request:       8.101 [ms] (mean)";
        assert_eq!(tool.extract(output), Some(1234.56));
    }

    #[test]
    fn extracts_hey_style_throughput() {
        let tool = ToolDescriptor::new("hey", "hey", Vec::new(), HEY_PATTERN).unwrap();
        assert_eq!(tool.extract("Summary:\n  Requests/sec:\t987.65\n"), Some(987.65));
    }

    #[test]
    fn missing_throughput_line_yields_none() {
        let tool = ToolDescriptor::new("ab", "ab", Vec::new(), AB_PATTERN).unwrap();
        assert_eq!(tool.extract("apr_socket_recv: Connection refused (111)"), None);
        assert_eq!(tool.extract(""), None);
    }

    #[test]
    fn argv_places_tool_flags_before_common_ones() {
        let tool = ToolDescriptor::new("ab", "ab", vec!["-q".to_string()], AB_PATTERN).unwrap();
        assert_eq!(
            tool.argv(1000, 25, "http://127.0.0.1:8000/"),
            vec!["-q", "-n", "1000", "-c", "25", "http://127.0.0.1:8000/"]
        );

        let hey = ToolDescriptor::new("hey", "hey", Vec::new(), HEY_PATTERN).unwrap();
        assert_eq!(
            hey.argv(500, 1, "http://x/"),
            vec!["-n", "500", "-c", "1", "http://x/"]
        );
    }

    #[test]
    fn builtin_set_has_three_tools_in_fixed_order() {
        let tools = builtin_tools().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ab", "go-ab", "hey"]);
    }

    #[test]
    fn loads_tool_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tools.yaml");
        fs::write(
            &path,
            r#"
tools:
  - name: wrk
    command: /usr/local/bin/wrk
    args: ["--latency"]
    pattern: 'Requests/sec:\s+([\d.]+)'
  - name: hey
    pattern: 'Requests/sec:\s+([\d.]+)'
"#,
        )
        .unwrap();

        let tools = load_tool_file(&path).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "wrk");
        assert_eq!(tools[0].command, "/usr/local/bin/wrk");
        assert_eq!(tools[0].extra_args, vec!["--latency"]);
        assert_eq!(tools[1].command, "hey");
    }

    #[test]
    fn rejects_empty_or_invalid_tool_files() {
        let temp_dir = TempDir::new().unwrap();

        let empty = temp_dir.path().join("empty.yaml");
        fs::write(&empty, "tools: []\n").unwrap();
        assert!(load_tool_file(&empty).is_err());

        let bad_regex = temp_dir.path().join("bad.yaml");
        fs::write(
            &bad_regex,
            "tools:\n  - name: broken\n    pattern: '([unclosed'\n",
        )
        .unwrap();
        assert!(load_tool_file(&bad_regex).is_err());
    }
}
