use anyhow::{Context, Result};
use std::process::Command;

/// What came back from one tool invocation.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Combined stdout and stderr text.
    pub text: String,
    pub success: bool,
}

/// Seam between the sweep driver and the operating system, so the driver
/// can be tested against canned output without spawning anything.
pub trait ProcessRunner {
    fn invoke(&self, command: &str, args: &[String]) -> Result<ProcessOutput>;
}

/// Production runner: spawns the tool and blocks until it exits.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn invoke(&self, command: &str, args: &[String]) -> Result<ProcessOutput> {
        let output = Command::new(command)
            .args(args)
            .output()
            .with_context(|| format!("Failed to launch '{}'", command))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            text,
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_launch_error() {
        let result = SystemRunner.invoke("loadsweep-no-such-binary", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn captures_combined_output() {
        // `sh` is a safe bet on any unix test host
        let args = vec![
            "-c".to_string(),
            "echo to-stdout; echo to-stderr 1>&2".to_string(),
        ];
        let output = SystemRunner.invoke("sh", &args).unwrap();
        assert!(output.success);
        assert!(output.text.contains("to-stdout"));
        assert!(output.text.contains("to-stderr"));
    }

    #[test]
    fn nonzero_exit_still_returns_output() {
        let args = vec!["-c".to_string(), "echo partial; exit 3".to_string()];
        let output = SystemRunner.invoke("sh", &args).unwrap();
        assert!(!output.success);
        assert!(output.text.contains("partial"));
    }
}
