use crate::config::SweepConfig;
use crate::sweep::process::ProcessRunner;
use crate::sweep::report::ResultTable;
use crate::sweep::tools::ToolDescriptor;
use crate::ui::progress::sweep_progress_bar;
use anyhow::{Context, Result};
use tokio::time::sleep;

/// Runs the whole measurement sweep: every tool once per concurrency
/// level, strictly one subprocess at a time.
pub struct SweepDriver<'a, R: ProcessRunner> {
    config: &'a SweepConfig,
    tools: &'a [ToolDescriptor],
    runner: R,
}

impl<'a, R: ProcessRunner> SweepDriver<'a, R> {
    pub fn new(config: &'a SweepConfig, tools: &'a [ToolDescriptor], runner: R) -> Self {
        Self {
            config,
            tools,
            runner,
        }
    }

    pub async fn run(&self) -> Result<ResultTable> {
        let concurrencies = self.config.concurrency_sequence();
        let mut table = ResultTable::new(concurrencies.clone());

        let pb = sweep_progress_bar(concurrencies.len() as u64);
        for (i, &concurrency) in concurrencies.iter().enumerate() {
            pb.set_message(format!("concurrency: {}", concurrency));

            for tool in self.tools {
                let throughput = self.measure(tool, concurrency)?;
                table.push(&tool.name, throughput);
            }

            pb.inc(1);

            // Let the backend settle before the next burst; no point
            // sleeping after the final level.
            if self.config.interval > 0.0 && i + 1 < concurrencies.len() {
                sleep(self.config.interval_duration()).await;
            }
        }
        pb.finish_and_clear();

        Ok(table)
    }

    fn measure(&self, tool: &ToolDescriptor, concurrency: u32) -> Result<f64> {
        let args = tool.argv(self.config.requests, concurrency, &self.config.url);
        let output = self
            .runner
            .invoke(&tool.command, &args)
            .with_context(|| format!("Running {} at concurrency {}", tool.name, concurrency))?;

        // A tool that exited non-zero usually just has no throughput
        // line; either way a miss records as zero and the sweep goes on.
        Ok(tool.extract(&output.text).unwrap_or(0.0))
    }
}
