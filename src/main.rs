use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell as CompShell};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Instant;

use loadsweep::config::SweepConfig;
use loadsweep::sweep::tools::{builtin_tools, load_tool_file};
use loadsweep::sweep::{SweepDriver, SystemRunner};

#[derive(Parser)]
#[command(name = "loadsweep")]
#[command(version = "0.1.0")]
#[command(about = "Compare HTTP load generators across a concurrency sweep")]
#[command(long_about = None)]
struct Cli {
    /// Target URL
    #[arg(short = 'u', long = "url", default_value = "http://127.0.0.1:8000/")]
    url: String,
    /// Requests per tool invocation
    #[arg(short = 'n', long = "requests", default_value_t = 1000)]
    requests: u64,
    /// Maximum concurrency
    #[arg(short = 'c', long = "max-concurrency", default_value_t = 100)]
    max_concurrency: u32,
    /// Concurrency step size
    #[arg(short = 's', long = "step", default_value_t = 10)]
    step: u32,
    /// Delay between concurrency levels, in seconds
    #[arg(short = 'i', long = "interval", default_value_t = 30.0)]
    interval: f64,
    /// YAML file overriding the built-in tool set
    #[arg(long = "tools")]
    tools: Option<PathBuf>,
    /// Also save a JSON report of the sweep
    #[arg(long = "output")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions (internal)
    #[command(hide = true)]
    Completions {
        /// Shell: bash, zsh, fish
        shell: String,
    },
    /// Generate man page (internal)
    #[command(hide = true)]
    Man,
}

fn print_banner() {
    // The banner shares stderr with the progress output; stdout carries
    // nothing but the report.
    if atty::is(atty::Stream::Stderr) {
        eprintln!(
            "{}",
            "loadsweep v0.1.0 — HTTP load generator comparison".cyan()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            let sh = match shell.as_str() {
                "bash" => CompShell::Bash,
                "zsh" => CompShell::Zsh,
                "fish" => CompShell::Fish,
                "powershell" | "pwsh" => CompShell::PowerShell,
                "elvish" => CompShell::Elvish,
                other => {
                    eprintln!(
                        "Unsupported shell: {} (use bash|zsh|fish|powershell|elvish)",
                        other
                    );
                    std::process::exit(2);
                }
            };
            generate(sh, &mut cmd, name, &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Man) => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            man.render(&mut std::io::stdout())?;
            return Ok(());
        }
        None => {}
    }

    print_banner();

    let config = SweepConfig {
        url: cli.url,
        requests: cli.requests,
        max_concurrency: cli.max_concurrency,
        step: cli.step,
        interval: cli.interval,
    };
    config.validate()?;

    let tools = match &cli.tools {
        Some(path) => load_tool_file(path)?,
        None => builtin_tools()?,
    };

    eprintln!(
        "Sweeping {} with {} tool(s), {} requests per run",
        config.url.bright_white(),
        tools.len(),
        config.requests
    );

    let started = Instant::now();
    let driver = SweepDriver::new(&config, &tools, SystemRunner);
    let table = driver.run().await?;

    print!("{}", table.render());

    if let Some(path) = &cli.output {
        table.save_report(path, &config)?;
        eprintln!("{} Report saved to {}", "✔".green(), path.display());
    }

    eprintln!(
        "{} Sweep completed in {:.1}s",
        "✔".green().bold(),
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
