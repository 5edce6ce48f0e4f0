//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::runner::{default_suite, Executor, SuiteEntry};
use crate::schema::Document;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                operation,
                seed,
                max_examples,
            } => {
                self.execute(operation.as_deref(), *seed, *max_examples)
                    .await
            }
            Commands::List => self.list(),
            Commands::Schema => self.schema().await,
        }
    }

    /// Resolve the run config from file and flag overrides
    fn resolve_config(&self) -> Result<RunConfig> {
        let mut config = match &self.cli.config {
            Some(path) => RunConfig::from_yaml_file(path)?,
            None => {
                let base_url = self
                    .cli
                    .base_url
                    .clone()
                    .ok_or_else(|| Error::config("no config file given; --base-url is required"))?;
                RunConfig::new(base_url)
            }
        };
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(schema_url) = &self.cli.schema_url {
            config.schema_url = Some(schema_url.clone());
        }
        config.validate()?;
        Ok(config)
    }

    async fn execute(
        &self,
        operation: Option<&str>,
        seed: Option<u64>,
        max_examples: Option<usize>,
    ) -> Result<()> {
        let mut config = self.resolve_config()?;
        if let Some(seed) = seed {
            config.seed = Some(seed);
        }
        if let Some(count) = max_examples {
            config.max_examples = count;
        }

        let suite = select_suite(operation)?;
        let mut executor = Executor::from_config(&config).await?;
        let report = executor.run(&suite).await?;

        println!(
            "executed {} cases, {} passed, {} failed (seed {})",
            report.executed,
            report.passed,
            report.failures.len(),
            report.seed
        );
        for failure in &report.failures {
            println!("FAIL {failure}");
        }

        if report.is_success() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} case(s) failed",
                report.failures.len()
            )))
        }
    }

    fn list(&self) -> Result<()> {
        for entry in default_suite() {
            let modes = if entry.negative {
                "positive+negative"
            } else {
                "positive"
            };
            let auth = if entry.auth { "auth" } else { "open" };
            println!("{:<22} {:<6} {}", entry.operation_id, auth, modes);
        }
        Ok(())
    }

    async fn schema(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let client = HttpClient::new(&config.base_url, config.timeout())?;
        let document = Document::fetch(client.inner(), &config.schema_url()).await?;
        for op in document.operations()? {
            let statuses: Vec<&str> = op.responses.keys().map(String::as_str).collect();
            println!(
                "{:<22} {:<6} {:<28} [{}]",
                op.operation_id,
                op.method,
                op.path,
                statuses.join(", ")
            );
        }
        Ok(())
    }
}

/// The whole registration table, or a single entry by operation ID
fn select_suite(operation: Option<&str>) -> Result<Vec<SuiteEntry>> {
    let suite = default_suite();
    match operation {
        None => Ok(suite),
        Some(id) => {
            let entry = suite
                .into_iter()
                .find(|e| e.operation_id == id)
                .ok_or_else(|| Error::operation_not_found(id))?;
            Ok(vec![entry])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_suite_full() {
        assert_eq!(select_suite(None).unwrap().len(), 10);
    }

    #[test]
    fn test_select_suite_single() {
        let suite = select_suite(Some("patch-user")).unwrap();
        assert_eq!(suite.len(), 1);
        assert!(suite[0].auth);
    }

    #[test]
    fn test_select_suite_unknown() {
        assert!(select_suite(Some("nope")).is_err());
    }
}
