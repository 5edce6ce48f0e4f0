//! Case execution and conformance checking

use super::report::{CaseFailure, RunReport};
use super::suite::SuiteEntry;
use crate::auth::{AuthProvider, CookieAuthProvider};
use crate::config::RunConfig;
use crate::error::Result;
use crate::generate::{Case, Generator};
use crate::http::{HttpClient, HttpResponse};
use crate::schema::{validate, Document, Operation};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes registered suites against the live service
pub struct Executor {
    document: Document,
    client: HttpClient,
    auth: Arc<dyn AuthProvider>,
    generator: Generator,
    max_examples: usize,
}

impl Executor {
    /// Assemble an executor from parts (tests build one around a mock
    /// server this way)
    pub fn new(
        document: Document,
        client: HttpClient,
        auth: Arc<dyn AuthProvider>,
        generator: Generator,
        max_examples: usize,
    ) -> Self {
        Self {
            document,
            client,
            auth,
            generator,
            max_examples,
        }
    }

    /// Build an executor from the run config, fetching the OpenAPI
    /// document from the service
    pub async fn from_config(config: &RunConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config.base_url, config.timeout())?;
        let document = Document::fetch(client.inner(), &config.schema_url()).await?;
        let auth = Arc::new(CookieAuthProvider::new(config, client.inner().clone()));
        let generator = Generator::new(config.seed);
        Ok(Self::new(
            document,
            client,
            auth,
            generator,
            config.max_examples,
        ))
    }

    /// The document this executor resolved at startup
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Run every entry, aggregating all case outcomes.
    ///
    /// Acquisition failure is terminal for the run: every authenticated
    /// entry depends on the same credential, so there is nothing useful
    /// left to execute.
    pub async fn run(&mut self, suite: &[SuiteEntry]) -> Result<RunReport> {
        let mut report = RunReport::new(self.generator.seed());
        for entry in suite {
            self.run_entry(entry, &mut report).await?;
        }
        info!(
            executed = report.executed,
            passed = report.passed,
            failed = report.failures.len(),
            seed = report.seed,
            "run complete"
        );
        Ok(report)
    }

    async fn run_entry(&mut self, entry: &SuiteEntry, report: &mut RunReport) -> Result<()> {
        let operation = self.document.operation(&entry.operation_id)?;
        let credential = if entry.auth {
            Some(self.auth.acquire().await?)
        } else {
            None
        };

        info!(operation = %entry.operation_id, auth = entry.auth, "running entry");
        for mode in entry.modes() {
            for _ in 0..self.max_examples {
                let mut case = self.generator.generate(&operation, mode);
                if let Some(credential) = &credential {
                    self.auth.apply(&mut case, credential);
                }

                match self.client.execute(&case).await {
                    Ok(response) => check_conformance(&operation, &case, &response, report),
                    Err(e) => {
                        warn!(operation = %entry.operation_id, error = %e, "transport failure");
                        report.record_failure(CaseFailure {
                            operation_id: case.operation_id.clone(),
                            mode: case.mode,
                            case: case.summary(),
                            reason: format!("transport error: {e}"),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Check one response against the operation's declared contract
fn check_conformance(
    operation: &Operation,
    case: &Case,
    response: &HttpResponse,
    report: &mut RunReport,
) {
    if !operation.declares_status(response.status) {
        report.record_failure(CaseFailure {
            operation_id: case.operation_id.clone(),
            mode: case.mode,
            case: case.summary(),
            reason: format!("undeclared response status {}", response.status),
        });
        return;
    }

    if let Some(schema) = operation.response_schema(response.status) {
        let Some(body) = response.json() else {
            report.record_failure(CaseFailure {
                operation_id: case.operation_id.clone(),
                mode: case.mode,
                case: case.summary(),
                reason: format!(
                    "status {} declares a JSON body but response was not JSON",
                    response.status
                ),
            });
            return;
        };
        let violations = validate(&body, schema);
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            report.record_failure(CaseFailure {
                operation_id: case.operation_id.clone(),
                mode: case.mode,
                case: case.summary(),
                reason: format!("response body violates schema: {}", details.join("; ")),
            });
            return;
        }
    }

    report.record_pass();
}
