use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use mail_cannon_core::{
    Config, MailCannonError, OrderClient, OrderError, OrderRow, RunResult, RunSummary,
    build_payload, load_config, read_orders, validate_rows,
};
use mail_cannon_theseus::TheseusClient;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info};

use crate::logging::{LogSinks, RunLogger};
use crate::summary::write_summary;

/// Pause between consecutive order requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

const BANNER: &str = "============================================================";

/// Process exit codes.
pub mod exit {
    /// Dry run finished, or every order was created.
    pub const SUCCESS: u8 = 0;
    /// At least one order failed to send.
    pub const ORDERS_FAILED: u8 = 1;
    /// The config file is missing or invalid.
    pub const CONFIG: u8 = 3;
    /// The CSV is missing or structurally invalid.
    pub const INPUT: u8 = 4;
    /// One or more rows failed validation.
    pub const VALIDATION: u8 = 5;
    /// The log or results file could not be written.
    pub const OUTPUT: u8 = 6;
}

/// Exit code for a fatal error.
#[must_use]
pub const fn exit_code_for(err: &MailCannonError) -> u8 {
    match err {
        MailCannonError::Config(_) => exit::CONFIG,
        MailCannonError::Input(_) => exit::INPUT,
        MailCannonError::Validation(_) => exit::VALIDATION,
        MailCannonError::Output(_) => exit::OUTPUT,
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
    /// Every row validated and was logged; nothing was sent.
    DryRun {
        /// Rows that would have been sent.
        rows: usize,
    },
    /// Every row was attempted.
    Sent {
        /// Per-row outcomes and totals.
        summary: RunSummary,
        /// Where the summary was written.
        results_file: PathBuf,
    },
}

impl RunReport {
    /// Exit code for a completed run.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Sent { summary, .. } if summary.failed > 0 => exit::ORDERS_FAILED,
            _ => exit::SUCCESS,
        }
    }
}

/// Batch order pipeline: config, CSV, validation, then dry-run logging or sending.
pub struct MailCannon {
    client: Option<Arc<dyn OrderClient>>,
    logger: RunLogger,
    request_delay: Duration,
    dry_run: bool,
}

/// Builder for [`MailCannon`].
pub struct MailCannonBuilder {
    client: Option<Arc<dyn OrderClient>>,
    logger: Option<RunLogger>,
    request_delay: Duration,
    dry_run: bool,
}

impl Default for MailCannonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MailCannonBuilder {
    /// Defaults: Theseus client from the loaded config, 500 ms request delay,
    /// sending enabled, logging to `./logs`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            client: None,
            logger: None,
            request_delay: DEFAULT_REQUEST_DELAY,
            dry_run: false,
        }
    }

    /// Use `client` instead of building a Theseus client from the config.
    #[must_use]
    pub fn client(mut self, client: Arc<dyn OrderClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Logging handle for the run; its directory also receives the results file.
    #[must_use]
    pub fn logger(mut self, logger: RunLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Pause after every request, whatever its outcome.
    #[must_use]
    pub const fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Validate and log payloads without sending.
    #[must_use]
    pub const fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    /// Finish the builder.
    ///
    /// # Errors
    /// Returns [`MailCannonError::Output`] if no logger was supplied and the
    /// default `logs` directory cannot be prepared.
    pub fn build(self) -> Result<MailCannon, MailCannonError> {
        let logger = match self.logger {
            Some(l) => l,
            None => RunLogger::new("logs", LogSinks::default())?,
        };
        Ok(MailCannon {
            client: self.client,
            logger,
            request_delay: self.request_delay,
            dry_run: self.dry_run,
        })
    }
}

impl MailCannon {
    /// Start building a pipeline.
    #[must_use]
    pub const fn builder() -> MailCannonBuilder {
        MailCannonBuilder::new()
    }

    /// Logging handle of this pipeline.
    #[must_use]
    pub const fn logger(&self) -> &RunLogger {
        &self.logger
    }

    /// Run the whole pipeline once.
    ///
    /// Config, CSV, and validation failures abort before any request is made.
    /// Per-row send failures do not abort; they are counted in the summary and
    /// reflected in [`RunReport::exit_code`].
    ///
    /// # Errors
    /// Returns the fatal [`MailCannonError`] that stopped the run.
    pub async fn run(&self, csv: &Path, config: &Path) -> Result<RunReport, MailCannonError> {
        let dispatch = self.logger.dispatch().clone();
        self.pipeline(csv, config).with_subscriber(dispatch).await
    }

    async fn pipeline(&self, csv: &Path, config_path: &Path) -> Result<RunReport, MailCannonError> {
        if let Some(path) = self.logger.log_file() {
            info!("Log file: {}", path.display());
        }
        info!("{BANNER}");
        info!("mail-cannon starting");
        info!("CSV:      {}", csv.display());
        info!("Config:   {}", config_path.display());
        info!("Dry run:  {}", self.dry_run);
        info!("{BANNER}");

        let config = load_config(config_path)
            .map_err(MailCannonError::from)
            .inspect_err(|e| error!("{e}"))?;

        let source = read_orders(csv, config.sku_names())
            .map_err(MailCannonError::from)
            .inspect_err(|e| error!("{e}"))?;
        info!(
            "Read {} rows from {} (skipped empty/non-data rows)",
            source.rows.len(),
            csv.display()
        );
        if source.skipped > 0 {
            debug!("Skipped {} record(s) with a blank email", source.skipped);
        }
        let rows = source.rows;

        let errors = validate_rows(&rows, config.sku_names());
        if !errors.is_empty() {
            for e in &errors {
                error!("{e}");
            }
            let err = MailCannonError::Validation(errors);
            error!("{err}");
            return Err(err);
        }
        info!("All {} rows passed validation.", rows.len());

        if self.dry_run {
            Self::report_dry_run(&config, &rows);
            return Ok(RunReport::DryRun { rows: rows.len() });
        }

        let client: Arc<dyn OrderClient> = match &self.client {
            Some(c) => Arc::clone(c),
            None => Arc::new(
                TheseusClient::from_config(&config)
                    .map_err(MailCannonError::from)
                    .inspect_err(|e| error!("{e}"))?,
            ),
        };
        debug!("Sending through the {} client", client.name());

        let results = self.send_all(client.as_ref(), &config, &rows).await;
        let summary = RunSummary::new(Utc::now(), csv.display().to_string(), results);

        info!("{BANNER}");
        info!(
            "COMPLETE: {} succeeded, {} failed, {} total",
            summary.succeeded, summary.failed, summary.total
        );
        info!("{BANNER}");

        let results_file =
            write_summary(self.logger.dir(), &summary).inspect_err(|e| error!("{e}"))?;
        info!("Results written to {}", results_file.display());

        if summary.failed > 0 {
            error!(
                "{} order(s) failed. Check the log for details.",
                summary.failed
            );
        }
        Ok(RunReport::Sent {
            summary,
            results_file,
        })
    }

    fn report_dry_run(config: &Config, rows: &[OrderRow]) {
        for row in rows {
            let payload = build_payload(row, config.sku_names(), &config.tags);
            info!(
                "[DRY RUN] Row {} ({}): would send {} SKU line(s)",
                row.number,
                row.email(),
                payload.contents.len()
            );
            debug!(
                "[DRY RUN] Row {} payload: {}",
                row.number,
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            );
        }
        info!("Dry run complete. No orders were created.");
    }

    async fn send_all(
        &self,
        client: &dyn OrderClient,
        config: &Config,
        rows: &[OrderRow],
    ) -> Vec<RunResult> {
        let total = rows.len();
        let mut results = Vec::with_capacity(total);

        for (i, row) in rows.iter().enumerate() {
            let email = row.email();
            let payload = build_payload(row, config.sku_names(), &config.tags);
            info!(
                "Row {}/{} | {} | {} SKU line(s) | sending...",
                i + 1,
                total,
                email,
                payload.contents.len()
            );

            let result = match client.create_order(&payload).await {
                Ok(body) => {
                    let result = RunResult::success(row.number, email, body);
                    info!(
                        "Row {} | SUCCESS | order_id={} | email={}",
                        row.number,
                        result.order_id.as_deref().unwrap_or("unknown"),
                        email
                    );
                    result
                }
                Err(err) => {
                    match &err {
                        OrderError::Http { status, body } => error!(
                            "Row {} | FAILED  | email={} | HTTP {} | {}",
                            row.number, email, status, body
                        ),
                        OrderError::Transport { reason } => {
                            error!("Row {} | FAILED  | email={} | {}", row.number, email, reason);
                        }
                    }
                    RunResult::failure(row.number, email, &err)
                }
            };
            results.push(result);

            tokio::time::sleep(self.request_delay).await;
        }
        results
    }
}
