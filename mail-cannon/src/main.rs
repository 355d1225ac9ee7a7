use std::process::ExitCode;

use clap::Parser;
use mail_cannon::{
    ConfigError, InputError, LogSinks, MailCannon, MailCannonError, RunLogger, exit_code_for,
};

mod cli;

use cli::Cli;

fn fail(err: &MailCannonError) -> ExitCode {
    eprintln!("mail-cannon: {err}");
    ExitCode::from(exit_code_for(err))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.csv.exists() {
        return fail(&MailCannonError::from(InputError::NotFound {
            path: cli.csv.display().to_string(),
        }));
    }
    if !cli.config.exists() {
        return fail(&MailCannonError::from(ConfigError::NotFound {
            path: cli.config.display().to_string(),
        }));
    }

    let cannon = match RunLogger::new(&cli.log_dir, LogSinks::default()).and_then(|logger| {
        MailCannon::builder()
            .logger(logger)
            .dry_run(cli.dry_run)
            .build()
    }) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    match cannon.run(&cli.csv, &cli.config).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => fail(&e),
    }
}
