//! Binary target for the drydock dry-run harness.
//!
//! By default runs each task once against real time and real randomness.
//! With `--trials N` the tasks run on the simulation engine instead, and
//! the per-task outcome-frequency reports are printed without any
//! wall-clock delay.

use std::process;

use clap::Parser;

use drydock::prelude::*;
use drydock_sim::{SimProviders, SimulationError, TrialBuilder, TrialReport};

#[derive(Debug, Parser)]
#[command(
    name = "drydock",
    about = "Deterministic dry-run harness for simulated operational tasks"
)]
struct Cli {
    /// Version label to deploy.
    #[arg(long, default_value = "1.0")]
    release: String,

    /// Service name to check.
    #[arg(long, default_value = "web")]
    service: String,

    /// Configuration file name to validate.
    #[arg(long, default_value = "config.yml")]
    config_file: String,

    /// Run this many simulated trials per task instead of a single
    /// real-time pass.
    #[arg(long)]
    trials: Option<usize>,

    /// Base seed for simulated trials; omit for a fresh seed per run.
    #[arg(long)]
    seed: Option<u64>,

    /// Print trial reports as JSON.
    #[arg(long)]
    json: bool,

    /// Use millisecond-scale delays for the real-time pass.
    #[arg(long)]
    fast: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("failed to build runtime");
    let local = tokio::task::LocalSet::new();

    let exit_code = rt.block_on(local.run_until(async move {
        match cli.trials {
            Some(trials) => run_trials(cli, trials).await,
            None => run_once(cli).await,
        }
    }));
    process::exit(exit_code);
}

/// Run each task once with real delays, printing the outcomes.
async fn run_once(cli: Cli) -> i32 {
    let profile = if cli.fast {
        DelayProfile::fast_local()
    } else {
        DelayProfile::default()
    };
    let providers = TokioProviders::new();

    let deploy = DeploymentSimulator::with_profile(providers.clone(), &profile);
    let checker = ServiceStatusChecker::with_profile(providers.clone(), &profile);
    let validator = ConfigurationValidator::with_profile(providers, &profile);

    let deployed = match deploy.deploy(&cli.release).await {
        Ok(outcome) => outcome,
        Err(error) => return fail(&error),
    };
    let status = match checker.check(&cli.service).await {
        Ok(outcome) => outcome,
        Err(error) => return fail(&error),
    };
    let valid = match validator.validate(&cli.config_file).await {
        Ok(outcome) => outcome,
        Err(error) => return fail(&error),
    };

    println!(
        "deploy {}: {}",
        cli.release,
        if deployed { "success" } else { "failure" }
    );
    println!("service {}: {}", cli.service, status);
    println!(
        "config {}: {}",
        cli.config_file,
        if valid { "valid" } else { "invalid" }
    );

    // Negative outcomes are data, not errors.
    0
}

fn fail(error: &TimeError) -> i32 {
    eprintln!("ERROR: {error}");
    1
}

/// Run each task `trials` times on the simulation engine and print the
/// outcome-frequency reports.
async fn run_trials(cli: Cli, trials: usize) -> i32 {
    let seeds: Vec<u64> = cli
        .seed
        .map(|base| (0..trials as u64).map(|i| base.wrapping_add(i)).collect())
        .unwrap_or_default();

    let release = cli.release.clone();
    let deploy_report = TrialBuilder::new()
        .workload("deploy", move |providers: SimProviders| {
            let release = release.clone();
            async move {
                let deploy = DeploymentSimulator::new(providers);
                let succeeded = deploy.deploy(&release).await.map_err(as_sim_error)?;
                Ok(if succeeded { "success" } else { "failure" }.to_string())
            }
        })
        .set_iterations(trials)
        .set_seeds(seeds.clone())
        .run()
        .await;

    let service = cli.service.clone();
    let status_report = TrialBuilder::new()
        .workload("service_status", move |providers: SimProviders| {
            let service = service.clone();
            async move {
                let checker = ServiceStatusChecker::new(providers);
                let status = checker.check(&service).await.map_err(as_sim_error)?;
                Ok(status.to_string())
            }
        })
        .set_iterations(trials)
        .set_seeds(seeds.clone())
        .run()
        .await;

    let config_file = cli.config_file.clone();
    let config_report = TrialBuilder::new()
        .workload("validate_config", move |providers: SimProviders| {
            let config_file = config_file.clone();
            async move {
                let validator = ConfigurationValidator::new(providers);
                let valid = validator.validate(&config_file).await.map_err(as_sim_error)?;
                Ok(if valid { "valid" } else { "invalid" }.to_string())
            }
        })
        .set_iterations(trials)
        .set_seeds(seeds)
        .run()
        .await;

    let reports = [deploy_report, status_report, config_report];

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("ERROR: failed to serialize reports: {error}");
                return 1;
            }
        }
    } else {
        for report in &reports {
            println!("{report}");
        }
    }

    if reports.iter().any(|report: &TrialReport| report.failed_runs > 0) {
        eprintln!("ERROR: some trial iterations failed; see faulty seeds above");
        return 1;
    }
    0
}

fn as_sim_error(error: TimeError) -> SimulationError {
    SimulationError::InvalidState(error.to_string())
}
