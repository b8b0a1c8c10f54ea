use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::{info, warn, LevelFilter};
use serde_json::{json, Value};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use rust_detux::api::{next_search_offset, DetuxClient, HttpTransport, Transport};
use rust_detux::cli::{Args, Commands, ReportArgs, SubmitArgs};
use rust_detux::config::{load_or_default, DetuxConfig};
use rust_detux::security::scrub_known_secret;
use rust_detux::validate::{validate_hash, validate_save_target};
use rust_detux::{ApiResponse, SaveTarget};

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.verbose)?;

    if let Commands::InitConfig { path } = &args.command {
        return init_config(path);
    }

    let config = load_config(&args)?;
    let api_key = resolve_api_key(&args, &config)?;

    let transport = HttpTransport::new(config.timeout())?;
    let client = DetuxClient::new(api_key.clone(), config.endpoints.clone(), transport);

    let result = match &args.command {
        Commands::Search { text, from } => run_search(&client, text, *from),
        Commands::Report(report) => run_report(&client, report),
        Commands::Submit(submit) => run_submit(&client, submit),
        Commands::InitConfig { .. } => Ok(()),
    };

    result.map_err(|e| anyhow!(scrub_known_secret(&format!("{:#}", e), &api_key)))
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing config file {}", path.display());
    }
    DetuxConfig::default().save_to_yaml_file(path)?;
    info!("Configuration created at {}", path.display());
    Ok(())
}

/// Load configuration and apply environment overrides
fn load_config(args: &Args) -> Result<DetuxConfig> {
    let mut config = load_or_default(args.config.as_deref())?;
    config.apply_env_overrides();
    Ok(config)
}

fn resolve_api_key(args: &Args, config: &DetuxConfig) -> Result<String> {
    args.api_key
        .clone()
        .or_else(|| config.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("No API key provided; use --api-key, DETUX_API_KEY or the config file"))
}

fn run_search<T: Transport>(client: &DetuxClient<T>, text: &str, from: i64) -> Result<()> {
    let response = client.search(text, from)?;
    print_json(&response.to_json())?;
    if response.is_success() {
        info!("Next page: --from {}", next_search_offset(from));
    }
    exit_status(&response)
}

fn run_report<T: Transport>(client: &DetuxClient<T>, args: &ReportArgs) -> Result<()> {
    let target = validate_save_target(
        args.save.as_deref(),
        args.output.as_deref(),
        args.s3_bucket.as_deref(),
        args.aws_key.as_deref(),
        args.aws_secret.as_deref(),
        args.aws_region.as_deref(),
    )?;

    if let Some(list) = &args.list {
        return run_report_list(client, list, &target);
    }

    let response = match (&args.hash, &args.file) {
        (Some(hash), _) => client.report_and_save(hash, &target)?,
        (None, Some(file)) => {
            let response = client.report_for_file(file)?;
            rust_detux::store::save_report(&response.to_json(), &target)?;
            response
        }
        (None, None) => bail!("one of --hash, --file or --list is required"),
    };

    if target == SaveTarget::None {
        print_json(&response.to_json())?;
    }
    exit_status(&response)
}

fn run_report_list<T: Transport>(client: &DetuxClient<T>, list: &Path, target: &SaveTarget) -> Result<()> {
    let content = fs::read_to_string(list)
        .context(format!("Failed to read hash list {}", list.display()))?;

    let hashes: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    // Validate the whole list before the first request
    for hash in &hashes {
        validate_hash(hash).map_err(|e| e.in_operation("report"))?;
    }
    info!("Fetching {} reports listed in {}", hashes.len(), list.display());
    target.create_output_dir()?;

    let mut output = BTreeMap::new();
    let mut failures = 0;

    for hash in hashes {
        let per_hash = target.for_report(hash);
        let entry = match client.report_and_save(hash, &per_hash) {
            Ok(response) => {
                if !response.is_success() {
                    failures += 1;
                }
                response.to_json()
            }
            Err(e) => {
                warn!("Report for {} failed: {}", hash, e);
                failures += 1;
                json!({ "error": e.to_string() })
            }
        };
        output.insert(hash.to_string(), entry);
    }

    if *target == SaveTarget::None {
        print_json(&json!(output))?;
    }

    if failures > 0 {
        bail!("{} of {} report lookups failed", failures, output.len());
    }
    Ok(())
}

fn run_submit<T: Transport + Sync>(client: &DetuxClient<T>, args: &SubmitArgs) -> Result<()> {
    if let Some(file) = &args.file {
        let response = client.submit_file(file, args.comment.as_deref(), args.name.as_deref())?;
        print_json(&response.to_json())?;
        return exit_status(&response);
    }

    let dir = args.dir.as_ref().ok_or_else(|| anyhow!("one of --file or --dir is required"))?;
    if args.comment.is_some() || args.name.is_some() {
        warn!("--comment and --name only apply to single file submissions");
    }

    let results = client.submit_directory(dir, args.use_filenames, args.threads)?;
    let total = results.len();
    let accepted = results.success_count();

    let output: BTreeMap<String, Value> = results
        .into_iter()
        .map(|(path, outcome)| {
            let entry = match outcome {
                Ok(response) => response.to_json(),
                Err(e) => json!({ "error": e.to_string() }),
            };
            (path.display().to_string(), entry)
        })
        .collect();
    print_json(&json!(output))?;

    info!("{} of {} submissions accepted", accepted, total);
    if accepted < total {
        bail!("{} of {} submissions failed", total - accepted, total);
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to render JSON output")?);
    Ok(())
}

fn exit_status(response: &ApiResponse) -> Result<()> {
    match response {
        ApiResponse::Success(_) => Ok(()),
        ApiResponse::RemoteFailure(message) => bail!("Detux reported a failure: {}", message),
        ApiResponse::TransportFailure { status, endpoint, .. } => {
            bail!("{} returned HTTP status {}", endpoint, status)
        }
    }
}
