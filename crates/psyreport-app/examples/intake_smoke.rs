//! Smoke test for the intake pipeline against live Bedrock.
//!
//! Reads configuration from the environment, uploads one assessment file,
//! prints the merged record and synthesis, then saves the report.
//!
//! Usage:
//!   PSYREPORT_AWS_PROFILE=clinic \
//!   PSYREPORT_REGION=us-east-1 \
//!   cargo run -p psyreport-app --example intake_smoke -- scores.csv [out-dir]

use std::sync::Arc;

use psyreport_app::aws;
use psyreport_app::commands::{self, UploadOutcome};
use psyreport_app::config::{AppConfig, config_info};
use psyreport_app::files::DiskFile;
use psyreport_app::state::IntakeState;
use psyreport_bedrock::bedrock::BedrockGenerator;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| eyre::eyre!("usage: intake_smoke <file> [out-dir]"))?;

    let config = AppConfig::from_env()?;
    let info = config_info(&config);
    let out_dir = args
        .next()
        .map(Into::into)
        .unwrap_or_else(|| config.default_output_dir());

    println!("Region:      {}", info.region);
    println!("Model:       {}", info.model_id);
    println!("Credentials: {}", info.credential_type);
    println!("File:        {path}");
    println!();

    let sdk_config = aws::build_aws_config(&config.region, &config.credentials).await;
    let state = IntakeState::new(Arc::new(BedrockGenerator::new(
        &sdk_config,
        config.model_id.clone(),
    )));

    let file = DiskFile::open(&path).await?;
    println!("Uploading {} ({} bytes)...", path, file.path().metadata()?.len());

    match commands::upload_assessment(&state, &file).await? {
        UploadOutcome::Merged { merge, synthesis } => {
            println!("  Changed fields: {:?}", merge.changed);
            if !merge.cleared.is_empty() {
                println!("  Cleared fields: {:?}", merge.cleared);
            }
            match synthesis {
                Some(s) => println!("  Title: {}", s.suggested_title),
                None => println!("  No subject or assessment found, synthesis skipped"),
            }
        }
        UploadOutcome::Superseded => eyre::bail!("upload was superseded"),
    }

    let snapshot = commands::snapshot(&state).await;
    println!();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    match commands::download_report(&state, &out_dir).await {
        Ok(saved) => println!("\nSaved {}", saved.display()),
        Err(e) => println!("\nNot exported: {e}"),
    }

    Ok(())
}
