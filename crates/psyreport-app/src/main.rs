use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing::info;

use psyreport_app::aws;
use psyreport_app::commands::{self, UploadOutcome};
use psyreport_app::config::{AppConfig, config_info};
use psyreport_app::files::DiskFile;
use psyreport_app::state::IntakeState;
use psyreport_bedrock::bedrock::BedrockGenerator;
use psyreport_core::assessments::{self, KNOWN_ASSESSMENTS};
use psyreport_core::models::record::{RecordField, ReportRecord};
use psyreport_core::models::synthesis::SynthesisResult;

#[derive(Debug, Parser)]
#[command(
    name = "psyreport",
    version,
    about = "Turn raw assessment files into formatted psychological reports"
)]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true, env = "PSYREPORT_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a CSV or image, extract the intake fields, synthesize and save
    /// the report.
    Run {
        /// Assessment file (`.csv` or an image).
        file: PathBuf,

        #[command(flatten)]
        record: RecordArgs,

        /// Directory to save the report in.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Synthesize a title and summary for a record and print them as JSON.
    Synthesize {
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Export a record to `.docx` without calling the model.
    Export {
        #[command(flatten)]
        record: RecordArgs,

        /// JSON file with a saved synthesis (`suggestedTitle`, `summary`).
        #[arg(long)]
        synthesis: Option<PathBuf>,

        /// Directory to save the report in.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List the assessment catalog.
    Assessments,
}

/// Record values given on the command line. Flags are applied on top of the
/// `--record` file, in field order.
#[derive(Debug, Args)]
struct RecordArgs {
    /// JSON file holding a saved record (camelCase keys).
    #[arg(long)]
    record: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<String>,
    /// male, female or other.
    #[arg(long)]
    gender: Option<String>,
    /// Catalog name, short code (e.g. `MMPI-3`) or a custom assessment name.
    #[arg(long)]
    assessment: Option<String>,
    #[arg(long)]
    results: Option<String>,
    #[arg(long)]
    observations: Option<String>,
    /// Report date, `YYYY-MM-DD`.
    #[arg(long)]
    date: Option<String>,
}

impl RecordArgs {
    fn edits(&self) -> Vec<(RecordField, String)> {
        let assessment = self
            .assessment
            .as_deref()
            .map(|a| assessments::lookup(a).map_or_else(|| a.to_string(), str::to_string));

        [
            (RecordField::SubjectName, self.name.clone()),
            (RecordField::SubjectAge, self.age.clone()),
            (RecordField::SubjectGender, self.gender.clone()),
            (RecordField::AssessmentType, assessment),
            (RecordField::ResultsText, self.results.clone()),
            (RecordField::ObservationsText, self.observations.clone()),
            (RecordField::ReportDate, self.date.clone()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    async fn apply(&self, state: &IntakeState) -> Result<bool> {
        if let Some(path) = &self.record {
            let raw = tokio::fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("reading record {}", path.display()))?;
            let record: ReportRecord = serde_json::from_str(&raw)
                .wrap_err_with(|| format!("parsing record {}", path.display()))?;
            commands::load_record(state, record).await;
        }

        let edits = self.edits();
        for (field, value) in &edits {
            commands::set_field(state, *field, value)
                .await
                .wrap_err_with(|| format!("invalid value for {field}"))?;
        }
        Ok(self.record.is_some() || !edits.is_empty())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Command::Assessments = cli.command {
        for name in KNOWN_ASSESSMENTS {
            println!("{name}");
        }
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    let info = config_info(&config);
    info!(
        region = %info.region,
        model_id = %info.model_id,
        credential_type = %info.credential_type,
        profile = info.profile_name.as_deref(),
        access_key = info.access_key_hint.as_deref(),
        "configuration loaded"
    );

    let sdk_config = aws::build_aws_config(&config.region, &config.credentials).await;
    let generator = BedrockGenerator::new(&sdk_config, config.model_id.clone());
    let state = IntakeState::new(Arc::new(generator));

    match cli.command {
        Command::Run {
            file,
            record,
            out_dir,
        } => {
            let file = DiskFile::open(&file)
                .await
                .wrap_err_with(|| format!("opening {}", file.display()))?;

            match commands::upload_assessment(&state, &file).await? {
                UploadOutcome::Merged { merge, .. } => {
                    info!(changed = merge.changed.len(), "assessment file processed");
                }
                UploadOutcome::Superseded => eyre::bail!("upload was superseded"),
            }

            if record.apply(&state).await? {
                commands::generate_synthesis(&state).await?;
            }

            let out_dir = out_dir.unwrap_or_else(|| config.default_output_dir());
            let path = commands::download_report(&state, &out_dir).await?;
            print_snapshot(&state).await?;
            println!("{}", path.display());
        }
        Command::Synthesize { record } => {
            record.apply(&state).await?;
            let synthesis = commands::generate_synthesis(&state)
                .await?
                .ok_or_else(|| eyre::eyre!("synthesis was superseded"))?;
            println!("{}", serde_json::to_string_pretty(&synthesis)?);
        }
        Command::Export {
            record,
            synthesis,
            out_dir,
        } => {
            record.apply(&state).await?;
            if let Some(path) = synthesis {
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .wrap_err_with(|| format!("reading synthesis {}", path.display()))?;
                let synthesis: SynthesisResult = serde_json::from_str(&raw)
                    .wrap_err_with(|| format!("parsing synthesis {}", path.display()))?;
                commands::set_synthesis(&state, synthesis).await;
            }

            let out_dir = out_dir.unwrap_or_else(|| config.default_output_dir());
            let path = commands::download_report(&state, &out_dir).await?;
            println!("{}", path.display());
        }
        Command::Assessments => {}
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn print_snapshot(state: &IntakeState) -> Result<()> {
    let snapshot = commands::snapshot(state).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
