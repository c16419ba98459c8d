//! Medfin CLI — command-line front-end for the loan portal.
//!
//! Set MEDFIN_PORTAL_API_URL and MEDFIN_EXTRACTION_API_URL. Session state
//! (bearer token, profile, selections) lives in a JSON session file so it
//! survives between invocations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use medfin_api_client::ApiClient;
use medfin_cli::{init_tracing, load_selected_file, mask_cnic, parse_key_val};
use medfin_core::models::{
    LoginRequest, PurposeSelection, Scheme, SignupRequest, UserProfile,
};
use medfin_core::{AppError, PortalConfig};
use medfin_store::{FileStore, Session};
use medfin_wizard::{DocumentRegistry, InstructionsGate, PreviewComposer, SizeLimits, UploadOrchestrator};

const DEFAULT_SESSION_FILE: &str = ".medfin_session.json";

#[derive(Parser)]
#[command(name = "medfin", about = "Health-sector microfinance loan portal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an applicant account
    Signup {
        #[arg(long)]
        full_name: String,
        /// 13 digits, no dashes
        #[arg(long)]
        cnic: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with CNIC or email
    Login {
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored token and profile, keep scheme selections
    Logout,
    /// Check whether a CNIC or email is already registered
    CheckUnique {
        /// Field to check: cnic or email
        field: String,
        value: String,
    },
    /// List schemes with their amount ranges and purposes
    Schemes,
    /// Pick a loan purpose and amount for a scheme
    Select {
        /// Scheme: doctors, nurses, allied_health
        scheme: String,
        /// Purpose id (see `medfin schemes`)
        #[arg(long)]
        purpose: String,
        /// Loan amount in rupees
        #[arg(long)]
        amount: u64,
    },
    /// Show the document checklist for a scheme
    Checklist {
        scheme: String,
    },
    /// Show upload instructions for one document
    Instructions {
        scheme: String,
        document: String,
    },
    /// Run the full application wizard: validate, upload, extract, preview,
    /// and submit in one pass
    Apply {
        scheme: String,
        /// Documents as slot=path, one per required slot
        #[arg(long = "document", value_parser = parse_key_val)]
        documents: Vec<(String, String)>,
        /// Preview field overrides as field=value
        #[arg(long = "set", value_parser = parse_key_val)]
        overrides: Vec<(String, String)>,
        /// Acknowledge the per-document upload instructions
        #[arg(long)]
        acknowledge: bool,
        /// Stop after the preview without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// List your submitted applications
    Applications,
    /// Show one application by id
    Application {
        id: Uuid,
    },
    /// Per-document operations on a submitted application
    Document {
        #[command(subcommand)]
        sub: DocumentCommands,
    },
}

#[derive(Subcommand)]
enum DocumentCommands {
    /// Replace one document on a submitted application
    Reupload {
        application: Uuid,
        document: String,
        file: PathBuf,
    },
    /// Download one submitted document
    Download {
        application: Uuid,
        document: String,
        /// Output path; defaults to the document id
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the browser preview URL for one document
    PreviewUrl {
        application: Uuid,
        document: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn open_session(config: &PortalConfig) -> anyhow::Result<Session> {
    let path = config
        .session_file
        .clone()
        .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
    let store = FileStore::open(PathBuf::from(path)).await?;
    Ok(Session::new(Arc::new(store)))
}

async fn authed_client(config: &PortalConfig, session: &Session) -> anyhow::Result<ApiClient> {
    let token = session
        .bearer_token()
        .await
        .map_err(AppError::from)?
        .context("You are not logged in. Run `medfin login` first")?;
    Ok(ApiClient::from_config(config)?.with_bearer(token))
}

async fn required_profile(session: &Session) -> anyhow::Result<UserProfile> {
    session
        .user_profile()
        .await
        .map_err(AppError::from)?
        .context("No stored profile. Run `medfin login` first")
}

fn parse_scheme(raw: &str) -> anyhow::Result<Scheme> {
    raw.parse()
        .with_context(|| format!("Unknown scheme '{}'. One of: doctors, nurses, allied_health", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = PortalConfig::from_env()?;
    config.validate()?;
    let session = open_session(&config).await?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Signup {
            full_name,
            cnic,
            email,
            phone,
            password,
        } => {
            let request = SignupRequest {
                full_name,
                cnic,
                email,
                phone,
                password,
            };
            request.validate()?;
            let client = ApiClient::from_config(&config)?;
            let response = client.signup(&request).await?;
            session.set_bearer_token(&response.token).await?;
            session.set_user_profile(&response.user).await?;
            println!("Account created for {}", response.user.full_name);
        }
        Commands::Login {
            identifier,
            password,
        } => {
            let request = LoginRequest {
                identifier,
                password,
            };
            request.validate()?;
            let client = ApiClient::from_config(&config)?;
            let response = client.login(&request).await?;
            session.set_bearer_token(&response.token).await?;
            session.set_user_profile(&response.user).await?;
            println!(
                "Logged in as {} ({})",
                response.user.full_name,
                mask_cnic(&response.user.cnic)
            );
        }
        Commands::Logout => {
            session.clear_auth().await?;
            println!("Logged out");
        }
        Commands::CheckUnique { field, value } => {
            let client = ApiClient::from_config(&config)?;
            let response = client.check_unique(&field, &value).await?;
            print_json(&serde_json::json!({
                "field": field,
                "unique": response.unique,
                "message": response.message,
            }))?;
        }
        Commands::Schemes => {
            for scheme in Scheme::ALL {
                let (min, max) = scheme.amount_range();
                println!("{} ({}): Rs {} - Rs {}", scheme.display_name(), scheme, min, max);
                for purpose in scheme.purposes() {
                    println!("  {} - {} [{}]", purpose.id, purpose.label, purpose.category);
                }
            }
        }
        Commands::Select {
            scheme,
            purpose,
            amount,
        } => {
            let scheme = parse_scheme(&scheme)?;
            let (min, max) = scheme.amount_range();
            if !(min..=max).contains(&amount) {
                bail!(
                    "Amount {} is outside the {} range (Rs {} - Rs {})",
                    amount,
                    scheme.display_name(),
                    min,
                    max
                );
            }
            let purpose = scheme
                .purposes()
                .iter()
                .find(|p| p.id == purpose)
                .with_context(|| {
                    format!("Unknown purpose '{}'. See `medfin schemes`", purpose)
                })?;
            session.set_loan_amount(&amount.to_string()).await?;
            session
                .set_selected_purpose(&PurposeSelection::new(purpose))
                .await?;
            println!(
                "Selected '{}' for Rs {} under {}",
                purpose.label,
                amount,
                scheme.display_name()
            );
        }
        Commands::Checklist { scheme } => {
            let scheme = parse_scheme(&scheme)?;
            let registry = DocumentRegistry::with_limits(scheme, &SizeLimits::from(&config));
            println!("{}: {} documents", scheme.display_name(), registry.len());
            for slot in registry.slots() {
                let kind = if slot.requires_extraction {
                    "extracted"
                } else {
                    "direct"
                };
                println!(
                    "  {} - {} ({}, max {} MB)",
                    slot.id,
                    slot.display_name,
                    kind,
                    slot.max_size_bytes / (1024 * 1024)
                );
            }
        }
        Commands::Instructions { scheme, document } => {
            let scheme = parse_scheme(&scheme)?;
            let registry = DocumentRegistry::for_scheme(scheme);
            let mut gate = InstructionsGate::new(
                registry
                    .slots()
                    .iter()
                    .map(|s| (s.id.clone(), s.display_name.clone())),
            );
            let sheet = gate.open(&document)?;
            println!("{}", sheet.title);
            for (step_en, step_ur) in sheet.steps_en.iter().zip(&sheet.steps_ur) {
                println!("  - {}", step_en);
                println!("    {}", step_ur);
            }
        }
        Commands::Apply {
            scheme,
            documents,
            overrides,
            acknowledge,
            dry_run,
        } => {
            let scheme = parse_scheme(&scheme)?;
            let profile = required_profile(&session).await?;
            let client = authed_client(&config, &session).await?;
            run_wizard(
                &config, &session, client, scheme, &profile, documents, overrides, acknowledge,
                dry_run,
            )
            .await?;
        }
        Commands::Applications => {
            let profile = required_profile(&session).await?;
            let client = authed_client(&config, &session).await?;
            let applications = client.search_applications(&profile.cnic).await?;
            if applications.is_empty() {
                println!("No applications found for {}", mask_cnic(&profile.cnic));
            }
            for app in applications {
                println!(
                    "{} {} {} {}",
                    app.id, app.scheme, app.status, app.submitted_at
                );
            }
        }
        Commands::Application { id } => {
            let client = authed_client(&config, &session).await?;
            let detail = client.get_application(id).await?;
            print_json(&detail)?;
        }
        Commands::Document { sub } => {
            let client = authed_client(&config, &session).await?;
            match sub {
                DocumentCommands::Reupload {
                    application,
                    document,
                    file,
                } => {
                    let selected = load_selected_file(&file).await?;
                    client
                        .reupload_document(application, &document, &selected)
                        .await?;
                    println!("Replaced {} on {}", document, application);
                }
                DocumentCommands::Download {
                    application,
                    document,
                    out,
                } => {
                    let bytes = client.download_document(application, &document).await?;
                    let out = out.unwrap_or_else(|| PathBuf::from(&document));
                    tokio::fs::write(&out, &bytes)
                        .await
                        .with_context(|| format!("Failed to write {}", out.display()))?;
                    println!("Wrote {} bytes to {}", bytes.len(), out.display());
                }
                DocumentCommands::PreviewUrl {
                    application,
                    document,
                } => {
                    println!("{}", client.preview_document_url(application, document.as_str()));
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_wizard(
    config: &PortalConfig,
    session: &Session,
    client: ApiClient,
    scheme: Scheme,
    profile: &UserProfile,
    documents: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
    acknowledge: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let registry = DocumentRegistry::with_limits(scheme, &SizeLimits::from(config));

    let missing: Vec<_> = registry
        .slots()
        .iter()
        .filter(|slot| !documents.iter().any(|(id, _)| id == &slot.id))
        .map(|slot| slot.id.clone())
        .collect();
    if !missing.is_empty() {
        bail!(
            "Missing documents for {}: {}. See `medfin checklist {}`",
            scheme.display_name(),
            missing.join(", "),
            scheme
        );
    }
    if !acknowledge {
        bail!(
            "Each document has upload instructions (see `medfin instructions {} <document>`). \
             Re-run with --acknowledge once you have read them",
            scheme
        );
    }

    let mut gate = InstructionsGate::new(
        registry
            .slots()
            .iter()
            .map(|s| (s.id.clone(), s.display_name.clone())),
    );

    let api = Arc::new(client);
    let mut orchestrator = UploadOrchestrator::new(
        registry,
        api.clone(),
        api.clone(),
        Duration::from_millis(config.progress_tick_ms),
    );

    let name_tokens = profile.name_tokens();
    for (slot_id, path) in &documents {
        gate.open(slot_id)?;
        let target = gate.proceed(slot_id)?;
        let file = load_selected_file(PathBuf::from(path).as_path()).await?;
        let file_name = file.file_name.clone();
        match orchestrator.select_file(&target, file, &name_tokens).await {
            Ok(()) => println!("  {} uploaded ({})", slot_id, file_name),
            Err(err) => bail!("{}: {}", slot_id, err),
        }
    }

    let loan_amount = session.loan_amount().await.map_err(AppError::from)?;
    let purpose = session.selected_purpose().await.map_err(AppError::from)?;
    let mut composer = PreviewComposer::seed(
        Some(profile),
        scheme,
        loan_amount.as_deref(),
        purpose.as_ref(),
        orchestrator.extractions(),
    );
    for (field, value) in &overrides {
        composer.edit(field, value);
    }

    println!("Preview:");
    for (field, value) in composer.draft().fields() {
        println!("  {}: {}", field, value);
    }

    let request = composer.prepare_submission(&orchestrator)?;
    if dry_run {
        println!("Dry run, not submitting");
        return Ok(());
    }

    let response = api.submit_application(
        &request.fields,
        &serde_json::to_string(&request.extracted_data)?,
        &request.files,
    )
    .await?;
    println!(
        "Application {} submitted: {}",
        response.id,
        response.message.as_deref().unwrap_or("received")
    );
    Ok(())
}
