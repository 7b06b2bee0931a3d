//! orgbot console binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing (stderr, so the transcript on stdout stays clean)
//! 3. Build the HTTP client that binds every service boundary
//! 4. Dispatch the subcommand

mod cli;
mod console;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use orgbot_chat::SessionManager;
use orgbot_client::HttpServiceClient;
use orgbot_core::config::ChatConfig;
use orgbot_core::{OrganizationDirectory, OrganizationId, OrganizationRecord, OrgbotConfig};
use orgbot_knowledge::{
    CreationBoundary, DocumentRef, IngestionMode, KnowledgeAggregator, OrganizationProfile,
    PublishError, Submission, ValidationError,
};

use cli::{parse_pair, CliArgs, Command, CreateArgs};

/// Exit status when the draft is incomplete.
const EXIT_INVALID_DRAFT: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let mut config = OrgbotConfig::load_or_default(&config_path);
    let log_level = args.resolve_log_level(&config.general.log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting orgbot v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), "Configuration resolved");

    config.service.base_url = args.resolve_base_url(&config.service.base_url);

    if let Command::Init { force } = args.command {
        return Ok(if init_config(&config, &config_path, force)? {
            println!("Wrote {}", config_path.display());
            ExitCode::SUCCESS
        } else {
            eprintln!(
                "{} already exists; pass --force to overwrite it",
                config_path.display()
            );
            ExitCode::FAILURE
        });
    }

    let client = Arc::new(HttpServiceClient::new(&config.service)?);
    tracing::debug!(base_url = %client.base_url(), "Service client ready");

    match args.command {
        Command::Orgs => list_organizations(&client).await?,
        Command::Chat { organization_id } => chat(client, &organization_id, &config.chat).await?,
        Command::Create(create) => match create_organization(client.as_ref(), create).await? {
            CreateOutcome::Created(submission) => print_created(&submission),
            CreateOutcome::Invalid(e) => {
                eprintln!("{}", e);
                return Ok(ExitCode::from(EXIT_INVALID_DRAFT));
            }
        },
        Command::Init { .. } => {}
    }
    Ok(ExitCode::SUCCESS)
}

/// Write `config` to `path`. An existing file is kept unless `force` is set.
///
/// Returns whether the file was written.
fn init_config(config: &OrgbotConfig, path: &Path, force: bool) -> orgbot_core::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    config.save(path)?;
    Ok(true)
}

async fn list_organizations(client: &HttpServiceClient) -> Result<(), Box<dyn Error>> {
    let records = client.list_organizations().await?;
    print!("{}", console::render_organizations(&records));
    if records.is_empty() {
        println!();
    }
    Ok(())
}

async fn chat(
    client: Arc<HttpServiceClient>,
    organization_id: &str,
    chat_config: &ChatConfig,
) -> Result<(), Box<dyn Error>> {
    let record = match OrganizationId::parse(organization_id) {
        Some(id) => lookup_organization(client.as_ref(), &id).await,
        None => {
            eprintln!("No organization selected; messages will not be sent.");
            None
        }
    };
    let title = console::chat_title(record.as_ref());

    let manager = Arc::new(SessionManager::initialize(
        organization_id,
        client,
        chat_config,
    ));
    console::run_chat(
        manager,
        BufReader::new(tokio::io::stdin()),
        &title,
        &chat_config.timestamp_format,
    )
    .await?;
    Ok(())
}

/// The title is cosmetic; a failed lookup still lets the chat proceed.
async fn lookup_organization(
    directory: &dyn OrganizationDirectory,
    id: &OrganizationId,
) -> Option<OrganizationRecord> {
    match directory.find_organization(id).await {
        Ok(Some(record)) => Some(record),
        Ok(None) => {
            tracing::warn!(organization_id = %id, "Organization not listed by the service");
            None
        }
        Err(e) => {
            tracing::warn!(organization_id = %id, error = %e, "Organization lookup failed");
            None
        }
    }
}

#[derive(Debug)]
enum CreateOutcome {
    Created(Submission),
    Invalid(ValidationError),
}

/// Build a draft from `args` and publish it.
///
/// Entries the draft refuses are reported and skipped; an incomplete draft
/// comes back as [`CreateOutcome::Invalid`] without contacting the service.
async fn create_organization(
    boundary: &dyn CreationBoundary,
    args: CreateArgs,
) -> Result<CreateOutcome, Box<dyn Error>> {
    let mut aggregator = KnowledgeAggregator::new();
    aggregator.set_common_fields(&args.name, &args.description);
    aggregator.set_mode(IngestionMode::from(args.mode));

    if let Some(path) = &args.document {
        let document = DocumentRef::from_path(path)?;
        if let Err(rejection) = aggregator.attach_document(document) {
            eprintln!("{}: {}", path.display(), rejection);
        }
    }

    aggregator.set_organization_profile(OrganizationProfile {
        name: args.org_name,
        website: args.website,
        industry: args.industry,
        about: args.about,
    });

    for raw in &args.employees {
        let (name, role) = parse_pair(raw);
        if let Err(rejection) = aggregator.add_employee(name, role) {
            eprintln!("skipping employee '{}': {}", raw, rejection);
        }
    }
    for raw in &args.products {
        let (name, details) = parse_pair(raw);
        if let Err(rejection) = aggregator.add_product(name, details) {
            eprintln!("skipping product '{}': {}", raw, rejection);
        }
    }
    for raw in &args.services {
        let (name, details) = parse_pair(raw);
        if let Err(rejection) = aggregator.add_service(name, details) {
            eprintln!("skipping service '{}': {}", raw, rejection);
        }
    }

    match aggregator.publish(boundary).await {
        Ok(submission) => Ok(CreateOutcome::Created(submission)),
        Err(PublishError::Validation(e)) => Ok(CreateOutcome::Invalid(e)),
        Err(e) => Err(e.into()),
    }
}

fn print_created(submission: &Submission) {
    println!(
        "Created chatbot '{}' ({} mode)",
        submission.chatbot().name,
        submission.mode().as_str()
    );
    match submission {
        Submission::Automatic { document, .. } => {
            println!("  document: {} ({} bytes)", document.file_name, document.size_bytes);
        }
        Submission::Manual { organization, .. } => {
            println!(
                "  organization: {} ({} employees, {} products, {} services)",
                organization.name,
                organization.employees.len(),
                organization.products.len(),
                organization.services.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use orgbot_core::TransportError;
    use orgbot_knowledge::OrgContextGap;

    #[derive(Default)]
    struct RecordingBoundary {
        received: Mutex<Vec<Submission>>,
    }

    #[async_trait]
    impl CreationBoundary for RecordingBoundary {
        async fn create_organization(&self, submission: &Submission) -> Result<(), TransportError> {
            self.received.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    fn create_args(argv: &[&str]) -> CreateArgs {
        let argv = ["orgbot", "create"].iter().chain(argv).copied();
        match CliArgs::try_parse_from(argv).unwrap().command {
            Command::Create(create) => create,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    // ---- create ----

    #[tokio::test]
    async fn test_create_incomplete_draft_is_invalid_without_sending() {
        let boundary = RecordingBoundary::default();
        let outcome = create_organization(&boundary, create_args(&[])).await.unwrap();

        assert!(matches!(
            outcome,
            CreateOutcome::Invalid(ValidationError::MissingCommon)
        ));
        assert!(boundary.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_manual_without_offerings_is_invalid() {
        let boundary = RecordingBoundary::default();
        let args = create_args(&[
            "--name", "Bot", "--description", "Desc", "--mode", "manual", "--org-name", "Acme",
        ]);
        let outcome = create_organization(&boundary, args).await.unwrap();

        assert!(matches!(
            outcome,
            CreateOutcome::Invalid(ValidationError::MissingOrgContext(OrgContextGap::NoOfferings))
        ));
        assert!(boundary.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_manual_skips_incomplete_entries() {
        let boundary = RecordingBoundary::default();
        let args = create_args(&[
            "--name",
            "Bot",
            "--description",
            "Desc",
            "--mode",
            "manual",
            "--org-name",
            "Acme",
            "--product",
            "Widget=Nice",
            "--product",
            "Gadget",
            "--service",
            "Repairs=Same day",
        ]);
        let outcome = create_organization(&boundary, args).await.unwrap();

        let CreateOutcome::Created(submission) = outcome else {
            panic!("expected a created submission");
        };
        let Submission::Manual { organization, .. } = &submission else {
            panic!("expected a manual submission");
        };
        assert_eq!(organization.products.len(), 1);
        assert_eq!(organization.services[0].details, "Same day");
        assert_eq!(boundary.received.lock().unwrap().len(), 1);
    }

    // ---- init ----

    #[test]
    fn test_init_config_writes_once_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orgbot").join("config.toml");

        let mut config = OrgbotConfig::default();
        config.service.base_url = "http://bots.internal:9000".to_string();
        assert!(init_config(&config, &path, false).unwrap());
        assert_eq!(
            OrgbotConfig::load(&path).unwrap().service.base_url,
            "http://bots.internal:9000"
        );

        config.service.base_url = "http://other:1".to_string();
        assert!(!init_config(&config, &path, false).unwrap());
        assert_eq!(
            OrgbotConfig::load(&path).unwrap().service.base_url,
            "http://bots.internal:9000"
        );

        assert!(init_config(&config, &path, true).unwrap());
        assert_eq!(
            OrgbotConfig::load(&path).unwrap().service.base_url,
            "http://other:1"
        );
    }
}
