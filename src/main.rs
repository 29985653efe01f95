// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use paper_parse::utils::logging::{
    format_error, format_info, format_question, format_success, format_warning, init_logger,
};
use paper_parse::utils::check_store;
use paper_parse::{
    AppState, Config, HealthReport, HtmlViewer, JsonExporter, MemoryStore, PaperMetadata,
    PaperRepository, PaperStore, PdfTextSource, SupabaseStore, TextSource, TextViewer,
    UploadPipeline, source_for_path,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "paper_parse")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Extract numbered questions from exam-paper PDFs and store them", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Keep papers in memory instead of the hosted store
    #[arg(long, action = ArgAction::SetTrue)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the questions found in a document without storing them
    Extract {
        file: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        /// Also write the questions to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a document and store it as a new paper
    Upload {
        file: PathBuf,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Render a stored paper
    Show {
        paper_id: String,

        #[arg(long)]
        html: bool,

        /// Position content at its stored coordinates (with --html)
        #[arg(long, requires = "html")]
        layout: bool,
    },

    Export {
        paper_id: String,

        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Run the upload and viewer http api
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    Health,
}

#[derive(Args)]
struct MetadataArgs {
    #[arg(long)]
    exam_board: String,

    #[arg(long)]
    year: i32,

    #[arg(long)]
    session: String,

    #[arg(long)]
    paper_number: u8,

    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    level: Option<String>,

    #[arg(long)]
    total_marks: Option<u32>,

    #[arg(long)]
    title: Option<String>,
}

impl MetadataArgs {
    fn into_metadata(self, config: &Config) -> PaperMetadata {
        PaperMetadata {
            exam_board: self.exam_board,
            subject: self
                .subject
                .unwrap_or_else(|| config.upload.default_subject.clone()),
            level: self
                .level
                .unwrap_or_else(|| config.upload.default_level.clone()),
            year: self.year,
            session: self.session,
            paper_number: self.paper_number,
            total_marks: self.total_marks,
            title: self.title,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Extract {
            file,
            pretty,
            output,
        } => {
            cmd_extract(&file, pretty, output).await?;
        }
        Commands::Upload { file, metadata } => {
            let store = open_store(&config, cli.offline)?;
            let metadata = metadata.into_metadata(&config);
            cmd_upload(store, &file, metadata).await?;
        }
        Commands::Show {
            paper_id,
            html,
            layout,
        } => {
            let store = open_store(&config, cli.offline)?;
            let layout = layout || config.viewer.preserve_layout;
            cmd_show(store, &paper_id, html, layout).await?;
        }
        Commands::Export {
            paper_id,
            output,
            pretty,
        } => {
            let store = open_store(&config, cli.offline)?;
            cmd_export(store, &paper_id, output, pretty).await?;
        }
        Commands::Serve { host, port } => {
            let store = open_store(&config, cli.offline)?;
            cmd_serve(store, config, host, port).await?;
        }
        Commands::Health => {
            let store = open_store(&config, cli.offline)?;
            cmd_health(store).await?;
        }
    }

    Ok(())
}

fn open_store(config: &Config, offline: bool) -> Result<Arc<dyn PaperStore>> {
    if offline {
        info!("Using in-memory paper store; nothing will be persisted");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if config.store.service_key.is_none() {
        eprintln!(
            "{}",
            format_warning("No service key configured (SUPABASE_SERVICE_KEY); requests may be rejected")
        );
    }

    let store = SupabaseStore::new(config.store.clone()).context("Failed to create store client")?;
    Ok(Arc::new(store))
}

fn pipeline_for(file: &Path, store: Arc<dyn PaperStore>) -> UploadPipeline {
    let source: Arc<dyn TextSource> = Arc::from(source_for_path(file));
    UploadPipeline::new(source, PaperRepository::new(store))
}

fn read_document(file: &Path) -> Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))
}

async fn cmd_extract(file: &Path, pretty: bool, output: Option<PathBuf>) -> Result<()> {
    info!("Extracting questions from {}", file.display());

    let bytes = read_document(file)?;
    let pipeline = pipeline_for(file, Arc::new(MemoryStore::new()));
    let questions = pipeline.extract(bytes).await?;

    let json = if pretty {
        serde_json::to_string_pretty(&questions)?
    } else {
        serde_json::to_string(&questions)?
    };
    println!("{}", json);

    if let Some(dir) = output {
        let name = file.to_string_lossy();
        let path = JsonExporter::new(dir)?.export_extraction(&name, &questions, pretty)?;
        eprintln!("{}", format_success(&format!("Wrote {}", path.display())));
    }

    eprintln!(
        "{}",
        format_info(&format!("{} questions found", questions.len()))
    );
    for question in &questions {
        eprintln!("  {}", format_question(question.question_number.as_str(), question.marks));
    }

    Ok(())
}

async fn cmd_upload(store: Arc<dyn PaperStore>, file: &Path, metadata: PaperMetadata) -> Result<()> {
    info!("Uploading {} as {}", file.display(), metadata.display_title());

    let bytes = read_document(file)?;
    let pipeline = pipeline_for(file, store);

    match pipeline.process(bytes, &metadata).await {
        Ok(upload) => {
            println!("{}", serde_json::to_string_pretty(&upload.response)?);
            eprintln!(
                "{}",
                format_success(&format!(
                    "Stored {} questions as paper {}",
                    upload.response.questions_count, upload.paper.id
                ))
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            Err(e).context("Upload failed")
        }
    }
}

async fn cmd_show(
    store: Arc<dyn PaperStore>,
    paper_id: &str,
    html: bool,
    layout: bool,
) -> Result<()> {
    let repository = PaperRepository::new(store);
    let tree = repository
        .get_paper(paper_id)
        .await
        .with_context(|| format!("Failed to load paper {}", paper_id))?;

    let rendered = if html {
        HtmlViewer::new().with_layout(layout).render(&tree)?
    } else {
        TextViewer::new().render(&tree)?
    };
    print!("{}", rendered);

    Ok(())
}

async fn cmd_export(
    store: Arc<dyn PaperStore>,
    paper_id: &str,
    output: PathBuf,
    pretty: bool,
) -> Result<()> {
    info!("Exporting paper {}", paper_id);

    let repository = PaperRepository::new(store);
    let tree = repository
        .get_paper(paper_id)
        .await
        .with_context(|| format!("Failed to load paper {}", paper_id))?;

    let exporter = JsonExporter::new(output)?;
    let path = exporter.export_paper(&tree, pretty)?;
    eprintln!("{}", format_success(&format!("Exported to {}", path.display())));

    Ok(())
}

async fn cmd_serve(
    store: Arc<dyn PaperStore>,
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let pipeline = UploadPipeline::new(
        Arc::new(PdfTextSource),
        PaperRepository::new(store),
    );
    let state = AppState::new(pipeline, config);

    paper_parse::api::serve(state, &host, port)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn cmd_health(store: Arc<dyn PaperStore>) -> Result<()> {
    let check = check_store(store.as_ref(), Duration::from_secs(2)).await;
    let report = HealthReport::new(vec![check]);
    print!("{}", report.format());

    if !report.is_healthy() {
        return Err(anyhow::anyhow!("Paper store is unreachable"));
    }

    Ok(())
}
