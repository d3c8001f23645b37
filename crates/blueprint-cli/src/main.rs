mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, draft::DraftSubcommand, idea::IdeaSubcommand,
    production::ProductionSubcommand, project::ProjectSubcommand,
    template::TemplateSubcommand,
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "blueprint",
    about = "Collect project requirements and generate PRD and TDD documents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: nearest directory containing .blueprint/)
    #[arg(long, global = true, env = "BLUEPRINT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .blueprint/ with a default config and an empty record store
    Init,

    /// Manage projects and export their documents
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Manage in-progress wizard drafts
    Draft {
        #[command(subcommand)]
        subcommand: DraftSubcommand,
    },

    /// Manage the ordered idea list
    Idea {
        #[command(subcommand)]
        subcommand: IdeaSubcommand,
    },

    /// Manage reusable tech templates
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Track shipped apps
    Production {
        #[command(subcommand)]
        subcommand: ProductionSubcommand,
    },

    /// Generate documents from a draft or an existing project
    Generate {
        /// Draft to generate from (deleted on success)
        #[arg(long, conflicts_with = "project", required_unless_present = "project")]
        draft: Option<Uuid>,
        /// Project to regenerate documents for
        #[arg(long)]
        project: Option<Uuid>,
        /// Document to generate: prd or tdd (repeatable)
        #[arg(long = "doc", value_name = "DOC")]
        docs: Vec<String>,
    },

    /// Print the prompt that would be sent for one document
    Prompt {
        #[arg(long, conflicts_with = "project", required_unless_present = "project")]
        draft: Option<Uuid>,
        #[arg(long)]
        project: Option<Uuid>,
        /// Document type: prd or tdd
        #[arg(long = "doc", value_name = "DOC", default_value = "prd")]
        doc: String,
    },

    /// Show or validate .blueprint/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,
        /// Open the API in a browser once listening
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Project { subcommand } => cmd::project::run(&root, subcommand, cli.json),
        Commands::Draft { subcommand } => cmd::draft::run(&root, subcommand, cli.json),
        Commands::Idea { subcommand } => cmd::idea::run(&root, subcommand, cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Production { subcommand } => cmd::production::run(&root, subcommand, cli.json),
        Commands::Generate {
            draft,
            project,
            docs,
        } => cmd::generate::run(&root, draft, project, &docs, cli.json),
        Commands::Prompt {
            draft,
            project,
            doc,
        } => cmd::prompt::run(&root, draft, project, &doc, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
