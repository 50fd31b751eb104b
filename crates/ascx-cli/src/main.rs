// Rust guideline compliant 2026-10-12

//! ascx CLI Application
//!
//! Command-line client for the App Store Connect release pipeline.

use ascx_app::{AppError, CatalogKind, Collection, ErrorEnvelope};
use ascx_cli::commands::{self, list::PageArgs, submit::ValidateArgs, Session};
use ascx_cli::{create_formatter, should_use_color, OutputFormatter};
use ascx_core::{Config, OutputFormat};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ascx",
    version,
    about = "ascx: App Store Connect release pipeline client",
    long_about = "ascx reports the release state of an app, checks that a version and its products are ready for review, and lists paginated App Store Connect collections.",
    after_help = "Examples:\n  ascx status --app 123456789 --include builds,appstore\n  ascx submit validate --app 123456789 --version 2.1.0\n  ascx validate iap --app 123456789 --strict\n  ascx bundle-ids list --limit 50\n  ascx bundle-ids list --next \"https://api.appstoreconnect.apple.com/v1/bundleIds?cursor=...\"\n"
)]
struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, global = true)]
    output: Option<OutputArg>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log requests and progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputArg {
    Json,
    Table,
    Markdown,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Table => OutputFormat::Table,
            OutputArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Show the release pipeline dashboard of an app
    Status {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        /// Sections to include: builds,testflight,appstore,submission,review,phased-release,links
        #[arg(long)]
        include: Option<String>,
    },

    /// App Store submission commands
    Submit {
        #[command(subcommand)]
        command: SubmitCommands,
    },

    /// Review readiness of in-app purchases and subscriptions
    Validate {
        #[command(subcommand)]
        command: ValidateCommands,
    },

    /// Bundle ID commands
    BundleIds {
        #[command(subcommand)]
        command: BundleIdCommands,
    },

    /// App tag commands
    AppTags {
        #[command(subcommand)]
        command: AppTagCommands,
    },

    /// In-app purchase commands
    Iap {
        #[command(subcommand)]
        command: IapCommands,
    },

    /// Subscription commands
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum SubmitCommands {
    /// Check that an App Store version is ready to submit
    Validate {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        /// Version string, e.g. 2.1.0
        #[arg(long = "version")]
        version_string: Option<String>,

        /// App Store version ID
        #[arg(long)]
        version_id: Option<String>,

        /// Platform: IOS, MAC_OS, TV_OS, VISION_OS
        #[arg(long, default_value = "IOS")]
        platform: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ValidateCommands {
    /// Check in-app purchases
    Iap {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        /// Treat every finding as blocking
        #[arg(long)]
        strict: bool,
    },

    /// Check subscriptions of every subscription group
    Subscriptions {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        /// Treat every finding as blocking
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
enum BundleIdCommands {
    /// List bundle IDs
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Bundle ID capability commands
    Capabilities {
        #[command(subcommand)]
        command: CapabilityCommands,
    },

    /// Bundle ID profile commands
    Profiles {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum CapabilityCommands {
    /// List capabilities of a bundle ID
    List {
        /// Bundle ID resource ID
        #[arg(long)]
        bundle: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ProfileCommands {
    /// List provisioning profiles of a bundle ID
    List {
        /// Bundle ID resource ID
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, clap::Subcommand)]
enum AppTagCommands {
    /// List tags of an app
    List {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// App tag territory commands
    Territories {
        #[command(subcommand)]
        command: TerritoryCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum TerritoryCommands {
    /// List territories of an app tag
    List {
        /// App tag ID
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, clap::Subcommand)]
enum IapCommands {
    /// List in-app purchases of an app
    List {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, clap::Subcommand)]
enum SubscriptionCommands {
    /// Subscription group commands
    Groups {
        #[command(subcommand)]
        command: GroupCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum GroupCommands {
    /// List subscription groups of an app
    List {
        /// App ID (falls back to the configured app)
        #[arg(long)]
        app: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color = !cli.no_color && should_use_color();
    let config = Config::load(cli.config.as_deref());
    let format = cli
        .output
        .map(OutputFormat::from)
        .or_else(|| config.as_ref().ok().map(|config| config.output_format))
        .unwrap_or_default();
    let formatter = create_formatter(format, cli.pretty, use_color);

    let result = config
        .map_err(|e| anyhow::Error::new(AppError::from(e)))
        .and_then(|config| run(cli.command, config, formatter.as_ref()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            let envelope = match app_error {
                Some(app_error) => ErrorEnvelope::from_error(app_error),
                None => ErrorEnvelope::from_message(format!("{:#}", err)),
            };
            eprintln!("{}", formatter.format_error(&envelope));
            if app_error.is_some_and(AppError::is_usage) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.as_str()))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(command: Commands, config: Config, formatter: &dyn OutputFormatter) -> anyhow::Result<()> {
    let session = Session::connect(config)?;

    match command {
        Commands::Status { app, include } => {
            let include = include.unwrap_or_default();
            commands::status::execute(&session, app.as_deref(), &include, formatter)
        }
        Commands::Submit {
            command:
                SubmitCommands::Validate {
                    app,
                    version_string,
                    version_id,
                    platform,
                },
        } => commands::submit::execute(
            &session,
            ValidateArgs {
                app,
                version: version_string,
                version_id,
                platform,
            },
            formatter,
        ),
        Commands::Validate { command } => {
            let (kind, app, strict) = match command {
                ValidateCommands::Iap { app, strict } => (CatalogKind::InAppPurchases, app, strict),
                ValidateCommands::Subscriptions { app, strict } => {
                    (CatalogKind::Subscriptions, app, strict)
                }
            };
            commands::validate::execute(&session, kind, app.as_deref(), strict, formatter)
        }
        Commands::BundleIds { command } => {
            let (collection, parent, page) = match command {
                BundleIdCommands::List { page } => (Collection::BundleIds, None, page),
                BundleIdCommands::Capabilities {
                    command: CapabilityCommands::List { bundle, page },
                } => (Collection::BundleIdCapabilities, bundle, page),
                BundleIdCommands::Profiles {
                    command: ProfileCommands::List { id, page },
                } => (Collection::BundleIdProfiles, id, page),
            };
            commands::list::execute(&session, collection, parent.as_deref(), page, formatter)
        }
        Commands::AppTags { command } => {
            let (collection, parent, page) = match command {
                AppTagCommands::List { app, page } => (Collection::AppTags, app, page),
                AppTagCommands::Territories {
                    command: TerritoryCommands::List { id, page },
                } => (Collection::AppTagTerritories, id, page),
            };
            commands::list::execute(&session, collection, parent.as_deref(), page, formatter)
        }
        Commands::Iap {
            command: IapCommands::List { app, page },
        } => commands::list::execute(
            &session,
            Collection::InAppPurchases,
            app.as_deref(),
            page,
            formatter,
        ),
        Commands::Subscriptions {
            command:
                SubscriptionCommands::Groups {
                    command: GroupCommands::List { app, page },
                },
        } => commands::list::execute(
            &session,
            Collection::SubscriptionGroups,
            app.as_deref(),
            page,
            formatter,
        ),
    }
}
