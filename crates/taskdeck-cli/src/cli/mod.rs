//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck_core::api::ApiClient;
use taskdeck_core::config::Config;
use taskdeck_core::logging;
use taskdeck_core::session::Session;

mod commands;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Terminal client for your to-do list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the tasks API (overrides TASKDECK_API_URL and config)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

/// Password flag shared by `login` and `register`.
#[derive(clap::Args, Debug, Clone, Default)]
struct PasswordArgs {
    /// Account password (read from stdin when omitted)
    #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Create a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long = "full-name", value_name = "NAME")]
        full_name: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Forget the stored access token
    Logout,

    /// List tasks
    List {
        /// Only show tasks whose title or description contains this text
        #[arg(short, long, value_name = "QUERY")]
        search: Option<String>,
    },

    /// Show a single task
    Show {
        #[arg(value_name = "TASK_ID")]
        id: String,
    },

    /// Create a task
    Add {
        /// Task title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Optional longer description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Flip a task between pending and done
    Toggle {
        #[arg(value_name = "TASK_ID")]
        id: String,
    },

    /// Mark a task as done
    Done {
        #[arg(value_name = "TASK_ID")]
        id: String,
    },

    /// Mark a task as pending
    Undo {
        #[arg(value_name = "TASK_ID")]
        id: String,
    },

    /// Delete a task
    Delete {
        #[arg(value_name = "TASK_ID")]
        id: String,
    },

    /// Show completion stats
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Save the API base URL to the config file
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("load config")?;
    let _log_guard = logging::init(&config);

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let Cli { command, api_url } = cli;

    let client = || -> Result<ApiClient> {
        ApiClient::from_config(&config, api_url.as_deref(), Session::from_home())
            .context("configure API client")
    };

    // default to interactive mode
    let Some(command) = command else {
        return taskdeck_tui::run_interactive(client()?);
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&client()?, &email, password.password).await
        }
        Commands::Register {
            email,
            full_name,
            password,
        } => commands::auth::register(&client()?, &email, &full_name, password.password).await,
        Commands::Logout => commands::auth::logout(&Session::from_home()),

        Commands::List { search } => commands::tasks::list(&client()?, search.as_deref()).await,
        Commands::Show { id } => commands::tasks::show(&client()?, &id).await,
        Commands::Add { title, description } => {
            commands::tasks::add(&client()?, &title, description.as_deref()).await
        }
        Commands::Toggle { id } => commands::tasks::toggle(&client()?, &id).await,
        Commands::Done { id } => commands::tasks::set_completed(&client()?, &id, true).await,
        Commands::Undo { id } => commands::tasks::set_completed(&client()?, &id, false).await,
        Commands::Delete { id } => commands::tasks::delete(&client()?, &id).await,
        Commands::Stats => commands::tasks::stats(&client()?).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
