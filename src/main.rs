use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use protogen::commands::{
    self, AddModuleOptions, AddPageOptions, AddRoleOptions, CreateOptions, UpdatePageOptions,
};
use protogen::config::{self, ConfigOverrides};
use protogen::types::{PageStatus, Platform};
use protogen::{check, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Rendering target shared by every command that writes pages.
#[derive(clap::Args, Clone)]
struct PlatformArgs {
    /// Target platform: phone-framed pages or full-width desktop pages
    #[arg(long, value_enum, default_value_t = Platform::Mobile)]
    platform: Platform,
}

#[derive(Parser)]
#[command(name = "protogen")]
#[command(about = "Scaffold low-fidelity HTML prototypes from a role/module/page outline")]
#[command(long_about = "\
Scaffold low-fidelity HTML prototypes from a role/module/page outline

A project is a directory of static files:

  prototype/
  ├── index.html                   # Navigator: menu, search, progress, preview
  ├── style.css                    # Shared styles (platform-specific block)
  ├── progress.js                  # Client-side status tracking
  ├── menu.json                    # Navigation tree + page status
  ├── design-standards.md          # Typography, spacing, layout rules
  ├── README.md
  └── pages/
      └── role1/
          ├── moduleA/
          │   ├── page1.html
          │   └── page2.html
          └── moduleB/
              └── page1.html

Page paths come from positions in the outline. New roles, modules and pages
are appended after the existing ones, so generated files never move.

Run 'protogen gen-config' to print the stock outline as a starting config.")]
#[command(version)]
struct Cli {
    /// Project directory (required by every command except gen-config)
    #[arg(short = 'n', long = "name", global = true)]
    name: Option<PathBuf>,

    /// Log debug detail (overridden by PROTOGEN_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only (overridden by PROTOGEN_LOG)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new prototype project from a config outline
    Create {
        /// JSON outline, merged over the stock default
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Project title (overrides project_name)
        #[arg(long)]
        title: Option<String>,
        /// Project description (overrides project_description)
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        platform: PlatformArgs,
        /// Write into an existing directory
        #[arg(long)]
        force: bool,
    },
    /// Change a page's status and/or replace its content
    UpdatePage {
        /// Page name as shown in the menu
        page: String,
        /// Role holding the page, when the name is ambiguous
        #[arg(long)]
        role: Option<String>,
        /// Module holding the page, when the name is ambiguous
        #[arg(long)]
        module: Option<String>,
        #[arg(long, value_enum)]
        status: Option<PageStatus>,
        /// .html or .md file to use as the page content
        #[arg(long)]
        page_content: Option<PathBuf>,
        /// Keep the --page-content file after importing it
        #[arg(long)]
        keep_source: bool,
        #[command(flatten)]
        platform: PlatformArgs,
    },
    /// Append a page to an existing module
    AddPage {
        #[arg(long)]
        role: String,
        #[arg(long)]
        module: String,
        #[arg(long)]
        page_name: String,
        #[arg(long)]
        page_desc: Option<String>,
        #[command(flatten)]
        platform: PlatformArgs,
    },
    /// Append a module to an existing role
    AddModule {
        #[arg(long)]
        role: String,
        #[arg(long)]
        module_name: String,
        #[arg(long)]
        module_desc: Option<String>,
        /// Comma-separated page names (default: one page)
        #[arg(long, value_delimiter = ',')]
        pages: Vec<String>,
        #[command(flatten)]
        platform: PlatformArgs,
    },
    /// Append a role with a default module and page
    AddRole {
        #[arg(long)]
        role_name: String,
        #[arg(long)]
        role_desc: Option<String>,
        #[command(flatten)]
        platform: PlatformArgs,
    },
    /// Show every page's status and overall completion
    Status,
    /// Verify menu.json and the page files agree
    Check,
    /// Print the stock config outline
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let project_dir = match &cli.command {
        Command::GenConfig => PathBuf::new(),
        _ => cli.name.unwrap_or_else(|| missing_name()),
    };

    match cli.command {
        Command::Create {
            config,
            title,
            description,
            platform,
            force,
        } => {
            let report = commands::create(
                &project_dir,
                &CreateOptions {
                    config,
                    overrides: ConfigOverrides { title, description },
                    platform: platform.platform,
                    force,
                },
            )?;
            output::print_create_output(&report);
        }
        Command::UpdatePage {
            page,
            role,
            module,
            status,
            page_content,
            keep_source,
            platform,
        } => {
            let now = chrono::Local::now().naive_local();
            let report = commands::update_page(
                &project_dir,
                &UpdatePageOptions {
                    page,
                    role,
                    module,
                    status,
                    content: page_content,
                    keep_source,
                    platform: platform.platform,
                },
                now,
            )?;
            output::print_update_output(&report);
        }
        Command::AddPage {
            role,
            module,
            page_name,
            page_desc,
            platform,
        } => {
            let report = commands::add_page(
                &project_dir,
                &AddPageOptions {
                    role,
                    module,
                    page: page_name,
                    description: page_desc,
                    platform: platform.platform,
                },
            )?;
            output::print_add_output("page", &report);
        }
        Command::AddModule {
            role,
            module_name,
            module_desc,
            pages,
            platform,
        } => {
            let report = commands::add_module(
                &project_dir,
                &AddModuleOptions {
                    role,
                    module: module_name,
                    description: module_desc,
                    pages,
                    platform: platform.platform,
                },
            )?;
            output::print_add_output("module", &report);
        }
        Command::AddRole {
            role_name,
            role_desc,
            platform,
        } => {
            let report = commands::add_role(
                &project_dir,
                &AddRoleOptions {
                    role: role_name,
                    description: role_desc,
                    platform: platform.platform,
                },
            )?;
            output::print_add_output("role", &report);
        }
        Command::Status => {
            let menu = commands::status(&project_dir)?;
            output::print_status_output(&menu);
        }
        Command::Check => {
            let report = check::check(&project_dir)?;
            output::print_check_output(&report);
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            println!("{}", config::stock_config_json());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Global args cannot be marked required, so report a missing `--name` the
/// way clap reports any other missing argument.
fn missing_name() -> ! {
    Cli::command()
        .error(
            ErrorKind::MissingRequiredArgument,
            "the following required arguments were not provided:\n  --name <NAME>",
        )
        .exit()
}

/// `PROTOGEN_LOG` wins; otherwise `-q` → error, `-v` → debug, default warn.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PROTOGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
