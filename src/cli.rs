use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ArgAction;
use routier::{Catalog, Route, storage, table};
use tracing::instrument;

/// Environment variable supplying the default data file path when
/// `--data` is omitted.
pub const DATA_FILE_ENV: &str = "ROUTES_DATA";

/// Command-line register of transit routes.
#[derive(Debug, clap::Parser)]
#[command(name = "routes", version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The data file holding the route records
    #[arg(short, long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Executes the selected command to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if no data file location can be resolved, or if
    /// the command fails against the data file.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        // The environment is read once here and passed in as a snapshot,
        // so resolution itself stays a pure function.
        let data = resolve_data_file(self.data, std::env::var_os(DATA_FILE_ENV))?;
        self.command.run(&data)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Resolves the data file location.
///
/// An explicit `--data` argument takes priority; otherwise the value of
/// the [`DATA_FILE_ENV`] environment variable is used. An empty variable
/// counts as absent. When neither source yields a path the command fails
/// before any file access is attempted.
fn resolve_data_file(
    explicit: Option<PathBuf>,
    env_value: Option<OsString>,
) -> anyhow::Result<PathBuf> {
    explicit
        .or_else(|| {
            env_value
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .ok_or_else(|| anyhow::anyhow!("The data file name is absent"))
}

/// Loads the catalog from `data`, or starts empty when the file does not
/// exist yet.
fn load_or_empty(data: &Path) -> anyhow::Result<Catalog> {
    if data.exists() {
        storage::load(data).with_context(|| format!("failed to load {}", data.display()))
    } else {
        Ok(Catalog::new())
    }
}

#[derive(Debug, clap::Parser)]
enum Command {
    /// Add a new route
    Add(Add),

    /// Display all routes
    Display(Display),

    /// Select routes by number
    Select(Select),
}

impl Command {
    fn run(self, data: &Path) -> anyhow::Result<()> {
        match self {
            Self::Add(command) => command.run(data),
            Self::Display(command) => command.run(data),
            Self::Select(command) => command.run(data),
        }
    }
}

#[derive(Debug, clap::Parser)]
struct Add {
    /// The start point of the route
    #[arg(short, long)]
    start: String,

    /// The finish point of the route
    #[arg(short, long)]
    finish: Option<String>,

    /// The number of the route
    #[arg(short, long)]
    number: i64,
}

impl Add {
    #[instrument]
    fn run(self, data: &Path) -> anyhow::Result<()> {
        let catalog = load_or_empty(data)?;

        // A missing finish point is stored as an empty string.
        let route = Route::new(self.start, self.finish.unwrap_or_default(), self.number);
        let catalog = catalog.append(route);

        storage::save(data, &catalog)
            .with_context(|| format!("failed to write {}", data.display()))?;

        tracing::info!("saved {} route(s) to {}", catalog.len(), data.display());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
struct Display {}

impl Display {
    #[instrument]
    fn run(self, data: &Path) -> anyhow::Result<()> {
        let catalog = load_or_empty(data)?;

        print!("{}", table::render(&catalog));
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
struct Select {
    /// The route number to select
    #[arg(short = 'N', long = "numb")]
    number: i64,
}

impl Select {
    #[instrument]
    fn run(self, data: &Path) -> anyhow::Result<()> {
        let catalog = load_or_empty(data)?;
        let selected = catalog.select_by_number(self.number);

        print!("{}", table::render(&selected));
        Ok(())
    }
}
