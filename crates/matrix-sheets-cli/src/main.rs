//! Matrix Sheets CLI - serve, seed, import and export matrices

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use matrix_sheets::prelude::*;
use matrix_sheets::{disassemble, register_user, seed_mock_data, MatrixView};
use matrix_sheets_server::ServerConfig;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "msheets")]
#[command(author, version, about = "Labelled matrix store and JSON API")]
struct Cli {
    /// Log filter (e.g. "info", "matrix_sheets_server=debug")
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServerConfig),

    /// Print a CSV file as matrix JSON without storing it
    Show {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Create a user in a database
    AddUser {
        #[arg(long, env = "MSHEETS_DATABASE")]
        database: PathBuf,

        username: String,

        #[arg(long)]
        password: String,
    },

    /// Import a CSV file as a new matrix
    Import {
        #[arg(long, env = "MSHEETS_DATABASE")]
        database: PathBuf,

        /// Owning username
        #[arg(long)]
        owner: String,

        /// Matrix name (default: file stem)
        #[arg(long)]
        name: Option<String>,

        /// Unique slug (default: file stem)
        #[arg(long)]
        slug: Option<String>,

        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Export a stored matrix as CSV to stdout or a file
    #[command(alias = "csv")]
    Export {
        #[arg(long, env = "MSHEETS_DATABASE")]
        database: PathBuf,

        /// Matrix id
        id: i64,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Accept duplicate labels, keeping the last
        #[arg(long)]
        lenient_labels: bool,
    },

    /// Fill a database with mock matrices
    Seed {
        #[arg(long, env = "MSHEETS_DATABASE")]
        database: PathBuf,

        /// Number of matrices to create
        #[arg(short, long, default_value = "400")]
        count: usize,
    },
}

#[derive(Args)]
struct CsvArgs {
    /// Field delimiter (default: comma)
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// First record holds values, not column names
    #[arg(long)]
    no_header: bool,

    /// First field holds a value, not the row name
    #[arg(long)]
    no_row_labels: bool,
}

impl CsvArgs {
    fn read_options(&self) -> Result<CsvReadOptions> {
        Ok(CsvReadOptions {
            delimiter: delimiter_byte(self.delimiter)?,
            has_header: !self.no_header,
            has_row_labels: !self.no_row_labels,
            ..Default::default()
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).context("Invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Serve(config) => serve(config),
        Commands::Show { input, csv } => show(&input, &csv),
        Commands::AddUser {
            database,
            username,
            password,
        } => add_user(&database, &username, &password),
        Commands::Import {
            database,
            owner,
            name,
            slug,
            input,
            csv,
        } => import(&database, &owner, name, slug, &input, &csv),
        Commands::Export {
            database,
            id,
            output,
            delimiter,
            lenient_labels,
        } => export(
            &database,
            MatrixId(id),
            output.as_deref(),
            delimiter,
            lenient_labels,
        ),
        Commands::Seed { database, count } => seed(&database, count),
    }
}

fn serve(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(matrix_sheets_server::serve(config))
        .context("Server failed")
}

fn show(input: &Path, csv: &CsvArgs) -> Result<()> {
    let grid = CsvReader::read_file(input, &csv.read_options()?)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    // Same path a stored matrix takes: split into records, then reassemble
    let (cells, labels) = disassemble(&grid.grid, &grid.row_labels, &grid.col_labels)?;
    let assembled = GridAssembler::new().assemble(&cells, &labels)?;

    let view = MatrixView {
        name: file_stem(input)?,
        grid: assembled.grid,
        row_names: assembled.row_labels,
        col_names: assembled.col_labels,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &view).context("Failed to write JSON")?;
    writeln!(stdout)?;
    Ok(())
}

fn add_user(database: &Path, username: &str, password: &str) -> Result<()> {
    let store = open(database)?;
    let user = register_user(&store, username, password)
        .with_context(|| format!("Failed to create user '{}'", username))?;
    eprintln!("Created user {} ({})", user.username, user.id);
    Ok(())
}

fn import(
    database: &Path,
    owner: &str,
    name: Option<String>,
    slug: Option<String>,
    input: &Path,
    csv: &CsvArgs,
) -> Result<()> {
    let store = open(database)?;
    let Some((user, _)) = store.user_credentials(owner)? else {
        bail!("User '{}' not found", owner);
    };

    let stem = file_stem(input)?;
    let name = name.unwrap_or_else(|| stem.clone());
    let slug = slug.unwrap_or(stem);

    let matrix = store
        .import_csv(user.id, &name, &slug, input, &csv.read_options()?)
        .with_context(|| format!("Failed to import '{}'", input.display()))?;

    eprintln!("Imported '{}' as matrix {}", matrix.name, matrix.id);
    Ok(())
}

fn export(
    database: &Path,
    id: MatrixId,
    output: Option<&Path>,
    delimiter: char,
    lenient_labels: bool,
) -> Result<()> {
    let store = open(database)?;
    let policy = if lenient_labels {
        LabelPolicy::LastWins
    } else {
        LabelPolicy::Strict
    };
    let assembler = GridAssembler::with_label_policy(policy);
    let options = CsvWriteOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..Default::default()
    };

    let view = match output {
        Some(path) => store
            .export_csv(id, &assembler, path, &options)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => {
            let view = store.view(id, &assembler)?;
            if let Some(view) = &view {
                CsvWriter::write(&view.clone().into_assembled(), io::stdout().lock(), &options)
                    .context("Failed to write to stdout")?;
            }
            view
        }
    };

    match view {
        Some(view) => {
            eprintln!("Exported '{}' ({} rows)", view.name, view.grid.len());
            Ok(())
        }
        None => bail!("Matrix {} not found", id),
    }
}

fn seed(database: &Path, count: usize) -> Result<()> {
    let store = open(database)?;
    let summary = seed_mock_data(&store, count).context("Failed to seed")?;
    eprintln!(
        "Created {} matrices for '{}' ({} already present)",
        summary.created, summary.user.username, summary.skipped
    );
    Ok(())
}

fn open(database: &Path) -> Result<SqliteStore> {
    SqliteStore::open(database)
        .with_context(|| format!("Failed to open database '{}'", database.display()))
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("No file name in '{}'", path.display()))
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}
