//! Command-line interface for bootstrapping a gazetteer geocoding database.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gazetteer_core::{ConnectionTarget, Connector, ImportOptions, SessionError};
use gazetteer_pg::{PgConnector, SystemProcessRunner};
use gazetteer_setup::{
    MODULE_FILE_NAME, SetupError, create_database, import_osm_data, install_module,
    load_base_data, setup_extensions, verify_loadable,
};
use log::info;
use thiserror::Error;

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Any parse, validation, or pipeline failure; the caller is expected to
/// print the error and exit non-zero.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Import(args) => {
            let config = ImportConfig::from(args);
            config.validate_sources()?;
            run_import(&config)
        }
    }
}

fn run_import(config: &ImportConfig) -> Result<(), CliError> {
    let target = config.connection_target();
    let runner = SystemProcessRunner;
    let connector = PgConnector::new(target.clone());

    create_database(&runner, &connector, &target, config.ro_user.as_deref())?;
    {
        let mut session = connector.connect().map_err(CliError::Connect)?;
        setup_extensions(&mut session)?;
        let module_dir = install_module(
            &config.module_src,
            &config.project_dir,
            config.module_dir.as_deref(),
        )?;
        verify_loadable(&mut session, &module_dir)?;
    }
    load_base_data(&connector, &config.data_dir, config.no_partitions)?;
    import_osm_data(
        &runner,
        &connector,
        &target,
        &config.osm_file,
        &config.import_options(),
        config.drop_scratch,
    )?;

    info!("database '{}' bootstrapped", target.dbname);
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "gazetteer",
    about = "Bootstrap tooling for the gazetteer geocoding database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database and run the initial OSM import.
    Import(ImportArgs),
}

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Provision a fresh geocoding database: create it, install \
                  extensions and the native normalisation module, load the \
                  static country data, and bulk-import the given OSM file. \
                  The target database must not already exist.",
    about = "Provision a fresh geocoding database from an OSM file"
)]
struct ImportArgs {
    /// OSM input file to import.
    #[arg(long, value_name = "path")]
    osm_file: PathBuf,
    /// Project directory the module is installed under.
    #[arg(long, value_name = "path", default_value = ".")]
    project_dir: PathBuf,
    /// Directory containing the compiled normalisation module.
    #[arg(long, value_name = "path")]
    module_src: PathBuf,
    /// Use the module from this directory instead of installing one.
    #[arg(long, value_name = "path")]
    module_dir: Option<PathBuf>,
    /// Directory containing the static country data resources.
    #[arg(long, value_name = "path")]
    data_dir: PathBuf,
    /// Keep all country data in a single partition.
    #[arg(long)]
    no_partitions: bool,
    /// Drop importer scratch data once the import has been verified.
    #[arg(long = "drop")]
    drop_scratch: bool,
    /// Read-only role the query frontend will connect as; must already exist.
    #[arg(long, value_name = "role")]
    ro_user: Option<String>,
    /// Importer binary to run.
    #[arg(long, value_name = "path", default_value = "osm2pgsql")]
    osm2pgsql: PathBuf,
    /// Tag-processing style file for the importer.
    #[arg(long, value_name = "path")]
    osm2pgsql_style: Option<PathBuf>,
    /// Importer node cache size in MB; sized automatically when omitted.
    #[arg(long, value_name = "MB", default_value_t = 0)]
    osm2pgsql_cache: u64,
    /// Disk-backed node cache file, as an alternative to the in-memory cache.
    #[arg(long, value_name = "path")]
    flatnode_file: Option<PathBuf>,
    /// Name of the database to create.
    #[arg(long, short = 'd', value_name = "name")]
    database: String,
    /// Database server host.
    #[arg(long, value_name = "host")]
    host: Option<String>,
    /// Database server port.
    #[arg(long, value_name = "port")]
    port: Option<u16>,
    /// Role to connect as during the bootstrap; needs superuser rights.
    #[arg(long, value_name = "role")]
    user: Option<String>,
}

/// Validated configuration for one bootstrap run.
#[derive(Debug, Clone)]
struct ImportConfig {
    osm_file: PathBuf,
    project_dir: PathBuf,
    module_src: PathBuf,
    module_dir: Option<PathBuf>,
    data_dir: PathBuf,
    no_partitions: bool,
    drop_scratch: bool,
    ro_user: Option<String>,
    osm2pgsql: PathBuf,
    osm2pgsql_style: Option<PathBuf>,
    osm2pgsql_cache: u64,
    flatnode_file: Option<PathBuf>,
    database: String,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
}

impl ImportConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_file(&self.osm_file, "osm-file")?;
        if self.module_dir.is_none() {
            Self::require_file(&self.module_src.join(MODULE_FILE_NAME), "module-src")?;
        }
        if !self.data_dir.is_dir() {
            return Err(CliError::NotADirectory {
                field: "data-dir",
                path: self.data_dir.clone(),
            });
        }
        Ok(())
    }

    fn require_file(path: &Path, field: &'static str) -> Result<(), CliError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }

    fn connection_target(&self) -> ConnectionTarget {
        let mut target = ConnectionTarget::new(&self.database);
        if let Some(host) = &self.host {
            target = target.with_host(host);
        }
        if let Some(port) = self.port {
            target = target.with_port(port);
        }
        if let Some(user) = &self.user {
            target = target.with_user(user);
        }
        // Passwords come from the standard libpq variable, never from argv.
        if let Ok(password) = std::env::var("PGPASSWORD") {
            target = target.with_password(password);
        }
        target
    }

    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            osm2pgsql: self.osm2pgsql.clone(),
            style: self.osm2pgsql_style.clone(),
            input_file: None,
            flatnode_file: self.flatnode_file.clone(),
            cache_size_mb: self.osm2pgsql_cache,
            append: false,
            threads: 1,
        }
    }
}

impl From<ImportArgs> for ImportConfig {
    fn from(args: ImportArgs) -> Self {
        Self {
            osm_file: args.osm_file,
            project_dir: args.project_dir,
            module_src: args.module_src,
            module_dir: args.module_dir,
            data_dir: args.data_dir,
            no_partitions: args.no_partitions,
            drop_scratch: args.drop_scratch,
            ro_user: args.ro_user,
            osm2pgsql: args.osm2pgsql,
            osm2pgsql_style: args.osm2pgsql_style,
            osm2pgsql_cache: args.osm2pgsql_cache,
            flatnode_file: args.flatnode_file,
            database: args.database,
            host: args.host,
            port: args.port,
            user: args.user,
        }
    }
}

/// Errors emitted by the bootstrap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Argument the path came from.
        field: &'static str,
        /// The offending path.
        path: PathBuf,
    },
    /// A referenced input path exists but is not a directory.
    #[error("{field} path {path:?} is not a directory")]
    NotADirectory {
        /// Argument the path came from.
        field: &'static str,
        /// The offending path.
        path: PathBuf,
    },
    /// Opening a database session outside the pipeline stages failed.
    #[error("failed to open a database session: {0}")]
    Connect(#[source] SessionError),
    /// A pipeline stage failed.
    #[error(transparent)]
    Setup(#[from] SetupError),
}
