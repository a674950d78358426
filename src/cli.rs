use clap::Parser;

/// Command line interface for the application
#[derive(Parser)]
pub struct Cli {
    /// Port the API server listens on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Path to the SQLite database file; falls back to the
    /// DATABASE_PATH environment variable, then "opsboard.db"
    #[arg(long)]
    pub database_path: Option<String>,

    /// Directory holding comment attachment blobs; falls back to the
    /// BLOB_DIR environment variable, then "blobs"
    #[arg(long)]
    pub blob_dir: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to daily rotating files under "logs"
    #[arg(long, default_value_t = false)]
    pub log_to_file: bool,
}
