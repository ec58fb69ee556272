use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use s3_sdk_client::{
    config_from_lookup, load_config_file, ClientConfig, StorageClient, DEFAULT_CHECK_KEY,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "s3-sdk-cli")]
#[command(about = "Run object operations and health checks against an S3-compatible store", long_about = None)]
struct Cli {
    /// JSON config file with isDebugging/bucketName/args; S3_* variables are used otherwise
    #[arg(short, long, env = "S3_SDK_CONFIG")]
    config: Option<PathBuf>,

    /// Section of the config file holding the client config
    #[arg(long, env = "S3_SDK_CONFIG_SECTION")]
    section: Option<String>,

    /// Override the bucket from the config
    #[arg(short, long)]
    bucket: Option<String>,

    /// Print the client's debug log after the command
    #[arg(long)]
    print_logs: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write, read back and delete a timestamp object
    Check {
        /// Object key
        #[arg(default_value = DEFAULT_CHECK_KEY)]
        key: String,
    },

    /// Upload an object
    Put {
        /// Object key
        key: String,
        /// File path to upload
        file: PathBuf,
    },

    /// Download an object
    Get {
        /// Object key
        key: String,
        /// Output file path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether an object exists
    Exists {
        /// Object key
        key: String,
    },

    /// Delete an object
    Delete {
        /// Object key
        key: String,
    },
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path, self.section.as_deref())
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config_from_lookup(|name| std::env::var(name).ok())?,
        };

        if self.print_logs {
            config.is_debugging = true;
        }

        Ok(config)
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            other => bail!("Unknown log level: {}", other),
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();

        Ok(())
    }
}

async fn run(client: &StorageClient, command: Commands) -> Result<bool> {
    let ok = match command {
        Commands::Check { key } => {
            let passed = client.check_key(&key).await;
            println!("{}", if passed { "OK" } else { "FAILED" });
            passed
        }
        Commands::Put { key, file } => {
            let body = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            client.put_object(&key, body).await
        }
        Commands::Get { key, output } => match client.get_object(&key).await {
            Some(content) => {
                match output {
                    Some(path) => tokio::fs::write(&path, &content)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?,
                    None => {
                        use std::io::Write;
                        std::io::stdout().write_all(&content)?;
                    }
                }
                true
            }
            None => false,
        },
        Commands::Exists { key } => {
            let exists = client.is_object_exist(&key).await;
            println!("{}", exists);
            exists
        }
        Commands::Delete { key } => client.delete_object(&key).await,
    };

    Ok(ok)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    let mut config = cli.client_config()?;
    if let Some(bucket) = &cli.bucket {
        config.bucket_name = bucket.clone();
    }

    info!("Using bucket: {}", config.bucket_name);
    let client = StorageClient::new(config).context("Failed to create storage client")?;

    let print_logs = cli.print_logs;
    let ok = run(&client, cli.command).await?;

    if print_logs {
        eprintln!("{}", client.logs_as_string());
    }

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
