use clap::Parser;

/// Command-line arguments for the churn prediction server. Flags left unset
/// fall back to the config file (when given) and then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "churn-serve")]
#[command(about = "Serves churn predictions from a pre-trained pipeline artifact")]
pub struct CliConfig {
    /// Path to the serialized pipeline artifact
    #[arg(long)]
    pub model_path: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:8000
    #[arg(long)]
    pub bind: Option<String>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}
