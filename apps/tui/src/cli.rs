use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "retail_dash", version, about = "Retail analytics dashboard")]
pub struct CliArgs {
    /// Fetch every widget once, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the metrics API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Start with this region selected
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,

    /// Comma separated year filter options
    #[arg(long, value_name = "YEARS")]
    pub years: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the log file used by the interactive UI
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("DASHBOARD_API_URL", url);
        }
        if let Some(region) = &self.region {
            std::env::set_var("DASHBOARD_REGION", region);
        }
        if let Some(years) = &self.years {
            std::env::set_var("DASHBOARD_YEARS", years);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("DASHBOARD_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("DASHBOARD_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
