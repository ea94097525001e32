use clap::Parser;
use dode_client::DEFAULT_API_URL;
use dode_webhook::WebhookConfig;
use dode_webhook::config::DEFAULT_LISTEN;
use std::net::SocketAddr;
use std::time::Duration;

use crate::logging::{LogLevel, TracingFormat};

#[derive(Parser, Debug)]
#[command(name = "dode-webhook")]
#[command(about = "cert-manager DNS-01 webhook for the do.de DNS API")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "GROUP_NAME", help = "API group the solver is served under")]
    pub group_name: String,

    #[arg(
        long,
        env = "DODE_WEBHOOK_LISTEN",
        default_value_t = DEFAULT_LISTEN,
        help = "Address to listen on"
    )]
    pub listen: SocketAddr,

    #[arg(
        long,
        env = "DODE_API_URL",
        default_value = DEFAULT_API_URL,
        help = "do.de API endpoint"
    )]
    pub api_url: String,

    #[arg(long, default_value_t = 30, help = "Timeout for do.de API calls in seconds")]
    pub timeout_secs: u64,

    #[arg(
        short = 'l',
        long,
        help = "Set logging level",
        default_value = "info",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(long, help = "Log output format", default_value = "json", value_enum)]
    pub log_format: TracingFormat,
}

impl Cli {
    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig::new(self.group_name.clone())
            .with_listen(self.listen)
            .with_api_url(self.api_url.clone())
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["dode-webhook", "--group-name", "acme.example.com"]).unwrap();
        let config = cli.webhook_config();
        assert_eq!(config.group_name(), "acme.example.com");
        assert_eq!(config.listen(), DEFAULT_LISTEN);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(cli.level, LogLevel::Info);
        assert_eq!(cli.log_format, TracingFormat::Json);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "dode-webhook",
            "--group-name",
            "acme.example.com",
            "--listen",
            "127.0.0.1:9443",
            "--timeout-secs",
            "10",
            "--log-format",
            "compact",
            "-l",
            "debug",
        ])
        .unwrap();
        let config = cli.webhook_config();
        assert_eq!(config.listen().port(), 9443);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(cli.level, LogLevel::Debug);
    }
}
