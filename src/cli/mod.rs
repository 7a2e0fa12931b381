//! Command-line interface.
//!
//! Without a subcommand the desktop window opens; `serve` starts the local
//! HTTPS server instead.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Overrides, Preset};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the request window (default)
    Run(RunArgs),
    /// Serve a directory over HTTPS
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a JSON configuration file
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,

    /// Endpoint and wording preset
    #[arg(long, value_enum, default_value_t = Preset::ApiTest)]
    pub preset: Preset,

    /// URL requested on each button press
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Additional PEM root certificate to trust
    #[arg(long)]
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            ca_cert: self.ca_cert.clone(),
            accept_invalid_certs: self.insecure,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "HTTPS_SERVER_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long, env = "HTTPS_SERVER_PORT", default_value_t = 4443)]
    pub port: u16,

    /// Directory to serve; must contain an index.html
    #[arg(long, env = "HTTPS_SERVER_ROOT", default_value = "Front-end")]
    pub root: PathBuf,

    /// PEM certificate chain
    #[arg(long, env = "HTTPS_SERVER_CERT", default_value = "certs-cryptography/certs/certificate.pem")]
    pub cert: PathBuf,

    /// PEM private key
    #[arg(long, env = "HTTPS_SERVER_KEY", default_value = "certs-cryptography/certs/private_key.pem")]
    pub key: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_with_defaults() {
        let cli = Cli::try_parse_from(["https-tester"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.preset, Preset::ApiTest);
        assert!(!cli.run.insecure);
        assert!(cli.run.endpoint.is_none());
    }

    #[test]
    fn run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "https-tester",
            "run",
            "--preset",
            "root",
            "--endpoint",
            "https://localhost:9443",
            "--insecure",
        ])
        .unwrap();

        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.preset, Preset::Root);
        let overrides = args.overrides();
        assert_eq!(overrides.endpoint.as_deref(), Some("https://localhost:9443"));
        assert!(overrides.accept_invalid_certs);
    }

    #[test]
    fn serve_defaults_match_dev_layout() {
        let cli = Cli::try_parse_from(["https-tester", "serve", "--port", "8443"]).unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(args.port, 8443);
        assert_eq!(args.root, PathBuf::from("Front-end"));
        assert_eq!(args.cert, PathBuf::from("certs-cryptography/certs/certificate.pem"));
    }

    #[test]
    fn top_level_flags_cannot_be_mixed_with_a_subcommand() {
        assert!(Cli::try_parse_from(["https-tester", "--insecure", "run"]).is_err());
        assert!(
            Cli::try_parse_from(["https-tester", "--insecure", "--endpoint", "https://x:1", "run"]).is_err()
        );
        assert!(Cli::try_parse_from(["https-tester", "--preset", "root", "serve"]).is_err());
    }

    #[test]
    fn top_level_flags_apply_without_a_subcommand() {
        let cli = Cli::try_parse_from(["https-tester", "--insecure", "--endpoint", "https://x:1"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.run.insecure);
        assert_eq!(cli.run.endpoint.as_deref(), Some("https://x:1"));
    }
}
