use std::net::SocketAddr;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use solana_pubkey::Pubkey;

use crate::error::Error;
use crate::types::PipelineContext;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Webhook receiver settings, from flags or the environment.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Presale program whose self-CPI events are trusted.
    #[arg(long, env = "PRESALE_PROGRAM_ID")]
    pub program_id: String,

    /// Event-authority PDA that must be the sole account of an event carrier.
    #[arg(long, env = "PRESALE_EVENT_AUTHORITY")]
    pub event_authority: String,

    #[arg(long, env = "PRESALE_PORT", default_value = "8080")]
    pub port: u16,

    /// Bind to 0.0.0.0 instead of 127.0.0.1.
    #[arg(long, env = "PRESALE_ALLOW_PUBLIC_BIND", default_value_t = false)]
    pub allow_public_bind: bool,

    /// Expected `Authorization` header value on webhook deliveries.
    #[arg(long, env = "PRESALE_WEBHOOK_AUTH")]
    pub webhook_auth: Option<String>,

    #[arg(long, env = "PRESALE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn pipeline_context(&self) -> Result<PipelineContext, Error> {
        let program = parse_address("program id", &self.program_id)?;
        let authority = parse_address("event authority", &self.event_authority)?;
        Ok(PipelineContext::new(program, authority))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        if self.allow_public_bind {
            SocketAddr::from(([0, 0, 0, 0], self.port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], self.port))
        }
    }
}

fn parse_address(name: &str, value: &str) -> Result<Pubkey, Error> {
    Pubkey::from_str(value.trim()).map_err(|e| Error::Config {
        reason: format!("invalid {name} {value:?}: {e}"),
    })
}
