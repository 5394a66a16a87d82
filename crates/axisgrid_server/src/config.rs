//! Command-line and environment configuration.

use axisgrid_io_xlsx::{EnumChunkCountRule, SpecExportOptions};
use axisgrid_table::SpecMergeOptions;
use clap::{Parser, ValueEnum};

use crate::conf::{C_HOST_DEFAULT, N_PORT_DEFAULT};
use crate::spec::SpecProcessOptions;

/// Chunk count rule as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumChunkCountRuleArg {
    /// `n / 16384 + 1` chunk files.
    Legacy,
    /// `ceil(n / 16384)` chunk files, at least one.
    Exact,
}

impl From<EnumChunkCountRuleArg> for EnumChunkCountRule {
    fn from(value: EnumChunkCountRuleArg) -> Self {
        match value {
            EnumChunkCountRuleArg::Legacy => EnumChunkCountRule::Legacy,
            EnumChunkCountRuleArg::Exact => EnumChunkCountRule::Exact,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "axisgrid")]
#[command(about = "Merge per-series text files on a shared x-axis and export chunked XLSX")]
#[command(version)]
pub struct ServerConfig {
    /// Bind host.
    #[arg(long, env = "AXISGRID_HOST", default_value = C_HOST_DEFAULT)]
    pub host: String,

    /// Bind port.
    #[arg(long, env = "AXISGRID_PORT", default_value_t = N_PORT_DEFAULT)]
    pub port: u16,

    /// Threads used to read series files (1 = serial).
    #[arg(long, env = "AXISGRID_READ_WORKERS", default_value_t = 1)]
    pub read_workers: usize,

    /// Chunk count rule for exported files.
    #[arg(
        long,
        env = "AXISGRID_CHUNK_COUNT_RULE",
        value_enum,
        default_value_t = EnumChunkCountRuleArg::Legacy
    )]
    pub chunk_count_rule: EnumChunkCountRuleArg,
}

impl ServerConfig {
    /// `host:port` string passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pipeline options derived from this configuration.
    pub fn process_options(&self) -> SpecProcessOptions {
        SpecProcessOptions {
            merge: SpecMergeOptions {
                num_workers_max: usize::max(1, self.read_workers),
                ..SpecMergeOptions::default()
            },
            export: SpecExportOptions {
                rule_chunk_count: self.chunk_count_rule.into(),
                ..SpecExportOptions::default()
            },
        }
    }
}
