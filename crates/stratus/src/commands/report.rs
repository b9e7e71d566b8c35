//! Report subcommand handlers.

use serde::Serialize;
use tabled::Tabled;

use stratus_api::ApiClient;
use stratus_core::{ReportOptions, ReportRow, run_report};

use crate::cli::{BandwidthArgs, GlobalOpts, ReportArgs, ReportCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &ApiClient,
    endpoint: &str,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportCommand::Bandwidth(args) => bandwidth(client, endpoint, args, global).await,
    }
}

async fn bandwidth(
    client: &ApiClient,
    endpoint: &str,
    args: BandwidthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let opts = ReportOptions {
        start: args.start,
        end: args.end,
        sort_by: args.sortby,
        virtual_guests: args.virtual_guests,
        hardware: args.server,
        pools: args.pool,
    };

    let rows = run_report(client, &opts)
        .await
        .map_err(|e| CliError::from_report(e, endpoint, global.timeout))?;

    let display: Vec<BandwidthRow> = rows.iter().map(BandwidthRow::from_row).collect();
    let out = output::render_rows(&global.output, &display);
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Display row ──────────────────────────────────────────────────────

/// One rendered report row. Byte totals are pre-formatted as GB strings
/// so table and JSON output agree.
#[derive(Debug, Tabled, Serialize)]
struct BandwidthRow {
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: &'static str,

    hostname: String,

    #[tabled(rename = "publicIn")]
    #[serde(rename = "publicIn")]
    public_in: String,

    #[tabled(rename = "publicOut")]
    #[serde(rename = "publicOut")]
    public_out: String,

    #[tabled(rename = "privateIn")]
    #[serde(rename = "privateIn")]
    private_in: String,

    #[tabled(rename = "privateOut")]
    #[serde(rename = "privateOut")]
    private_out: String,

    pool: String,
}

impl BandwidthRow {
    fn from_row(row: &ReportRow) -> Self {
        Self {
            kind: row.kind.as_str(),
            hostname: row.hostname.clone(),
            public_in: gigabytes(row.public_in),
            public_out: gigabytes(row.public_out),
            private_in: gigabytes(row.private_in),
            private_out: gigabytes(row.private_out),
            pool: row.pool.clone(),
        }
    }
}

/// Decimal gigabytes with two fraction digits.
#[allow(clippy::cast_precision_loss)]
fn gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
}
