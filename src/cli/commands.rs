use chrono::{DateTime, NaiveDate, Utc};

use crate::cli::config::{
    results_path_for, resolve_sheet_access, validate_cli, AppConfig, Cli, Commands,
};
use crate::daily::builder::build_daily_payload;
use crate::daily::formulas::{resolve_header_formulas, resolve_header_literals};
use crate::error::ReportError;
use crate::monthly::aggregator::{build_monthly_payload, collect_month_totals};
use crate::record::loader::load_records;
use crate::record::record_model::TestRecord;
use crate::report::csv::write_csv_report;
use crate::report::ops::report_ops;
use crate::report::submit::submit_ops;
use crate::sheets::client::{HttpSheetsClient, SheetsApi};
use crate::sheets::tabs::{
    daily_tab_title, month_days, monthly_tab_title, previous_month_start, uniquified_title,
};

// ============================================================================
// Top-level dispatch
// ============================================================================

/// Run the selected command. `today` and `now` are inputs so runs are
/// reproducible under test; `main` passes the wall clock.
pub fn run(
    cli: &Cli,
    config: &AppConfig,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), ReportError> {
    validate_cli(cli)?;

    match cli.command {
        Some(Commands::MonthlySummary) => {
            let mut client = http_client(config)?;
            cmd_monthly_summary(&mut client, today, now, cli.verbose)
        }
        Some(Commands::TodaysReport) | None if cli.csv => {
            let records = load_records(&results_path_for(cli.framework, config))?;
            cmd_csv_report(&records, today, now, &config.csv.output_dir)
        }
        Some(Commands::TodaysReport) => {
            let records = load_records(&results_path_for(cli.framework, config))?;
            let mut client = http_client(config)?;
            cmd_todays_report(&mut client, &records, today, now, cli.duplicate, cli.verbose)
        }
        None => {
            let records = load_records(&results_path_for(cli.framework, config))?;
            let mut client = http_client(config)?;
            cmd_todays_report(&mut client, &records, today, now, cli.duplicate, cli.verbose)?;
            if monthly_summary_needed(&client, today)? {
                cmd_monthly_summary(&mut client, today, now, cli.verbose)?;
            }
            Ok(())
        }
    }
}

fn http_client(config: &AppConfig) -> Result<HttpSheetsClient, ReportError> {
    let access = resolve_sheet_access(config)?;
    Ok(HttpSheetsClient::new(
        &access.endpoint,
        &access.spreadsheet_id,
        &access.token,
    ))
}

// ============================================================================
// todays-report
// ============================================================================

/// Build, format, and write today's report to the spreadsheet.
pub fn cmd_todays_report(
    client: &mut dyn SheetsApi,
    records: &[TestRecord],
    today: NaiveDate,
    now: DateTime<Utc>,
    duplicate: bool,
    verbose: u8,
) -> Result<(), ReportError> {
    let payload = resolve_header_formulas(build_daily_payload(records, today, now)?)?;

    let base_title = daily_tab_title(today);
    let title = if duplicate {
        uniquified_title(client, &base_title)?
    } else {
        if client.tab_id(&base_title)?.is_some() {
            return Err(ReportError::Api {
                context: "create-tab".to_string(),
                detail: format!(
                    "tab '{}' already exists (pass --duplicate to write another)",
                    base_title
                ),
            });
        }
        base_title
    };

    let sheet_id = client.create_tab(&title)?;
    let ops = report_ops(&payload, &title, sheet_id)?;
    submit_ops(client, &ops, verbose)?;

    println!(
        "Wrote daily report '{}' ({} tests)",
        title,
        payload.body_row_count()
    );
    Ok(())
}

/// Build today's report and write it as a CSV file instead.
pub fn cmd_csv_report(
    records: &[TestRecord],
    today: NaiveDate,
    now: DateTime<Utc>,
    output_dir: &str,
) -> Result<(), ReportError> {
    let payload = resolve_header_literals(build_daily_payload(records, today, now)?)?;

    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        context: format!("creating CSV output directory '{}'", output_dir),
        source,
    })?;
    let path = std::path::Path::new(output_dir)
        .join(format!("daily_report_{}.csv", today.format("%Y-%m-%d")));
    write_csv_report(&path, &payload)?;

    println!(
        "Wrote CSV report {} ({} tests)",
        path.display(),
        payload.body_row_count()
    );
    Ok(())
}

// ============================================================================
// monthly-summary
// ============================================================================

/// Aggregate the previous month's daily tabs into a summary tab.
pub fn cmd_monthly_summary(
    client: &mut dyn SheetsApi,
    today: NaiveDate,
    now: DateTime<Utc>,
    verbose: u8,
) -> Result<(), ReportError> {
    let month_start = previous_month_start(today).ok_or_else(|| {
        ReportError::Config(format!("no previous month for date {}", today))
    })?;

    let days = collect_month_totals(client, month_start)?;
    let payload = resolve_header_formulas(build_monthly_payload(&days, month_start, now)?)?;

    let title = monthly_tab_title(month_start);
    if client.tab_id(&title)?.is_some() {
        return Err(ReportError::Api {
            context: "create-tab".to_string(),
            detail: format!("summary tab '{}' already exists", title),
        });
    }

    let sheet_id = client.create_tab(&title)?;
    let ops = report_ops(&payload, &title, sheet_id)?;
    submit_ops(client, &ops, verbose)?;

    println!(
        "Wrote monthly summary '{}' ({} days)",
        title,
        payload.body_row_count()
    );
    Ok(())
}

/// Whether the previous month still needs a summary: it has at least one
/// daily tab but no summary tab yet.
pub fn monthly_summary_needed(
    client: &dyn SheetsApi,
    today: NaiveDate,
) -> Result<bool, ReportError> {
    let Some(month_start) = previous_month_start(today) else {
        return Ok(false);
    };
    if client.tab_id(&monthly_tab_title(month_start))?.is_some() {
        return Ok(false);
    }
    for date in month_days(month_start) {
        if client.tab_id(&daily_tab_title(date))?.is_some() {
            return Ok(true);
        }
    }
    Ok(false)
}
