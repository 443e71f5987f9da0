//! Dashboard command

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::models::DashboardData;
use crate::error::{ApiError, Result};
use crate::models::{ExpiringVisaDisplay, NationalityDisplay, TrendDisplay};
use crate::output::json::format_json;
use crate::output::table::{format_pairs, format_table};

/// Show the dashboard; parts that failed are reported but never fatal
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    if ctx.session.credential()?.is_none() {
        return Err(ApiError::MissingToken.into());
    }

    let data = ctx.client.dashboard().await;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&data)?),
        OutputFormat::Table => print_dashboard(&data),
    }
    Ok(())
}

fn print_dashboard(data: &DashboardData) {
    let stats = &data.stats;
    println!("{}", "Overview".bold());
    println!(
        "{}",
        format_pairs(&[
            ("Foreigners", stats.total_foreigners.to_string()),
            ("Active visas", stats.active_visas.to_string()),
            ("Overstays", stats.overstays.to_string()),
            ("Refugee cases", stats.refugee_cases.to_string()),
            ("Out-of-view cases", stats.out_of_view_cases.to_string()),
            ("Pending grievances", stats.pending_grievances.to_string()),
            ("Citizenship requests", stats.citizenship_requests.to_string()),
        ])
    );

    let expiries: Vec<ExpiringVisaDisplay> =
        data.visa_expiries.iter().map(ExpiringVisaDisplay::from).collect();
    println!("\n{}", "Upcoming visa expiries".bold());
    println!("{}", format_table(&expiries));

    let trends: Vec<TrendDisplay> = data.case_trends.iter().map(TrendDisplay::from).collect();
    println!("\n{}", "Case trends".bold());
    println!("{}", format_table(&trends));

    let nationalities: Vec<NationalityDisplay> =
        data.nationalities.iter().map(NationalityDisplay::from).collect();
    println!("\n{}", "Top nationalities".bold());
    println!("{}", format_table(&nationalities));

    if !data.is_complete() {
        println!(
            "\n{} Some sections could not be loaded: {}",
            "⚠".yellow(),
            data.failed.join(", ")
        );
    }
}
