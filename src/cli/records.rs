//! Record commands: list, get, create, update, delete, grievance status

use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use log::debug;
use serde_json::Value;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, RecordAction};
use crate::client::Resource;
use crate::error::{Error, Result};
use crate::output::{Formattable, Records, json::format_json};

/// Dispatch one record action
pub async fn run(opts: &GlobalOptions, resource: Resource, action: RecordAction) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match action {
        RecordAction::List { params, limit } => {
            let query: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            debug!("Listing {:?} with {} params", resource, query.len());

            let mut value = ctx.guard(ctx.client.list(resource, &query).await)?;
            if let Some(limit) = limit {
                apply_limit(&mut value, limit);
            }
            print_records(&ctx, resource, &value)
        }
        RecordAction::Get { id } => {
            let value = ctx.guard(ctx.client.get(resource, &id).await)?;
            print_records(&ctx, resource, &value)
        }
        RecordAction::Create { data } => {
            let body = read_body(&data)?;
            let created = ctx.guard(ctx.client.create(resource, body).await)?;
            report_write(&ctx, resource, "Created", created)
        }
        RecordAction::Update { id, data } => {
            let body = read_body(&data)?;
            let updated = ctx.guard(ctx.client.update(resource, &id, body).await)?;
            report_write(&ctx, resource, "Updated", updated)
        }
        RecordAction::Delete { id, yes } => {
            if !yes && !confirm_delete(resource, &id)? {
                println!("Aborted");
                return Ok(());
            }
            ctx.guard(ctx.client.delete(resource, &id).await)?;
            println!("{} Deleted {} {}", "✓".green(), resource.id_label(), id.trim());
            Ok(())
        }
    }
}

/// `grievance status <id> <status>`
pub async fn grievance_status(opts: &GlobalOptions, id: &str, status: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let updated = ctx.guard(ctx.client.update_grievance_status(id, status).await)?;
    report_write(&ctx, Resource::Grievances, "Updated", updated)
}

fn print_records(ctx: &CommandContext, resource: Resource, value: &Value) -> Result<()> {
    Records {
        value,
        columns: resource.display_fields(),
    }
    .print(ctx.format)
}

fn report_write(
    ctx: &CommandContext,
    resource: Resource,
    verb: &str,
    echoed: Option<Value>,
) -> Result<()> {
    match (ctx.format, echoed) {
        (OutputFormat::Json, Some(value)) => println!("{}", format_json(&value)?),
        (OutputFormat::Json, None) => println!("{}", format_json(&Value::Null)?),
        (OutputFormat::Table, Some(value)) => {
            println!("{} {} {}", "✓".green(), verb, resource.path());
            print_records(ctx, resource, &value)?;
        }
        (OutputFormat::Table, None) => println!("{} {} {}", "✓".green(), verb, resource.path()),
    }
    Ok(())
}

fn confirm_delete(resource: Resource, id: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {} {}?", resource.id_label(), id.trim()))
        .default(false)
        .interact()?)
}

/// Inline JSON, or `@path` to read it from a file
fn read_body(data: &str) -> Result<Value> {
    let text = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))?,
        None => data.to_string(),
    };
    let body: Value = serde_json::from_str(&text)?;
    if !body.is_object() {
        return Err(Error::Other("Record body must be a JSON object".to_string()));
    }
    Ok(body)
}

/// Truncate an array or page object to `limit` records
fn apply_limit(value: &mut Value, limit: usize) {
    match value {
        Value::Array(items) => items.truncate(limit),
        Value::Object(map) => {
            for key in ["items", "data"] {
                if let Some(Value::Array(items)) = map.get_mut(key) {
                    items.truncate(limit);
                    return;
                }
            }
        }
        _ => {}
    }
}
