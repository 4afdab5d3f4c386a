use serde_json::{json, Value};

use crate::cli::OutputFormat;

pub fn output_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            output_json(&response)?;
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            output_json(&json!({
                "success": false,
                "error": message
            }))?;
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a collection, one line per record in text mode
pub fn output_records(
    output_format: OutputFormat,
    collection_name: &str,
    records: &Value,
    describe: impl Fn(&Value) -> String,
) -> anyhow::Result<()> {
    let items = records.as_array().map(Vec::as_slice).unwrap_or_default();

    match output_format {
        OutputFormat::Json => output_json(&json!({ collection_name: items }))?,
        OutputFormat::Text if items.is_empty() => println!("No {} found", collection_name),
        OutputFormat::Text => {
            for item in items {
                println!("{}", describe(item));
            }
        }
    }
    Ok(())
}

pub fn output_record(
    output_format: OutputFormat,
    record: &Value,
    describe: impl Fn(&Value) -> String,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(record),
        OutputFormat::Text => {
            println!("{}", describe(record));
            Ok(())
        }
    }
}
