use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Envelope;

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("command     : {}\n", envelope.meta.command));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));
    out.push_str(&format!("offline     : {}\n", envelope.meta.offline));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    out.push_str("data:\n");
    match &envelope.data {
        Value::Object(fields) => {
            for (key, value) in fields {
                match value {
                    Value::Array(rows) => {
                        out.push_str(&format!("  {key}:\n"));
                        for row in rows {
                            out.push_str(&format!("    - {}\n", inline(row)?));
                        }
                    }
                    other => out.push_str(&format!("  {key:<18}: {}\n", inline(other)?)),
                }
            }
        }
        other => {
            for line in serde_json::to_string_pretty(other)?.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    Ok(out)
}

fn inline(value: &Value) -> Result<String, CliError> {
    Ok(match value {
        Value::String(text) => text.clone(),
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| inline(value).map(|value| format!("{key}={value}")))
            .collect::<Result<Vec<_>, _>>()?
            .join("  "),
        other => serde_json::to_string(other)?,
    })
}
