use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use wireprims_codec::{BitValue, Record, Value};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ValueOutput {
    Uint {
        value: u64,
    },
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    Bytes {
        hex: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl From<&Value> for ValueOutput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Uint(v) => ValueOutput::Uint { value: *v },
            Value::Int(v) => ValueOutput::Int { value: *v },
            Value::Float(v) => ValueOutput::Float { value: *v },
            Value::Bytes(b) => ValueOutput::Bytes {
                hex: hex::encode(b),
                text: std::str::from_utf8(b).ok().map(str::to_string),
            },
        }
    }
}

#[derive(Serialize)]
struct RecordOutput {
    schema_id: &'static str,
    consumed: usize,
    values: Vec<ValueOutput>,
}

pub fn print_record(record: &Record, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                schema_id: "https://schemas.3leaps.dev/wireprims/cli/v1/unpack-result.schema.json",
                consumed: record.consumed,
                values: record.values.iter().map(ValueOutput::from).collect(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INDEX", "TYPE", "VALUE"]);
            for (i, value) in record.values.iter().enumerate() {
                table.add_row(vec![
                    i.to_string(),
                    value_kind(value).to_string(),
                    render_value(value),
                ]);
            }
            println!("{table}");
            println!("consumed {} bytes", record.consumed);
        }
        OutputFormat::Pretty => {
            println!("consumed={}", record.consumed);
            for (i, value) in record.values.iter().enumerate() {
                println!("  [{i}] {} {}", value_kind(value), render_value(value));
            }
        }
        OutputFormat::Raw => {
            for value in &record.values {
                match value {
                    Value::Bytes(b) => print_raw(b),
                    other => println!("{}", render_value(other)),
                }
            }
        }
    }
}

pub fn print_bits(value: u32, fields: &BTreeMap<String, BitValue>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct BitsOutput<'a> {
                schema_id: &'static str,
                value: u32,
                fields: BTreeMap<&'a str, serde_json::Value>,
            }
            let fields = fields
                .iter()
                .map(|(name, field)| {
                    let rendered = match field {
                        BitValue::Flag(b) => serde_json::Value::from(*b),
                        BitValue::Uint(v) => serde_json::Value::from(*v),
                    };
                    (name.as_str(), rendered)
                })
                .collect();
            let out = BitsOutput {
                schema_id: "https://schemas.3leaps.dev/wireprims/cli/v1/bits-result.schema.json",
                value,
                fields,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, field) in fields {
                table.add_row(vec![name.to_string(), render_bit_value(field)]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for (name, field) in fields {
                println!("{name}={}", render_bit_value(field));
            }
        }
    }
}

pub fn print_packed(bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct PackedOutput {
                schema_id: &'static str,
                len: usize,
                hex: String,
            }
            let out = PackedOutput {
                schema_id: "https://schemas.3leaps.dev/wireprims/cli/v1/packed-bytes.schema.json",
                len: bytes.len(),
                hex: hex::encode(bytes),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", hex::encode(bytes)),
        OutputFormat::Raw => print_raw(bytes),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Uint(_) => "uint",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Bytes(_) => "bytes",
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Uint(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(text) => text.to_string(),
            Err(_) => format!("0x{}", hex::encode(b)),
        },
    }
}

fn render_bit_value(field: &BitValue) -> String {
    match field {
        BitValue::Flag(b) => b.to_string(),
        BitValue::Uint(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn value_output_serializes_bytes_with_text() {
        let out = ValueOutput::from(&Value::Bytes(Bytes::from_static(b"hi")));
        let json = serde_json::to_string(&out).expect("value output should serialize");
        assert!(json.contains("\"hex\":\"6869\""));
        assert!(json.contains("\"text\":\"hi\""));
    }

    #[test]
    fn value_output_omits_text_for_binary() {
        let out = ValueOutput::from(&Value::Bytes(Bytes::from_static(&[0xFF, 0xFE])));
        let json = serde_json::to_string(&out).expect("value output should serialize");
        assert!(!json.contains("\"text\""));
    }

    #[test]
    fn renders_values_for_humans() {
        assert_eq!(render_value(&Value::Uint(42)), "42");
        assert_eq!(render_value(&Value::Int(-7)), "-7");
        assert_eq!(render_value(&Value::Bytes(Bytes::from_static(b"ok"))), "ok");
        assert_eq!(
            render_value(&Value::Bytes(Bytes::from_static(&[0xDE, 0xAD]))),
            "0xdead"
        );
    }
}
