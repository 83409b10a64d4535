use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match robolang_core::parse_declarations(&src) {
        Ok(unit) => match output {
            OutputFormat::Json => {
                let pretty = serde_json::to_string_pretty(&unit)
                    .unwrap_or_else(|e| format!("serialization error: {}", e));
                println!("{}", pretty);
            }
            OutputFormat::Text => print!("{}", unit),
        },
        Err(e) => {
            match output {
                OutputFormat::Json => {
                    let mut err_json = e.to_json_value();
                    err_json["file"] = serde_json::Value::from(file.display().to_string());
                    let pretty = serde_json::to_string_pretty(&err_json)
                        .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
                    eprintln!("{}", pretty);
                }
                OutputFormat::Text => {
                    if !quiet {
                        eprintln!("{}:{}", file.display(), e);
                    }
                }
            }
            process::exit(1);
        }
    }
}
