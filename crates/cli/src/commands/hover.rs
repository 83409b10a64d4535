use std::path::Path;
use std::process;

use lsp_types::{HoverContents, MarkedString, Position};
use robolang_core::tp::TpProgram;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_hover(
    program_path: &Path,
    line: u32,
    character: u32,
    output: OutputFormat,
    quiet: bool,
) {
    let json = match std::fs::read_to_string(program_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", program_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let program: TpProgram = match serde_json::from_str(&json) {
        Ok(p) => p,
        Err(e) => {
            let msg = format!(
                "error parsing TP program JSON in '{}': {}",
                program_path.display(),
                e
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // No hover is a normal answer, not an error.
    let hover = robolang_lsp::compute_label_hover(&program, Position::new(line, character));
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&hover)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            if let Some(h) = hover {
                println!("{}", hover_text(&h.contents));
            }
        }
    }
}

fn hover_text(contents: &HoverContents) -> String {
    match contents {
        HoverContents::Markup(m) => m.value.clone(),
        HoverContents::Scalar(s) => marked_text(s),
        HoverContents::Array(items) => items.iter().map(marked_text).collect::<Vec<_>>().join("\n"),
    }
}

fn marked_text(s: &MarkedString) -> String {
    match s {
        MarkedString::String(s) => s.clone(),
        MarkedString::LanguageString(ls) => ls.value.clone(),
    }
}
