//! Inspection and normalization tools for captured WAMP traffic.
//!
//! Captures are JSON-lines files: one message array per line. This crate
//! turns each line into an [`InspectReport`] or its minimal re-encoding.
//!
//! # Design Principles
//!
//! - **Same decoder as production** - reports come from `wire::decode_message`.
//! - **Human-readable output** - label every slot with its field name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::Pattern;
use serde::Serialize;
use serde_json::Value;
use wire::{decode_message, encode_message, try_decode_message, Message, MessageKind};

/// One labelled slot of an inspected message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledField {
    pub name: String,
    pub value: Value,
}

/// Counts of the trailing payload of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadShape {
    pub args: usize,
    pub kwargs: usize,
}

/// What the decoder made of one captured line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// 1-based line number in the capture.
    pub line: usize,
    pub kind: String,
    pub tag: Option<u64>,
    pub fields: Vec<LabelledField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadShape>,
    /// Option or detail keys the catalog does not recognize.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_keys: Vec<String>,
    /// Why strict decoding rejects the line, if it does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
    /// Why the option dict does not match its typed form, if it does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_options: Option<String>,
}

/// Parses one capture line into its raw message array.
pub fn parse_line(line: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(line).context("parse message json")?;
    match value {
        Value::Array(items) => Ok(items),
        other => bail!("expected a message array, found {}", json_type(&other)),
    }
}

/// Parses and decodes one capture line.
///
/// Lenient decoding never rejects a well-formed array; `strict` surfaces the
/// first layout violation instead.
pub fn decode_line(line: &str, strict: bool) -> Result<Message> {
    let raw = parse_line(line)?;
    if strict {
        Ok(try_decode_message(raw)?)
    } else {
        Ok(decode_message(raw))
    }
}

/// Decodes a line and returns its minimal encoding as compact JSON.
pub fn normalize_line(line: &str) -> Result<String> {
    let msg = decode_line(line, false)?;
    serde_json::to_string(&encode_message(&msg)).context("serialize message json")
}

/// Builds a report for one raw message array.
pub fn inspect_message(line: usize, raw: Vec<Value>) -> InspectReport {
    let violation = try_decode_message(raw.clone())
        .err()
        .map(|err| err.to_string());
    let msg = decode_message(raw);
    let kind = msg.kind();

    let encoded = encode_message(&msg);
    let fields = if kind.is_known() {
        kind.layout()
            .iter()
            .zip(encoded.iter().skip(1))
            .map(|(role, value)| LabelledField {
                name: role.name().to_string(),
                value: value.clone(),
            })
            .collect()
    } else {
        encoded
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, value)| LabelledField {
                name: format!("[{index}]"),
                value: value.clone(),
            })
            .collect()
    };

    InspectReport {
        line,
        kind: kind.name().to_string(),
        tag: msg.tag(),
        fields,
        payload: msg.payload().map(|payload| PayloadShape {
            args: payload.args.len(),
            kwargs: payload.kwargs.len(),
        }),
        unrecognized_keys: schema::unrecognized_keys(&msg)
            .into_iter()
            .map(str::to_string)
            .collect(),
        violation,
        invalid_options: schema::validate_options(&msg)
            .err()
            .map(|err| err.to_string()),
    }
}

/// Inspects every non-blank line of a capture.
///
/// With `strict`, the first line that strict decoding rejects is an error.
pub fn inspect_capture(contents: &str, strict: bool) -> Result<Vec<InspectReport>> {
    let mut reports = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let raw = parse_line(line).with_context(|| format!("line {line_no}"))?;
        let report = inspect_message(line_no, raw);
        if strict {
            if let Some(violation) = &report.violation {
                bail!("line {line_no}: {violation}");
            }
        }
        if report.kind == MessageKind::Unknown.name() {
            tracing::debug!(line = line_no, tag = ?report.tag, "unrecognized message tag");
        }
        reports.push(report);
    }
    Ok(reports)
}

/// Normalizes every non-blank line of a capture.
pub fn normalize_capture(contents: &str) -> Result<Vec<String>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| normalize_line(line).with_context(|| format!("line {}", index + 1)))
        .collect()
}

/// Lists the capture files directly inside `dir`, sorted by path.
///
/// `glob` filters on the file name, e.g. `*.jsonl`.
pub fn collect_captures(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;

    let mut captures = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        if pattern.as_ref().is_some_and(|pattern| !pattern.matches(name)) {
            tracing::debug!(path = %path.display(), "skipped by glob");
            continue;
        }
        captures.push(path);
    }
    captures.sort();
    Ok(captures)
}

/// Renders a report for terminal output.
pub fn format_report_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let tag = report
        .tag
        .map_or_else(|| "?".to_string(), |tag| tag.to_string());
    out.push_str(&format!("line {}: {} (tag {tag})\n", report.line, report.kind));
    for field in &report.fields {
        out.push_str(&format!("  {}: {}\n", field.name, field.value));
    }
    if let Some(payload) = report.payload {
        out.push_str(&format!(
            "  payload: {} args, {} kwargs\n",
            payload.args, payload.kwargs
        ));
    }
    if !report.unrecognized_keys.is_empty() {
        out.push_str(&format!(
            "  unrecognized keys: {}\n",
            report.unrecognized_keys.join(", ")
        ));
    }
    if let Some(reason) = &report.invalid_options {
        out.push_str(&format!("  invalid options: {reason}\n"));
    }
    if let Some(violation) = &report.violation {
        out.push_str(&format!("  strict: {violation}\n"));
    }
    out
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_drops_empty_payload() {
        assert_eq!(
            normalize_line(r#"[48, 123, {}, "test", [], {}]"#).unwrap(),
            r#"[48,123,{},"test"]"#
        );
        assert_eq!(
            normalize_line(r#"[50, 1, null, [], {"k": 1}]"#).unwrap(),
            r#"[50,1,{},[],{"k":1}]"#
        );
    }

    #[test]
    fn decode_line_rejects_non_arrays() {
        let err = decode_line(r#"{"type": 48}"#, false).unwrap_err();
        assert!(err.to_string().contains("object"));
        assert!(decode_line("not json", false).is_err());
    }

    #[test]
    fn strict_decode_line() {
        assert!(decode_line("[48, 123]", false).is_ok());
        assert!(decode_line("[48, 123]", true).is_err());
        assert!(decode_line(r#"[48, 123, {}, "test"]"#, true).is_ok());
    }

    #[test]
    fn inspect_labels_fields() {
        let report = inspect_message(
            1,
            vec![
                json!(48),
                json!(7),
                json!({"timeout": 10, "x_trace": true}),
                json!("com.example.add"),
                json!([1, 2]),
            ],
        );
        assert_eq!(report.kind, "CALL");
        assert_eq!(report.tag, Some(48));
        let names: Vec<_> = report.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["request", "options", "procedure", "args"]);
        assert_eq!(report.payload, Some(PayloadShape { args: 2, kwargs: 0 }));
        assert_eq!(report.unrecognized_keys, ["x_trace"]);
        assert_eq!(report.violation, None);
        assert_eq!(report.invalid_options, None);
    }

    #[test]
    fn inspect_unknown_tag() {
        let report = inspect_message(3, vec![json!(1999), json!(51), json!("test")]);
        assert_eq!(report.kind, "UNKNOWN");
        assert_eq!(report.tag, Some(1999));
        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.fields[0].name, "[1]");
        assert_eq!(report.payload, None);
    }

    #[test]
    fn inspect_reports_violation_and_bad_options() {
        let report = inspect_message(1, vec![json!(32), json!(1), json!({"match": 5})]);
        assert!(report.violation.is_some());
        assert!(report.invalid_options.is_some());
    }

    #[test]
    fn capture_skips_blank_lines() {
        let capture = "[6, {}, \"wamp.close.goodbye_and_out\"]\n\n[1999]\n";
        let reports = inspect_capture(capture, false).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].line, 3);

        let err = inspect_capture("[6]\n", true).unwrap_err();
        assert!(err.to_string().starts_with("line 1"));
    }

    #[test]
    fn normalize_capture_reports_line() {
        let err = normalize_capture("[17, 1, 2]\n42\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
        assert_eq!(normalize_capture("[17, 1, 2]\n").unwrap(), ["[17,1,2]"]);
    }

    #[test]
    fn pretty_report() {
        let report = inspect_message(1, vec![json!(17), json!(1), json!(2)]);
        let text = format_report_pretty(&report);
        assert!(text.starts_with("line 1: PUBLISHED (tag 17)"));
        assert!(text.contains("  publication: 2"));
    }
}
