use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Description plus per-parameter text extracted from one docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub description: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocStyle {
    Labeled,
    Tabular,
    Directive,
    Plain,
}

// "name (type): text" with the parenthesized type optional.
static LABELED_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*(?:\([^)]*\))?\s*:\s*(.+)$").expect("valid pattern"));

// ":param name: text"
static DIRECTIVE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:param\s+(\w+)\s*:\s*(.+)$").expect("valid pattern"));

pub fn parse(doc: Option<&str>) -> ParsedDoc {
    let Some(doc) = doc else {
        return ParsedDoc::default();
    };
    let doc = doc.trim();
    if doc.is_empty() {
        return ParsedDoc::default();
    }

    match detect_style(doc) {
        DocStyle::Labeled => parse_labeled(doc),
        DocStyle::Tabular => parse_tabular(doc),
        DocStyle::Directive => parse_directive(doc),
        DocStyle::Plain => ParsedDoc {
            description: first_paragraph(doc),
            params: HashMap::new(),
        },
    }
}

// Substring-based detection in fixed priority order. Known limitation: a
// plain comment containing ":param" mid-sentence is classified as directive
// style. Kept for compatibility with existing docstrings.
fn detect_style(doc: &str) -> DocStyle {
    if doc.contains("Args:") || doc.contains("Arguments:") {
        return DocStyle::Labeled;
    }
    if doc.lines().any(|line| line.trim() == "Parameters") || doc.contains("Parameters:") {
        return DocStyle::Tabular;
    }
    if doc.contains(":param") || doc.contains(":type") {
        return DocStyle::Directive;
    }
    DocStyle::Plain
}

fn parse_labeled(doc: &str) -> ParsedDoc {
    let mut description_parts: Vec<&str> = Vec::new();
    let mut params = HashMap::new();
    let mut in_args = false;

    for line in doc.lines() {
        let trimmed = line.trim();
        if trimmed == "Args:" || trimmed == "Arguments:" {
            in_args = true;
            continue;
        }
        if in_args {
            // A zero-indentation line ending in ':' starts a new header
            // (e.g. "Returns:") and closes the parameter section.
            if trimmed.ends_with(':') && !line.starts_with(char::is_whitespace) {
                break;
            }
            if trimmed.is_empty() {
                continue;
            }
            if let Some(caps) = LABELED_PARAM.captures(trimmed) {
                params.insert(caps[1].to_string(), caps[2].trim().to_string());
            }
        } else if !trimmed.is_empty() {
            description_parts.push(trimmed);
        }
    }

    ParsedDoc {
        description: description_parts.join(" "),
        params,
    }
}

fn parse_tabular(doc: &str) -> ParsedDoc {
    let mut description_parts: Vec<&str> = Vec::new();
    let mut params: HashMap<String, String> = HashMap::new();
    let mut in_section = false;
    let mut current: Option<String> = None;

    for line in doc.lines() {
        let trimmed = line.trim();

        if !in_section {
            if trimmed == "Parameters" || trimmed == "Parameters:" {
                in_section = true;
            } else if !trimmed.is_empty() {
                description_parts.push(trimmed);
            }
            continue;
        }

        // Blank lines do not close the section; only a non-indented line
        // that is neither a dash separator nor a parameter header does.
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().all(|c| c == '-') {
            continue;
        }
        if let Some(name) = param_header(trimmed) {
            params.insert(name.to_string(), String::new());
            current = Some(name.to_string());
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            if let Some(name) = &current
                && let Some(text) = params.get_mut(name)
            {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(trimmed);
            }
            continue;
        }
        break;
    }

    ParsedDoc {
        description: description_parts.join(" "),
        params,
    }
}

// "name : type" starts a parameter entry; the type text itself is dropped
// (only annotations drive type mapping).
fn param_header(line: &str) -> Option<&str> {
    let (name, _type_text) = line.split_once(" : ")?;
    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

fn parse_directive(doc: &str) -> ParsedDoc {
    let mut description_parts: Vec<&str> = Vec::new();
    let mut params = HashMap::new();

    for line in doc.lines() {
        let trimmed = line.trim();
        if let Some(caps) = DIRECTIVE_PARAM.captures(trimmed) {
            params.insert(caps[1].to_string(), caps[2].trim().to_string());
        } else if !trimmed.starts_with(':') && !trimmed.is_empty() {
            // Description text may be interleaved with other directives
            // (":type", ":returns"), which are skipped entirely.
            description_parts.push(trimmed);
        }
    }

    ParsedDoc {
        description: description_parts.join(" "),
        params,
    }
}

fn first_paragraph(doc: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for line in doc.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !parts.is_empty() {
                break;
            }
            continue;
        }
        parts.push(trimmed);
    }
    parts.join(" ")
}
