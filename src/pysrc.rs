//! Lightweight parser for Python `def` headers: recovers a function's
//! name, parameter list, and docstring without a full grammar. Syntax it
//! cannot make sense of is skipped rather than reported.

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<SourceParam>,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SourceParam {
    pub name: String,
    pub annotation: Option<String>,
    pub has_default_marker: bool,
}

pub fn parse_module(source: &str) -> Vec<FunctionDef> {
    let lines: Vec<&str> = source.lines().collect();
    let mut defs = Vec::new();
    let mut index = 0;
    let mut string_delim: Option<&'static str> = None;
    while index < lines.len() {
        let line = lines[index];
        // Skip lines inside a triple-quoted string so a "def" spelled in a
        // docstring or string literal is not taken for a definition.
        if let Some(delim) = string_delim {
            if line.contains(delim) {
                string_delim = None;
            }
            index += 1;
            continue;
        }
        if def_name(line).is_some()
            && let Some((def, next)) = parse_def(&lines, index)
        {
            defs.push(def);
            index = next;
            continue;
        }
        string_delim = open_triple_quote(line);
        index += 1;
    }
    defs
}

// The delimiter of a triple-quoted string left open at the end of the
// line, if any.
fn open_triple_quote(line: &str) -> Option<&'static str> {
    let mut rest = line;
    loop {
        let double = rest.find("\"\"\"");
        let single = rest.find("'''");
        let (pos, delim) = match (double, single) {
            (Some(d), Some(s)) if d < s => (d, "\"\"\""),
            (Some(d), None) => (d, "\"\"\""),
            (_, Some(s)) => (s, "'''"),
            (None, None) => return None,
        };
        match rest[pos + 3..].find(delim) {
            Some(close) => rest = &rest[pos + 3 + close + 3..],
            None => return Some(delim),
        }
    }
}

pub fn find_function(source: &str, name: &str) -> Option<FunctionDef> {
    parse_module(source).into_iter().find(|def| def.name == name)
}

fn def_name(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix("async ").map(str::trim_start).unwrap_or(trimmed);
    let rest = rest.strip_prefix("def")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

enum HeaderState {
    SeekingParams,
    InParams,
    SeekingColon,
}

// Walks characters from the `def` line until the parameter list closes and
// the header colon is found, tolerating multi-line headers, nested
// brackets, comments, and string defaults.
fn parse_def(lines: &[&str], start: usize) -> Option<(FunctionDef, usize)> {
    let name = def_name(lines[start])?;

    let mut state = HeaderState::SeekingParams;
    let mut depth = 0usize;
    let mut string_delim: Option<char> = None;
    let mut escaped = false;
    let mut params_text = String::new();
    let mut header_end: Option<(String, usize)> = None;

    'lines: for (offset, line) in lines[start..].iter().enumerate() {
        for (pos, ch) in line.char_indices() {
            if let Some(delim) = string_delim {
                if matches!(state, HeaderState::InParams) {
                    params_text.push(ch);
                }
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == delim {
                    string_delim = None;
                }
                continue;
            }
            match state {
                HeaderState::SeekingParams => match ch {
                    '#' => break,
                    '(' => {
                        state = HeaderState::InParams;
                        depth = 1;
                    }
                    _ => {}
                },
                HeaderState::InParams => match ch {
                    '#' => break,
                    '"' | '\'' => {
                        string_delim = Some(ch);
                        params_text.push(ch);
                    }
                    '(' | '[' | '{' => {
                        depth += 1;
                        params_text.push(ch);
                    }
                    ')' | ']' | '}' => {
                        depth -= 1;
                        if depth == 0 {
                            state = HeaderState::SeekingColon;
                        } else {
                            params_text.push(ch);
                        }
                    }
                    _ => params_text.push(ch),
                },
                HeaderState::SeekingColon => match ch {
                    '#' => break,
                    '"' | '\'' => string_delim = Some(ch),
                    '(' | '[' | '{' => depth += 1,
                    ')' | ']' | '}' => depth = depth.saturating_sub(1),
                    ':' if depth == 0 => {
                        let rest = line[pos + 1..].to_string();
                        header_end = Some((rest, start + offset));
                        break 'lines;
                    }
                    _ => {}
                },
            }
        }
        if matches!(state, HeaderState::InParams) {
            params_text.push('\n');
        }
    }

    let (body_rest, header_line) = header_end?;
    let mut params = Vec::new();
    for raw in split_params(&params_text) {
        let raw = raw.trim();
        // A bare `*` or `*args` opens the keyword-only section, where the
        // positional default-suffix rule no longer holds; `**kwargs` can
        // only follow. Parameter collection stops there.
        if raw.starts_with('*') {
            break;
        }
        if let Some(param) = parse_param(raw) {
            params.push(param);
        }
    }
    let docstring = extract_docstring(lines, header_line, &body_rest);

    Some((
        FunctionDef {
            name,
            params,
            docstring,
        },
        header_line + 1,
    ))
}

fn split_params(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut string_delim: Option<char> = None;
    let mut escaped = false;
    let mut start = 0usize;
    for (index, ch) in text.char_indices() {
        if let Some(delim) = string_delim {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == delim {
                string_delim = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => string_delim = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn parse_param(raw: &str) -> Option<SourceParam> {
    let raw = raw.trim();
    // The "/" positional-only separator carries no schema information.
    if raw.is_empty() || raw == "/" {
        return None;
    }

    let colon = top_level_position(raw, ':');
    let equals = top_level_position(raw, '=');
    let (name, annotation, has_default_marker) = match (colon, equals) {
        (Some(ci), Some(ei)) if ci < ei => (&raw[..ci], non_empty(&raw[ci + 1..ei]), true),
        (_, Some(ei)) => (&raw[..ei], None, true),
        (Some(ci), None) => (&raw[..ci], non_empty(&raw[ci + 1..]), false),
        (None, None) => (raw, None, false),
    };

    Some(SourceParam {
        name: name.trim().to_string(),
        annotation,
        has_default_marker,
    })
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn top_level_position(text: &str, target: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut string_delim: Option<char> = None;
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if let Some(delim) = string_delim {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == delim {
                string_delim = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => string_delim = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if ch == target && depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

// The docstring is the first statement after the header when that
// statement is a bare string literal.
fn extract_docstring(lines: &[&str], header_line: usize, body_rest: &str) -> Option<String> {
    let (first_line, next) = if !body_rest.trim().is_empty() {
        (body_rest.to_string(), header_line + 1)
    } else {
        let mut found = None;
        for (idx, line) in lines.iter().enumerate().skip(header_line + 1) {
            if !line.trim().is_empty() {
                found = Some(((*line).to_string(), idx + 1));
                break;
            }
        }
        found?
    };

    let trimmed = first_line.trim_start();
    for delim in ["\"\"\"", "'''"] {
        let Some(after) = trimmed.strip_prefix(delim) else {
            continue;
        };
        if let Some(end) = after.find(delim) {
            return Some(cleandoc(&after[..end]));
        }
        let mut content = vec![after.to_string()];
        for line in &lines[next.min(lines.len())..] {
            if let Some(end) = line.find(delim) {
                content.push(line[..end].to_string());
                return Some(cleandoc(&content.join("\n")));
            }
            content.push((*line).to_string());
        }
        return Some(cleandoc(&content.join("\n")));
    }

    for quote in ['"', '\''] {
        if let Some(rest) = trimmed.strip_prefix(quote)
            && let Some(end) = rest.find(quote)
        {
            return Some(rest[..end].trim().to_string());
        }
    }
    None
}

// inspect.cleandoc equivalent: the first line keeps its own trim, the rest
// loses the common leading indentation.
fn cleandoc(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.collect();
    let indent = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = vec![first.to_string()];
    for line in rest {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.push(line[indent..].trim_end().to_string());
        }
    }
    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_def_with_defaults() {
        let source = "def get_weather(location: str, units: str = \"celsius\", include_forecast: bool = False):\n    pass\n";
        let defs = parse_module(source);
        assert_eq!(defs.len(), 1);
        let def = &defs[0];
        assert_eq!(def.name, "get_weather");
        assert_eq!(def.params.len(), 3);
        assert_eq!(def.params[0].name, "location");
        assert_eq!(def.params[0].annotation.as_deref(), Some("str"));
        assert!(!def.params[0].has_default_marker);
        assert!(def.params[1].has_default_marker);
        assert!(def.params[2].has_default_marker);
    }

    #[test]
    fn multi_line_header() {
        let source = "def calculate_distance(lat1: float, lon1: float,\n\
                      \x20                      lat2: float, lon2: float,\n\
                      \x20                      unit: str = \"km\") -> float:\n\
                      \x20   pass\n";
        let defs = parse_module(source);
        assert_eq!(defs.len(), 1);
        let names: Vec<&str> = defs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["lat1", "lon1", "lat2", "lon2", "unit"]);
        assert!(defs[0].params[4].has_default_marker);
    }

    #[test]
    fn async_def_and_return_annotation() {
        let source = "async def fetch(url: str) -> Dict[str, int]:\n    pass\n";
        let defs = parse_module(source);
        assert_eq!(defs[0].name, "fetch");
        assert_eq!(defs[0].params.len(), 1);
    }

    #[test]
    fn subscripted_annotation_commas_do_not_split() {
        let source = "def f(mapping: Dict[str, int], items: List[str] = None):\n    pass\n";
        let defs = parse_module(source);
        assert_eq!(defs[0].params.len(), 2);
        assert_eq!(defs[0].params[0].annotation.as_deref(), Some("Dict[str, int]"));
        assert_eq!(defs[0].params[1].annotation.as_deref(), Some("List[str]"));
    }

    #[test]
    fn default_string_with_comma_and_colon() {
        let source = "def f(sep: str = \"a,b:c\", n: int = 1):\n    pass\n";
        let defs = parse_module(source);
        assert_eq!(defs[0].params.len(), 2);
        assert_eq!(defs[0].params[0].name, "sep");
        assert_eq!(defs[0].params[0].annotation.as_deref(), Some("str"));
    }

    #[test]
    fn star_args_ends_parameter_collection() {
        let source = "def f(a, b=1, *args, **kwargs):\n    pass\n";
        let defs = parse_module(source);
        let names: Vec<&str> = defs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn keyword_only_section_excluded() {
        // Everything after a bare `*` is keyword-only and is dropped, as
        // with runtime extraction from a positional signature.
        let source = "def f(a, *, b=1, c: int = 2):\n    pass\n";
        let defs = parse_module(source);
        let names: Vec<&str> = defs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a"]);
    }

    #[test]
    fn positional_only_marker_skipped() {
        let source = "def f(a, /, b):\n    pass\n";
        let defs = parse_module(source);
        let names: Vec<&str> = defs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn triple_quoted_docstring_dedented() {
        let source = "def f(a):\n\
                      \x20   \"\"\"\n\
                      \x20   Summary line\n\
                      \n\
                      \x20   Args:\n\
                      \x20       a: the value\n\
                      \x20   \"\"\"\n\
                      \x20   return a\n";
        let defs = parse_module(source);
        let doc = defs[0].docstring.as_deref().expect("docstring");
        assert!(doc.starts_with("Summary line"));
        assert!(doc.contains("\nArgs:\n    a: the value"));
    }

    #[test]
    fn one_line_docstring_variants() {
        let defs = parse_module("def f(a):\n    \"\"\"Adds one.\"\"\"\n    return a\n");
        assert_eq!(defs[0].docstring.as_deref(), Some("Adds one."));

        let defs = parse_module("def g(a):\n    'short doc'\n    return a\n");
        assert_eq!(defs[0].docstring.as_deref(), Some("short doc"));

        let defs = parse_module("def h(a):\n    return a\n");
        assert!(defs[0].docstring.is_none());
    }

    #[test]
    fn multiple_and_nested_defs_found() {
        let source = "def outer(a):\n    def inner(b):\n        pass\n    pass\n\ndef last():\n    pass\n";
        let names: Vec<String> = parse_module(source).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["outer", "inner", "last"]);
    }

    #[test]
    fn find_function_by_name() {
        let source = "def a():\n    pass\n\ndef b(x: int):\n    pass\n";
        assert_eq!(find_function(source, "b").map(|d| d.name), Some("b".to_string()));
        assert!(find_function(source, "missing").is_none());
    }

    #[test]
    fn no_defs_in_plain_text() {
        assert!(parse_module("x = 1\nprint(x)\n").is_empty());
    }

    #[test]
    fn def_spelled_inside_string_literal_ignored() {
        let source = "\"\"\"Module doc.\n\ndef fake(x):\n    pass\n\"\"\"\n\ndef real(a):\n    pass\n";
        let names: Vec<String> = parse_module(source).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["real"]);

        let source = "text = '''\ndef also_fake(y):\n    pass\n'''\ndef real2():\n    pass\n";
        let names: Vec<String> = parse_module(source).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["real2"]);
    }
}
