/// A parameter type annotation, normalized away from its origin: the same
/// tagged union is produced whether the annotation came from parsed source
/// text or from a runtime declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Missing,
    Primitive(Primitive),
    Container(Container),
    Optional(Box<Annotation>),
    Union(Vec<Annotation>),
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Str,
    Int,
    Float,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    List,
    Dict,
}

impl Annotation {
    pub fn named(ident: impl Into<String>) -> Self {
        Annotation::Named(ident.into())
    }

    /// Parse a source-level annotation expression such as `str`,
    /// `List[int]`, `Optional[float]`, `Union[int, None]`, or a quoted
    /// form like `'str'`. Total: unrecognized input becomes `Named`.
    pub fn parse(expr: Option<&str>) -> Self {
        let Some(expr) = expr else {
            return Annotation::Missing;
        };
        let expr = strip_quotes(expr.trim());
        if expr.is_empty() {
            return Annotation::Missing;
        }

        if let Some((base, args)) = split_subscript(expr) {
            return match base {
                "list" | "List" => Annotation::Container(Container::List),
                "dict" | "Dict" => Annotation::Container(Container::Dict),
                "Optional" => Annotation::Optional(Box::new(Annotation::parse(Some(args)))),
                "Union" => Annotation::Union(
                    split_top_level(args)
                        .into_iter()
                        .map(|member| Annotation::parse(Some(member)))
                        .collect(),
                ),
                _ => Annotation::Named(base.to_string()),
            };
        }

        match expr {
            "str" => Annotation::Primitive(Primitive::Str),
            "int" => Annotation::Primitive(Primitive::Int),
            "float" => Annotation::Primitive(Primitive::Float),
            "bool" => Annotation::Primitive(Primitive::Bool),
            "list" => Annotation::Container(Container::List),
            "dict" => Annotation::Container(Container::Dict),
            _ => Annotation::Named(expr.to_string()),
        }
    }

    /// Whether this annotation spells the null type (`None` in a union).
    pub fn is_none_type(&self) -> bool {
        matches!(self, Annotation::Named(name) if name == "None" || name == "NoneType")
    }
}

fn strip_quotes(expr: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = expr.strip_prefix(quote)
            && let Some(inner) = inner.strip_suffix(quote)
        {
            return inner.trim();
        }
    }
    expr
}

// "Base[args]" -> ("Base", "args"); anything else is not a subscript.
fn split_subscript(expr: &str) -> Option<(&str, &str)> {
    let inner = expr.strip_suffix(']')?;
    let open = inner.find('[')?;
    Some((inner[..open].trim(), &inner[open + 1..]))
}

// Split on commas outside any nested brackets, so `Union[Dict[str, int],
// None]` keeps its first member intact.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (index, ch) in args.char_indices() {
        match ch {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                members.push(args[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    members.push(args[start..].trim());
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(
            Annotation::parse(Some("str")),
            Annotation::Primitive(Primitive::Str)
        );
        assert_eq!(
            Annotation::parse(Some("bool")),
            Annotation::Primitive(Primitive::Bool)
        );
    }

    #[test]
    fn missing_and_blank() {
        assert_eq!(Annotation::parse(None), Annotation::Missing);
        assert_eq!(Annotation::parse(Some("  ")), Annotation::Missing);
    }

    #[test]
    fn quoted_annotation_unwraps() {
        assert_eq!(
            Annotation::parse(Some("'int'")),
            Annotation::Primitive(Primitive::Int)
        );
        assert_eq!(
            Annotation::parse(Some("\"list\"")),
            Annotation::Container(Container::List)
        );
    }

    #[test]
    fn subscripted_containers_drop_element_types() {
        assert_eq!(
            Annotation::parse(Some("List[str]")),
            Annotation::Container(Container::List)
        );
        assert_eq!(
            Annotation::parse(Some("Dict[str, int]")),
            Annotation::Container(Container::Dict)
        );
    }

    #[test]
    fn optional_wraps_inner() {
        assert_eq!(
            Annotation::parse(Some("Optional[int]")),
            Annotation::Optional(Box::new(Annotation::Primitive(Primitive::Int)))
        );
    }

    #[test]
    fn union_members_split_at_top_level() {
        let parsed = Annotation::parse(Some("Union[Dict[str, int], None]"));
        let Annotation::Union(members) = parsed else {
            panic!("expected union");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0], Annotation::Container(Container::Dict));
        assert!(members[1].is_none_type());
    }

    #[test]
    fn unknown_identifier_becomes_named() {
        assert_eq!(
            Annotation::parse(Some("WeatherReport")),
            Annotation::named("WeatherReport")
        );
        assert_eq!(
            Annotation::parse(Some("Callable[[int], str]")),
            Annotation::named("Callable")
        );
    }
}
