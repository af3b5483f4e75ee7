use crate::annotation::Annotation;
use crate::pysrc::FunctionDef;

const RECEIVER: &str = "self";

/// One declared parameter, normalized from either extraction path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub annotation: Annotation,
    pub has_default: bool,
}

/// Contract A: extraction from parsed source structure. `has_default` is
/// computed positionally: defaults only ever apply to a suffix of the
/// parameter list, so the last `d` of `n` post-receiver parameters carry
/// one, where `d` is the number of default markers seen.
pub fn from_source(def: &FunctionDef) -> Vec<ParameterSpec> {
    let declared: Vec<_> = def
        .params
        .iter()
        .filter(|param| param.name != RECEIVER)
        .collect();
    let total = declared.len();
    let defaults = declared
        .iter()
        .filter(|param| param.has_default_marker)
        .count();

    declared
        .into_iter()
        .enumerate()
        .map(|(index, param)| ParameterSpec {
            name: param.name.clone(),
            annotation: Annotation::parse(param.annotation.as_deref()),
            has_default: index >= total - defaults,
        })
        .collect()
}

/// Contract B: extraction from a runtime declaration. `has_default` is
/// read directly from each parameter's marker.
pub fn from_decl(decl: &FunctionDecl) -> Vec<ParameterSpec> {
    decl.params
        .iter()
        .filter(|param| param.name != RECEIVER)
        .map(|param| ParameterSpec {
            name: param.name.clone(),
            annotation: param.annotation.clone(),
            has_default: param.has_default,
        })
        .collect()
}

/// Runtime analogue of signature reflection: a function described as a
/// value rather than as source text. `source` optionally carries the
/// original definition when one is available.
#[derive(Debug, Clone, Default)]
pub struct FunctionDecl {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParamDecl>,
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub annotation: Annotation,
    pub has_default: bool,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionDecl {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn required(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation,
            has_default: false,
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation,
            has_default: true,
        });
        self
    }
}
