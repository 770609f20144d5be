//! Generic signature parsing and binding resolution.
//!
//! A signature is the textual form of a type together with its type
//! arguments (`java.util.Map<java.lang.String, com.x.Item>`). The analyzer
//! hands these over as raw text; we parse once into a small tree and work on
//! that, substituting bound parameters instead of splicing strings.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::TypeDescriptor;

pub const ANY_OBJECT: &str = "java.lang.Object";

/// Parsed generic signature: a type name plus its type arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSig {
    pub name: String,
    pub args: Vec<TypeSig>,
}

impl TypeSig {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeSig { name: name.into(), args: Vec::new() }
    }

    pub fn any_object() -> Self {
        TypeSig::simple(ANY_OBJECT)
    }

    /// Parse raw signature text. Tolerant: malformed input degrades to a
    /// bare name so synthesis can still emit a placeholder for it.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let open = match text.find('<') {
            None => return TypeSig::simple(text),
            Some(i) => i,
        };
        if !text.ends_with('>') && !text.ends_with(">[]") {
            return TypeSig::simple(text);
        }

        // A trailing array suffix applies to the whole generic type;
        // keep it on the name so shape classification sees it.
        let (body, array_suffix) = match text.strip_suffix("[]") {
            Some(stripped) => (stripped, "[]"),
            None => (text, ""),
        };
        let name = format!("{}{array_suffix}", body[..open].trim());
        let inner = &body[open + 1..body.len() - 1];

        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (i, c) in inner.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    args.push(TypeSig::parse(&inner[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
        }
        if start < inner.len() {
            args.push(TypeSig::parse(&inner[start..]));
        }
        TypeSig { name, args }
    }

    /// Element signature of an array name (`com.x.Item[]` → `com.x.Item`),
    /// or of a collection's first type argument.
    pub fn array_element(&self) -> Option<TypeSig> {
        self.name
            .strip_suffix("[]")
            .map(|base| TypeSig { name: base.trim().to_string(), args: self.args.clone() })
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.name);
        }
        let (base, suffix) = match self.name.strip_suffix("[]") {
            Some(b) => (b, "[]"),
            None => (self.name.as_str(), ""),
        };
        write!(f, "{base}<")?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, ">{suffix}")
    }
}

// ------------------------------ Bindings ---------------------------------- //

/// Resolved mapping from a declared generic parameter name to a concrete
/// signature, scoped to one synthesis subtree.
#[derive(Clone, Debug, Default)]
pub struct GenericBindings(BTreeMap<String, TypeSig>);

impl GenericBindings {
    pub fn get(&self, param: &str) -> Option<&TypeSig> {
        self.0.get(param)
    }
}

/// Positionally bind a descriptor's declared parameters to the signature's
/// arguments. When the signature carries no arguments, fall back to the
/// immediate generic supertype's arguments (`Base<T> ⊂ Derived` resolves `T`
/// even though `Derived` itself is non-generic at the use site). Parameters
/// that still have no argument bind to the universal any-object type, which
/// downstream expansion reports as a warning rather than an error.
pub fn resolve_bindings(descriptor: &TypeDescriptor, sig: &TypeSig) -> GenericBindings {
    if descriptor.generics.is_empty() {
        return GenericBindings::default();
    }
    let args: Vec<TypeSig> = if !sig.args.is_empty() {
        sig.args.clone()
    } else if let Some(supertype) = &descriptor.supertype {
        supertype.args.iter().map(|a| TypeSig::parse(a)).collect()
    } else {
        Vec::new()
    };

    let mut map = BTreeMap::new();
    for (i, param) in descriptor.generics.iter().enumerate() {
        let bound = args.get(i).cloned().unwrap_or_else(TypeSig::any_object);
        map.insert(param.clone(), bound);
    }
    GenericBindings(map)
}

/// Rewrite a signature through a binding map, recursively. A bare parameter
/// name is replaced by its binding; everything else keeps its structure.
pub fn substitute(sig: &TypeSig, bindings: &GenericBindings) -> TypeSig {
    if sig.args.is_empty() {
        if let Some(bound) = bindings.get(&sig.name) {
            return bound.clone();
        }
        // `T[]` with `T` bound.
        if let Some(base) = sig.name.strip_suffix("[]") {
            if let Some(bound) = bindings.get(base.trim()) {
                let mut out = bound.clone();
                out.name.push_str("[]");
                return out;
            }
        }
        return sig.clone();
    }
    TypeSig {
        name: sig.name.clone(),
        args: sig.args.iter().map(|a| substitute(a, bindings)).collect(),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeclaredKind;

    #[test]
    fn parses_nested_arguments() {
        let sig = TypeSig::parse("java.util.Map<java.lang.String, java.util.List<com.x.Item>>");
        assert_eq!(sig.name, "java.util.Map");
        assert_eq!(sig.args.len(), 2);
        assert_eq!(sig.args[0].name, "java.lang.String");
        assert_eq!(sig.args[1].name, "java.util.List");
        assert_eq!(sig.args[1].args[0].name, "com.x.Item");
    }

    #[test]
    fn parses_generic_array_suffix() {
        let sig = TypeSig::parse("java.util.List<com.x.Item>[]");
        assert_eq!(sig.name, "java.util.List[]");
        assert_eq!(sig.args[0].name, "com.x.Item");
        let element = sig.array_element().unwrap();
        assert_eq!(element.name, "java.util.List");
    }

    #[test]
    fn malformed_text_degrades_to_bare_name() {
        let sig = TypeSig::parse("java.util.List<com.x.Item");
        assert_eq!(sig.name, "java.util.List<com.x.Item");
        assert!(sig.args.is_empty());
    }

    #[test]
    fn display_round_trips() {
        for text in [
            "com.x.Item",
            "java.util.List<com.x.Item>",
            "java.util.Map<java.lang.String, java.util.List<com.x.Item>>",
        ] {
            assert_eq!(TypeSig::parse(text).to_string(), text);
        }
    }

    fn generic_descriptor(params: &[&str], super_args: &[&str]) -> TypeDescriptor {
        TypeDescriptor {
            kind: DeclaredKind::Object,
            generics: params.iter().map(|s| s.to_string()).collect(),
            supertype: if super_args.is_empty() {
                None
            } else {
                Some(crate::model::SuperType {
                    name: "com.x.Base".into(),
                    args: super_args.iter().map(|s| s.to_string()).collect(),
                })
            },
            fields: vec![],
            constants: vec![],
        }
    }

    #[test]
    fn binds_positionally_from_signature() {
        let descriptor = generic_descriptor(&["T"], &[]);
        let sig = TypeSig::parse("com.x.Page<com.x.Item>");
        let bindings = resolve_bindings(&descriptor, &sig);
        assert_eq!(bindings.get("T").unwrap().name, "com.x.Item");
    }

    #[test]
    fn falls_back_to_supertype_arguments() {
        let descriptor = generic_descriptor(&["T"], &["java.lang.String"]);
        let sig = TypeSig::simple("com.x.StringPage");
        let bindings = resolve_bindings(&descriptor, &sig);
        assert_eq!(bindings.get("T").unwrap().name, "java.lang.String");
    }

    #[test]
    fn unresolved_parameter_binds_to_any_object() {
        let descriptor = generic_descriptor(&["T", "E"], &[]);
        let sig = TypeSig::parse("com.x.Pair<com.x.Item>");
        let bindings = resolve_bindings(&descriptor, &sig);
        assert_eq!(bindings.get("E").unwrap().name, ANY_OBJECT);
    }

    #[test]
    fn substitution_rewrites_nested_parameters() {
        let mut map = BTreeMap::new();
        map.insert("T".to_string(), TypeSig::simple("com.x.Item"));
        let bindings = GenericBindings(map);
        let sig = TypeSig::parse("java.util.Map<java.lang.String, java.util.List<T>>");
        let out = substitute(&sig, &bindings);
        assert_eq!(out.args[1].args[0].name, "com.x.Item");

        let arr = substitute(&TypeSig::parse("T[]"), &bindings);
        assert_eq!(arr.name, "com.x.Item[]");
    }
}
