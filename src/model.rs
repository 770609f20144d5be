//! Externally supplied class/field model and per-type shape classification.
//!
//! The model is produced by a source analyzer (out of scope here) and consumed
//! read-only: a map from fully-qualified type name to a structural descriptor.
//! Classification of a type name into a closed `Shape` happens exactly once
//! per dispatch site; the synthesizer matches on it exhaustively instead of
//! re-testing string predicates.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Deserialize;

// ------------------------------ Descriptors ------------------------------- //

/// Declared structural kind of a class in the model. Containers, scalars and
/// wrappers are recognized by name, so the analyzer only distinguishes these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
    Object,
    Enum,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeDescriptor {
    pub kind: DeclaredKind,

    /// Declared generic parameter names, in order (`["T", "E"]`).
    #[serde(default)]
    pub generics: Vec<String>,

    /// Immediate supertype, if any besides the universal root.
    #[serde(default)]
    pub supertype: Option<SuperType>,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Enum constants in declaration order (empty for plain objects).
    #[serde(default)]
    pub constants: Vec<EnumConstant>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SuperType {
    pub name: String,
    /// Raw signature text of the supertype's type arguments, in order.
    /// `class Derived extends Base<String>` → `["java.lang.String"]`.
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    /// Raw generic signature text of the declared field type,
    /// e.g. `java.util.Map<java.lang.String, com.x.Item>`.
    pub signature: String,

    #[serde(default)]
    pub transient: bool,

    /// Per-field literal override sourced from a structured comment tag.
    /// Always wins over the mock provider when present.
    #[serde(default)]
    pub mock: Option<String>,

    /// Marked ignored at the source level (serializer annotation).
    #[serde(default)]
    pub ignored: bool,

    #[serde(default)]
    pub groups: BTreeSet<String>,

    #[serde(default)]
    pub views: BTreeSet<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    /// Underlying serialized value, when the analyzer could determine one.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

// -------------------------------- Model ----------------------------------- //

/// Read-only accessor over the analyzer's output. Declaration order of
/// classes and fields is preserved (IndexMap / Vec).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TypeModel {
    #[serde(default)]
    pub classes: IndexMap<String, TypeDescriptor>,
}

impl TypeModel {
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.classes.get(name)
    }

    /// Merge another model file into this one. Later files win on conflict.
    pub fn merge(&mut self, other: TypeModel) {
        for (name, descriptor) in other.classes {
            self.classes.insert(name, descriptor);
        }
    }

    /// Classify a type name into its structural shape. One call per dispatch;
    /// the result is matched exhaustively downstream.
    pub fn classify(&self, name: &str) -> Shape {
        let name = name.trim();
        if name.ends_with("[]") {
            return Shape::Array;
        }
        if ANY_OBJECT_NAMES.contains(name) {
            return Shape::AnyObject;
        }
        if SCALAR_NAMES.contains(name) {
            return Shape::Scalar;
        }
        if COLLECTION_NAMES.contains(name) {
            return Shape::Collection;
        }
        if MAP_NAMES.contains(name) {
            return Shape::Map;
        }
        if WRAPPER_NAMES.contains(name) {
            return Shape::Wrapper;
        }
        match self.get(name) {
            Some(descriptor) => match descriptor.kind {
                DeclaredKind::Enum => Shape::Enum,
                DeclaredKind::Object => Shape::Object,
            },
            None if looks_like_type_var(name) => Shape::TypeVar,
            None => Shape::Unknown,
        }
    }
}

/// Closed classification of a type name. Computed once, matched exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Enum,
    Array,
    Collection,
    Map,
    /// Carries exactly one payload type without adding a structural layer.
    Wrapper,
    /// The universal root type; expansion degrades to a warning literal.
    AnyObject,
    /// An unbound generic parameter name (`T`, `E`, ...).
    TypeVar,
    Object,
    /// Not in the model and not a well-known name.
    Unknown,
}

/// Short uppercase tokens without a package qualifier read as type variables.
fn looks_like_type_var(name: &str) -> bool {
    !name.contains('.')
        && !name.is_empty()
        && name.len() <= 2
        && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

// --------------------------- Well-known names ------------------------------ //

static ANY_OBJECT_NAMES: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| BTreeSet::from(["java.lang.Object", "Object", "object"]));

static SCALAR_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "boolean",
        "byte",
        "short",
        "int",
        "long",
        "float",
        "double",
        "char",
        "java.lang.Boolean",
        "java.lang.Byte",
        "java.lang.Short",
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Float",
        "java.lang.Double",
        "java.lang.Character",
        "java.lang.String",
        "java.lang.CharSequence",
        "java.lang.Number",
        "java.math.BigDecimal",
        "java.math.BigInteger",
        "java.util.UUID",
        "java.util.Date",
        "java.sql.Timestamp",
        "java.time.LocalDate",
        "java.time.LocalTime",
        "java.time.LocalDateTime",
        "java.time.OffsetDateTime",
        "java.time.ZonedDateTime",
        "java.time.Instant",
    ])
});

static COLLECTION_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "java.lang.Iterable",
        "java.util.Collection",
        "java.util.List",
        "java.util.ArrayList",
        "java.util.LinkedList",
        "java.util.Set",
        "java.util.SortedSet",
        "java.util.HashSet",
        "java.util.TreeSet",
        "java.util.LinkedHashSet",
        "java.util.EnumSet",
        "java.util.Queue",
        "java.util.Deque",
        "java.util.ArrayDeque",
    ])
});

static MAP_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "java.util.Map",
        "java.util.SortedMap",
        "java.util.HashMap",
        "java.util.TreeMap",
        "java.util.LinkedHashMap",
        "java.util.Hashtable",
        "java.util.Properties",
        "java.util.concurrent.ConcurrentHashMap",
        "java.util.concurrent.ConcurrentMap",
    ])
});

static WRAPPER_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "java.util.Optional",
        "java.util.concurrent.Future",
        "java.util.concurrent.CompletableFuture",
        "reactor.core.publisher.Mono",
        "reactor.core.publisher.Flux",
        "org.springframework.http.ResponseEntity",
    ])
});

/// Well-known non-data result types that short-circuit to a fixed description
/// instead of structural expansion.
pub fn special_result(name: &str) -> Option<&'static str> {
    match name {
        "org.springframework.web.servlet.ModelAndView" => {
            Some("Forward or redirect to a page view.")
        }
        "javax.servlet.http.HttpServletRequest"
        | "javax.servlet.http.HttpServletResponse"
        | "jakarta.servlet.http.HttpServletRequest"
        | "jakarta.servlet.http.HttpServletResponse" => Some("Error restful return."),
        _ => None,
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model_with(name: &str, kind: DeclaredKind) -> TypeModel {
        let mut model = TypeModel::default();
        model.classes.insert(
            name.to_string(),
            TypeDescriptor {
                kind,
                generics: vec![],
                supertype: None,
                fields: vec![],
                constants: vec![],
            },
        );
        model
    }

    #[test]
    fn classification_covers_well_known_names() {
        let model = TypeModel::default();
        assert_eq!(model.classify("java.lang.String"), Shape::Scalar);
        assert_eq!(model.classify("int"), Shape::Scalar);
        assert_eq!(model.classify("java.util.List"), Shape::Collection);
        assert_eq!(model.classify("java.util.Map"), Shape::Map);
        assert_eq!(model.classify("java.lang.Object"), Shape::AnyObject);
        assert_eq!(model.classify("reactor.core.publisher.Mono"), Shape::Wrapper);
        assert_eq!(model.classify("com.x.Item[]"), Shape::Array);
        assert_eq!(model.classify("T"), Shape::TypeVar);
        assert_eq!(model.classify("com.x.Missing"), Shape::Unknown);
    }

    #[test]
    fn model_lookup_decides_object_vs_enum() {
        let model = model_with("com.x.Status", DeclaredKind::Enum);
        assert_eq!(model.classify("com.x.Status"), Shape::Enum);
        let model = model_with("com.x.Task", DeclaredKind::Object);
        assert_eq!(model.classify("com.x.Task"), Shape::Object);
    }

    #[test]
    fn deserializes_from_analyzer_json() {
        let raw = json!({
            "classes": {
                "com.x.Task": {
                    "kind": "object",
                    "fields": [
                        {"name": "taskType", "signature": "java.lang.String"},
                        {"name": "secret", "signature": "java.lang.String", "transient": true}
                    ]
                },
                "com.x.Status": {
                    "kind": "enum",
                    "constants": [{"name": "ACTIVE"}, {"name": "DONE", "value": 2}]
                }
            }
        });
        let model: TypeModel = serde_json::from_value(raw).unwrap();
        let task = model.get("com.x.Task").unwrap();
        assert_eq!(task.fields.len(), 2);
        assert!(task.fields[1].transient);
        let status = model.get("com.x.Status").unwrap();
        assert_eq!(status.constants[0].name, "ACTIVE");
        assert_eq!(status.constants[1].value, Some(json!(2)));
    }

    #[test]
    fn merge_prefers_later_files() {
        let mut a = model_with("com.x.Task", DeclaredKind::Object);
        let b = model_with("com.x.Task", DeclaredKind::Enum);
        a.merge(b);
        assert_eq!(a.classify("com.x.Task"), Shape::Enum);
    }
}
