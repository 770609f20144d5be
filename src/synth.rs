//! The recursive example-document synthesizer.
//!
//! Turns (signature, direction, depth, registry) into one `serde_json::Value`
//! describing the type's shape. Dispatch is a single exhaustive match on the
//! classified `Shape`; every degrade path (unknown type, unbound generic,
//! cycle, depth limit) yields a placeholder or warning literal in place, so a
//! broken corner of the type model never loses the rest of the document.
//! Building a `Value` (not text) makes the output well-formed by construction.

use rayon::prelude::*;
use serde_json::{json, Map, Value};

use crate::config::{Direction, EnumMode, SynthConfig};
use crate::error::Result;
use crate::governor::{Expansion, RecursionGovernor};
use crate::mock;
use crate::model::{special_result, Shape, TypeModel};
use crate::policy::{FieldPolicy, SerializationFilter};
use crate::signature::{resolve_bindings, substitute, TypeSig};

const MAP_KEY: &str = "mapKey";

fn ref_placeholder() -> Value {
    json!({"$ref": "..."})
}

fn any_object_literal() -> Value {
    json!({"object": "any object"})
}

fn collection_warning() -> Value {
    json!({"warning": "collection element resolved to the universal object type; declare a concrete generic"})
}

fn map_warning() -> Value {
    json!({"warning": "map value resolved to the universal object type; the example cannot be expanded"})
}

pub struct Synthesizer<'a> {
    model: &'a TypeModel,
    config: &'a SynthConfig,
}

impl<'a> Synthesizer<'a> {
    /// Rejects misconfiguration up front; after this, synthesis never fails.
    pub fn new(model: &'a TypeModel, config: &'a SynthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Synthesizer { model, config })
    }

    /// Synthesize one example document for a root signature. Owns a fresh
    /// registry per call, so concurrent root calls never share state.
    pub fn synthesize(
        &self,
        sig: &TypeSig,
        direction: Direction,
        filter: &SerializationFilter,
    ) -> Value {
        let mut governor = RecursionGovernor::new(self.config);
        self.synth(sig, direction, 0, &mut governor, filter)
    }

    /// Convenience entry from raw signature text.
    pub fn synthesize_text(
        &self,
        signature: &str,
        direction: Direction,
        filter: &SerializationFilter,
    ) -> Value {
        self.synthesize(&TypeSig::parse(signature), direction, filter)
    }

    /// Response-side entry: applies the configured wrapper class around the
    /// return type before synthesis, unless the type is already wrapped.
    pub fn synthesize_response(&self, sig: &TypeSig, filter: &SerializationFilter) -> Value {
        if sig.name == "void" {
            return json!("Return void.");
        }
        let wrapped = match &self.config.response_wrapper {
            Some(wrapper) if sig.name != *wrapper => {
                TypeSig { name: wrapper.clone(), args: vec![sig.clone()] }
            }
            _ => sig.clone(),
        };
        self.synthesize(&wrapped, Direction::Response, filter)
    }

    /// Batch synthesis of many independent roots. Each root owns its own
    /// registry, so the work parallelizes cleanly.
    pub fn synthesize_all(
        &self,
        roots: &[String],
        direction: Direction,
        filter: &SerializationFilter,
    ) -> Vec<(String, Value)> {
        roots
            .par_iter()
            .map(|root| {
                let value = self.synthesize_text(root, direction, filter);
                (root.clone(), value)
            })
            .collect()
    }

    // ----------------------------- Dispatch ------------------------------- //

    fn synth(
        &self,
        sig: &TypeSig,
        direction: Direction,
        depth: u32,
        governor: &mut RecursionGovernor,
        filter: &SerializationFilter,
    ) -> Value {
        if governor.depth_exceeded(depth) {
            return ref_placeholder();
        }
        let name = sig.name.as_str();
        if let Some(text) = special_result(name) {
            return json!(text);
        }
        if self.config.ignored_param_types.contains(name) {
            return json!("Error restful return.");
        }

        match self.model.classify(name) {
            Shape::Scalar => mock::scalar_value(name, None),
            Shape::Enum => self.enum_value(name),
            Shape::AnyObject => any_object_literal(),
            // An unbound parameter survives substitution only when no binding
            // existed; same warning case as the universal object type.
            Shape::TypeVar => any_object_literal(),
            Shape::Unknown => ref_placeholder(),
            Shape::Array => {
                let element = sig.array_element();
                self.sequence(element, direction, depth, governor, filter)
            }
            Shape::Collection => {
                self.sequence(sig.args.first().cloned(), direction, depth, governor, filter)
            }
            Shape::Map => self.map_value(sig, direction, depth, governor, filter),
            Shape::Wrapper => match sig.args.first() {
                // The wrapper adds no structural layer of its own; depth still
                // advances for cycle-safety bookkeeping.
                Some(inner) => self.synth(inner, direction, depth + 1, governor, filter),
                None => any_object_literal(),
            },
            Shape::Object => self.object_value(sig, direction, depth, governor, filter),
        }
    }

    fn enum_value(&self, name: &str) -> Value {
        let constants = self.model.get(name).map(|d| d.constants.as_slice()).unwrap_or(&[]);
        let Some(first) = constants.first() else {
            return ref_placeholder();
        };
        match self.config.enum_mode {
            EnumMode::Name => json!(first.name),
            EnumMode::Ordinal => json!(0),
            EnumMode::Value => first.value.clone().unwrap_or_else(|| json!(first.name)),
        }
    }

    /// Ordered-sequence literal for arrays and collections.
    fn sequence(
        &self,
        element: Option<TypeSig>,
        direction: Direction,
        depth: u32,
        governor: &mut RecursionGovernor,
        filter: &SerializationFilter,
    ) -> Value {
        let Some(element) = element else {
            // No generic information at all: one generic placeholder entry.
            return json!([any_object_literal()]);
        };
        match self.model.classify(&element.name) {
            Shape::AnyObject | Shape::TypeVar => json!([collection_warning()]),
            // Two entries signal "this is a list of N" for scalar elements.
            Shape::Scalar => {
                let v = mock::scalar_value(&element.name, None);
                json!([v.clone(), v])
            }
            Shape::Enum => json!([self.enum_value(&element.name)]),
            _ => json!([self.synth(&element, direction, depth + 1, governor, filter)]),
        }
    }

    /// Map literal: one fixed marker key, except enum keys which enumerate
    /// their constants. Only the value type expands structurally.
    fn map_value(
        &self,
        sig: &TypeSig,
        direction: Direction,
        depth: u32,
        governor: &mut RecursionGovernor,
        filter: &SerializationFilter,
    ) -> Value {
        let (Some(key), Some(value)) = (sig.args.first(), sig.args.get(1)) else {
            return json!({ MAP_KEY: {} });
        };
        if matches!(self.model.classify(&value.name), Shape::AnyObject) {
            return json!({ MAP_KEY: map_warning() });
        }
        if matches!(self.model.classify(&key.name), Shape::Enum) {
            let constants = self
                .model
                .get(&key.name)
                .map(|d| d.constants.as_slice())
                .unwrap_or(&[]);
            let mut out = Map::new();
            for constant in constants {
                let v = self.synth(value, direction, depth + 1, governor, filter);
                out.insert(constant.name.clone(), v);
            }
            return Value::Object(out);
        }
        let v = self.synth(value, direction, depth + 1, governor, filter);
        json!({ MAP_KEY: v })
    }

    fn object_value(
        &self,
        sig: &TypeSig,
        direction: Direction,
        depth: u32,
        governor: &mut RecursionGovernor,
        filter: &SerializationFilter,
    ) -> Value {
        let name = sig.name.as_str();
        if governor.try_enter(name, depth) == Expansion::Placeholder {
            return ref_placeholder();
        }

        let policy = FieldPolicy::new(self.config);
        let mut out = Map::new();
        for (field, field_sig) in self.collect_fields(sig) {
            if !policy.includes(&field, direction, filter) {
                continue;
            }
            let key = policy.output_name(&field, direction);
            let value = if let Some(tag) = &field.mock {
                mock::parse_override(tag)
            } else if matches!(self.model.classify(&field_sig.name), Shape::Scalar) {
                mock::scalar_value(&field_sig.name, Some(&field.name))
            } else {
                self.synth(&field_sig, direction, depth + 1, governor, filter)
            };
            out.insert(key, value);
        }

        governor.leave(name);
        Value::Object(out)
    }

    /// Declared plus inherited fields, with subclass-declared fields
    /// shadowing same-named inherited ones. Signatures come back already
    /// substituted through the binding map of each level, so `Base<T> ⊂
    /// Derived` resolves `T` in inherited fields. The walk up the supertype
    /// link is finite: it stops at the universal root, at types missing from
    /// the model, and at a hop bound in case the model itself is cyclic.
    fn collect_fields(
        &self,
        sig: &TypeSig,
    ) -> Vec<(crate::model::FieldDescriptor, TypeSig)> {
        const MAX_SUPERTYPE_HOPS: usize = 32;

        let mut out = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        let mut current = Some(sig.clone());
        let mut hops = 0;

        while let Some(cur) = current.take() {
            hops += 1;
            if hops > MAX_SUPERTYPE_HOPS {
                break;
            }
            if matches!(self.model.classify(&cur.name), Shape::AnyObject) {
                break;
            }
            let Some(descriptor) = self.model.get(&cur.name) else { break };
            let bindings = resolve_bindings(descriptor, &cur);

            for field in &descriptor.fields {
                if !seen.insert(field.name.clone()) {
                    continue;
                }
                let raw = TypeSig::parse(&field.signature);
                out.push((field.clone(), substitute(&raw, &bindings)));
            }

            current = descriptor.supertype.as_ref().map(|supertype| TypeSig {
                name: supertype.name.clone(),
                args: supertype
                    .args
                    .iter()
                    .map(|a| substitute(&TypeSig::parse(a), &bindings))
                    .collect(),
            });
        }
        out
    }
}

// ------------------------------- Tests ------------------------------------ //
