//! Type-driven example-document synthesis.
//!
//! Given a class/field model produced by an external source analyzer, this
//! crate synthesizes a representative example JSON document for any type in
//! the model: generics are resolved across inheritance chains, collections,
//! maps, arrays, enums and transparent wrappers each get their own rendering,
//! recursion is bounded, and self-referential graphs terminate with reference
//! placeholders. A broken or incomplete model never aborts a document; the
//! affected subtree degrades to a placeholder or warning literal.

pub mod cli;
pub mod config;
pub mod error;
pub mod governor;
pub mod load;
pub mod mock;
pub mod model;
pub mod policy;
pub mod signature;
pub mod synth;

pub use config::{Direction, EnumMode, NamingStyle, SynthConfig};
pub use error::{Error, Result};
pub use model::{FieldDescriptor, Shape, TypeDescriptor, TypeModel};
pub use policy::SerializationFilter;
pub use signature::TypeSig;
pub use synth::Synthesizer;
