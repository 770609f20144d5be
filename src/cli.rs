//! Minimal CLI: model → example documents.
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Direction;
use crate::model::DeclaredKind;
use crate::policy::SerializationFilter;
use crate::synth::Synthesizer;

/// synthesize representative example JSON payloads from an analyzed class/field model
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize one example document for a root type
    Example(ExampleOut),
    /// synthesize documents for many root types in parallel
    Batch(BatchOut),
}

#[derive(Args, Debug, Clone)]
struct ModelSettings {
    /// one or more model files; literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    model: Vec<String>,

    /// synthesis configuration file (JSON); defaults apply if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// request- or response-side document
    #[arg(long, value_enum, default_value_t = DirectionArg::Response)]
    direction: DirectionArg,

    /// active serialization groups (field filter)
    #[arg(long)]
    group: Vec<String>,

    /// active serialization views (field filter)
    #[arg(long)]
    view: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DirectionArg {
    Request,
    Response,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Request => Direction::Request,
            DirectionArg::Response => Direction::Response,
        }
    }
}

#[derive(Args, Debug)]
struct ExampleOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// root type signature, e.g. 'com.x.Page<com.x.Item>'
    #[arg(long = "type", value_name = "SIGNATURE")]
    type_signature: String,

    /// apply the configured response wrapper around the root type
    #[arg(long, default_value_t = false)]
    wrap_response: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line output instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Args, Debug)]
struct BatchOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// root types; every plain-object class in the model if omitted
    #[arg(long = "type", value_name = "SIGNATURE")]
    type_signatures: Vec<String>,

    /// write one <type>.json per root into this directory (stdout if omitted)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// single-line output instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

impl ModelSettings {
    fn filter(&self) -> SerializationFilter {
        let mut filter = SerializationFilter::none();
        filter.groups.extend(self.group.iter().cloned());
        filter.views.extend(self.view.iter().cloned());
        filter
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Example(target) => run_example(target),
            Command::Batch(target) => run_batch(target),
        }
    }
}

fn render(value: &serde_json::Value, compact: bool) -> String {
    if compact {
        value.to_string()
    } else {
        // A Value always serializes; pretty-printing cannot fail on it.
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

fn write_or_print(out: Option<&PathBuf>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run_example(target: &ExampleOut) -> anyhow::Result<()> {
    let settings = &target.model_settings;
    let model = crate::load::load_model(&settings.model)?;
    let config = crate::load::load_config(settings.config.as_deref())?;
    let synthesizer = Synthesizer::new(&model, &config)?;
    let filter = settings.filter();

    let sig = crate::signature::TypeSig::parse(&target.type_signature);
    let value = if target.wrap_response {
        synthesizer.synthesize_response(&sig, &filter)
    } else {
        synthesizer.synthesize(&sig, settings.direction.into(), &filter)
    };
    write_or_print(target.out.as_ref(), &render(&value, target.compact))
}

fn run_batch(target: &BatchOut) -> anyhow::Result<()> {
    let settings = &target.model_settings;
    let model = crate::load::load_model(&settings.model)?;
    let config = crate::load::load_config(settings.config.as_deref())?;
    let synthesizer = Synthesizer::new(&model, &config)?;
    let filter = settings.filter();

    let roots: Vec<String> = if target.type_signatures.is_empty() {
        model
            .classes
            .iter()
            .filter(|(_, d)| d.kind == DeclaredKind::Object)
            .map(|(name, _)| name.clone())
            .collect()
    } else {
        target.type_signatures.clone()
    };

    let documents = synthesizer.synthesize_all(&roots, settings.direction.into(), &filter);

    match &target.out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            for (root, value) in &documents {
                let file = dir.join(format!("{}.json", sanitize_file_name(root)));
                std::fs::write(&file, render(value, target.compact))
                    .with_context(|| format!("writing {}", file.display()))?;
            }
        }
        None => {
            let mut all = serde_json::Map::new();
            for (root, value) in documents {
                all.insert(root, value);
            }
            println!("{}", render(&serde_json::Value::Object(all), target.compact));
        }
    }
    Ok(())
}

/// Generic signatures contain characters that do not belong in file names.
fn sanitize_file_name(root: &str) -> String {
    root.chars()
        .map(|c| match c {
            '<' | '>' | ',' | ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

// ------------------------------- Tests ------------------------------------ //
