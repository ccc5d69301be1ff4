//! Instruction-to-document converter.
//!
//! Reads loosely structured instructions, splits them into steps, infers
//! which steps depend on earlier ones, and prints the resulting document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use stepdoc::core::lexicon::Language;
use stepdoc::document::{DocumentOptions, Labels};
use stepdoc::exit_codes;
use stepdoc::generate::{DependencySource, Generator, parse_manual_dependencies};
use stepdoc::io::config::{DEFAULT_CONFIG_FILE, StepdocConfig, load_config};
use stepdoc::io::input::{InputSource, read_input};
use stepdoc::io::output::write_output;
use stepdoc::logging;
use stepdoc::render::{OutputFormat, render};
use stepdoc::validate::validate_document_file;

const DEMO_TEXT: &str = "
    1. Backofen auf 180 Grad vorheizen
    - Mehl und Zucker vermischen
    • Eier hinzufügen nachdem Mehl und Zucker vermischt wurden
    Butter schmelzen und unterrühren (erst wenn Eier hinzugefügt wurden)
    ";

#[derive(Parser)]
#[command(
    name = "stepdoc",
    version,
    about = "Turn loosely structured instructions into a step document"
)]
struct Cli {
    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input file; stdin when absent or `-`.
    input: Option<PathBuf>,

    /// Config file (defaults to `stepdoc.toml` if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trigger vocabulary and labels: `en` or `de`.
    #[arg(long)]
    language: Option<Language>,
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Document title.
    #[arg(long)]
    title: Option<String>,

    /// Word used in step titles, e.g. `Task` renders `Task 1`.
    #[arg(long)]
    keyword: Option<String>,

    /// Output format: xml, json or markdown.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Creation timestamp (RFC 3339); defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: Option<DateTime<FixedOffset>>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render instructions as a document.
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        document: DocumentArgs,

        /// Skip dependency inference and emit a flat step list.
        #[arg(long, conflicts_with = "depends")]
        no_dependencies: bool,

        /// Explicit dependencies as `STEP=DEP[,DEP]`; replaces inference.
        #[arg(long = "depends", value_name = "STEP=DEPS")]
        depends: Vec<String>,
    },
    /// Print the segmented steps, one per line.
    Segment {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print inferred dependencies as `STEP: DEP, DEP`.
    Deps {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check a rendered JSON document against the schema and invariants.
    Validate {
        /// JSON document to check.
        file: PathBuf,
    },
    /// Render the built-in cake recipe example.
    Demo {
        #[command(flatten)]
        document: DocumentArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let code = match run(cli.command) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render {
            source,
            document,
            no_dependencies,
            depends,
        } => {
            let dependencies = if no_dependencies {
                DependencySource::Disabled
            } else if !depends.is_empty() {
                DependencySource::Manual(parse_manual_dependencies(&depends)?)
            } else {
                DependencySource::Inferred
            };
            cmd_render(&source, &document, dependencies)
        }
        Command::Segment { source } => cmd_segment(&source),
        Command::Deps { source } => cmd_deps(&source),
        Command::Validate { file } => cmd_validate(&file),
        Command::Demo { document } => cmd_demo(&document),
    }
}

fn cmd_render(
    source: &SourceArgs,
    document: &DocumentArgs,
    dependencies: DependencySource,
) -> Result<()> {
    let cfg = resolve_config(source)?;
    let text = read_input(&InputSource::from_arg(source.input.as_deref()))?;
    let generator = Generator {
        dependencies,
        ..generator_for(&cfg)?
    };
    emit(&generator, &text, &cfg, document)
}

fn cmd_segment(source: &SourceArgs) -> Result<()> {
    let cfg = resolve_config(source)?;
    let text = read_input(&InputSource::from_arg(source.input.as_deref()))?;
    let analysis = generator_for(&cfg)?.analyze(&text)?;
    for step in &analysis.steps {
        println!("{}\t{}", step.index, step.text);
    }
    Ok(())
}

fn cmd_deps(source: &SourceArgs) -> Result<()> {
    let cfg = resolve_config(source)?;
    let text = read_input(&InputSource::from_arg(source.input.as_deref()))?;
    let analysis = generator_for(&cfg)?.analyze(&text)?;
    for (step, deps) in analysis.dependencies.iter() {
        let deps = deps
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("{step}: {deps}");
    }
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<()> {
    let doc = validate_document_file(file)?;
    println!("ok: {} steps", doc.steps.len());
    Ok(())
}

fn cmd_demo(document: &DocumentArgs) -> Result<()> {
    let cfg = StepdocConfig {
        language: Language::German,
        title: Some("Kuchenrezept".to_string()),
        step_keyword: Some("Aufgabe".to_string()),
        ..StepdocConfig::default()
    };
    emit(&generator_for(&cfg)?, DEMO_TEXT, &cfg, document)
}

/// Load the config file and apply `--language`.
fn resolve_config(source: &SourceArgs) -> Result<StepdocConfig> {
    let path = source
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if source.config.is_some() && !path.exists() {
        anyhow::bail!("config file {} not found", path.display());
    }
    let mut cfg = load_config(&path).context("load config")?;
    if let Some(language) = source.language {
        cfg.language = language;
    }
    debug!(config = %path.display(), language = %cfg.language, "resolved config");
    Ok(cfg)
}

fn generator_for(cfg: &StepdocConfig) -> Result<Generator> {
    Ok(Generator {
        segmenter: cfg.segmenter()?,
        lexicon: cfg.lexicon()?,
        dependencies: DependencySource::Inferred,
    })
}

/// Generate, render and write the document. CLI flags win over config.
fn emit(
    generator: &Generator,
    text: &str,
    cfg: &StepdocConfig,
    args: &DocumentArgs,
) -> Result<()> {
    let cfg = with_document_overrides(cfg, args);
    cfg.validate().context("document options")?;

    let created_at = args
        .timestamp
        .unwrap_or_else(|| Local::now().fixed_offset());
    let mut options = DocumentOptions::new(cfg.language, created_at);
    if let Some(title) = cfg.title {
        options.title = title;
    }
    if let Some(keyword) = cfg.step_keyword {
        options.step_keyword = keyword;
    }
    let format = args.format.unwrap_or(cfg.format);

    let doc = generator.generate(text, &options)?;
    let rendered = render(&doc, &Labels::for_language(cfg.language), format)?;
    write_output(args.output.as_deref(), &rendered)
}

/// Config with `--title` and `--keyword` applied on top.
fn with_document_overrides(cfg: &StepdocConfig, args: &DocumentArgs) -> StepdocConfig {
    let mut cfg = cfg.clone();
    if let Some(title) = &args.title {
        cfg.title = Some(title.clone());
    }
    if let Some(keyword) = &args.keyword {
        cfg.step_keyword = Some(keyword.clone());
    }
    cfg
}

fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw).map_err(|err| format!("invalid RFC 3339 timestamp: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_render_defaults() {
        let cli = Cli::parse_from(["stepdoc", "render"]);
        match cli.command {
            Command::Render {
                source,
                document,
                no_dependencies,
                depends,
            } => {
                assert!(source.input.is_none());
                assert!(document.format.is_none());
                assert!(!no_dependencies);
                assert!(depends.is_empty());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn parse_render_options() {
        let cli = Cli::parse_from([
            "stepdoc",
            "render",
            "notes.txt",
            "--language",
            "de",
            "--format",
            "json",
            "--timestamp",
            "2024-05-01T12:30:00+02:00",
            "--depends",
            "3=1,2",
            "--depends",
            "2=1",
        ]);
        match cli.command {
            Command::Render {
                source,
                document,
                depends,
                ..
            } => {
                assert_eq!(source.input, Some(PathBuf::from("notes.txt")));
                assert_eq!(source.language, Some(Language::German));
                assert_eq!(document.format, Some(OutputFormat::Json));
                assert!(document.timestamp.is_some());
                assert_eq!(depends, vec!["3=1,2", "2=1"]);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn no_dependencies_conflicts_with_depends() {
        let result =
            Cli::try_parse_from(["stepdoc", "render", "--no-dependencies", "--depends", "2=1"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        let result = Cli::try_parse_from(["stepdoc", "demo", "--timestamp", "yesterday"]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_title_override_fails_config_validation() {
        let cli = Cli::parse_from(["stepdoc", "demo", "--title", "", "--keyword", "Task"]);
        let Command::Demo { document } = cli.command else {
            panic!("expected demo");
        };
        let cfg = with_document_overrides(&StepdocConfig::default(), &document);
        assert_eq!(cfg.title.as_deref(), Some(""));
        assert_eq!(cfg.step_keyword.as_deref(), Some("Task"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parse_verbose_is_global() {
        let cli = Cli::parse_from(["stepdoc", "segment", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Segment { .. }));
    }
}
