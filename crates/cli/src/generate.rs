use clap::Args;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use svcgen_core::{GeneratedFile, GeneratorConfig, generate_from_str};
use tracing::{debug, info};

/// Configuration file picked up from the working directory when `--config`
/// is not given.
const DEFAULT_CONFIG_FILE: &str = "svcgen.toml";

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// API description to read (JSON or YAML)
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
    /// Directory the generated modules are written to
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,
    /// Generator configuration file (defaults to ./svcgen.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Override the services directory from the configuration
    #[arg(long = "services-dir", value_name = "DIR")]
    pub services_dir: Option<String>,
    /// Report outdated files without writing; exits with 1 if any differ
    #[arg(long)]
    pub check: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Result of a generate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// At least one file was written.
    Regenerated,
    /// Every file already matched.
    Unchanged,
    /// `--check` found this many files that would change.
    Outdated(usize),
}

pub fn run(args: GenerateArgs) -> i32 {
    match run_inner(&args) {
        Ok(Outcome::Regenerated) => {
            println!("regenerated");
            0
        }
        Ok(Outcome::Unchanged) => {
            println!("unchanged");
            0
        }
        Ok(Outcome::Outdated(count)) => {
            eprintln!("{count} generated file(s) are out of date");
            1
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_inner(args: &GenerateArgs) -> Result<Outcome, String> {
    let config = load_config(args)?;
    let description = fs::read_to_string(&args.spec)
        .map_err(|err| format!("Failed to read {}: {err}", args.spec.display()))?;

    let files = generate_from_str(&description, &config).map_err(|err| err.to_string())?;
    let changes = collect_file_changes(&args.out, files)?;
    let pending: Vec<_> = changes.iter().filter(|c| c.is_pending()).collect();

    if args.check {
        for change in &pending {
            match change.generate_diff() {
                Some(diff) => println!("{diff}"),
                None => println!("\x1b[32m+ {} (missing)\x1b[0m", change.rel_path),
            }
        }
        return Ok(if pending.is_empty() {
            Outcome::Unchanged
        } else {
            Outcome::Outdated(pending.len())
        });
    }

    for change in &pending {
        change.write(&args.out)?;
    }
    info!(
        written = pending.len(),
        unchanged = changes.len() - pending.len(),
        out = %args.out.display(),
        "wrote generated modules"
    );

    Ok(if pending.is_empty() {
        Outcome::Unchanged
    } else {
        Outcome::Regenerated
    })
}

/// Read the `[generator]` table and apply flag overrides.
fn load_config(args: &GenerateArgs) -> Result<GeneratorConfig, String> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.is_file()),
    };

    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading generator configuration");
            let contents = fs::read_to_string(&path)
                .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
            GeneratorConfig::from_toml_str(&contents).map_err(|err| err.to_string())?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(services_dir) = &args.services_dir {
        config.services_dir = services_dir.clone();
    }
    Ok(config)
}

/// A generated module compared against what is on disk.
#[derive(Debug)]
struct FileChange {
    /// Relative path from the output root
    rel_path: String,
    /// Generated content
    new_content: String,
    /// Existing content (None if file doesn't exist)
    existing_content: Option<String>,
}

impl FileChange {
    fn is_pending(&self) -> bool {
        self.existing_content.as_deref() != Some(self.new_content.as_str())
    }

    fn write(&self, out: &Path) -> Result<(), String> {
        let target_path = out.join(&self.rel_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create directory: {err}"))?;
        }
        fs::write(&target_path, &self.new_content)
            .map_err(|err| format!("Failed to write {}: {err}", self.rel_path))?;
        debug!(path = %self.rel_path, "wrote module");
        Ok(())
    }

    /// Unified diff against the existing file; None for new or identical files.
    fn generate_diff(&self) -> Option<String> {
        let existing = self.existing_content.as_ref()?;
        if existing == &self.new_content {
            return None;
        }

        let diff = TextDiff::from_lines(existing, &self.new_content);
        let mut output = String::new();

        output.push_str(&format!("\x1b[1m--- {} (current)\x1b[0m\n", self.rel_path));
        output.push_str(&format!("\x1b[1m+++ {} (generated)\x1b[0m\n", self.rel_path));

        for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }
            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, color) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", ""),
                    };
                    output.push_str(color);
                    output.push_str(sign);
                    output.push_str(change.value());
                    if change.missing_newline() {
                        output.push('\n');
                    }
                    if !color.is_empty() {
                        output.push_str("\x1b[0m");
                    }
                }
            }
        }

        Some(output)
    }
}

fn collect_file_changes(out: &Path, files: Vec<GeneratedFile>) -> Result<Vec<FileChange>, String> {
    files
        .into_iter()
        .map(|file| {
            let target_path = out.join(&file.path);
            let existing_content = match fs::read_to_string(&target_path) {
                Ok(contents) => Some(contents),
                Err(err) if err.kind() == io::ErrorKind::NotFound => None,
                Err(err) => return Err(format!("Failed to read {}: {err}", target_path.display())),
            };
            Ok(FileChange {
                rel_path: file.path,
                new_content: file.contents,
                existing_content,
            })
        })
        .collect()
}
