use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use gavel::render::{self, FormatOptions};
use gavel::{Document, LintRunner, ParseError, Registry, Resources, Severity, Source, config};

mod cli;
use cli::{Cli, Commands, OutputFormat};

fn read_all(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input: &Path) -> io::Result<PathBuf> {
    if input.is_dir() {
        Ok(input.to_path_buf())
    } else if let Some(parent) = input.parent().filter(|p| !p.as_os_str().is_empty()) {
        Ok(parent.to_path_buf())
    } else {
        env::current_dir()
    }
}

/// Expands the command-line paths into the list of files to check:
/// files are taken as-is, directories are walked for `.md` files.
fn collect_sources(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut output = Vec::with_capacity(inputs.len());

    for input in inputs {
        let metadata = fs::metadata(input)?;
        if metadata.is_file() {
            output.push(input.clone());
            continue;
        }

        if !metadata.is_dir() {
            continue;
        }

        for entry in ignore::Walk::new(input) {
            let entry = entry.map_err(io::Error::other)?;
            let path = entry.path();
            if path.is_file() && path.extension() == Some(OsStr::new("md")) {
                output.push(path.to_path_buf());
            }
        }
    }

    output.sort();
    output.dedup();
    Ok(output)
}

/// Resolves every cross-document reference the rule set will follow:
/// batch members count first, then `proposal-N.md` siblings on disk.
fn load_resources(registry: &Registry, sources: &[Source]) -> Resources {
    let mut resources = Resources::new();
    let mut parsed = Vec::with_capacity(sources.len());

    for source in sources {
        let document = Document::parse(source.origin.as_deref(), &source.text).ok();

        if let Some(document) = &document
            && let Some(number) = document.origin().and_then(Resources::origin_number)
        {
            resources.insert(number, document.clone());
        }

        parsed.push(document);
    }

    for document in parsed.iter().flatten() {
        let dir = document
            .origin()
            .map(Path::new)
            .and_then(Path::parent)
            .unwrap_or(Path::new(""));

        for number in registry.references(document) {
            if resources.get(number).is_some() {
                continue;
            }

            let sibling = dir.join(Resources::file_name(number));
            let origin = sibling.display().to_string();
            match fs::read_to_string(&sibling) {
                Ok(text) => match Document::parse(Some(&origin), &text) {
                    Ok(sibling_document) => resources.insert(number, sibling_document),
                    Err(error) => resources.insert_unavailable(number, origin, error.to_string()),
                },
                Err(error) => resources.insert_unavailable(number, origin, error.to_string()),
            }
        }
    }

    resources
}

#[allow(clippy::too_many_arguments)]
fn lint_command(
    explicit_config: Option<&Path>,
    files: Vec<PathBuf>,
    format: OutputFormat,
    warn: Vec<String>,
    allow: Vec<String>,
    deny: Vec<String>,
    color: bool,
) -> io::Result<()> {
    let paths = collect_sources(&files)?;
    if paths.is_empty() {
        eprintln!("no .md files found in the given paths");
        std::process::exit(2);
    }

    let start_dir = start_dir_for(&files[0])?;
    let (mut options, config_path) = match config::load(explicit_config, &start_dir) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("configuration error: {error}");
            std::process::exit(2);
        }
    };

    if let Some(path) = &config_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }

    options.warn.extend(warn);
    options.allow.extend(allow);
    options.deny.extend(deny);

    let runner = match LintRunner::new(&options) {
        Ok(runner) => runner,
        Err(error) => {
            eprintln!("configuration error: {error}");
            std::process::exit(2);
        }
    };
    let format_options = FormatOptions {
        anonymized_line_numbers: false,
        color,
    };
    let runner = runner.with_format(format_options);

    // Undecodable files become parse diagnostics instead of aborting
    // the run; unreadable files still do.
    let mut sources = Vec::with_capacity(paths.len());
    let mut rendered = Vec::new();
    for path in &paths {
        let origin = path.display().to_string();
        match String::from_utf8(fs::read(path)?) {
            Ok(text) => sources.push(Source::new(origin, text)),
            Err(_) => {
                for mut diagnostic in
                    ParseError::InvalidUtf8.to_diagnostics(Some(origin.as_str()), "")
                {
                    diagnostic.opt = format_options;
                    rendered.push(diagnostic);
                }
            }
        }
    }

    let resources = load_resources(runner.registry(), &sources);
    let reports = runner.lint_batch_with(&sources, &resources);

    for (report, source) in reports.iter().zip(&sources) {
        match report {
            Ok(diagnostics) => rendered.extend(diagnostics.iter().cloned()),
            Err(error) => {
                for mut diagnostic in error.to_diagnostics(source.origin.as_deref(), &source.text) {
                    diagnostic.opt = format_options;
                    rendered.push(diagnostic);
                }
            }
        }
    }

    let error_count = rendered
        .iter()
        .filter(|diagnostic| diagnostic.title.annotation_type == Severity::Error)
        .count();

    match format {
        OutputFormat::Json => {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(&stdout, &rendered)?;
            println!();
        }
        OutputFormat::Text => {
            if rendered.is_empty() {
                println!("No issues found");
            } else {
                for diagnostic in &rendered {
                    let block = render::format(diagnostic).map_err(io::Error::other)?;
                    println!("{block}");
                    println!();
                }
                println!("Found {} issue(s)", rendered.len());
            }
        }
    }

    if error_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn rules_command(explicit_config: Option<&Path>) -> io::Result<()> {
    let start_dir = env::current_dir()?;
    let (options, config_path) = match config::load(explicit_config, &start_dir) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("configuration error: {error}");
            std::process::exit(2);
        }
    };

    if let Some(path) = &config_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }

    let registry = match options.build_registry() {
        Ok(registry) => registry,
        Err(error) => {
            eprintln!("configuration error: {error}");
            std::process::exit(2);
        }
    };

    println!("Available rules:");
    for (id, definition) in registry.rules() {
        println!("\t{}  ({})", id, definition.kind.name());
    }
    println!();

    Ok(())
}

fn parse_command(file: Option<PathBuf>) -> io::Result<()> {
    let input = read_all(file.as_ref())?;
    let origin = file.as_ref().and_then(|p| p.to_str());

    match Document::parse_bytes(origin, &input) {
        Ok(document) => {
            println!("{:#?}", document);
            Ok(())
        }
        Err(error) => {
            let source = String::from_utf8_lossy(&input);
            for diagnostic in error.to_diagnostics(origin, &source) {
                let block = render::format(&diagnostic).map_err(io::Error::other)?;
                eprintln!("{block}");
            }
            std::process::exit(1);
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lint {
            files,
            format,
            warn,
            allow,
            deny,
            color,
        } => lint_command(
            cli.config.as_deref(),
            files,
            format,
            warn,
            allow,
            deny,
            color,
        ),
        Commands::Rules => rules_command(cli.config.as_deref()),
        Commands::Parse { file } => parse_command(file),
    }
}
