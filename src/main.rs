// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use rand::Rng;
use scales::config::{CatalogEvent, CatalogWatcher};
use scales::{PatternEntry, PatternFile, PitchClass, Root, ScaleCatalog, Settings};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("SCALES - Scale browser for notation display");
    println!();
    println!("Usage: scales [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list                  List scale names in the catalog");
    println!("  --generated             Use the enumerated patterns even if a catalog is set");
    println!("  --scale <NAME>          Scale to show, by name or alias (default: first in catalog)");
    println!("  --root <NOTE>           Permitted root to build on (default: first permitted root)");
    println!("  --random                Pick a random scale and root");
    println!("  --catalog <PATH>        Load scale patterns from a JSON or YAML file");
    println!("  --config <PATH>         Load settings from a TOML file");
    println!("  --flat                  Spell short-form roots with flats");
    println!("  --watch                 Show the scale again whenever the catalog file changes");
    println!("  --help                  Show this help message");
}

#[derive(Debug, Default)]
struct Options {
    list: bool,
    generated: bool,
    random: bool,
    flat: bool,
    watch: bool,
    scale: Option<String>,
    root: Option<String>,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--list" => options.list = true,
            "--generated" => options.generated = true,
            "--random" => options.random = true,
            "--flat" => options.flat = true,
            "--watch" => options.watch = true,
            "--scale" => options.scale = Some(value("--scale")?),
            "--root" => options.root = Some(value("--root")?),
            "--catalog" => options.catalog = Some(PathBuf::from(value("--catalog")?)),
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--help" | "-h" => return Ok(None),
            other => bail!("Unknown option: {}", other),
        }
    }

    if options.watch && options.generated {
        bail!("--watch needs a catalog file and cannot be combined with --generated");
    }

    Ok(Some(options))
}

/// Patterns to choose from, plus the enumeration they came from if any
struct Source {
    patterns: PatternFile,
    enumerated: Option<ScaleCatalog>,
}

fn catalog_path<'a>(settings: &'a Settings, options: &'a Options) -> Option<&'a Path> {
    if options.generated {
        return None;
    }
    options
        .catalog
        .as_deref()
        .or(settings.catalog.as_deref())
}

fn load_source(settings: &Settings, options: &Options) -> Result<Source> {
    if let Some(path) = catalog_path(settings, options) {
        return Ok(Source {
            patterns: PatternFile::load(path)?,
            enumerated: None,
        });
    }

    let catalog = ScaleCatalog::enumerate(settings.octave_length);
    info!(
        patterns = catalog.len(),
        span = settings.octave_length,
        "enumerated scale patterns"
    );
    Ok(Source {
        patterns: PatternFile::generated(&catalog, settings.prefer_sharp)?,
        enumerated: Some(catalog),
    })
}

fn choose_random<'a, R: Rng + ?Sized>(
    source: &'a Source,
    settings: &Settings,
    rng: &mut R,
) -> Result<(&'a PatternEntry, Root)> {
    match &source.enumerated {
        // Enumerated patterns are allowed on every tone
        Some(catalog) => {
            let pattern = catalog.random(rng)?;
            let entry = source
                .patterns
                .find_pattern(pattern.steps())
                .ok_or_else(|| anyhow!("pattern [{}] missing from catalog", pattern))?;
            let root: Root = PitchClass::random(rng, settings.prefer_sharp).into();
            Ok((entry, root))
        }
        None => {
            let entry = source.patterns.random(rng)?;
            let root = entry.random_root(rng, settings.prefer_sharp)?;
            Ok((entry, root))
        }
    }
}

fn choose<'a, R: Rng + ?Sized>(
    source: &'a Source,
    settings: &Settings,
    options: &Options,
    rng: &mut R,
) -> Result<(&'a PatternEntry, Root)> {
    if options.random {
        return choose_random(source, settings, rng);
    }

    let entry = match &options.scale {
        Some(name) => source
            .patterns
            .resolve_scale(name)
            .ok_or_else(|| anyhow!("Unknown scale: {}", name))?,
        None => source.patterns.first()?,
    };
    let root = match &options.root {
        Some(name) => entry.root(name, settings.prefer_sharp)?,
        None => entry.first_root(settings.prefer_sharp)?,
    };
    Ok((entry, root))
}

fn show(entry: &PatternEntry, root: Root, settings: &Settings) -> Result<()> {
    let scale = entry.scale(root);
    let rendered = scale.render(settings.start_octave());

    println!("{} on {}", entry.name, scale.root().pitch().display_name()?);
    println!("Pattern: {}", entry.pattern);
    if !entry.pattern.spans_octave() {
        println!("(spans {} semitones)", entry.pattern.span());
    }
    println!("Clef: {}", settings.clef.name());
    println!(
        "Note value: 1/{}",
        scales::music::octave::note_value(rendered.len())?
    );
    println!();
    for note in &rendered {
        println!(
            "  {:<4} {:<6} {}",
            note.pitch().display_name()?,
            note.key()?,
            note.pitch().index()
        );
    }
    Ok(())
}

fn list(source: &Source, settings: &Settings) -> Result<()> {
    for entry in &source.patterns.entries {
        let roots = entry.root_names(settings.prefer_sharp)?;
        println!("{:<24} [{}]  roots: {}", entry.name, entry.pattern, roots.join(" "));
    }
    Ok(())
}

fn present(source: &Source, settings: &Settings, options: &Options) -> Result<()> {
    if options.list {
        return list(source, settings);
    }
    let (entry, root) = choose(source, settings, options, &mut rand::thread_rng())?;
    show(entry, root, settings)
}

fn watch(path: &Path, settings: &Settings, options: &Options) -> Result<()> {
    let watcher = CatalogWatcher::new(path, None)?;
    info!(path = ?watcher.watched_path(), "watching catalog for changes");

    while let Some(event) = watcher.recv() {
        match event {
            CatalogEvent::Reloaded(patterns) => {
                let source = Source {
                    patterns: *patterns,
                    enumerated: None,
                };
                println!();
                if let Err(e) = present(&source, settings, options) {
                    warn!("{:#}", e);
                }
            }
            CatalogEvent::Error(message) => warn!(%message, "catalog reload failed"),
            CatalogEvent::FileCreated(path) | CatalogEvent::FileDeleted(path) => {
                debug!(path = ?path, "catalog directory changed")
            }
        }
    }
    Ok(())
}

fn run(options: Options) -> Result<()> {
    let mut settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if options.flat {
        settings.prefer_sharp = false;
    }

    let source = load_source(&settings, &options)?;
    present(&source, &settings, &options)?;

    if options.watch {
        let path = catalog_path(&settings, &options)
            .ok_or_else(|| anyhow!("--watch needs --catalog or a catalog in the settings file"))?;
        watch(path, &settings, &options)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args).context("Invalid arguments")? {
        Some(options) => options,
        None => {
            print_usage();
            return Ok(());
        }
    };

    run(options)
}
