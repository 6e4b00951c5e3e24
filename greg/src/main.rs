use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use greg_generator::{assemble, template, GregGenerator, Manifest, Registry};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod options;

use options::Options;

/// Template file name and the name of the file it is rendered to.
const OUTPUTS: &[(&str, &str)] = &[("greg.h.in", "greg.h"), ("greg.c.in", "greg.c")];

fn main() -> ExitCode {
    let options = Options::parse();
    init_logging(options.verbose);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // also installs the bridge for the generator's `log` records
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(options: &Options) -> Result<()> {
    let target = options.target();
    debug!(?target, "Generating loader");

    let registry = Registry::from_file(&options.spec)
        .with_context(|| format!("Failed to load registry {}", options.spec.display()))?;

    let manifest = Manifest::resolve(&registry, &target);
    let bundle = assemble(&GregGenerator::default(), &registry, &manifest, &target)?;
    let bindings = bundle.bindings();

    // nothing is written unless every template renders
    let rendered = OUTPUTS
        .iter()
        .map(|(template_name, output_name)| {
            let text = template::render_file(options.templates.join(template_name), &bindings)?;
            Ok((options.output.join(output_name), text))
        })
        .collect::<Result<Vec<(PathBuf, String)>>>()?;

    fs::create_dir_all(&options.output)
        .with_context(|| format!("Failed to create output directory {}", options.output.display()))?;

    write_outputs(&options.output, &rendered)?;
    for (path, _) in &rendered {
        info!("Wrote {}", path.display());
    }

    info!(
        "Generated {} {} loader: {} versions, {} extensions, {} commands",
        target.api,
        target.version,
        manifest.versions.len(),
        manifest.extensions.len(),
        manifest.commands.len()
    );

    Ok(())
}

/// Writes every file or none of them.
///
/// Each text is staged in a temporary file next to its destination and only
/// moved into place once all of them are on disk. If a move fails, the files
/// already moved are removed again.
fn write_outputs(dir: &Path, rendered: &[(PathBuf, String)]) -> Result<()> {
    let mut staged = Vec::with_capacity(rendered.len());
    for (path, text) in rendered {
        let mut file =
            NamedTempFile::new_in(dir).with_context(|| format!("Failed to create file {}", path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write file {}", path.display()))?;
        staged.push((file, path));
    }

    let mut persisted: Vec<&PathBuf> = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        if let Err(e) = file.persist(path) {
            for done in persisted {
                if let Err(e) = fs::remove_file(done) {
                    warn!("Failed to remove {}: {}", done.display(), e);
                }
            }
            return Err(anyhow::Error::new(e.error).context(format!("Failed to create file {}", path.display())));
        }
        persisted.push(path);
    }

    Ok(())
}
