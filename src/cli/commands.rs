//! Command driver: one invocation from raw arguments to rendered output

use std::io::Write;

use tracing::{debug, info, instrument};

use crate::application::services::DataOptions;
use crate::application::{ApplicationError, ApplicationResult};
use crate::cli::args::{self, Cli};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::{EngineClass, KanjiCode, Pattern, RenderOptions};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{InfraError, InfraResult};

/// Parse `argv` (without the program name) and run it.
pub fn run<I, S>(argv: I, container: &ServiceContainer, out: &mut dyn Write) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = Cli::parse_from(argv)?;
    execute_command(&cli, container, out)
}

#[instrument(level = "debug", skip_all)]
pub fn execute_command(cli: &Cli, container: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    if cli.help || cli.version {
        if cli.version {
            write_out(out, &format!("{}\n", args::version()))?;
        }
        if cli.help {
            write_out(out, &args::usage())?;
        }
        return Ok(());
    }

    let options = render_options(cli, &container.settings)?;
    debug!("render options: {:?}", options);

    let data_options = DataOptions {
        untabify: cli.untabify,
        normalize_keys: cli.normalize_keys,
    };
    let context = container
        .context_service()
        .build(&cli.data_files, cli.context.clone(), data_options)?;
    debug!("context keys: {:?}", context.keys().collect::<Vec<_>>());

    let renderer = container.render_service();
    let mode = cli.output_mode();
    if cli.files.is_empty() {
        info!("rendering template from stdin");
        let output = renderer.render_stdin(&options, &context, mode)?;
        write_out(out, &output)?;
    } else {
        for file in &cli.files {
            info!("rendering {}", file.display());
            let output = renderer.render_file(file, &options, &context, mode)?;
            write_out(out, &output)?;
        }
    }
    Ok(())
}

/// Combine settings defaults with command-line overrides and validate them.
pub fn render_options(cli: &Cli, settings: &Settings) -> ApplicationResult<RenderOptions> {
    let mut include_paths = settings.include_paths.clone();
    include_paths.extend(cli.include_paths.iter().cloned());

    let class_name = cli.class.as_deref().unwrap_or(&settings.class);
    let class = EngineClass::from_name(class_name)
        .ok_or_else(|| ApplicationError::InvalidClassName(class_name.to_string()))?;

    // Input is always decoded as UTF-8, so the code is only validated
    if let Some(name) = cli.kanji.as_deref().or(settings.kanji.as_deref()) {
        let code = KanjiCode::from_name(name)
            .ok_or_else(|| ApplicationError::InvalidKanjiCode(name.to_string()))?;
        if !code.is_supported() {
            return Err(ApplicationError::UnsupportedKanjiCode(name.to_string()));
        }
    }

    let pattern_spec = cli.pattern.as_deref().unwrap_or(&settings.pattern);
    let pattern = Pattern::parse(pattern_spec)
        .ok_or_else(|| ApplicationError::InvalidPattern(pattern_spec.to_string()))?;

    Ok(RenderOptions {
        class,
        pattern,
        trim: settings.trim && !cli.no_trim,
        include_paths,
        libraries: cli.libraries.clone(),
    })
}

fn write_out(out: &mut dyn Write, text: &str) -> InfraResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| InfraError::io("write output", e))
}
