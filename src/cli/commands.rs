//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, KindArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{PropertyTree, PropertyValue};
use crate::infrastructure::{FileSource, InfraError, PropertySource};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    let settings = Settings::load(cli.config_dir.as_deref())?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Get { file, path, kind } => cmd_get(&settings, file, path, *kind),
        Commands::Size { file, path } => cmd_size(&settings, file, path.as_deref()),
        Commands::Show { file, path } => cmd_show(&settings, file, path.as_deref()),
        Commands::Config { command } => cmd_config(&settings, cli.config_dir.as_deref(), command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_tree(settings: &Settings, file: &Path) -> CliResult<PropertyTree> {
    let source = FileSource::new(file, settings.default_format.clone());
    Ok(source.load()?)
}

#[instrument(skip(settings))]
fn cmd_get(settings: &Settings, file: &Path, path: &str, kind: Option<KindArg>) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    let value = match kind {
        None => tree.value(path).map_err(InfraError::from)?,
        Some(kind) => Some(typed_value(&tree, path, kind).map_err(InfraError::from)?),
    };

    match value {
        None => Err(CliError::Usage(format!("no property at path '{path}'"))),
        Some(PropertyValue::Properties(nested)) => {
            output::info(&output::render_tree(path, &nested, settings.show_kinds));
            Ok(())
        }
        Some(PropertyValue::PropertiesList(list)) => {
            for (i, nested) in list.iter().enumerate() {
                let label = format!("{path}[{i}]");
                output::info(&output::render_tree(&label, nested, settings.show_kinds));
            }
            Ok(())
        }
        Some(other) => {
            output::info(&output::format_value(&other));
            Ok(())
        }
    }
}

fn typed_value(
    tree: &PropertyTree,
    path: &str,
    kind: KindArg,
) -> crate::domain::PropertyResult<PropertyValue> {
    Ok(match kind {
        KindArg::Integer => PropertyValue::Integer(tree.integer_value(path)?),
        KindArg::Double => PropertyValue::Double(tree.double_value(path)?),
        KindArg::String => PropertyValue::String(tree.string_value(path)?.to_string()),
        KindArg::Properties => PropertyValue::Properties(tree.properties_value(path)?),
        KindArg::IntegerList => PropertyValue::IntegerList(tree.integer_list(path)?),
        KindArg::DoubleList => PropertyValue::DoubleList(tree.double_list(path)?),
        KindArg::StringList => PropertyValue::StringList(tree.string_list(path)?),
        KindArg::PropertiesList => PropertyValue::PropertiesList(tree.properties_list(path)?),
    })
}

#[instrument(skip(settings))]
fn cmd_size(settings: &Settings, file: &Path, path: Option<&str>) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    let nested = tree
        .properties_value(path.unwrap_or(""))
        .map_err(InfraError::from)?;
    output::info(&nested.size());
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_show(settings: &Settings, file: &Path, path: Option<&str>) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    let path = path.unwrap_or("");
    let nested = tree.properties_value(path).map_err(InfraError::from)?;
    let label = if path.is_empty() {
        file.display().to_string()
    } else {
        path.to_string()
    };
    output::info(&output::render_tree(&label, &nested, settings.show_kinds));
    Ok(())
}

fn cmd_config(
    settings: &Settings,
    config_dir: Option<&Path>,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config locations");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <no config directory>"),
            }
            let dir = config_dir.unwrap_or_else(|| Path::new("."));
            output::detail(&format!("local:  {}", local_config_path(dir).display()));
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}
