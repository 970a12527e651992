//! Command dispatch: builds services from settings and runs subcommands

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::ForestService;
use crate::application::{Rule, Selection};
use crate::cli::args::{Cli, Commands, ConfigCommands, HierarchyArgs, SelectionArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, RenderStyle, Settings, ValidationMode};
use crate::domain::{validate, ArrayHierarchy, Hierarchy};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Arc::new(Settings::load(cli.config.as_deref())?);
    debug!("settings: {:?}", settings);

    match &cli.command {
        Commands::Show { hierarchy, style } => cmd_show(&settings, hierarchy, *style),
        Commands::Filter {
            hierarchy,
            selection,
            style,
            stats,
        } => cmd_filter(&settings, hierarchy, selection, *style, *stats),
        Commands::Check { hierarchy } => cmd_check(&settings, hierarchy),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Mismatched argument lists are a usage mistake, not malformed data.
fn check_lengths(args: &HierarchyArgs) -> CliResult<()> {
    if args.ids.len() != args.depths.len() {
        return Err(CliError::InvalidArgs(format!(
            "--ids has {} values but --depths has {}",
            args.ids.len(),
            args.depths.len()
        )));
    }
    Ok(())
}

/// Load the hierarchy argument pair under the configured validation mode.
fn load(service: &ForestService, args: &HierarchyArgs) -> CliResult<ArrayHierarchy> {
    check_lengths(args)?;
    let hierarchy = service.load(args.ids.clone(), args.depths.clone())?;
    if service.settings().validation == ValidationMode::Trust {
        if let Err(e) = validate(&hierarchy) {
            output::warning(&format!("{e}; output is unspecified"));
        }
    }
    Ok(hierarchy)
}

/// Translate command line rules into a selection.
pub fn build_selection(args: &SelectionArgs) -> CliResult<Selection> {
    let mut selection = Selection::new();
    for id in &args.exclude {
        selection = selection.with(Rule::Exclude(*id))?;
    }
    for n in &args.exclude_multiple_of {
        selection = selection.with(Rule::ExcludeMultipleOf(*n))?;
    }
    if let Some(min) = args.min_id {
        selection = selection.with(Rule::MinId(min))?;
    }
    if let Some(max) = args.max_id {
        selection = selection.with(Rule::MaxId(max))?;
    }
    if let Some(only) = &args.only {
        selection = selection.with(Rule::Only(only.iter().copied().collect::<BTreeSet<_>>()))?;
    }
    Ok(selection)
}

#[instrument(skip(settings))]
fn cmd_show(settings: &Arc<Settings>, args: &HierarchyArgs, style: Option<RenderStyle>) -> CliResult<()> {
    let service = ForestService::new(settings.clone());
    let hierarchy = load(&service, args)?;
    output::info(&service.render(&hierarchy, style)?);
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_filter(
    settings: &Arc<Settings>,
    args: &HierarchyArgs,
    selection: &SelectionArgs,
    style: Option<RenderStyle>,
    stats: bool,
) -> CliResult<()> {
    let service = ForestService::new(settings.clone());
    let hierarchy = load(&service, args)?;
    let selection = build_selection(selection)?;
    let outcome = service.filter(&hierarchy, &selection)?;

    output::info(&service.render(&outcome.hierarchy, style)?);
    if stats {
        output::header("Filter statistics");
        for rule in selection.rules() {
            output::detail(&format!("rule: {rule}"));
        }
        output::detail(&format!("kept: {}", outcome.hierarchy.size()));
        output::detail(&format!("removed: {}", outcome.removed));
        output::detail(&format!("evaluated: {}", outcome.evaluated));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_check(settings: &Arc<Settings>, args: &HierarchyArgs) -> CliResult<()> {
    check_lengths(args)?;
    let service = ForestService::new(settings.clone());
    let hierarchy = service.check(args.ids.clone(), args.depths.clone())?;
    output::success(&format!("well-formed hierarchy of {} nodes", hierarchy.size()));
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_selection_flags_when_building_then_collects_all_rules() {
        let args = SelectionArgs {
            exclude: vec![4],
            exclude_multiple_of: vec![3],
            min_id: Some(1),
            max_id: Some(10),
            only: None,
        };
        let selection = build_selection(&args).unwrap();
        assert_eq!(selection.rules().len(), 4);
        assert!(selection.accepts(5));
        assert!(!selection.accepts(6));
        assert!(!selection.accepts(4));
        assert!(!selection.accepts(11));
    }

    #[test]
    fn given_crossed_bounds_when_building_then_usage_error() {
        let args = SelectionArgs {
            min_id: Some(10),
            max_id: Some(1),
            ..SelectionArgs::default()
        };
        let err = build_selection(&args).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_mismatched_lists_when_loading_then_invalid_args() {
        let service = ForestService::new(Arc::new(Settings::default()));
        let args = HierarchyArgs {
            ids: vec![1, 2],
            depths: vec![0],
        };
        assert!(matches!(load(&service, &args), Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_mismatched_lists_when_checking_then_same_usage_error_as_show() {
        let settings = Arc::new(Settings::default());
        let args = HierarchyArgs {
            ids: vec![1, 2],
            depths: vec![0],
        };
        let check = cmd_check(&settings, &args).unwrap_err();
        let show = cmd_show(&settings, &args, None).unwrap_err();
        assert!(matches!(check, CliError::InvalidArgs(_)));
        assert_eq!(check.exit_code(), crate::exitcode::USAGE);
        assert_eq!(check.exit_code(), show.exit_code());
    }

    #[test]
    fn given_malformed_depths_when_checking_then_dataerr() {
        let args = HierarchyArgs {
            ids: vec![1, 2],
            depths: vec![0, 2],
        };
        let err = cmd_check(&Arc::new(Settings::default()), &args).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_deep_chain_when_showing_as_tree_then_usage_error() {
        let size = 100_000;
        let args = HierarchyArgs {
            ids: (0..size as i64).collect(),
            depths: (0..size).collect(),
        };
        let err = cmd_show(&Arc::new(Settings::default()), &args, Some(RenderStyle::Tree)).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
