//! `scenario-lab` command-line front end

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lab_catalog::{Catalog, DifficultyFilter, LabRegistry};
use lab_playback::PlaybackEvent;
use lab_viewer::{
    init_tracing, Clipboard, CommandClipboard, LabConfig, ScenarioViewer, Unavailable,
};
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    let lab = Arg::new("lab")
        .long("lab")
        .short('l')
        .help("Lab key (defaults to the configured lab)");

    Command::new("scenario-lab")
        .version(lab_viewer::VERSION)
        .about("Browse canned QA scenarios and replay their expected output")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Extra catalog YAML file (repeatable)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("labs").about("List available labs"))
        .subcommand(
            Command::new("list")
                .about("List scenarios of a lab")
                .arg(lab.clone())
                .arg(Arg::new("tab").long("tab").short('t').help("Tab key (defaults to the first tab)"))
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .short('d')
                        .default_value("all")
                        .value_parser(|s: &str| s.parse::<DifficultyFilter>())
                        .help("all, beginner, intermediate or advanced"),
                )
                .arg(Arg::new("search").long("search").short('s').help("Title or id substring"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print matching scenarios as JSON"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one scenario")
                .arg(Arg::new("id").required(true).help("Scenario id"))
                .arg(lab.clone())
                .arg(
                    Arg::new("config-panel")
                        .long("show-config")
                        .action(ArgAction::SetTrue)
                        .help("Also print the scenario's config"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Replay scenarios line by line")
                .arg(
                    Arg::new("ids")
                        .required(true)
                        .num_args(1..)
                        .help("Scenario ids, run in order"),
                )
                .arg(lab)
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_parser(value_parser!(u64))
                        .help("Tick interval override in milliseconds"),
                )
                .arg(
                    Arg::new("copy")
                        .long("copy")
                        .action(ArgAction::SetTrue)
                        .help("Copy each scenario's code before running it"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<LabConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => LabConfig::load(path)?,
        None => LabConfig::default(),
    };
    if matches.get_flag("json-logs") {
        config = config.with_json_logs(true);
    }
    if let Some(paths) = matches.get_many::<PathBuf>("catalog") {
        for path in paths {
            config = config.with_catalog_path(path.clone());
        }
    }
    Ok(config)
}

fn load_registry(config: &LabConfig) -> Result<LabRegistry> {
    let mut registry = LabRegistry::builtin().context("built-in catalogs are invalid")?;
    for path in &config.catalog_paths {
        let catalog = Catalog::load(path)?;
        registry
            .insert(catalog)
            .with_context(|| format!("while adding {}", path.display()))?;
    }
    Ok(registry)
}

fn open_viewer(
    registry: &LabRegistry,
    config: &LabConfig,
    args: &ArgMatches,
) -> Result<ScenarioViewer> {
    let key = args
        .get_one::<String>("lab")
        .map_or(config.default_lab.as_str(), String::as_str);
    let catalog = Arc::new(registry.get(key)?.clone());
    Ok(ScenarioViewer::new(catalog, config.playback())?)
}

fn cmd_labs(registry: &LabRegistry) {
    for lab in registry.iter() {
        println!(
            "{:<16} {:<32} {} tabs, {} scenarios",
            lab.key(),
            lab.title(),
            lab.tabs().len(),
            lab.len()
        );
    }
}

fn cmd_list(registry: &LabRegistry, config: &LabConfig, args: &ArgMatches) -> Result<()> {
    let mut viewer = open_viewer(registry, config, args)?;
    if let Some(tab) = args.get_one::<String>("tab") {
        viewer.set_tab(tab)?;
    }
    if let Some(difficulty) = args.get_one::<DifficultyFilter>("difficulty") {
        viewer.set_difficulty(*difficulty);
    }
    if let Some(search) = args.get_one::<String>("search") {
        viewer.set_search(search.as_str());
    }

    let visible = viewer.filtered();
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    if visible.is_empty() {
        println!("No scenarios match");
        return Ok(());
    }
    // Statuses live only as long as one `run` invocation, so none are shown here
    for scenario in visible {
        println!("{:<8} {:<12} {}", scenario.id, scenario.difficulty, scenario.title);
    }
    Ok(())
}

fn cmd_show(registry: &LabRegistry, config: &LabConfig, args: &ArgMatches) -> Result<()> {
    let mut viewer = open_viewer(registry, config, args)?;
    let Some(id) = args.get_one::<String>("id") else {
        bail!("missing scenario id");
    };
    viewer.select(id)?;
    if args.get_flag("config-panel") {
        viewer.toggle_config();
    }

    let scenario = viewer.selected();
    println!("{} {}", scenario.id, scenario.title);
    println!("tab:           {}", scenario.tab);
    println!("difficulty:    {}", scenario.difficulty);
    println!("framework:     {}", scenario.framework);
    println!("language:      {}", scenario.language);
    println!();
    println!("{}", scenario.description);
    if !scenario.prerequisites.is_empty() {
        println!();
        println!("Prerequisites: {}", scenario.prerequisites);
    }
    if viewer.show_config() {
        println!();
        println!("--- config ---");
        println!("{}", viewer.config_text());
    }
    println!();
    println!("--- code ---");
    println!("{}", viewer.code());
    Ok(())
}

/// Apply `--interval-ms`, warning when it discards a different configured value
fn apply_interval_override(config: LabConfig, interval_ms: Option<u64>) -> LabConfig {
    match interval_ms {
        Some(ms) if ms != config.tick_interval_ms => {
            tracing::warn!(
                configured = config.tick_interval_ms,
                override_ms = ms,
                "tick_interval_ms replaced by --interval-ms"
            );
            config.with_tick_interval_ms(ms)
        }
        _ => config,
    }
}

async fn cmd_run(registry: &LabRegistry, config: LabConfig, args: &ArgMatches) -> Result<()> {
    let config = apply_interval_override(config, args.get_one::<u64>("interval-ms").copied());
    config.validate()?;

    let clipboard: Box<dyn Clipboard> =
        match config.clipboard_command.as_deref().and_then(CommandClipboard::from_argv) {
            Some(command) => Box::new(command),
            None => Box::new(Unavailable),
        };

    let mut viewer = open_viewer(registry, &config, args)?;
    for id in args.get_many::<String>("ids").into_iter().flatten() {
        viewer.select(id)?;
        if args.get_flag("copy") && viewer.copy_code(clipboard.as_ref()) {
            println!("(code copied)");
        }

        println!("=== {} {} ===", viewer.selected().id, viewer.selected().title);
        viewer.run()?;
        while let Some(event) = viewer.next_event().await {
            match event {
                PlaybackEvent::Line { frame, .. } => {
                    println!("[{:>3}%] {}", frame.progress, frame.line);
                }
                PlaybackEvent::Finished { scenario_id, .. } => {
                    println!("{scenario_id}: passed");
                }
            }
        }
    }

    let summary = viewer.summary();
    println!();
    println!(
        "{} / {} passed ({}% coverage), tab {}: {} / {} ({}%)",
        summary.passed,
        summary.total,
        summary.coverage(),
        viewer.filter().tab,
        summary.tab_passed,
        summary.tab_total,
        summary.tab_coverage()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log);
    tracing::debug!(?config, "starting");

    let registry = load_registry(&config)?;

    match matches.subcommand() {
        Some(("labs", _)) => cmd_labs(&registry),
        Some(("list", args)) => cmd_list(&registry, &config, args)?,
        Some(("show", args)) => cmd_show(&registry, &config, args)?,
        Some(("run", args)) => cmd_run(&registry, config, args).await?,
        _ => bail!("unknown command"),
    }
    Ok(())
}
