//! persona-order - display ordering for assistant personas
//!
//! Entry point for the `persona-order` binary.

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use persona_order::cli::{Cli, Commands, ConfigSubcommand, ReorderArgs};
use persona_order::config::{self, OrderConfig};
use persona_order::error::{Error, Result};
use persona_order::logging;
use persona_order::persona::{
    assign_priorities, build_store, can_edit, ownership_label, visible_personas, CurrentUser,
    DisplayPriorityRequest, OrderingManager, PersonaId, PersonaRecord,
};
use persona_order::version;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Short commands skip the config-driven logging setup
    match cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { ref subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(cli.config.as_deref(), subcommand.clone());
        }
        Commands::Priorities { ref ids } => {
            logging::init_simple(tracing::Level::WARN)?;
            return print_priorities(ids);
        }
        _ => {}
    }

    let config = OrderConfig::load(cli.config.as_deref())?;
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(version = %build.full_version(), store = ?config.store.kind, "Starting persona-order");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;

    match cli.command {
        Commands::List { all, json } => runtime.block_on(list_personas(
            &config,
            all || config.display.include_hidden,
            json || config.display.json,
        )),
        Commands::Reorder(args) => runtime.block_on(reorder_personas(&config, args)),
        Commands::Version | Commands::Config { .. } | Commands::Priorities { .. } => {
            unreachable!("handled above")
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────

fn print_priorities(ids: &[PersonaId]) -> Result<()> {
    let request = DisplayPriorityRequest {
        display_priority_map: assign_priorities(ids)?,
    };
    println!("{}", to_json(&request)?);
    Ok(())
}

async fn list_personas(config: &OrderConfig, include_hidden: bool, json: bool) -> Result<()> {
    let user = config.current_user();
    let mut manager = OrderingManager::new(build_store(&config.store)?);
    manager.refresh().await?;

    let shown = visible_personas(manager.personas(), &user, include_hidden);
    debug!(total = manager.personas().len(), shown = shown.len(), "Personas filtered");

    print_listing(&shown, &user, json)
}

async fn reorder_personas(config: &OrderConfig, args: ReorderArgs) -> Result<()> {
    let user = config.current_user();
    let include_hidden = args.all || config.display.include_hidden;

    let mut manager = OrderingManager::new(build_store(&config.store)?);
    manager.refresh().await?;

    let visible: Vec<PersonaId> = visible_personas(manager.personas(), &user, include_hidden)
        .iter()
        .map(|p| p.id)
        .collect();

    let priorities = match (args.order, args.move_id) {
        (Some(order), _) => {
            if let Some(unknown) = order.iter().find(|id| !visible.contains(id)) {
                return Err(Error::PersonaNotFound { id: *unknown });
            }
            let missing: Vec<PersonaId> = visible
                .iter()
                .filter(|id| !order.contains(id))
                .copied()
                .collect();
            if !missing.is_empty() {
                return Err(Error::IncompleteOrder { missing });
            }
            manager.reorder(&order).await?
        }
        (None, Some(id)) => {
            manager
                .move_within(&visible, id, args.to.unwrap_or(0))
                .await?
        }
        (None, None) => {
            return Err(Error::Internal(
                "reorder needs --order or --move".to_string(),
            ))
        }
    };

    info!(count = priorities.len(), "Display order saved");

    let shown = visible_personas(manager.personas(), &user, include_hidden);
    print_listing(&shown, &user, false)
}

fn handle_config_command(config_path: Option<&str>, subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = OrderConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate => {
            OrderConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────

/// One row of a listing.
#[derive(Debug, Serialize)]
struct ListedPersona<'a> {
    position: usize,
    id: PersonaId,
    name: &'a str,
    display_priority: Option<i64>,
    owner: String,
    is_visible: bool,
    default_persona: bool,
    editable: bool,
}

fn print_listing(personas: &[&PersonaRecord], user: &CurrentUser, json: bool) -> Result<()> {
    let rows: Vec<ListedPersona<'_>> = personas
        .iter()
        .enumerate()
        .map(|(position, p)| ListedPersona {
            position,
            id: p.id,
            name: &p.name,
            display_priority: p.display_priority,
            owner: ownership_label(p, user).to_string(),
            is_visible: p.is_visible,
            default_persona: p.default_persona,
            editable: can_edit(p, user),
        })
        .collect();

    if json {
        println!("{}", to_json(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No personas.");
        return Ok(());
    }

    println!(
        "{:>3}  {:>6}  {:>8}  {:<28}  {:<24}  {}",
        "#", "ID", "PRIORITY", "NAME", "OWNER", "FLAGS"
    );
    for row in &rows {
        let priority = row
            .display_priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut flags = Vec::new();
        if row.default_persona {
            flags.push("default");
        }
        if !row.is_visible {
            flags.push("hidden");
        }
        if row.editable {
            flags.push("editable");
        }

        println!(
            "{:>3}  {:>6}  {:>8}  {:<28}  {:<24}  {}",
            row.position,
            row.id,
            priority,
            row.name,
            row.owner,
            flags.join(",")
        );
    }

    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("Failed to encode JSON: {}", e)))
}
