#![forbid(unsafe_code)]
use anyhow::{anyhow, Result};
use rota::{
    io::{self, parse_point},
    scheduler::{rule_by_name, Scheduler},
    RotaConfig,
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de rôles récurrents
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration
    #[arg(long, global = true, default_value = "rota.json")]
    config: String,

    /// Règle de choix : round-robin | usage-weighted
    #[arg(long, global = true, default_value = "round-robin")]
    rule: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le planning et l'afficher
    Schedule {
        /// Export JSON des lignes (optionnel)
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Lister les colonnes de l'export
    Fields,

    /// Dire si une personne serait exclue d'un rôle à une date, après planification
    Check {
        #[arg(long)]
        person: String,
        #[arg(long)]
        role: String,
        /// RFC3339 UTC ou YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = RotaConfig::load(&cli.config)?;
    let rule = rule_by_name(&cli.rule).ok_or_else(|| anyhow!("unknown rule: {}", cli.rule))?;
    let mut scheduler = Scheduler::new(config.to_input()?).with_rule(rule);

    let code = match cli.cmd {
        Commands::Schedule { out_json } => {
            scheduler.create_schedule()?;
            let rows = scheduler.json_result();
            if let Some(path) = out_json {
                io::write_json_atomic(path, &rows)?;
            }
            // impression compacte
            for row in &rows {
                let columns: Vec<String> = row
                    .columns
                    .iter()
                    .map(|(role, people)| {
                        let names: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
                        let names = if names.is_empty() {
                            "-".to_string()
                        } else {
                            names.join(", ")
                        };
                        format!("{role}: {names}")
                    })
                    .collect();
                println!("{} | {}", row.date_key, columns.join(" | "));
            }
            if scheduler.schedule().is_truncated() {
                eprintln!("Warning: iteration cap reached, schedule is partial");
                2
            } else {
                0
            }
        }
        Commands::Fields => {
            println!("{}", scheduler.json_fields().join(","));
            0
        }
        Commands::Check { person, role, date } => {
            scheduler.create_schedule()?;
            let (at, _) = parse_point(date.trim())?;
            let who = scheduler
                .input()
                .people()
                .find_by_name(&person)
                .cloned()
                .ok_or_else(|| anyhow!("unknown person: {}", person))?;
            let role_id = scheduler
                .input()
                .roles()
                .find_by_name(&role)
                .map(|r| r.id.clone())
                .ok_or_else(|| anyhow!("unknown role: {}", role))?;
            let check = scheduler.has_exclusion_for(at, &who, &role_id);
            println!("{}: {}", who.name, check);
            // Code 2 = exclu
            if check.is_excluded() {
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}
