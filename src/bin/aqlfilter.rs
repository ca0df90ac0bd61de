use aqlfilter::{cli as prog_cli, config, logger};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aqlfilter", version, about = "Compile filter strings into AQL FILTER clauses", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, standard locations are searched.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Output format: human (default), plain or json")]
    format: Option<String>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace. Overrides config/env.")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Parse a filter string and print the filters")]
    Parse {
        #[arg(help = "Filter string, e.g. 'sport===football;email===a@b.com'")]
        filter: String,
    },
    #[command(about = "Compile a filter string into an AQL FILTER clause")]
    Compile {
        #[arg(help = "Filter string, e.g. 'sport@==basketball,created_at$>=2020'")]
        filter: String,
        #[arg(long = "map", value_name = "FIELD=PATH", help = "Field mapping; repeatable, overrides config [fields]")]
        map: Vec<String>,
        #[arg(long, help = "Document loop variable (default: config/env, then 'doc')")]
        doc: Option<String>,
        #[arg(long, help = "Vertex loop variable; replaces the document variable as path prefix")]
        vert: Option<String>,
        #[arg(long, help = "Treat mapped paths as fully qualified (no loop variable prefix)")]
        qualified: bool,
        #[arg(long, help = "Wrap the clause in FOR <var> IN <collection> ... RETURN <var>; <var> is --vert, --doc, or the common root of qualified paths")]
        collection: Option<String>,
        #[arg(long, help = "Use sequential binding names instead of random ones")]
        deterministic: bool,
    },
    #[command(about = "List the supported filter operators")]
    Operators,
}

fn main() {
    let cli = Cli::parse();
    let cfg = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let level = cli.log_level.as_deref().or(cfg.log_level.as_deref()).or(Some("warn"));
    if let Err(e) = logger::configure_logging(cfg.log_dir.as_deref(), level, None) {
        eprintln!("warning: logging disabled: {e}");
    }
    let mode = prog_cli::parse_output_mode(&cli.format);

    let cmd = match cli.command {
        Commands::Parse { filter } => prog_cli::Command::Parse { filter },
        Commands::Compile { filter, map, doc, vert, qualified, collection, deterministic } => {
            let mut fields = match prog_cli::parse_field_pairs(&map) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(2);
                }
            };
            fields.merge_missing(&cfg.fields);
            prog_cli::Command::Compile {
                filter,
                fields,
                doc: doc.unwrap_or_else(|| cfg.doc_var().to_string()),
                vert: vert.or_else(|| cfg.vert_var.clone()),
                qualified,
                collection: collection.or_else(|| cfg.collection.clone()),
                deterministic,
            }
        }
        Commands::Operators => prog_cli::Command::Operators,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = prog_cli::run_with_format(cmd, mode, &mut out) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
