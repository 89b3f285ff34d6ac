use bundle_dedupe::cmd;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

/// Cross-bundle JavaScript duplication analyzer
///
/// bundle-dedupe decodes each bundle's source map, attributes generated
/// bytes back to their original modules, and reports which modules ship
/// redundantly in more than one bundle.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze bundles for duplicated modules
    Analyze {
        /// Compiled .js bundle files (maps resolved via sourceMappingURL
        /// comments or sibling .map files)
        #[arg(value_name = "BUNDLE", required = true)]
        bundles: Vec<PathBuf>,

        /// Fold groups wasting fewer bytes than this into "Other"
        #[arg(short, long, value_name = "BYTES")]
        threshold: Option<u64>,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Analyze {
            bundles,
            threshold,
            json,
        }) => cmd::cmd_analyze(bundles, *threshold, *json),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            println!("bundle-dedupe v{}", env!("CARGO_PKG_VERSION"));
            println!("Cross-bundle JavaScript duplication analyzer\n");
            println!("Usage: bundle-dedupe <COMMAND>\n");
            println!("Commands:");
            println!("  analyze      Analyze bundles for duplicated modules");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-dedupe <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_dedupe::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
