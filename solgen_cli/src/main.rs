use clap::{Parser, Subcommand, ValueEnum};
use solgen_cli::config::Config;
use solgen_cli::{commands, JsonEmitter};
use solgen_gen::Lang;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "solgen")]
#[command(about = "Contract ABI binding compiler - turns ABI JSON into binding IR")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every contract of a deployment file
    Run {
        /// Deployment file mapping contract names to ABIs
        #[arg(short = 'd', long = "deployment", value_name = "FILE")]
        deployment: Option<PathBuf>,

        /// Option file mapping contract names to allow-lists
        #[arg(long = "opt", value_name = "FILE")]
        opt: Option<PathBuf>,

        /// Output directory
        #[arg(short = 'o', long = "out", value_name = "DIR")]
        out: Option<PathBuf>,

        /// Target language
        #[arg(short = 'l', long = "lang", value_enum)]
        lang: Option<Language>,

        /// YAML configuration file (defaults to ./solgen.yaml when present)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Expose every method regardless of the allow-lists
        #[arg(long = "all-methods")]
        all_methods: bool,

        /// Pretty print the emitted JSON
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },

    /// Compile one ABI file and print its descriptor
    Inspect {
        /// Raw ABI JSON file
        #[arg(short = 'f', long = "abi", value_name = "FILE", required = true)]
        abi: PathBuf,

        /// Target language
        #[arg(short = 'l', long = "lang", value_enum, default_value = "go")]
        lang: Language,

        /// Allow-list file for this contract
        #[arg(long = "opt", value_name = "FILE")]
        opt: Option<PathBuf>,

        /// Expose every method regardless of the allow-list
        #[arg(long = "all-methods")]
        all_methods: bool,

        /// Pretty print JSON output
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Language {
    /// Go bindings
    Go,
    /// Java (mobile) bindings
    Java,
}

impl From<Language> for Lang {
    fn from(language: Language) -> Self {
        match language {
            Language::Go => Lang::Go,
            Language::Java => Lang::Java,
        }
    }
}

fn main() -> anyhow::Result<()> {
    /* stdout carries command output, logs go to stderr */
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            deployment,
            opt,
            out,
            lang,
            config,
            all_methods,
            pretty,
        } => {
            let file_config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::load_default(&std::env::current_dir()?)?,
            };
            let flags = Config {
                deployment_path: deployment,
                option_path: opt,
                output_path: out,
                language: lang.map(Lang::from),
            };
            let settings = file_config.merge(flags).resolve()?;

            let summary = commands::run(&settings, all_methods, &JsonEmitter { pretty })?;
            for skipped in &summary.skipped {
                warn!(contract = %skipped.name, "not generated");
            }
        }

        Commands::Inspect {
            abi,
            lang,
            opt,
            all_methods,
            pretty,
        } => {
            let output = commands::inspect(
                &abi,
                lang.into(),
                opt.as_deref(),
                all_methods,
                &JsonEmitter { pretty },
            )?;
            println!("{output}");
        }
    }

    Ok(())
}
