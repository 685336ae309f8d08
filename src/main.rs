use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::path::{Path, PathBuf};
use subcrack::alphabet::Alphabet;
use subcrack::cipher;
use subcrack::cli::{Cli, Command};
use subcrack::config::CrackConfig;
use subcrack::error::{read_text_file, CrackError};
use subcrack::key::Key;
use subcrack::model::FrequencyModel;
use subcrack::retry::{RetryDriver, RetryOutcome};
use subcrack::scorer::Scorer;
use subcrack::solver::{CancelToken, Method};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Parse arguments, reporting an unknown subcommand as a regular error
fn parse_args() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            let name = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => name.clone(),
                _ => String::from("<unknown>"),
            };
            Err(CrackError::UnknownCommand(name).into())
        }
        // help, version and usage errors keep clap's own output and exit codes
        Err(err) => err.exit(),
    }
}

/// `sub`: apply a known key
fn run_sub(file: &Path, alphabet: &str, subkey: &str, encrypt: bool) -> Result<()> {
    let alphabet = Alphabet::new(alphabet)?;
    let key = Key::from_subkey(&alphabet, subkey)?;
    let text = read_text_file(file)?;

    let output = if encrypt {
        cipher::encrypt(&text, &alphabet, &key)?
    } else {
        cipher::apply(&text, &alphabet, &key)?
    };
    print!("{}", output);
    Ok(())
}

/// Options of `crack` that override the configuration file
struct CrackOverrides {
    method: Option<Method>,
    max_attempts: Option<usize>,
    iterations: Option<usize>,
    seed: Option<u64>,
    workers: Option<usize>,
    ignore_case: bool,
}

impl CrackOverrides {
    fn apply(self, config: &mut CrackConfig) {
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        if let Some(iterations) = self.iterations {
            config.search.max_iterations = iterations;
        }
        if self.seed.is_some() {
            config.retry.seed = self.seed;
        }
        if let Some(workers) = self.workers {
            config.retry.workers = workers;
        }
        if self.ignore_case {
            config.retry.ignore_case_cribs = true;
        }
    }
}

/// Alphabet of a custom model, in sorted order for display
fn model_alphabet(model: &FrequencyModel) -> Result<Alphabet> {
    let mut symbols = model.ranked_symbols().to_vec();
    symbols.sort_unstable();
    Ok(Alphabet::new(&symbols.into_iter().collect::<String>())?)
}

/// `crack`: recover the key; `Ok(false)` when the attempt cap ran out
fn run_crack(
    file: &Path,
    cribs: &[String],
    config_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
    overrides: CrackOverrides,
) -> Result<bool> {
    let mut config = match config_path {
        Some(path) => CrackConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => CrackConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    let (model, alphabet) = match model_path {
        Some(path) => {
            let model = FrequencyModel::from_json_file(&path)
                .with_context(|| format!("Failed to load model {}", path.display()))?;
            let alphabet = model_alphabet(&model)?;
            (model, alphabet)
        }
        None => (FrequencyModel::english(), Alphabet::english()),
    };

    let ciphertext = read_text_file(file)?;
    let scorer = Scorer::new(&model, &alphabet, config.scoring)?;
    let driver = RetryDriver::from_config(&scorer, &model, &config)?;

    tracing::info!(
        method = ?config.method,
        max_attempts = config.retry.max_attempts,
        workers = config.retry.workers,
        cribs = cribs.len(),
        "cracking {}",
        file.display()
    );

    match driver.run(&ciphertext, cribs, &CancelToken::new())? {
        RetryOutcome::Found(decryption) => {
            print!("{}", decryption.plaintext);
            if !decryption.plaintext.ends_with('\n') {
                println!();
            }
            println!();
            println!("{}", decryption.solution.key.mapping(&alphabet));
            println!(
                "score: {:.4} (attempt {}, {})",
                decryption.solution.score, decryption.attempt, decryption.method
            );
            Ok(true)
        }
        RetryOutcome::Exhausted { attempts, best } | RetryOutcome::Cancelled { attempts, best } => {
            eprintln!("no decryption contained every crib after {} attempts", attempts);
            if let Some(best) = best {
                eprintln!("best candidate (score {:.4}):", best.solution.score);
                eprintln!("{}", best.plaintext.trim_end());
                eprintln!("{}", best.solution.key.mapping(&alphabet));
            }
            Ok(false)
        }
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Sub {
            file,
            alphabet,
            subkey,
            encrypt,
        } => run_sub(&file, &alphabet, &subkey, encrypt),
        Command::Crack {
            file,
            cribs,
            method,
            max_attempts,
            iterations,
            seed,
            workers,
            config,
            model,
            ignore_case,
        } => {
            let overrides = CrackOverrides {
                method,
                max_attempts,
                iterations,
                seed,
                workers,
                ignore_case,
            };
            if !run_crack(&file, &cribs, config, model, overrides)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
