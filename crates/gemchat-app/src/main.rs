mod cli;
mod driver;
mod setup;

use gemchat_common::GemchatError;
use tracing_subscriber::EnvFilter;

/// `KEY=VALUE` pairs from a .env file; blank lines and `#` comments skipped.
fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .collect()
}

/// Load environment variables from `.env` in the working directory.
///
/// Variables that are already set win. Must run before any other thread
/// exists.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("gemchat: ignoring log level '{directive}': {e}");
            filter
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args) -> Result<(), GemchatError> {
    let mut config = gemchat_config::load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    init_logging(&args.log_directive(&config));

    tracing::info!("gemchat v{} starting", env!("CARGO_PKG_VERSION"));
    gemchat_config::validate(&config)?;

    if args.print_config {
        println!("{}", gemchat_config::config_to_json(&config));
        return Ok(());
    }

    let mut session = setup::connect(&config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    driver::run(&mut session, &config.display, stdin, &mut stdout).await
}

fn main() {
    load_dotenv();
    let args = cli::parse();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(GemchatError::from)
        .and_then(|runtime| runtime.block_on(run(args)));

    if let Err(e) = result {
        eprintln!("gemchat: {e}");
        std::process::exit(1);
    }
}
