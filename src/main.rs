use clap::Parser;
use shadow_report::cli::commands::run;
use shadow_report::cli::config::{load_config, Cli};

fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let today = chrono::Local::now().date_naive();
    let now = chrono::Utc::now();

    if let Err(error) = run(&cli, &config, today, now) {
        eprintln!("shadow-report: {}", error);
        std::process::exit(1);
    }
}
