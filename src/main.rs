use clap::Parser;

use nestegg::api::{AccountProfile, AppState, run_http_server};
use nestegg::core::Assumptions;
use nestegg::store::SettingsStore;

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Retirement contribution planner (YTD tracking + compounding projections over HTTP)"
)]
struct Cli {
    #[arg(long, default_value_t = 3001)]
    port: u16,
    #[arg(long, default_value = "data.json", help = "Settings file path")]
    data_file: String,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Assumed annual return in percent, e.g. 7"
    )]
    annual_return_rate: f64,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.annual_return_rate.is_finite() || cli.annual_return_rate < 0.0 {
        eprintln!("--annual-return-rate must be >= 0");
        std::process::exit(1);
    }

    let state = AppState {
        store: SettingsStore::new(cli.data_file),
        profile: AccountProfile::demo(),
        assumptions: Assumptions {
            annual_return_rate: cli.annual_return_rate / 100.0,
        },
    };

    if let Err(e) = run_http_server(cli.port, state).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
