use clap::Parser;
use life_trail_importer::{Settings, run};

fn main() {
    // Setup logging
    tracing_subscriber::fmt::init();

    let settings = Settings::parse();
    if let Err(error) = run(&settings) {
        tracing::error!(%error, "import failed");
        std::process::exit(1);
    }
}
