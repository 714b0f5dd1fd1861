//! Report Fixer - punto de entrada

use anyhow::Result;

fn main() -> Result<()> {
    // logging
    tracing_subscriber::fmt::init();

    // variables de entorno (.env)
    dotenvy::dotenv().ok();

    let settings = report_fixer::Settings::from_env();
    report_fixer::gui::run(settings)
}
