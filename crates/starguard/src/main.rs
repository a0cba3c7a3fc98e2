use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let rows = std::env::args().nth(1);
    if let Some(layout) = &rows {
        log::info!("Using invader rows '{}'", layout);
    }

    let config = starguard::config_for(rows.as_deref())?;
    starguard::run(config)
}
