use anyhow::{Context, Result};
use starguard_invaders::config::parse_rows;
use starguard_invaders::{GameConfig, InvadersApp, DESKTOP_VIEWPORT};
use starguard_sdl2::App;
use starguard_sdl2::{SdlContext, SdlInitInfo};

/// Build the game config for an optional `"10,5,7"` style row layout.
pub fn config_for(rows: Option<&str>) -> Result<GameConfig> {
    let config = match rows {
        Some(layout) => GameConfig::builder()
            .rows(parse_rows(layout).context("bad row layout")?)
            .build(),
        None => GameConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub fn run(config: GameConfig) -> Result<()> {
    let app = InvadersApp::new(config, DESKTOP_VIEWPORT)?;
    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)?;
    Ok(())
}
