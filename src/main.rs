//! Petro entry point
//!
//! Loads settings and the player sprite, then hands both to the native shell.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use petro::Settings;
    use petro::sprite::Sprite;

    env_logger::init();
    log::info!("Petro starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Settings::DEFAULT_PATH.to_string());
    let settings = Settings::load(&settings_path);

    let sprite = match Sprite::load(&settings.sprite_path) {
        Ok(sprite) => sprite,
        Err(e) => {
            log::warn!("{}; drawing a placeholder instead", e);
            Sprite::placeholder(64, 64)
        }
    };

    petro::platform::run(settings, sprite)?;
    log::info!("Petro exiting");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library still builds for wasm32
}
