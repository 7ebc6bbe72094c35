use shape_playground::{config::DEFAULT_CONFIG_FILE, PlaygroundApp, PlaygroundConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PlaygroundConfig::load_or_default(DEFAULT_CONFIG_FILE)?;
    let app = PlaygroundApp::new(config)?;

    if let Err(error) = app.run() {
        let error = anyhow::Error::from(error);
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}
