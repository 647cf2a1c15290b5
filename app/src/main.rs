mod camera_module;

use camera_module::{EditCamModule, EditCamModuleConfig};
use editcam_core::{config::EngineConfig, engine::Engine, logsys};

const DEFAULT_CONFIG_PATH: &str = "editcam.toml";

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let cfg = EngineConfig::load_or_default(&path)?;
    logsys::init(&cfg.log_level);
    log::info!("config: {path}");

    let module_cfg = cfg
        .module_data::<EditCamModuleConfig>(EditCamModule::ID)?
        .unwrap_or_default();

    let mut engine = Engine::new(cfg);
    engine.add_module(EditCamModule::new(module_cfg)?);
    engine.run()?;
    Ok(())
}
