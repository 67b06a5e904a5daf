use qabot_infrastructure::EnvConfigLoader;

pub mod check_config;
pub mod run;

pub(crate) fn config_loader(no_dotenv: bool) -> EnvConfigLoader {
    let loader = EnvConfigLoader::new();
    if no_dotenv {
        loader.without_dotenv()
    } else {
        loader
    }
}
