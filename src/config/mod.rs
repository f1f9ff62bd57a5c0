pub mod app_config;
pub mod settings;

pub use app_config::load_config;
pub use settings::ProbeSettings;
