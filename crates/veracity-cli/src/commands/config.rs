//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path) -> Result<()> {
    match args.action {
        ConfigAction::Show => println!("{}", config.to_toml()?),
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_renders_key_env_not_key() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("api_key_env = \"GEMINI_API_KEY\""));
        assert!(rendered.contains("[analyzer]"));

        let args = ConfigArgs {
            action: ConfigAction::Show,
        };
        assert!(execute_config(args, &config, Path::new("/tmp/config.toml")).is_ok());
    }
}
