use std::env;
use std::path::PathBuf;

use devsolutify::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find Devsolutify configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(mut log) = config.log {
        if log.location.is_none() && !log.log_to_console {
            log.location = dirs::cache_dir().map(|d| d.join("Devsolutify").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. Using console only"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
