use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use mdpublish::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    if let Some(exe_dir) = exe_dir {
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

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(anyhow!("Could not find mdpublish configuration ({})", CFG_FILE_NAME)),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        let location = log.location.or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("mdpublish").join("log").join("server.log"))
        });
        match location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No cache dir found, logging to the console only"),
        }
        log.location = location;
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: &Option<PathBuf>) -> Result<PathBuf> {
    let path: PathBuf = match config_path {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .context("Could not find user config dir")?
            .join(CFG_FILE_NAME),
    };

    println!("Writing sample config to {}", path.display());
    write_sample_cfg(&path)?;

    Ok(path)
}
