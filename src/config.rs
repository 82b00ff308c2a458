use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const DEFAULT_CATEGORY: &str = "Insights";
pub const CONSENT_COOKIE: &str = "cookie-consent";
/// Upper bound for `consent.max_age_days`, ten years.
pub const MAX_CONSENT_AGE_DAYS: i64 = 3650;

#[derive(Deserialize)]
pub struct Site {
    pub name: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_file: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    #[serde(default = "default_teaser_count")]
    pub teaser_count: usize,
    #[serde(default)]
    pub rendering_cache_enabled: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            page_size: default_page_size(),
            default_category: default_category(),
            words_per_minute: default_words_per_minute(),
            teaser_count: default_teaser_count(),
            rendering_cache_enabled: false,
        }
    }
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Consent {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
}

impl Default for Consent {
    fn default() -> Self {
        Consent {
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
        }
    }
}

/// Third party ids. A script is only emitted when its id is present.
#[derive(Deserialize, Default)]
pub struct Tracking {
    pub ga_id: Option<String>,
    pub meta_pixel: Option<String>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    #[serde(default)]
    pub consent: Consent,
    #[serde(default)]
    pub tracking: Tracking,
    pub log: Option<Log>,
}

fn default_page_size() -> u32 { 9 }
fn default_category() -> String { DEFAULT_CATEGORY.to_string() }
fn default_words_per_minute() -> u32 { 250 }
fn default_teaser_count() -> usize { 3 }
fn default_cookie_name() -> String { CONSENT_COOKIE.to_string() }
fn default_max_age_days() -> i64 { 180 }

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.defaults.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "defaults.page_size has to be greater than 0"));
    }
    if cfg.defaults.words_per_minute == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "defaults.words_per_minute has to be greater than 0"));
    }
    if !(1..=MAX_CONSENT_AGE_DAYS).contains(&cfg.consent.max_age_days) {
        return Err(io::Error::new(ErrorKind::InvalidData,
                                  format!("consent.max_age_days has to be between 1 and {}", MAX_CONSENT_AGE_DAYS)));
    }

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        posts_file: parse_path(cfg.paths.posts_file)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CFG: &str = r##"
[site]
name = "Devsolutify"

[paths]
template_dir = "res/template"
public_dir = "res/public"
posts_file = "res/posts.toml"

[server]
address = "127.0.0.1"
port = 8001
"##;

    #[test]
    fn test_defaults_are_applied() {
        let cfg = parse_config(MINIMAL_CFG).unwrap();
        assert_eq!(cfg.site.name, "Devsolutify");
        assert_eq!(cfg.defaults.page_size, 9);
        assert_eq!(cfg.defaults.default_category, "Insights");
        assert_eq!(cfg.defaults.words_per_minute, 250);
        assert_eq!(cfg.defaults.teaser_count, 3);
        assert!(!cfg.defaults.rendering_cache_enabled);
        assert_eq!(cfg.consent.cookie_name, "cookie-consent");
        assert_eq!(cfg.consent.max_age_days, 180);
        assert!(cfg.tracking.ga_id.is_none());
        assert!(cfg.tracking.meta_pixel.is_none());
        assert!(cfg.log.is_none());
        assert_eq!(cfg.paths.posts_file, PathBuf::from("res/posts.toml"));
    }

    #[test]
    fn test_full_config() {
        let cfg_str = format!("{}{}", MINIMAL_CFG, r##"
[defaults]
page_size = 6
rendering_cache_enabled = true

[tracking]
ga_id = "G-TEST"

[log]
level = "Debug"
log_to_console = true
"##);
        let cfg = parse_config(&cfg_str).unwrap();
        assert_eq!(cfg.defaults.page_size, 6);
        assert_eq!(cfg.defaults.teaser_count, 3);
        assert!(cfg.defaults.rendering_cache_enabled);
        assert_eq!(cfg.tracking.ga_id.as_deref(), Some("G-TEST"));
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let cfg_str = format!("{}{}", MINIMAL_CFG, "\n[defaults]\npage_size = 0\n");
        let err = parse_config(&cfg_str).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_consent_max_age_bounds() {
        for days in ["0", "-5", "3651", "9223372036854775807"] {
            let cfg_str = format!("{}\n[consent]\nmax_age_days = {}\n", MINIMAL_CFG, days);
            let err = parse_config(&cfg_str).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "{}", days);
        }
        let cfg_str = format!("{}\n[consent]\nmax_age_days = 3650\n", MINIMAL_CFG);
        assert_eq!(parse_config(&cfg_str).unwrap().consent.max_age_days, 3650);
    }

    #[test]
    fn test_missing_section() {
        let err = parse_config("[site]\nname = \"x\"\n").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("Error parsing configuration file"));
    }
}
