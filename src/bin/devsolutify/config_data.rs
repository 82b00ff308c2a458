use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
name = "Devsolutify"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"
posts_file = "res/posts.toml"

[defaults]
page_size = 9
default_category = "Insights"
words_per_minute = 250
teaser_count = 3
rendering_cache_enabled = true

[server]
address = "0.0.0.0"
port = 8001

[consent]
cookie_name = "cookie-consent"
max_age_days = 180

# Scripts are only added for visitors who agreed to them
[tracking]
# ga_id = "G-XXXXXXXXXX"
# meta_pixel = "000000000000000"

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
