use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::compiler;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::strip::strip;

/// Header, every readable source in order, then footer. Unreadable sources
/// are reported and contribute nothing.
pub fn concat_sources(sources: &[PathBuf], header: &str, footer: &str) -> String {
    let mut js = String::from(header);
    for path in sources {
        match fs::read_to_string(path) {
            Ok(content) => js.push_str(&content),
            Err(e) => warn!("Skipping {} due to error: {}", path.display(), e),
        }
    }
    js.push_str(footer);
    js
}

/// Concatenates, strips and, unless disabled, minifies. Returns the text to
/// write to the output file.
pub fn build(config: &BuildConfig) -> Result<String> {
    let js = concat_sources(&config.sources, &config.header, &config.footer);
    let js = strip(&js, config.labels.as_slice());
    info!(
        "Stripped labels [{}] from {} source(s)",
        config.labels.as_slice().join(", "),
        config.sources.len()
    );

    if config.compile {
        compiler::minify(config, &js)
    } else {
        Ok(js)
    }
}
