//! Closure Compiler invocation.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info, warn};

use crate::config::BuildConfig;
use crate::error::{Error, Result};

pub const TMP_FILE: &str = ".Minify.tmp.js";
pub const OUTPUT_FILE: &str = ".Minify.output.js";

/// WebModule idiom: exposes `global` in both browsers and node.
pub const OUTPUT_WRAPPER: &str = "(function(global){\n%output%\n})((this||0).self||global);";

/// Compiler arguments for `config`, one argv entry each.
pub fn compiler_options(config: &BuildConfig) -> Vec<String> {
    let mut result = Vec::new();
    let mut push = |flag: &str, value: &str| {
        result.push(flag.to_string());
        result.push(value.to_string());
    };

    if config.advanced {
        push("--compilation_level", "ADVANCED_OPTIMIZATIONS");
    } else {
        push("--compilation_level", "SIMPLE_OPTIMIZATIONS");
    }
    if config.wrap {
        push("--output_wrapper", OUTPUT_WRAPPER);
    }

    let strict = if config.strict { "_STRICT" } else { "" };
    // ES5 in unless asked otherwise
    let language_in = if config.es6in && !config.es5in { "ECMASCRIPT6" } else { "ECMASCRIPT5" };
    push("--language_in", &format!("{language_in}{strict}"));
    if config.es5out {
        push("--language_out", &format!("ECMASCRIPT5{strict}"));
    } else if config.es6out {
        push("--language_out", &format!("ECMASCRIPT6{strict}"));
    }

    if config.pretty {
        push("--formatting", "pretty_print");
    }

    for option in &config.options {
        let mut words = option.split_whitespace();
        if let Some(name) = words.next() {
            result.push(format!("--{}", name.trim_start_matches('-')));
            result.extend(words.map(str::to_string));
        }
    }
    result
}

/// Runs the compiler on `js` and returns the minified code.
///
/// The input goes through a temporary file in the work directory, which is
/// kept with `--keep` or when compilation fails.
pub fn minify(config: &BuildConfig, js: &str) -> Result<String> {
    let work_dir = config.work_dir();
    let tmp_file = work_dir.join(TMP_FILE);
    let output_file = work_dir.join(OUTPUT_FILE);
    let options = compiler_options(config);

    write_file(&tmp_file, js)?;

    info!("Compile options: {}", options.join(" ").replace('\n', ""));
    debug!("Running {} -jar {}", config.java, config.compiler_jar.display());

    let result = Command::new(&config.java)
        .arg("-jar")
        .arg(&config.compiler_jar)
        .arg("--js_output_file")
        .arg(&output_file)
        .arg("--js")
        .arg(&tmp_file)
        .args(&options)
        .output()
        .map_err(|source| Error::CompilerLaunch {
            program: config.java.clone(),
            source,
        })?;

    // the compiler reports warnings on stderr too; any of it fails the build
    let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
    if !result.status.success() || !stderr.trim().is_empty() {
        let _ = fs::remove_file(&output_file);
        warn!("Temporary input kept at {}", tmp_file.display());
        return Err(Error::CompilerFailed {
            status: result.status,
            stderr,
        });
    }

    let minified = fs::read_to_string(&output_file).map_err(|source| Error::Read {
        path: output_file.clone(),
        source,
    })?;
    fs::remove_file(&output_file)?;
    if !config.keep {
        fs::remove_file(&tmp_file)?;
    }
    Ok(minified)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
