use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::labels::LabelSet;

pub const PACKAGE_FILE: &str = "package.json";
pub const DEFAULT_JAVA: &str = "java";
pub const DEFAULT_COMPILER_JAR: &str = "vendor/compiler.jar";

/// Everything one build needs. Assembled once from the command line and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub sources: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub header: String,
    pub footer: String,
    pub labels: LabelSet,
    pub wrap: bool,
    pub compile: bool,
    pub es5in: bool,
    pub es6in: bool,
    pub es5out: bool,
    pub es6out: bool,
    pub strict: bool,
    pub pretty: bool,
    pub advanced: bool,
    pub keep: bool,
    pub verbose: bool,
    /// Extra compiler options such as `"language_in ECMASCRIPT5"`.
    pub options: Vec<String>,
    pub java: String,
    pub compiler_jar: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            sources: Vec::new(),
            output: None,
            header: String::new(),
            footer: String::new(),
            labels: LabelSet::with_defaults(),
            wrap: true,
            compile: true,
            es5in: false,
            es6in: false,
            es5out: false,
            es6out: false,
            strict: false,
            pretty: false,
            advanced: true,
            keep: false,
            verbose: false,
            options: Vec::new(),
            java: DEFAULT_JAVA.to_string(),
            compiler_jar: PathBuf::from(DEFAULT_COMPILER_JAR),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    webmodule: WebModule,
}

#[derive(Debug, Deserialize)]
struct WebModule {
    #[serde(default)]
    source: Vec<String>,
    #[serde(default)]
    output: String,
}

impl BuildConfig {
    /// Takes `source` and `output` from the `webmodule` section of a
    /// package.json, replacing anything given on the command line.
    pub fn apply_package(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: PackageManifest =
            serde_json::from_str(&text).map_err(|source| Error::Package {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded webmodule section from {}", path.display());
        self.sources = expand_sources(&manifest.webmodule.source)?;
        self.output = Some(manifest.webmodule.output)
            .filter(|o| !o.is_empty())
            .map(PathBuf::from);
        Ok(())
    }

    /// Directory holding the temporary compiler files: the output's parent.
    pub fn work_dir(&self) -> PathBuf {
        match self.output.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::NoSources);
        }
        if self.output.as_ref().map_or(true, |o| o.as_os_str().is_empty()) {
            return Err(Error::NoOutput);
        }
        if let Some(missing) = self.sources.iter().find(|s| !s.exists()) {
            return Err(Error::SourceNotFound(missing.clone()));
        }
        Ok(())
    }
}

/// Expands glob patterns (sorted), keeps plain paths as given, and drops
/// repeats. A pattern matching nothing is kept literally so validation can
/// report it.
pub fn expand_sources<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut found = Vec::new();

        if pattern.contains(['*', '?', '[']) {
            let paths = glob::glob(pattern).map_err(|source| Error::Glob {
                pattern: pattern.to_string(),
                source,
            })?;
            found.extend(paths.filter_map(|entry| entry.ok()).filter(|p| p.is_file()));
            found.sort();
        }
        if found.is_empty() {
            found.push(PathBuf::from(pattern));
        }

        for path in found {
            if seen.insert(path.clone()) {
                sources.push(path);
            }
        }
    }

    Ok(sources)
}
