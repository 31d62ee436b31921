// ============================================================================
// 生成流水线 - walk -> read -> extract -> fold
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::extractor::extract_bean;
use crate::model::{ApplicationContext, SourceUnit};
use crate::walker;

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source_dir: PathBuf,
    /// Dotted package names; blank means the default package
    pub packages: Vec<String>,
    pub spring_version: String,
    pub recurse: bool,
}

/// Fold source units into a context. Files without a public class add nothing.
pub fn generate<I>(spring_version: &str, sources: I) -> ApplicationContext
where
    I: IntoIterator<Item = SourceUnit>,
{
    sources
        .into_iter()
        .fold(ApplicationContext::new(spring_version), |context, unit| {
            match extract_bean(&unit.text) {
                Some(bean) => context.with_bean(bean),
                None => {
                    debug!(file = %unit.path.display(), "no public class, skipped");
                    context
                }
            }
        })
}

/// Read one file. Any failure aborts the run.
pub fn read_source(path: &Path) -> Result<SourceUnit> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    Ok(SourceUnit::new(path, text))
}

/// Walk the configured packages and build the document model.
///
/// Every file is read before extraction starts, so an I/O error leaves no
/// partial result behind.
pub fn run(config: &GeneratorConfig) -> Result<ApplicationContext> {
    let files = walker::java_files(&config.source_dir, &config.packages, config.recurse)?;

    let sources = files
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>>>()?;

    let context = generate(&config.spring_version, sources);
    info!(
        files = files.len(),
        beans = context.beans.len(),
        "application context generated"
    );
    Ok(context)
}
