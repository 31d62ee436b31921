//! CLI 模式处理器
//!
//! 默认输出 Spring XML 到 stdout
//! 使用 --json 参数可输出 bean 模型的 JSON 格式

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::json;

use crate::emitter;
use crate::generator::{self, GeneratorConfig};
use crate::model::{ApplicationContext, DEFAULT_SPRING_VERSION};

/// Spring Application Context Generator
///
/// Generates the bean definitions for a Spring XML application context file
/// from the source code of Java classes. It creates a <bean/> element for each
/// public class, a <property/> element for each public field and public setter
/// method, and a list of <constructor-arg/> elements if there is only one
/// constructor and that constructor is not the default constructor.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Example:\n  spring-context-gen --source=path/to/src --package=com.example.foo --package=com.example.bar"
)]
pub struct Args {
    /// The directory that the Java source code is located in (required)
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Package whose public classes become beans. Repeat for multiple
    /// packages; use a blank value for the default package ("--package=")
    #[arg(short, long = "package", value_name = "NAME")]
    pub packages: Vec<String>,

    /// The version of Spring in use (for the XML schema location)
    #[arg(
        short = 'v',
        long,
        visible_alias = "springVersion",
        value_name = "N",
        default_value = DEFAULT_SPRING_VERSION
    )]
    pub spring_version: String,

    /// Recurse into sub-packages ("-r -p=com.foo" also includes "com.foo.bar")
    #[arg(short, long)]
    pub recurse: bool,

    /// 输出 JSON 格式 (默认输出 Spring XML)
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Every configuration problem found, reported together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrors(pub Vec<String>);

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("\n"))
    }
}

impl std::error::Error for ConfigErrors {}

impl Args {
    /// Check required options before any work begins
    pub fn to_config(&self) -> Result<GeneratorConfig, ConfigErrors> {
        let mut errors = Vec::new();

        if self.source.is_none() {
            errors.push(
                "The source directory must be specified (example: \"--source=path/to/src\").".to_string(),
            );
        }
        if self.packages.is_empty() {
            errors.push(
                "At least one package must be specified (example: \"--package=com.example\").  \
                 Use a blank value for the default package (example: \"--package=\")."
                    .to_string(),
            );
        }

        match &self.source {
            Some(source) if errors.is_empty() => Ok(GeneratorConfig {
                source_dir: source.clone(),
                packages: self.packages.clone(),
                spring_version: self.spring_version.clone(),
                recurse: self.recurse,
            }),
            _ => Err(ConfigErrors(errors)),
        }
    }
}

/// Run the generator and print the document.
///
/// Nothing is printed to stdout unless the whole input set was processed.
pub fn handle(config: &GeneratorConfig, json_output: bool) -> Result<()> {
    let result = generator::run(config).and_then(|context| render(&context, json_output));

    let succeeded = report(
        result,
        json_output,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Write the document to `out`. With `--json` a failure becomes a
/// `success: false` envelope on `err`; otherwise it is returned.
fn report(
    result: Result<String>,
    json_output: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    match result {
        Ok(output) => {
            writeln!(out, "{output}")?;
            Ok(true)
        }
        Err(e) if json_output => {
            let envelope = json!({
                "success": false,
                "error": format!("{e:#}")
            });
            writeln!(err, "{}", serde_json::to_string_pretty(&envelope)?)?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// XML document, or the bean model wrapped in a `success` envelope
fn render(context: &ApplicationContext, json_output: bool) -> Result<String> {
    if json_output {
        let output = json!({
            "success": true,
            "data": context
        });
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        emitter::render(context)
    }
}
