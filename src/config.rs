//! Configuration surface. CLI flags always win; a file config layers in
//! defaults underneath them, and built-in defaults fill whatever is left.

use crate::matcher::Matcher;
use chrono::NaiveDate;
use clap::ValueEnum;
use eyre::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Which matcher implementation handles term filtering. An unrecognized
/// value on the command line is rejected by `clap` at parse time — before
/// any input file is opened.
#[derive(Clone, Copy, Debug, Default, ValueEnum, Deserialize, PartialEq, Eq)]
#[value(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub enum TermsetAlgo {
    NaiveList,
    NaiveSet,
    Trie,
    #[default]
    AhoCorasick,
}

impl TermsetAlgo {
    pub fn new_matcher(self) -> Matcher {
        match self {
            TermsetAlgo::NaiveList => Matcher::new_naive_list(),
            TermsetAlgo::NaiveSet => Matcher::new_naive_set(),
            TermsetAlgo::Trie => Matcher::new_trie(),
            TermsetAlgo::AhoCorasick => Matcher::new_aho_corasick(),
        }
    }
}

/// One unit's file pair, as given on the command line or in config.toml.
#[derive(Clone, Debug, Deserialize)]
pub struct UnitPaths {
    pub userset: PathBuf,
    pub termset: PathBuf,
}

fn default_units() -> Vec<UnitPaths> {
    vec![
        UnitPaths { userset: "data/nodes1.txt".into(), termset: "data/terms1.txt".into() },
        UnitPaths { userset: "data/nodes2.txt".into(), termset: "data/terms2.txt".into() },
    ]
}

/// Optional `config.toml`: every field is optional, and CLI flags
/// override whatever is present here.
#[derive(Default, Deserialize)]
pub struct FileConfig {
    pub execution_date: Option<NaiveDate>,
    pub format_template: Option<String>,
    pub termset_algo: Option<TermsetAlgo>,
    pub db_uri: Option<String>,
    pub units: Option<Vec<UnitPaths>>,
}

pub fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit_path {
        Some(p) => {
            if !p.exists() {
                return Err(eyre::eyre!("Config file not found: {}", p.display()));
            }
            Some(p.to_path_buf())
        }
        None => {
            let default = PathBuf::from("config.toml");
            default.exists().then_some(default)
        }
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = std::fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

/// Fully resolved pipeline configuration: the product of CLI flags, file
/// config, and built-in defaults. Bound once and passed into
/// [`crate::pipeline::Pipeline::new`] — no per-message reconstruction.
pub struct PipelineConfig {
    pub execution_date: Option<NaiveDate>,
    pub format_template: String,
    pub termset_algo: TermsetAlgo,
    pub db_uri: Option<String>,
    pub units: Vec<UnitPaths>,
}

impl PipelineConfig {
    pub fn resolve(
        execution_date: Option<NaiveDate>,
        format_template: Option<String>,
        termset_algo: Option<TermsetAlgo>,
        db_uri: Option<String>,
        units: Option<Vec<UnitPaths>>,
        file_config: FileConfig,
    ) -> PipelineConfig {
        PipelineConfig {
            execution_date: execution_date.or(file_config.execution_date),
            format_template: format_template
                .or(file_config.format_template)
                .unwrap_or_else(|| "{term}, {message_id}".to_string()),
            termset_algo: termset_algo
                .or(file_config.termset_algo)
                .unwrap_or_default(),
            db_uri: db_uri.or(file_config.db_uri),
            units: units.or(file_config.units).unwrap_or_else(default_units),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_file_config() {
        let file_config = FileConfig {
            format_template: Some("file template".to_string()),
            ..FileConfig::default()
        };
        let resolved = PipelineConfig::resolve(
            None,
            Some("cli template".to_string()),
            None,
            None,
            None,
            file_config,
        );
        assert_eq!(resolved.format_template, "cli template");
    }

    #[test]
    fn falls_back_to_builtin_defaults() {
        let resolved =
            PipelineConfig::resolve(None, None, None, None, None, FileConfig::default());
        assert_eq!(resolved.format_template, "{term}, {message_id}");
        assert_eq!(resolved.termset_algo, TermsetAlgo::AhoCorasick);
        assert_eq!(resolved.units.len(), 2);
    }
}
