pub mod argh;
mod version_1;

use crate::batch::job::Job;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs;
use version_1::Version1;

const LATEST_VERSION: &str = "1";
const DEFAULT_FILES: [&str; 3] = ["parbuild.toml", "parbuild.yaml", "parbuild.yml"];
pub const CONFIG_FILE_ENV: &str = "PARBUILD_CONFIG_FILE";

#[derive(Debug)]
pub enum ConfigError {
    UnrecognizedFileformat,
    NoVersion(&'static str),
    BadVersion(String, &'static str),
    ParseError(String),
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct Version {
    pub version: String,
}

#[derive(Debug, PartialEq)]
pub struct Config {
    pub version: Version,
    content: Version1,
}

impl Config {
    /// Picks the config file: an explicit `--file`, the
    /// `PARBUILD_CONFIG_FILE` env var, or the first default name
    /// present in the current directory.
    pub fn discover(explicit: Option<&str>) -> Result<String> {
        if let Some(filename) = explicit {
            return Ok(filename.to_string());
        }
        if let Ok(filename) = std::env::var(CONFIG_FILE_ENV) {
            return Ok(filename);
        }
        DEFAULT_FILES
            .iter()
            .find(|filename| std::path::Path::new(filename).exists())
            .map(|filename| filename.to_string())
            .ok_or_else(|| {
                anyhow!(
                    "no config file found, expected one of: {}",
                    DEFAULT_FILES.join(", ")
                )
            })
    }

    pub fn parse(filename: &str) -> Result<Config> {
        let content =
            fs::read_to_string(filename).map_err(|_| anyhow!("could not read {}", filename))?;

        let content = if filename.ends_with(".toml") {
            Config::parse_toml(&content)
        } else if filename.ends_with(".yaml") || filename.ends_with(".yml") {
            Config::parse_yaml(&content)
        } else {
            Err(ConfigError::UnrecognizedFileformat)
        };

        content.map_err(|error| match error {
            ConfigError::UnrecognizedFileformat => {
                anyhow!(
                    "{} could not be parsed, expected file types are .toml, .yml or .yaml",
                    filename
                )
            }
            ConfigError::NoVersion(latest) => {
                anyhow!(
                    "{} should contain version id (latest is {})",
                    filename,
                    latest
                )
            }
            ConfigError::BadVersion(version, latest) => {
                anyhow!(
                    "unknown version {} in {} (latest is {})",
                    version,
                    filename,
                    latest
                )
            }
            ConfigError::ParseError(version) => {
                anyhow!("could not parse {} with version {}", filename, version)
            }
        })
    }

    fn parse_toml(content: &str) -> Result<Config, ConfigError> {
        let version = toml::from_str::<Version>(content)
            .map_err(|_| ConfigError::NoVersion(LATEST_VERSION))?;

        if version.version != LATEST_VERSION {
            return Err(ConfigError::BadVersion(version.version, LATEST_VERSION));
        }

        let content = toml::from_str::<Version1>(content)
            .map_err(|_| ConfigError::ParseError(version.version.clone()))?;

        Ok(Config { version, content })
    }

    fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        let version = serde_yaml::from_str::<Version>(content)
            .map_err(|_| ConfigError::NoVersion(LATEST_VERSION))?;

        if version.version != LATEST_VERSION {
            return Err(ConfigError::BadVersion(version.version, LATEST_VERSION));
        }

        let content = serde_yaml::from_str::<Version1>(content)
            .map_err(|_| ConfigError::ParseError(version.version.clone()))?;

        Ok(Config { version, content })
    }

    pub fn jobs(&self) -> Result<Vec<Job>> {
        let mut jobs = vec![];
        self.content
            .load_into(&mut jobs)
            .map_err(|msg| anyhow!(msg))?;
        Ok(jobs)
    }

    pub fn job_names(&self) -> Vec<String> {
        self.content.job_names()
    }

    pub fn workers(&self) -> Option<usize> {
        self.content.workers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use version_1::JobSet;

    impl FromStr for Version {
        type Err = ();
        fn from_str(s: &str) -> Result<Self, ()> {
            Ok(Version {
                version: s.to_string(),
            })
        }
    }

    #[test]
    pub fn parse_good_v1_toml() -> Result<(), ()> {
        let mut job_set = JobSet::new();
        job_set.insert(
            String::from("debug"),
            vec![String::from("make"), String::from("debug")],
        );

        assert_eq!(
            Config::parse_toml("version = \"1\"\n[jobs]\ndebug = [\"make\", \"debug\"]").unwrap(),
            Config {
                version: "1".parse::<Version>()?,
                content: Version1::new(job_set),
            }
        );

        Ok(())
    }

    #[test]
    pub fn parse_good_v1_yaml() -> Result<(), ()> {
        let mut job_set = JobSet::new();
        job_set.insert(
            String::from("debug"),
            vec![String::from("make"), String::from("debug")],
        );

        assert_eq!(
            Config::parse_yaml("{ version: \"1\", jobs: { debug: [make, debug] } }").unwrap(),
            Config {
                version: "1".parse::<Version>()?,
                content: Version1::new(job_set),
            }
        );

        Ok(())
    }

    #[test]
    pub fn missing_version_is_an_error() {
        assert!(matches!(
            Config::parse_toml("[jobs]\ndebug = [\"make\"]"),
            Err(ConfigError::NoVersion("1"))
        ));
    }

    #[test]
    pub fn unknown_version_is_an_error() {
        assert!(matches!(
            Config::parse_yaml("{ version: \"9\", jobs: {} }"),
            Err(ConfigError::BadVersion(_, "1"))
        ));
    }

    #[test]
    pub fn empty_job_set_is_valid() {
        let config = Config::parse_yaml("{ version: \"1\", jobs: {} }").unwrap();
        assert!(config.jobs().unwrap().is_empty());
    }

    #[test]
    pub fn workers_and_dirs_come_through() {
        let config = Config::parse_yaml(
            "{ version: \"1\", workers: 3, workdir: lib, jobs: { debug: [make] } }",
        )
        .unwrap();
        assert_eq!(config.workers(), Some(3));
        let jobs = config.jobs().unwrap();
        assert_eq!(jobs[0].workdir, std::path::PathBuf::from("lib"));
        assert_eq!(
            jobs[0].log_path,
            std::path::PathBuf::from("lib/build.debug.log")
        );
    }
}
