use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, ensure, Context, Result};
use hocon::{Hocon, HoconLoader};
use log::debug;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
    dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        ensure!(path.is_file(), "The config file was {:?} not found", path);

        let env = std::env::vars().collect::<HashMap<_, _>>();

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            hocon,
            env,
            scope,
            dir,
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    /// Deserializes a nested object, preferring the one found under the scope over the root.
    pub fn get_section<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let scoped = &self.hocon[self.scope.as_str()][name];
        let section = if matches!(scoped, Hocon::BadValue(_)) {
            &self.hocon[name]
        } else {
            scoped
        };

        if matches!(section, Hocon::BadValue(_)) {
            return Err(anyhow!("Config section {} was not found", name));
        }

        debug!("Reading config section {}", name);

        section
            .clone()
            .resolve::<T>()
            .with_context(|| format!("Failed to read config section {}", name))
    }

    /// Resolves a path valued setting relative to the directory of the config file.
    pub fn get_relative_path(&self, name: &str) -> Result<PathBuf> {
        let value = self
            .get(name)
            .and_then(|v| v.as_string())
            .ok_or_else(|| anyhow!("Config value {} was not found", name))?;

        Ok(self.dir.join(value))
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64 as f32)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64 as usize)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f32),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Board {
        size: usize,
        labels: Vec<String>,
    }

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("game.conf");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_config_get_prefers_scope() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            reflect = false
            symmetry {
                reflect = true
            }
            "#,
        );

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();

        assert_eq!(config.get("reflect").and_then(|v| v.as_string()), Some("true".to_string()));
    }

    #[test]
    fn test_config_get_falls_back_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            batch_size = 512
            symmetry {
                reflect = true
            }
            "#,
        );

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();

        assert_eq!(config.get("batch_size"), Some(Value::Integer(512)));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_config_get_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            symmetry {
                board {
                    size = 3
                    labels = ["1", "2", "3"]
                }
            }
            "#,
        );

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();
        let board: Board = config.get_section("board").unwrap();

        assert_eq!(
            board,
            Board {
                size: 3,
                labels: vec!["1".to_string(), "2".to_string(), "3".to_string()]
            }
        );
    }

    #[test]
    fn test_config_get_section_integer_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            board {
                size = 3
                labels = [0, 1, 2]
            }
            "#,
        );

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();
        let board: Board = config.get_section("board").unwrap();

        assert_eq!(board.labels, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_config_get_section_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "symmetry { reflect = true }");

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();

        assert!(config.get_section::<Board>("board").is_err());
    }

    #[test]
    fn test_config_get_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "game_file = \"games/ttt.json\"");

        let config = ConfigLoader::new(path, "symmetry".to_string()).unwrap();

        assert_eq!(
            config.get_relative_path("game_file").unwrap(),
            dir.path().join("games/ttt.json")
        );
    }

    #[test]
    fn test_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ConfigLoader::new(dir.path().join("nope.conf"), "symmetry".to_string()).is_err());
    }
}
