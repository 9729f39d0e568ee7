use std::path::Path;
use toml_edit::{DocumentMut, Item};

#[derive(Default, Debug, Clone)]
pub struct Config {
    toml: DocumentMut,
}

impl Config {
    pub fn load(data: &str) -> anyhow::Result<Self> {
        let toml = data.parse::<DocumentMut>();
        Ok(Self { toml: toml? })
    }

    /// Load the file, or an empty config if it does not exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::load(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the item by a dotted path like `play.grace.hit`.
    pub fn get_item(&self, path: &str) -> Option<&Item> {
        let mut keys = path.split('.');
        let mut item = self.toml.get(keys.next()?)?;
        for key in keys {
            item = item.get(key)?;
        }
        Some(item)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_item(path).and_then(|x| x.as_str())
    }

    /// Integers are accepted as well.
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        let item = self.get_item(path)?;
        item.as_float()
            .or_else(|| item.as_integer().map(|x| x as f64))
    }

    pub fn get_f64_def(&self, path: &str, def: f64) -> f64 {
        self.get_f64(path).unwrap_or(def)
    }

    /// String entries of a table, e.g. the `[keys]` bindings.
    pub fn get_str_entries(&self, path: &str) -> Vec<(String, String)> {
        self.get_item(path)
            .and_then(|x| x.as_table_like())
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.to_string(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }
}
