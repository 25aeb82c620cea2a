use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7004,
            data_path: PathBuf::from("data/books.json"),
        }
    }
}

impl ServiceConfig {
    /// Reads `HOST`, `PORT` and `BOOKS_DATA_PATH`, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let data_path = std::env::var("BOOKS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        Self {
            host,
            port,
            data_path,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
