pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct SafetechConfig {
    pub database: DatabaseConfig,
    /// Ceiling applied to `limit`, `None` leaves page sizes unbounded.
    pub max_page_size: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            name: "safetech".to_string(),
        }
    }
}
