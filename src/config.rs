use crate::domain::Address;
use std::collections::HashMap;
use thiserror::Error;

/// Service configuration, resolved once at startup and injected into each
/// component. Nothing reads the process environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub hyperliquid_api_url: String,
    /// Builder address used for builder-only attribution filtering.
    /// Absent or empty disables the feature entirely.
    pub target_builder: Option<Address>,
    /// Seed addresses for the leaderboard registry.
    pub leaderboard_users: Vec<Address>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let hyperliquid_api_url = env_map
            .get("HYPERLIQUID_API_URL")
            .cloned()
            .unwrap_or_else(|| "https://api.hyperliquid.xyz".to_string());

        let target_builder = env_map
            .get("TARGET_BUILDER")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Address::new(s.to_string()));

        let leaderboard_users = parse_leaderboard_users_from_map(&env_map)?;

        Ok(Config {
            port,
            hyperliquid_api_url,
            target_builder,
            leaderboard_users,
        })
    }
}

fn parse_leaderboard_users_from_map(
    env_map: &HashMap<String, String>,
) -> Result<Vec<Address>, ConfigError> {
    let raw: Vec<String> = if let Some(users_str) = env_map.get("LEADERBOARD_USERS") {
        users_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else if let Some(file_path) = env_map.get("LEADERBOARD_USERS_FILE") {
        let content = std::fs::read_to_string(file_path).map_err(|_| {
            ConfigError::InvalidValue(
                "LEADERBOARD_USERS_FILE".to_string(),
                "file not found or unreadable".to_string(),
            )
        })?;
        content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    Ok(raw.into_iter().map(Address::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_with_empty_env() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.hyperliquid_api_url, "https://api.hyperliquid.xyz");
        assert_eq!(config.target_builder, None);
        assert!(config.leaderboard_users.is_empty());
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_target_builder_disables_filtering() {
        let mut env_map = HashMap::new();
        env_map.insert("TARGET_BUILDER".to_string(), "   ".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.target_builder, None);
    }

    #[test]
    fn test_target_builder_set() {
        let mut env_map = HashMap::new();
        env_map.insert("TARGET_BUILDER".to_string(), "0xabc".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.target_builder, Some(Address::new("0xabc".to_string())));
    }

    #[test]
    fn test_leaderboard_users_from_csv() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "LEADERBOARD_USERS".to_string(),
            "0xa, 0xb,,0xc ".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(
            config.leaderboard_users,
            vec![
                Address::new("0xa".to_string()),
                Address::new("0xb".to_string()),
                Address::new("0xc".to_string()),
            ]
        );
    }

    #[test]
    fn test_leaderboard_users_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0xa\n 0xb \n").unwrap();

        let mut env_map = HashMap::new();
        env_map.insert(
            "LEADERBOARD_USERS_FILE".to_string(),
            file.path().to_string_lossy().to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.leaderboard_users.len(), 2);
    }

    #[test]
    fn test_leaderboard_users_file_missing() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "LEADERBOARD_USERS_FILE".to_string(),
            "/nonexistent/users.txt".to_string(),
        );
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "LEADERBOARD_USERS_FILE"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }
}
