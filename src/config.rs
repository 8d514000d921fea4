use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub questions_collection: String,
    pub results_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizmark-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            results_collection: env::var("RESULTS_COLLECTION")
                .unwrap_or_else(|_| "results".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        let uri = self.mongo_conn_string.expose_secret();
        if !(uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")) {
            return Err(AppError::ValidationError(
                "MONGO_CONN_STRING must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }

        if self.mongo_db_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "MONGO_DB_NAME must not be empty".to_string(),
            ));
        }

        if self.web_server_port == 0 {
            return Err(AppError::ValidationError(
                "WEB_SERVER_PORT must be a non-zero port".to_string(),
            ));
        }

        let collections = [
            &self.quizzes_collection,
            &self.questions_collection,
            &self.results_collection,
        ];
        for (i, name) in collections.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Collection names must not be empty".to_string(),
                ));
            }
            if collections[i + 1..].contains(name) {
                return Err(AppError::ValidationError(format!(
                    "Collection name '{}' is configured more than once",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
            mongo_db_name: "quizmark-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            questions_collection: "questions".to_string(),
            results_collection: "results".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
        }
    }
}
