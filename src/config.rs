//! Configuration management for Folio Server

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL, used to build manifest identifiers.
    /// Decoration must not depend on the inbound request URL, otherwise
    /// concurrent cache fills for the same work could diverge.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Minio,
    R2,
    S3,
    B2,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Parser implementation selected from the registry.
    pub parser: String,
    /// Deployment space passed to the parser.
    pub space: String,
    /// URL template with `{space}` and `{reference}` placeholders.
    pub manifest_query: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                public_base_url: "http://localhost:8000".to_string(),
            },
            storage: StorageConfig {
                provider: StorageProvider::Minio,
                endpoint: "http://localhost:9000".to_string(),
                bucket: "folio-meta".to_string(),
                access_key: "admin".to_string(),
                secret_key: "password123".to_string(),
                region: Some("us-east-1".to_string()),
            },
            source: SourceConfig {
                parser: "named-query".to_string(),
                space: "default".to_string(),
                manifest_query: "http://localhost:8080/iiif-resource/{space}/manifest-by-reference/{reference}"
                    .to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        Ok(Config {
            server: ServerConfig {
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| format!("http://{}:{}", host, port)),
                host,
                port,
            },
            storage: StorageConfig {
                provider: match env::var("S3_PROVIDER").unwrap_or_else(|_| "minio".to_string()).as_str() {
                    "r2" => StorageProvider::R2,
                    "s3" => StorageProvider::S3,
                    "b2" => StorageProvider::B2,
                    _ => StorageProvider::Minio,
                },
                endpoint: env::var("S3_ENDPOINT")?,
                bucket: env::var("S3_BUCKET")?,
                access_key: env::var("S3_ACCESS_KEY")?,
                secret_key: env::var("S3_SECRET_KEY")?,
                region: env::var("S3_REGION").ok(),
            },
            source: SourceConfig {
                parser: env::var("SOURCE_PARSER").unwrap_or_else(|_| "named-query".to_string()),
                space: env::var("SOURCE_SPACE").unwrap_or_else(|_| "default".to_string()),
                manifest_query: env::var("SOURCE_MANIFEST_QUERY")?,
            },
        })
    }
}
