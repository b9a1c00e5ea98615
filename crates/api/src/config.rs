use crate::identity::firebase::FirebaseConfig;
use crate::identity::static_tokens::StaticConfig;

/// Where records are persisted.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Mongo { uri: String, database: String },
    /// In-process store; data is lost on restart.
    Memory,
}

/// Which identity provider verifies bearer tokens and handles sign-in.
#[derive(Debug, Clone)]
pub enum IdentityConfig {
    Firebase(FirebaseConfig),
    Static(StaticConfig),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the backend credentials have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

/// Default database name when `MONGO_DATABASE` is unset.
const DEFAULT_DATABASE: &str = "poopyrus";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                         |
    /// |------------------------|-------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                       |
    /// | `PORT`                 | `8000`                                          |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:8000`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                            |
    /// | `STORE_BACKEND`        | `mongo` (`memory` for a throwaway store)        |
    /// | `MONGO_URI`            | required when `STORE_BACKEND=mongo`             |
    /// | `MONGO_DATABASE`       | `poopyrus`                                      |
    /// | `IDENTITY_BACKEND`     | `firebase` (`static` for fixed tokens)          |
    ///
    /// See [`FirebaseConfig::from_env`] and [`StaticConfig::from_env`] for the
    /// provider-specific variables.
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers, unknown backends, or missing required values.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:8000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "mongo".into())
            .as_str()
        {
            "mongo" => StoreConfig::Mongo {
                uri: std::env::var("MONGO_URI").expect("MONGO_URI must be set"),
                database: std::env::var("MONGO_DATABASE")
                    .unwrap_or_else(|_| DEFAULT_DATABASE.into()),
            },
            "memory" => StoreConfig::Memory,
            other => panic!("Unknown STORE_BACKEND '{other}' (expected mongo or memory)"),
        };

        let identity = match std::env::var("IDENTITY_BACKEND")
            .unwrap_or_else(|_| "firebase".into())
            .as_str()
        {
            "firebase" => IdentityConfig::Firebase(FirebaseConfig::from_env()),
            "static" => IdentityConfig::Static(StaticConfig::from_env()),
            other => panic!("Unknown IDENTITY_BACKEND '{other}' (expected firebase or static)"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            identity,
        }
    }
}
