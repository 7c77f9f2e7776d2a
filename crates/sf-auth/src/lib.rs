//! # sfquerier-auth
//!
//! Credentials for the Salesforce REST API.
//!
//! ## Security
//!
//! - Access tokens, passwords and security tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Login faults carry the Salesforce fault code, never the submitted secret
//!
//! ## Supported sources
//!
//! - **Explicit** instance URL + access token
//! - **Environment** (`SF_INSTANCE_URL`, `SF_ACCESS_TOKEN`, `SF_API_VERSION`)
//! - **Username/password login** with either a security token or an
//!   organization id, against the `login`, `test` or a My Domain host
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquerier_auth::{PasswordLogin, SalesforceCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfquerier_auth::Error> {
//!     // Session already obtained elsewhere
//!     let creds = SalesforceCredentials::from_env()?;
//!
//!     // Or log in with a password and security token
//!     let creds = PasswordLogin::new("ops@acme.com", "hunter2")
//!         .security_token("XXXXXXXXXXXXXXXXXXXXXXXX")
//!         .domain("test")
//!         .login()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod login;

pub use credentials::{Credentials, SalesforceCredentials};
pub use error::{Error, ErrorKind, Result};
pub use login::{LoginSecret, PasswordLogin};

/// Login domain for production orgs.
pub const PRODUCTION_DOMAIN: &str = "login";

/// Login domain for sandboxes.
pub const SANDBOX_DOMAIN: &str = "test";
