use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection-level configuration, handed to the driver verbatim.
///
/// None of these fields are interpreted by the execution layer; they exist
/// so a single parameter set can be replayed on every reconnect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub database: Option<String>,
    pub timeout: Duration,
    pub use_ssl: bool,
    pub ca_cert: Option<String>,
    pub use_ldap: bool,
    pub ldap_user: Option<String>,
    pub ldap_password: Option<String>,
    pub use_kerberos: bool,
    pub kerberos_service_name: String,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 21050,
            protocol: "hiveserver2".to_string(),
            database: None,
            timeout: Duration::from_secs(45),
            use_ssl: false,
            ca_cert: None,
            use_ldap: false,
            ldap_user: None,
            ldap_password: None,
            use_kerberos: false,
            kerberos_service_name: "quarry".to_string(),
        }
    }
}

impl ConnectParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn use_ssl(mut self, ca_cert: Option<String>) -> Self {
        self.use_ssl = true;
        self.ca_cert = ca_cert;
        self
    }

    pub fn ldap(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.use_ldap = true;
        self.ldap_user = Some(user.into());
        self.ldap_password = Some(password.into());
        self
    }

    pub fn kerberos(mut self, service_name: impl Into<String>) -> Self {
        self.use_kerberos = true;
        self.kerberos_service_name = service_name.into();
        self
    }

    /// host:port, for log lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
