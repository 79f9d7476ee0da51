/// Server-level settings shared with every worker.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Username accepted at the admin login form.
    pub admin_username: String,
    /// Password accepted at the admin login form.
    pub admin_password: String,
}
