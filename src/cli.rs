use std::io::{self, Write};

use clap::Parser;

/// Probe a bearer token against an API's health and protected endpoints.
///
/// Both positionals are optional at the parser level so that a missing token
/// prints the usage text and exits normally instead of failing.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tokenprobe", version)]
pub struct Invocation {
    /// JWT to send as `Authorization: Bearer <token>`.
    pub token: Option<String>,

    /// Application user id, sent as `auth_user_id` in one extra request.
    pub auth_user_id: Option<String>,

    /// Base URL of the API under test. Overrides the config file and `API_BASE_URL`.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// YAML settings file. Defaults to `CONFIG_FILE`, then `tokenprobe.yml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
}

impl Invocation {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.auth_user_id.as_deref().filter(|id| !id.is_empty())
    }
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage: tokenprobe <jwt_token> [auth_user_id]")?;
    writeln!(out, "\nExample:")?;
    writeln!(out, "tokenprobe eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")?;
    writeln!(
        out,
        "tokenprobe eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9... bab94363-5d47-4118-89a5-73ec3331e1d6"
    )?;
    Ok(())
}
