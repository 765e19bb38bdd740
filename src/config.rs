use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub port: u16,

    /// Bind every interface instead of loopback only.
    pub listen: bool,

    /// Announce a public tunnel URL for the local port.
    pub share: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5005".to_string())
                .parse()?,
            listen: env_flag("LISTEN"),
            share: env_flag("SHARE"),
        })
    }

    /// Loopback only unless external exposure was asked for explicitly.
    pub fn bind_addr(&self) -> SocketAddr {
        let host: IpAddr = if self.listen {
            Ipv4Addr::UNSPECIFIED.into()
        } else {
            Ipv4Addr::LOCALHOST.into()
        };
        SocketAddr::new(host, self.port)
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
