//! Relay configuration, read from the environment once at startup.
//!
//! | Variable              | Default                            |
//! |-----------------------|------------------------------------|
//! | `ORS_API_KEY`         | required                           |
//! | `ORS_API_BASE`        | `https://api.openrouteservice.org` |
//! | `ORS_DEFAULT_PROFILE` | `foot-walking`                     |
//! | `ORS_TIMEOUT_SECS`    | HTTP client default                |
//! | `RELAY_HOST`          | `127.0.0.1`                        |
//! | `PORT`                | `5000`                             |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::{
    entities::Profile,
    error::{config_error, Error},
};

pub const DEFAULT_API_BASE: &str = "https://api.openrouteservice.org/";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_base: Url,
    pub default_profile: Profile,
    pub timeout: Option<Duration>,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let api_key = env::var("ORS_API_KEY")?;
        if api_key.trim().is_empty() {
            return Err(config_error("ORS_API_KEY"));
        }

        let api_base = match parse_from_env_opt::<String>("ORS_API_BASE")? {
            Some(base) => parse_base_url(&base).ok_or_else(|| config_error("ORS_API_BASE"))?,
            None => parse_base_url(DEFAULT_API_BASE).ok_or_else(|| config_error("ORS_API_BASE"))?,
        };

        let default_profile =
            parse_from_env_opt::<Profile>("ORS_DEFAULT_PROFILE")?.unwrap_or(Profile::FootWalking);
        let timeout = parse_from_env_opt::<u64>("ORS_TIMEOUT_SECS")?.map(Duration::from_secs);

        let host = parse_from_env_opt::<IpAddr>("RELAY_HOST")?
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = parse_from_env_opt::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            api_key,
            api_base,
            default_profile,
            timeout,
            addr: SocketAddr::new(host, port),
        })
    }
}

/// Parses a base URL so that relative joins append to its path.
pub fn parse_base_url(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw).ok()?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Some(url)
}

fn parse_from_env_opt<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| config_error(name)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn base_url_gets_trailing_slash() {
    let url = parse_base_url("http://127.0.0.1:8080/ors").unwrap();

    assert_eq!(
        url.join("v2/directions/driving-car").unwrap().as_str(),
        "http://127.0.0.1:8080/ors/v2/directions/driving-car"
    );
    assert!(parse_base_url("not a url").is_none());
}
