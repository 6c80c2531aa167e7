use std::env;
use url::Url;

/// Header set the license client sends to look like a real player page.
///
/// The upstream license server only answers requests that resemble its own
/// web player, so these are forwarded verbatim on every key request.
#[derive(Clone, Debug, PartialEq)]
pub struct LicenseHeaders {
    pub user_agent: String,
    /// Value of the `Origin` header
    pub page_origin: String,
    /// Value of the `Referer` header
    pub referer: String,
    /// Optional spoofed client IP, sent as `X-Forwarded-For` when set
    pub forwarded_for: Option<String>,
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub is_dev: bool,
    /// Origin URL of the DASH manifest to proxy
    pub mpd_url: String,
    /// ClearKey license server endpoint
    pub license_url: String,
    /// Browser-emulation headers for the license client
    pub license_headers: LicenseHeaders,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

impl Config {
    /// Load configuration from environment variables
    /// In DEV mode, provides sensible defaults. In PROD mode, PORT, MPD_URL
    /// and LICENSE_URL are required.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Check if running in dev mode
        let is_dev = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        // Port: required in prod, defaults to 8000 in dev
        let port = if is_dev {
            env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?
        } else {
            env::var("PORT")
                .map_err(|_| "PORT is required in production")?
                .parse()?
        };

        // Manifest origin: required in prod, defaults to a placeholder in dev
        let mpd_url = if is_dev {
            env::var("MPD_URL").unwrap_or_else(|_| "https://example.com/manifest.mpd".to_string())
        } else {
            env::var("MPD_URL").map_err(|_| "MPD_URL is required in production")?
        };

        // License server: required in prod, defaults to a placeholder in dev
        let license_url = if is_dev {
            env::var("LICENSE_URL").unwrap_or_else(|_| "https://example.com/license".to_string())
        } else {
            env::var("LICENSE_URL").map_err(|_| "LICENSE_URL is required in production")?
        };

        // Both endpoints must at least parse as URLs — catches misquoted env
        // values at startup instead of on the first request
        Url::parse(&mpd_url).map_err(|e| format!("MPD_URL is not a valid URL: {e}"))?;
        Url::parse(&license_url).map_err(|e| format!("LICENSE_URL is not a valid URL: {e}"))?;

        let user_agent =
            env::var("LICENSE_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let page_origin = env::var("LICENSE_PAGE_ORIGIN")
            .unwrap_or_else(|_| "https://watch.example.com".to_string());

        // Referer defaults to the page origin with a trailing slash
        let referer = env::var("LICENSE_REFERER").unwrap_or_else(|_| format!("{}/", page_origin));

        let forwarded_for = env::var("LICENSE_FORWARDED_FOR").ok();

        Ok(Config {
            port,
            is_dev,
            mpd_url,
            license_url,
            license_headers: LicenseHeaders {
                user_agent,
                page_origin,
                referer,
                forwarded_for,
            },
        })
    }
}
