use anyhow::{Context, Result, anyhow};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) api_url: String,
    pub(crate) log_level: String,
    pub(crate) page_limit: u32,
    pub(crate) search_limit: u32,
    pub(crate) session_file: String,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let api_url = std::env::var("FEED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let page_limit = parse_u32_env("FEED_PAGE_LIMIT", feed_client::query::ARTICLES_LIMIT)?;
        let search_limit = parse_u32_env("FEED_SEARCH_LIMIT", feed_client::query::SEARCH_LIMIT)?;
        let session_file =
            std::env::var("FEED_SESSION_FILE").unwrap_or_else(|_| ".feed_session".to_string());

        if session_file.trim().is_empty() {
            return Err(anyhow!("FEED_SESSION_FILE must not be empty"));
        }

        Ok(Self {
            api_url,
            log_level,
            page_limit,
            search_limit,
            session_file,
        })
    }
}

fn parse_u32_env(key: &str, default: u32) -> Result<u32> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    parse_positive_u32(key, &raw)
}

fn parse_positive_u32(key: &str, raw: &str) -> Result<u32> {
    let value = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_positive_u32_accepts_number() {
        let value = parse_positive_u32("FEED_PAGE_LIMIT", " 25 ").expect("valid number");
        assert_eq!(value, 25);
    }

    #[test]
    fn parse_positive_u32_rejects_zero_and_garbage() {
        assert!(parse_positive_u32("FEED_PAGE_LIMIT", "0").is_err());
        assert!(parse_positive_u32("FEED_PAGE_LIMIT", "many").is_err());
    }
}
