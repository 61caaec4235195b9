use serde::{Deserialize, Serialize};

const API_PATH: &str = "/api/expenses";
const SETTINGS_KEY: &str = "settings";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the expenses collection, without a trailing slash.
    pub api_url: String,
    pub currency_symbol: String,
}

impl ClientConfig {
    pub fn load() -> Self {
        let settings = load_settings();
        ClientConfig {
            api_url: api_url_for(page_origin().as_deref()),
            currency_symbol: settings.currency_symbol,
        }
    }
}

fn api_url_for(origin: Option<&str>) -> String {
    match origin {
        Some(origin) if !origin.is_empty() && origin != "null" => {
            format!("{}{}", origin.trim_end_matches('/'), API_PATH)
        }
        _ => API_PATH.to_string(),
    }
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn load_settings() -> DisplaySettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
                return parse_settings(&raw);
            }
        }
    }
    DisplaySettings::default()
}

fn parse_settings(raw: &str) -> DisplaySettings {
    match serde_json::from_str::<DisplaySettings>(raw) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("ignoring stored settings: {err}");
            DisplaySettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{api_url_for, parse_settings, DisplaySettings};

    #[test]
    fn api_url_is_built_from_origin() {
        assert_eq!(
            api_url_for(Some("http://127.0.0.1:8000")),
            "http://127.0.0.1:8000/api/expenses"
        );
        assert_eq!(
            api_url_for(Some("https://example.com/")),
            "https://example.com/api/expenses"
        );
    }

    #[test]
    fn api_url_is_relative_without_origin() {
        assert_eq!(api_url_for(None), "/api/expenses");
        assert_eq!(api_url_for(Some("null")), "/api/expenses");
    }

    #[test]
    fn stored_settings_override_default_symbol() {
        let settings = parse_settings(r#"{"currency_symbol": "$"}"#);

        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn malformed_settings_fall_back_to_default() {
        assert_eq!(parse_settings("not json"), DisplaySettings::default());
        assert_eq!(parse_settings("{}"), DisplaySettings::default());
        assert_eq!(DisplaySettings::default().currency_symbol, "₹");
    }
}
