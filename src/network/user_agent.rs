//! User agent and default headers

/// Descriptive user agent, as public catalog APIs ask clients to send
pub fn default_user_agent(suffix: Option<&str>) -> String {
    let base = format!("catalog-explorer/{}", crate::VERSION);
    match suffix {
        Some(s) if !s.trim().is_empty() => format!("{} {}", base, s.trim()),
        _ => base,
    }
}

/// Standard accept headers for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}

/// Standard accept-language header
pub fn accept_language(lang: &str) -> String {
    if lang == "all" || lang.is_empty() {
        "en-US,en;q=0.9".to_string()
    } else {
        format!("{},en-US;q=0.9,en;q=0.8", lang)
    }
}
