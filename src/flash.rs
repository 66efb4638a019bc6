use axum::http::HeaderMap;

pub const FLASH_COOKIE_NAME: &str = "placement_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

/// One-shot message shown on the page after a redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    /// CSS class used by the layout.
    pub fn css_class(&self) -> &'static str {
        self.level.as_str()
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

        for cookie in cookie_header.split(';') {
            let cookie = cookie.trim();
            if let Some(value) = cookie
                .strip_prefix(FLASH_COOKIE_NAME)
                .and_then(|s| s.strip_prefix('='))
            {
                let decoded = urlencoding::decode(value).ok()?;
                let (level, text) = decoded.split_once(':')?;
                let level = match level {
                    "success" => Level::Success,
                    "error" => Level::Error,
                    _ => return None,
                };
                return Some(Self {
                    level,
                    text: text.to_string(),
                });
            }
        }
        None
    }

    pub fn to_cookie_header(&self) -> String {
        let value = format!("{}:{}", self.level.as_str(), self.text);
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age=60",
            FLASH_COOKIE_NAME,
            urlencoding::encode(&value)
        )
    }

    pub fn delete_cookie_header() -> String {
        format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", FLASH_COOKIE_NAME)
    }
}
