//! # Flash notices
//!
//! A notice set by one request and shown by the next, carried in a signed cookie:
//!
//! ```text
//! flash=<base64url(json {level, message})>.<hex hmac-sha256 of the base64 part>
//! ```
//!
//! The page that displays a notice also clears the cookie, so it is shown once. A cookie
//! with a bad signature is ignored and cleared.

use crate::config::ConfigError;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::convert::Infallible;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "flash";

const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlashError {
    #[error("Failed to encode flash notice: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Flash cookie is not a valid header value")]
    Header(#[from] axum::http::header::InvalidHeaderValue),
}

/// Signs and verifies flash cookies.
#[derive(Clone)]
pub struct FlashKey {
    mac: HmacSha256,
}

impl std::fmt::Debug for FlashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FlashKey(..)")
    }
}

impl FlashKey {
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| ConfigError::InvalidSecretKey)?;
        Ok(Self { mac })
    }

    fn signature(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    /// Cookie value carrying `flash`.
    pub fn encode(&self, flash: &Flash) -> Result<String, FlashError> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(flash)?);
        let tag = hex::encode(self.signature(&payload).finalize().into_bytes());
        Ok(format!("{payload}.{tag}"))
    }

    /// Decodes a cookie value. `None` when the signature or the payload is bad.
    pub fn decode(&self, value: &str) -> Option<Flash> {
        let (payload, tag) = value.split_once('.')?;
        let tag = hex::decode(tag).ok()?;
        self.signature(payload).verify_slice(&tag).ok()?;
        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Response part that stores `flash` for the next request.
    pub fn set(&self, flash: &Flash) -> Result<SetFlash, FlashError> {
        let cookie = format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.encode(flash)?
        );
        Ok(SetFlash(HeaderValue::from_str(&cookie)?))
    }

    /// Reads the pending notice from the request cookies.
    pub fn take(&self, headers: &HeaderMap) -> TakenFlash {
        let Some(value) = flash_cookie(headers) else {
            return TakenFlash {
                flash: None,
                clear: false,
            };
        };
        let flash = self.decode(value);
        if flash.is_none() {
            tracing::warn!("Ignoring flash cookie with a bad signature");
        }
        TakenFlash { flash, clear: true }
    }
}

fn flash_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == FLASH_COOKIE).then_some(value)
        })
}

/// Sets the flash cookie on a response.
#[derive(Debug)]
pub struct SetFlash(HeaderValue);

impl IntoResponseParts for SetFlash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.headers_mut().append(SET_COOKIE, self.0);
        Ok(res)
    }
}

/// The notice read from a request. As a response part, clears the cookie if one was sent.
#[derive(Debug)]
pub struct TakenFlash {
    flash: Option<Flash>,
    clear: bool,
}

impl TakenFlash {
    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }
}

impl IntoResponseParts for TakenFlash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.clear {
            res.headers_mut()
                .append(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> FlashKey {
        FlashKey::new(b"test-secret").unwrap()
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn signed_notice_is_read_back() {
        let key = key();
        let value = key.encode(&Flash::success("Order added successfully!")).unwrap();

        let headers = cookie_headers(&format!("theme=dark; flash={value}"));
        let taken = key.take(&headers);

        assert_eq!(
            taken.flash(),
            Some(&Flash::success("Order added successfully!"))
        );
        assert!(taken.clear);
    }

    #[test]
    fn tampered_or_foreign_cookies_are_rejected() {
        let key = key();
        let value = key.encode(&Flash::error("All fields are required!")).unwrap();
        let (payload, tag) = value.split_once('.').unwrap();

        let forged = URL_SAFE_NO_PAD.encode(br#"{"level":"success","message":"hi"}"#);
        assert!(key.decode(&format!("{forged}.{tag}")).is_none());
        assert!(key.decode(payload).is_none());

        let other = FlashKey::new(b"another-secret").unwrap();
        assert!(other.decode(&value).is_none());

        let taken = key.take(&cookie_headers("flash=garbage"));
        assert!(taken.flash().is_none());
        assert!(taken.clear);
    }

    #[test]
    fn no_cookie_means_nothing_to_clear() {
        let taken = key().take(&HeaderMap::new());
        assert!(taken.flash().is_none());
        assert!(!taken.clear);
    }

    #[test]
    fn set_cookie_is_http_only() {
        let SetFlash(header) = key().set(&Flash::success("ok")).unwrap();
        let header = header.to_str().unwrap();
        assert!(header.starts_with("flash="));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Path=/"));
    }
}
