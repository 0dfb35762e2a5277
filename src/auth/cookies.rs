use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Cookie attribute policy for the session cookie pair.
///
/// Both cookies are always httpOnly with path "/". Secure and SameSite are
/// decided per request from the declared origin: a loopback origin relaxes
/// them so local frontends work over plain http, any other origin gets the
/// hardened set. Clearing must reuse the same attributes or some clients
/// keep the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Derives the policy from the request's Origin header
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let loopback = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_loopback_origin);

        if loopback {
            Self {
                secure: false,
                same_site: SameSite::Lax,
            }
        } else {
            Self {
                secure: true,
                same_site: SameSite::Strict,
            }
        }
    }

    pub fn access_cookie(&self, token: String, ttl_minutes: i64) -> Cookie<'static> {
        self.session_cookie(ACCESS_COOKIE, token, Duration::minutes(ttl_minutes))
    }

    pub fn refresh_cookie(&self, token: String, ttl_days: i64) -> Cookie<'static> {
        self.session_cookie(REFRESH_COOKIE, token, Duration::days(ttl_days))
    }

    /// Builds an immediately expiring cookie with the same attribute set
    /// the session cookies were written with
    pub fn clear_cookie(&self, name: &'static str) -> Cookie<'static> {
        self.session_cookie(name, String::new(), Duration::ZERO)
    }

    fn session_cookie(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path("/")
            .max_age(max_age)
            .build()
    }
}

/// Whether a declared origin points at the local machine
fn is_loopback_origin(origin: &str) -> bool {
    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .unwrap_or(origin);
    let authority = authority.split('/').next().unwrap_or(authority);

    // Bracketed IPv6 hosts carry the port after the closing bracket
    let host = if let Some(rest) = authority.strip_prefix('[') {
        match rest.split(']').next() {
            Some(host) => host,
            None => return false,
        }
    } else {
        authority.split(':').next().unwrap_or(authority)
    };

    matches!(host, "localhost" | "127.0.0.1" | "::1")
}
