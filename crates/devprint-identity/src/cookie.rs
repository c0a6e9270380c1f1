use crate::config::IdentityConfig;
use crate::signer::SignedToken;
use std::fmt;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// `SameSite=Strict`
    Strict,
    /// `SameSite=Lax`
    Lax,
    /// `SameSite=None`
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        f.write_str(value)
    }
}

/// An outbound cookie. `Display` renders the `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// `HttpOnly` flag.
    pub http_only: bool,
    /// `Secure` flag.
    pub secure: bool,
    /// `SameSite` attribute.
    pub same_site: SameSite,
    /// `Max-Age` in seconds.
    pub max_age_secs: u64,
    /// `Path` attribute.
    pub path: String,
}

impl SetCookie {
    /// The identity cookie carrying `token`:
    /// `HttpOnly; Secure; SameSite=Lax; Max-Age=<config>; Path=/`.
    pub fn device(config: &IdentityConfig, token: SignedToken) -> Self {
        Self {
            name: config.cookie_name.clone(),
            value: token.into_string(),
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            max_age_secs: config.cookie_max_age_secs,
            path: "/".to_string(),
        }
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        write!(
            f,
            "; SameSite={}; Max-Age={}; Path={}",
            self.same_site, self.max_age_secs, self.path
        )
    }
}

/// Extracts the first cookie called `name` from a `Cookie` request header.
///
/// Pairs without `=` are skipped. A value wrapped in double quotes is
/// returned without them.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            let value = value.trim();
            value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SigningSecret, COOKIE_NAME};
    use crate::signer::Signer;

    #[test]
    fn renders_device_cookie_attributes() {
        let signer = Signer::new(&SigningSecret::new("k").unwrap()).unwrap();
        let token = signer.sign("dev1");
        let cookie = SetCookie::device(&IdentityConfig::default(), token.clone());
        assert_eq!(
            cookie.to_string(),
            format!(
                "d_id={}; HttpOnly; Secure; SameSite=Lax; Max-Age=31536000; Path=/",
                token
            )
        );
    }

    #[test]
    fn finds_named_cookie_among_others() {
        let header = "theme=dark; d_id=abc.123 ; lang=uk";
        assert_eq!(cookie_value(header, COOKIE_NAME), Some("abc.123"));
        assert_eq!(cookie_value(header, "lang"), Some("uk"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn skips_malformed_pairs_and_strips_quotes() {
        let header = "garbage; ;d_id=\"x.y\"";
        assert_eq!(cookie_value(header, "d_id"), Some("x.y"));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(cookie_value("d_id=first; d_id=second", "d_id"), Some("first"));
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(cookie_value("xd_id=1", "d_id"), None);
        assert_eq!(cookie_value("", "d_id"), None);
    }
}
