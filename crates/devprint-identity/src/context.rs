use crate::commit::{commit, CookieSink};
use crate::config::{IdentityConfig, COOKIE_HEADER};
use crate::cookie::cookie_value;
use crate::resolver::{resolve, DeviceIdentity, PendingWrite, Resolution};
use crate::signer::Signer;

/// Identity state of one in-flight request.
///
/// Built on intake, read by handler logic, consumed by [`RequestIdentity::commit`]
/// on the outbound path. Dropping it without committing (a cancelled request)
/// writes nothing. Neither this type nor [`PendingWrite`] is `Clone`, so a
/// request commits at most once:
///
/// ```compile_fail
/// use devprint_identity::{IdentityConfig, RequestIdentity, SetCookie, Signer, SigningSecret};
///
/// let signer = Signer::new(&SigningSecret::new("k").unwrap()).unwrap();
/// let config = IdentityConfig::default();
/// let request = RequestIdentity::intake(|_| Some("install-1"), &signer, &config);
///
/// let mut cookies: Vec<SetCookie> = Vec::new();
/// request.commit(&signer, &config, &mut cookies);
/// request.commit(&signer, &config, &mut cookies);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    identity: Option<DeviceIdentity>,
    pending: Option<PendingWrite>,
}

impl RequestIdentity {
    /// Resolves identity from the inbound request headers.
    ///
    /// `headers` looks up a header value by name. It is asked for the
    /// `cookie` header and for [`IdentityConfig::header_name`]; name matching
    /// (usually case-insensitive) is up to the caller's header map.
    pub fn intake<'h, H>(headers: H, signer: &Signer, config: &IdentityConfig) -> Self
    where
        H: Fn(&str) -> Option<&'h str>,
    {
        let cookie =
            headers(COOKIE_HEADER).and_then(|header| cookie_value(header, &config.cookie_name));
        let device = headers(&config.header_name);
        Self::from(resolve(cookie, device, signer))
    }

    /// Identity for handler logic, if any.
    pub fn identity(&self) -> Option<&DeviceIdentity> {
        self.identity.as_ref()
    }

    /// Write scheduled for the outbound path, if any.
    pub fn pending(&self) -> Option<&PendingWrite> {
        self.pending.as_ref()
    }

    /// Applies the pending write to `sink`. Returns whether a cookie was written.
    pub fn commit<S>(self, signer: &Signer, config: &IdentityConfig, sink: &mut S) -> bool
    where
        S: CookieSink + ?Sized,
    {
        commit(self.pending, signer, config, sink)
    }
}

impl From<Resolution> for RequestIdentity {
    fn from(resolution: Resolution) -> Self {
        Self {
            identity: resolution.identity,
            pending: resolution.pending,
        }
    }
}
