use crate::config::IdentityConfig;
use crate::cookie::SetCookie;
use crate::resolver::PendingWrite;
use crate::signer::Signer;
use tracing::debug;

/// Outbound response surface able to carry a `Set-Cookie`.
pub trait CookieSink {
    /// Adds a cookie to the outgoing response.
    fn set_cookie(&mut self, cookie: SetCookie);
}

impl CookieSink for Vec<SetCookie> {
    fn set_cookie(&mut self, cookie: SetCookie) {
        self.push(cookie);
    }
}

/// Applies a pending write after the handler has produced its result.
///
/// Signs the pending id and emits exactly one identity cookie when
/// `should_set_cookie` is set; otherwise does nothing. Taking the write by
/// value makes a second application impossible. Returns whether a cookie was
/// written.
pub fn commit<S>(
    pending: Option<PendingWrite>,
    signer: &Signer,
    config: &IdentityConfig,
    sink: &mut S,
) -> bool
where
    S: CookieSink + ?Sized,
{
    let Some(pending) = pending else {
        return false;
    };
    if !pending.should_set_cookie {
        return false;
    }

    let token = signer.sign(pending.device_id.as_str());
    sink.set_cookie(SetCookie::device(config, token));
    debug!(cookie = %config.cookie_name, "issued device identity cookie");
    true
}
