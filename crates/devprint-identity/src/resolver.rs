use crate::identifiers::DeviceId;
use crate::signer::Signer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the resolved identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentitySource {
    /// The signed `d_id` cookie.
    Cookie,
    /// The raw `x-device-id` header.
    Header,
}

/// Trust-annotated device identity for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// The device id.
    pub value: DeviceId,
    /// `true` only when the id came from a cookie this process signed.
    pub verified: bool,
    /// Signal the id was taken from.
    pub source: IdentitySource,
}

/// Deferred cookie write, applied on the outbound path.
///
/// Not `Clone`: [`commit`](crate::commit::commit) takes it by value, so a
/// write cannot be applied twice.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWrite {
    /// Id to sign into the outbound cookie.
    pub device_id: DeviceId,
    /// Whether a cookie should be emitted.
    pub should_set_cookie: bool,
}

/// Output of [`resolve`].
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Identity visible to handler logic.
    pub identity: Option<DeviceIdentity>,
    /// Cookie write to apply once the handler has produced its result.
    pub pending: Option<PendingWrite>,
}

impl Resolution {
    fn from_header(id: DeviceId) -> Self {
        Self {
            identity: Some(DeviceIdentity {
                value: id.clone(),
                verified: false,
                source: IdentitySource::Header,
            }),
            pending: Some(PendingWrite {
                device_id: id,
                should_set_cookie: true,
            }),
        }
    }

    fn from_cookie(id: DeviceId) -> Self {
        Self {
            identity: Some(DeviceIdentity {
                value: id,
                verified: true,
                source: IdentitySource::Cookie,
            }),
            pending: None,
        }
    }
}

/// Reconciles the signed cookie value and the raw header value.
///
/// Policy, in order:
/// 1. Cookie verifies to `V`: a present header different from `V` overrides
///    it as an untrusted identity and schedules a cookie rewrite; otherwise
///    `V` is the verified identity and nothing is written.
/// 2. Header present: untrusted identity, cookie write scheduled.
/// 3. Neither: no identity, no write.
///
/// Empty or malformed values (including ids that fail [`DeviceId`]
/// validation) count as absent. Pure and deterministic; must run before any
/// handler that reads the identity.
pub fn resolve(cookie: Option<&str>, header: Option<&str>, signer: &Signer) -> Resolution {
    let header = header.and_then(parse_header);
    let verified = cookie
        .and_then(|raw| signer.verify(raw))
        .and_then(|id| DeviceId::parse(id).ok());

    if cookie.is_some() && verified.is_none() {
        debug!("device cookie failed verification; treating as absent");
    }

    let resolution = match (verified, header) {
        (Some(v), Some(h)) if h != v => Resolution::from_header(h),
        (Some(v), _) => Resolution::from_cookie(v),
        (None, Some(h)) => Resolution::from_header(h),
        (None, None) => Resolution::default(),
    };

    match &resolution.identity {
        Some(identity) => debug!(
            source = ?identity.source,
            verified = identity.verified,
            rewrite = resolution.pending.is_some(),
            "resolved device identity"
        ),
        None => debug!("no device identity on request"),
    }
    resolution
}

fn parse_header(raw: &str) -> Option<DeviceId> {
    if raw.is_empty() {
        return None;
    }
    match DeviceId::parse(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            debug!(len = raw.len(), "ignoring malformed device id header");
            None
        }
    }
}
