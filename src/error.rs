use thiserror::Error;

use crate::dns::enums::ResponseCode;

/// Failure outcomes of update processing. Each variant corresponds to one
/// response code in the RFC 2136 vocabulary; `rcode()` gives the wire value.
///
/// None of these are retryable: every failure propagates to the caller, which
/// maps it onto the protocol response. A deliberate no-op inside the update
/// engine (CNAME exclusivity, stale SOA serial, NS delete protection) is a
/// success, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("malformed update request")]
    FormErr,

    #[error("store failure: {0}")]
    ServFail(String),

    #[error("name does not exist")]
    NXDomain,

    #[error("operation not implemented")]
    NotImp,

    #[error("update refused by policy")]
    Refused,

    #[error("name exists when it must not")]
    YXDomain,

    #[error("RRset exists when it must not")]
    YXRRSet,

    #[error("RRset does not exist")]
    NXRRSet,

    #[error("not authoritative for zone")]
    NotAuth,

    #[error("name is outside the zone")]
    NotZone,
}

impl UpdateError {
    /// The wire response code this failure maps to.
    pub fn rcode(&self) -> ResponseCode {
        match self {
            UpdateError::FormErr => ResponseCode::FormErr,
            UpdateError::ServFail(_) => ResponseCode::ServFail,
            UpdateError::NXDomain => ResponseCode::NXDomain,
            UpdateError::NotImp => ResponseCode::NotImp,
            UpdateError::Refused => ResponseCode::Refused,
            UpdateError::YXDomain => ResponseCode::YXDomain,
            UpdateError::YXRRSet => ResponseCode::YXRRSet,
            UpdateError::NXRRSet => ResponseCode::NXRRSet,
            UpdateError::NotAuth => ResponseCode::NotAuth,
            UpdateError::NotZone => ResponseCode::NotZone,
        }
    }
}

pub type UpdateResult<T> = std::result::Result<T, UpdateError>;

/// Configuration loading/validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid zone {zone}: {reason}")]
    InvalidZone { zone: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcode_mapping() {
        assert_eq!(UpdateError::FormErr.rcode(), ResponseCode::FormErr);
        assert_eq!(UpdateError::NXRRSet.rcode(), ResponseCode::NXRRSet);
        assert_eq!(UpdateError::YXDomain.rcode(), ResponseCode::YXDomain);
        assert_eq!(
            UpdateError::ServFail("backend down".into()).rcode(),
            ResponseCode::ServFail
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            UpdateError::Refused.to_string(),
            "update refused by policy"
        );
        assert_eq!(
            UpdateError::ServFail("txn".into()).to_string(),
            "store failure: txn"
        );
    }
}
