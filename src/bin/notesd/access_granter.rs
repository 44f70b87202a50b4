use log::{debug, trace};
use crate::app_constants::BEARER_PREFIX;

/// Decides whether a request may reach a guarded endpoint, given the value
/// of its `Authorization` header.
pub trait AccessGranter: Send + Sync {
    fn is_authorized(&self, auth_header_value: &str) -> bool;
}

pub struct ProductionAccessGranter {
    tokens: Vec<String>,
}

impl ProductionAccessGranter {
    pub fn new(tokens: Vec<String>) -> Self {
        ProductionAccessGranter { tokens }
    }
}

impl AccessGranter for ProductionAccessGranter {
    fn is_authorized(&self, auth_header_value: &str) -> bool {
        let Some(token) = auth_header_value.strip_prefix(BEARER_PREFIX) else {
            debug!("unsupported authorization scheme");
            return false;
        };
        let is_known = self.tokens.iter().any(|known| known == token);
        trace!("bearer token known: {is_known}");
        is_known
    }
}
