use super::{ElectionError, ElectionResult};
use serde::{Deserialize, Serialize};

/// The administrator identity, fixed at election creation. There is no
/// ownership transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminGate {
    admin: String,
}

impl AdminGate {
    pub fn new(admin: &str) -> Self {
        Self {
            admin: admin.to_string(),
        }
    }

    pub fn is_admin(&self, identity: &str) -> bool {
        identity == self.admin
    }

    pub fn require_admin(&self, identity: &str) -> ElectionResult<()> {
        if self.is_admin(identity) {
            Ok(())
        } else {
            Err(ElectionError::NotAuthorized)
        }
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }
}
