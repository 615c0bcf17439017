//! Staff role to capability mapping, checked at the HTTP boundary.
//!
//! The role arrives in the `x-staff-role` header, set by the back-office
//! gateway after it has authenticated the user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;

use crate::error::AdvisorError;

pub const ROLE_HEADER: &str = "x-staff-role";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    ViewTrends,
    ViewAlerts,
    ViewRestockPlan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaffRole {
    Admin,
    Manager,
    Storekeeper,
    Sales,
}

impl StaffRole {
    pub fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Admin | Self::Manager | Self::Storekeeper => &[ViewTrends, ViewAlerts, ViewRestockPlan],
            Self::Sales => &[ViewTrends],
        }
    }

    pub fn can(self, capability: Capability) -> bool { self.capabilities().contains(&capability) }

    pub fn require(self, capability: Capability) -> Result<(), AdvisorError> {
        if self.can(capability) { return Ok(()); }
        Err(AdvisorError::Forbidden(format!("{self:?} role cannot {capability:?}")))
    }
}

impl FromStr for StaffRole {
    type Err = AdvisorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "storekeeper" => Ok(Self::Storekeeper),
            "sales" => Ok(Self::Sales),
            other => Err(AdvisorError::Unauthorized(format!("unknown staff role {other:?}"))),
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for StaffRole {
    type Rejection = AdvisorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.headers.get(ROLE_HEADER)
            .ok_or_else(|| AdvisorError::Unauthorized(format!("missing {ROLE_HEADER} header")))?
            .to_str()
            .map_err(|_| AdvisorError::Unauthorized(format!("malformed {ROLE_HEADER} header")))?;
        raw.parse()
    }
}
