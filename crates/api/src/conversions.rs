use crate::models::{OrgAccessResponse, TokenStatusResponse};
use services::github::{OrgAccess, TokenCheck};

impl From<OrgAccess> for OrgAccessResponse {
    fn from(access: OrgAccess) -> Self {
        Self {
            org: access.org,
            access: access.access,
            error: access.error,
        }
    }
}

impl From<TokenCheck> for TokenStatusResponse {
    fn from(check: TokenCheck) -> Self {
        Self {
            valid: true,
            user: check.login,
            scopes: check.scopes,
            org_access: check.org_access.map(Into::into),
        }
    }
}
