//! Permission value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Access level granted by a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Commenter,
    Writer,
    /// Shared-drive managers
    Organizer,
    Owner,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Reader,
        Role::Commenter,
        Role::Writer,
        Role::Organizer,
        Role::Owner,
    ];

    /// Roles that may be granted to a whole domain or to anyone with the link
    pub const BROAD: [Role; 3] = [Role::Reader, Role::Commenter, Role::Writer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Commenter => "commenter",
            Role::Writer => "writer",
            Role::Organizer => "organizer",
            Role::Owner => "owner",
        }
    }

    pub fn names(roles: &[Role]) -> Vec<&'static str> {
        roles.iter().map(Role::as_str).collect()
    }

    /// Check that this role can be granted to a domain or to anyone
    pub fn ensure_broad(self, operation: &str) -> Result<Self, DomainError> {
        if Self::BROAD.contains(&self) {
            Ok(self)
        } else {
            Err(DomainError::RoleNotAllowed {
                role: self.as_str().to_string(),
                operation: operation.to_string(),
            })
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}

/// Who a permission is granted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranteeType {
    User,
    Group,
    Domain,
    Anyone,
}

impl GranteeType {
    pub const ALL: [GranteeType; 4] = [
        GranteeType::User,
        GranteeType::Group,
        GranteeType::Domain,
        GranteeType::Anyone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GranteeType::User => "user",
            GranteeType::Group => "group",
            GranteeType::Domain => "domain",
            GranteeType::Anyone => "anyone",
        }
    }
}

impl FromStr for GranteeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::InvalidGranteeType(s.to_string()))
    }
}

/// Body of a permission to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    pub role: Role,
    #[serde(rename = "type")]
    pub grantee_type: GranteeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_file_discovery: Option<bool>,
}

impl NewPermission {
    /// Grant to a single user or group by e-mail address
    pub fn for_email(
        grantee_type: GranteeType,
        email: &str,
        role: Role,
    ) -> Result<Self, DomainError> {
        if !matches!(grantee_type, GranteeType::User | GranteeType::Group) {
            return Err(DomainError::InvalidGranteeType(format!(
                "{} (sharing by e-mail needs user or group)",
                grantee_type.as_str()
            )));
        }
        let email = crate::core::error::require_non_empty("emailAddress", email)?;
        Ok(Self {
            role,
            grantee_type,
            email_address: Some(email.to_string()),
            domain: None,
            allow_file_discovery: None,
        })
    }

    /// Grant to everyone in a domain
    pub fn for_domain(
        domain: &str,
        role: Role,
        allow_file_discovery: bool,
    ) -> Result<Self, DomainError> {
        let domain = crate::core::error::require_non_empty("domain", domain)?;
        Ok(Self {
            role: role.ensure_broad("domain access")?,
            grantee_type: GranteeType::Domain,
            email_address: None,
            domain: Some(domain.to_string()),
            allow_file_discovery: Some(allow_file_discovery),
        })
    }

    /// Grant to anyone with the link
    pub fn for_anyone(role: Role, allow_file_discovery: bool) -> Result<Self, DomainError> {
        Ok(Self {
            role: role.ensure_broad("public access")?,
            grantee_type: GranteeType::Anyone,
            email_address: None,
            domain: None,
            allow_file_discovery: Some(allow_file_discovery),
        })
    }
}
