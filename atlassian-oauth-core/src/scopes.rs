//! # Scope Registry
//!
//! Known permission scopes for Atlassian products. These exist for typing and
//! documentation; any string is accepted wherever a scope is expected, so
//! callers can request scopes this registry does not list.

use std::fmt;

/// Scopes defined by the OAuth 2.0 standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthStandardScope {
  /// Request a refresh token alongside the access token
  OfflineAccess,
}

impl OAuthStandardScope {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::OfflineAccess => "offline_access",
    }
  }
}

/// Classic Jira platform scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JiraScope {
  ReadJiraUser,
  ReadJiraWork,
  WriteJiraWork,
  ManageJiraProject,
  ManageJiraConfiguration,
  ManageJiraWebhook,
}

impl JiraScope {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::ReadJiraUser => "read:jira-user",
      Self::ReadJiraWork => "read:jira-work",
      Self::WriteJiraWork => "write:jira-work",
      Self::ManageJiraProject => "manage:jira-project",
      Self::ManageJiraConfiguration => "manage:jira-configuration",
      Self::ManageJiraWebhook => "manage:jira-webhook",
    }
  }
}

/// Classic Confluence scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfluenceScope {
  ReadContentSummary,
  ReadContentAll,
  WriteContent,
  ReadSpaceSummary,
  WriteSpace,
  ReadUser,
  SearchConfluence,
  ManageConfiguration,
}

impl ConfluenceScope {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::ReadContentSummary => "read:confluence-content.summary",
      Self::ReadContentAll => "read:confluence-content.all",
      Self::WriteContent => "write:confluence-content",
      Self::ReadSpaceSummary => "read:confluence-space.summary",
      Self::WriteSpace => "write:confluence-space",
      Self::ReadUser => "read:confluence-user",
      Self::SearchConfluence => "search:confluence",
      Self::ManageConfiguration => "manage:confluence-configuration",
    }
  }
}

/// Scopes understood by the add-on JWT-bearer authorization server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtlassianDefaultScope {
  Read,
  Write,
  ActAsUser,
}

impl AtlassianDefaultScope {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Read => "READ",
      Self::Write => "WRITE",
      Self::ActAsUser => "ACT_AS_USER",
    }
  }
}

macro_rules! scope_conversions {
  ($($ty:ty),+) => {
    $(
      impl fmt::Display for $ty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
          f.write_str(self.as_str())
        }
      }

      impl From<$ty> for String {
        fn from(scope: $ty) -> Self {
          scope.as_str().to_string()
        }
      }
    )+
  };
}

scope_conversions!(OAuthStandardScope, JiraScope, ConfluenceScope, AtlassianDefaultScope);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_scope_strings() {
    assert_eq!(OAuthStandardScope::OfflineAccess.as_str(), "offline_access");
    assert_eq!(JiraScope::ManageJiraWebhook.as_str(), "manage:jira-webhook");
    assert_eq!(ConfluenceScope::ReadContentAll.to_string(), "read:confluence-content.all");
    assert_eq!(String::from(AtlassianDefaultScope::ActAsUser), "ACT_AS_USER");
  }
}
