use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    auth::AuthorizationFlow,
    error::{Error, Result},
};

/// Permission strings understood by the Spotify authorization server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    UgcImageUpload,
    UserReadPlaybackState,
    UserModifyPlaybackState,
    UserReadCurrentlyPlaying,
    AppRemoteControl,
    Streaming,
    PlaylistReadPrivate,
    PlaylistReadCollaborative,
    PlaylistModifyPrivate,
    PlaylistModifyPublic,
    UserFollowModify,
    UserFollowRead,
    UserReadPlaybackPosition,
    UserTopRead,
    UserReadRecentlyPlayed,
    UserLibraryModify,
    UserLibraryRead,
    UserReadEmail,
    UserReadPrivate,
    UserSoaLink,
    UserSoaUnlink,
    UserManageEntitlements,
    UserManagePartner,
    UserCreatePartner,
}

impl Scope {
    pub const ALL: [Scope; 24] = [
        Scope::UgcImageUpload,
        Scope::UserReadPlaybackState,
        Scope::UserModifyPlaybackState,
        Scope::UserReadCurrentlyPlaying,
        Scope::AppRemoteControl,
        Scope::Streaming,
        Scope::PlaylistReadPrivate,
        Scope::PlaylistReadCollaborative,
        Scope::PlaylistModifyPrivate,
        Scope::PlaylistModifyPublic,
        Scope::UserFollowModify,
        Scope::UserFollowRead,
        Scope::UserReadPlaybackPosition,
        Scope::UserTopRead,
        Scope::UserReadRecentlyPlayed,
        Scope::UserLibraryModify,
        Scope::UserLibraryRead,
        Scope::UserReadEmail,
        Scope::UserReadPrivate,
        Scope::UserSoaLink,
        Scope::UserSoaUnlink,
        Scope::UserManageEntitlements,
        Scope::UserManagePartner,
        Scope::UserCreatePartner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::UgcImageUpload => "ugc-image-upload",
            Scope::UserReadPlaybackState => "user-read-playback-state",
            Scope::UserModifyPlaybackState => "user-modify-playback-state",
            Scope::UserReadCurrentlyPlaying => "user-read-currently-playing",
            Scope::AppRemoteControl => "app-remote-control",
            Scope::Streaming => "streaming",
            Scope::PlaylistReadPrivate => "playlist-read-private",
            Scope::PlaylistReadCollaborative => "playlist-read-collaborative",
            Scope::PlaylistModifyPrivate => "playlist-modify-private",
            Scope::PlaylistModifyPublic => "playlist-modify-public",
            Scope::UserFollowModify => "user-follow-modify",
            Scope::UserFollowRead => "user-follow-read",
            Scope::UserReadPlaybackPosition => "user-read-playback-position",
            Scope::UserTopRead => "user-top-read",
            Scope::UserReadRecentlyPlayed => "user-read-recently-played",
            Scope::UserLibraryModify => "user-library-modify",
            Scope::UserLibraryRead => "user-library-read",
            Scope::UserReadEmail => "user-read-email",
            Scope::UserReadPrivate => "user-read-private",
            Scope::UserSoaLink => "user-soa-link",
            Scope::UserSoaUnlink => "user-soa-unlink",
            Scope::UserManageEntitlements => "user-manage-entitlements",
            Scope::UserManagePartner => "user-manage-partner",
            Scope::UserCreatePartner => "user-create-partner",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Scope::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s.trim())
            .ok_or_else(|| format!("unknown scope: {}", s))
    }
}

/// Space-separated form used in the `scope` query parameter.
pub fn join_scopes(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a space- or comma-separated scope list, e.g. from configuration.
pub fn parse_scopes(value: &str) -> std::result::Result<Vec<Scope>, String> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(Scope::from_str)
        .collect()
}

/// Verifies that `flow` was granted every scope in `required`.
///
/// Runs before any network call. Client credentials carry no user context and
/// therefore no scopes at all, which makes any scope-gated operation
/// unsupported for them.
pub fn check_scopes(flow: &AuthorizationFlow, required: &[Scope]) -> Result<()> {
    let Some(granted) = flow.scopes() else {
        return Err(Error::UnsupportedOperation);
    };

    let missing: Vec<Scope> = required
        .iter()
        .filter(|scope| !granted.contains(scope))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::IncompleteScopes(missing))
    }
}
