//! Session capability trait.
//!
//! One bearer token per authenticated browser session, keyed by the
//! session id carried in the signed cookie. Created at the OAuth
//! callback, read on every authenticated request, cleared on logout.
//! There is no persistence: a process restart drops all sessions.

use secrecy::SecretString;

/// Associates a session id with an access token.
pub trait TokenStore: Send + Sync {
    /// Look up the token for a session, if one exists.
    fn get(&self, sid: &str) -> Option<SecretString>;

    /// Associate a token with a session, replacing any previous one.
    fn set(&self, sid: &str, token: SecretString);

    /// Remove the session's token. Clearing an unknown session is a
    /// no-op.
    fn clear(&self, sid: &str);
}
