use secrecy::SecretString;

// -------------------------------------------------------------------------------------------------
// Auth
// -------------------------------------------------------------------------------------------------
/// Supported forms of authentication
pub enum Auth {
    /// No authentication
    Unauthenticated,

    /// Authenticate with a GitHub Personal Access Token, sent as a bearer token
    PersonalAccessToken(SecretString),
}
