// -------------------------------------------------------------------------------------------------
// Error
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub enum Error {
    /// The configured base URL cannot have path components appended to it
    UrlBaseError(url::Url),
    UrlSlashError(String),
    ReqwestError(reqwest::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UrlBaseError(u) => write!(f, "error building URL: {u} cannot be used as a base URL"),
            Error::UrlSlashError(p) => write!(f, "error building URL: component {p:?} contains a slash"),
            Error::ReqwestError(e) => write!(f, "error making request: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UrlBaseError(_) => None,
            Error::UrlSlashError(_) => None,
            Error::ReqwestError(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ReqwestError(e)
    }
}
