pub type Result<T> = std::result::Result<T, super::Error>;
