use crate::ssm_parameters::SSMRequestError;

/// Every way a resolution can fail. The caller's input is borrowed by all
/// entry points, so it is still intact when one of these comes back.
#[derive(Debug, Fail)]
pub enum ResolveError {
    #[fail(display = "Invalid regular expression used to resolve ssm parameters. Error: {}", _0)]
    PatternCompile(#[cause] regex::Error),

    #[fail(display = "Encountered error while calling GetParameters API. Error: {}", _0)]
    LookupService(#[cause] SSMRequestError),

    /// `missing` holds requested names the store neither returned nor reported invalid.
    #[fail(display = "Input contains invalid ssm parameters {:?} (unaccounted: {:?})", invalid, missing)]
    InvalidParameters { invalid: Vec<String>, missing: Vec<String> },

    #[fail(display = "Resolved value does not match the input shape. Error: {}", _0)]
    Reshape(#[cause] serde_json::Error),
}

impl From<regex::Error> for ResolveError {
    fn from(err: regex::Error) -> Self {
        ResolveError::PatternCompile(err)
    }
}

impl From<SSMRequestError> for ResolveError {
    fn from(err: SSMRequestError) -> Self {
        ResolveError::LookupService(err)
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::Reshape(err)
    }
}
