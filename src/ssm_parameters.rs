use std::fmt;
use std::str::FromStr;

/// Parameter Store value types
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

impl FromStr for ParameterType {
    type Err = SSMRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ParameterType::String),
            "StringList" => Ok(ParameterType::StringList),
            "SecureString" => Ok(ParameterType::SecureString),
            other => Err(SSMRequestError::new(format!("Unknown parameter type: {}", other))),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::String => "String",
            ParameterType::StringList => "StringList",
            ParameterType::SecureString => "SecureString",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SSMParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub p_type: ParameterType,
    pub value: String,
    pub version: Option<i64>,
}

impl SSMParameter {
    pub fn new(name: &str, p_type: ParameterType, value: &str) -> Self {
        SSMParameter {
            name: name.to_string(),
            p_type,
            value: value.to_string(),
            version: None,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.p_type == ParameterType::SecureString
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SSMParametersRequest {
    pub names: Vec<String>,
    pub with_decryption: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SSMParametersResult {
    pub parameters: Vec<SSMParameter>,
    pub invalid_parameters: Vec<String>,
}

#[derive(Debug, Fail)]
#[fail(display = "{}", reason)]
pub struct SSMRequestError {
    pub reason: String,
}

impl SSMRequestError {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        SSMRequestError { reason: reason.into() }
    }
}
