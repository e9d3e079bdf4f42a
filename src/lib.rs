//! AWS SSM Parameter Resolver
//!
//! Substitutes `{{ssm:name}}` references in a string, or a list of strings,
//! with values from AWS Systems Manager Parameter Store:
//!
//! extract references -> one GetParameters call -> drop SecureString values
//! unless asked for -> replace references -> hand back the input's shape.
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate failure_derive;

#[macro_use]
extern crate log;

extern crate failure;
extern crate regex;
extern crate rusoto_core;
extern crate rusoto_ssm;
extern crate serde;
extern crate serde_json;

pub mod errors;
pub mod input;
pub mod pattern;
pub mod resolver;
pub mod ssm_ops;
pub mod ssm_parameters;

pub use errors::ResolveError;
pub use input::{reshape, SsmInput};
pub use resolver::{resolve, resolve_input, resolve_secure_string, resolve_secure_string_list};
pub use ssm_ops::{ParameterStore, SSMOps};
pub use ssm_parameters::{ParameterType, SSMParameter, SSMParametersRequest, SSMParametersResult, SSMRequestError};
