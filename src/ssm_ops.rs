use rusoto_core::Region;
use rusoto_ssm::{GetParametersRequest, Parameter, Ssm, SsmClient};
use std::fmt;

use crate::ssm_parameters::{SSMParameter, SSMParametersRequest, SSMParametersResult, SSMRequestError};

/// Anything able to answer a batched GetParameters call.
pub trait ParameterStore {
    fn get_parameters(&self, req: &SSMParametersRequest) -> Result<SSMParametersResult, SSMRequestError>;
}

pub struct SSMOps {
    region: String,
    ssm_client: SsmClient,
}

impl fmt::Debug for SSMOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ region: {} }}", self.region)
    }
}

impl SSMOps {
    pub fn new(region: &str) -> Self {
        SSMOps::with_endpoint(region, None)
    }

    /// A custom endpoint keeps `region` as the signing region name.
    pub fn with_endpoint(region: &str, endpoint: Option<&str>) -> Self {
        let aws_region = match endpoint {
            Some(endpoint) => Region::Custom {
                name: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => parse_region(region),
        };
        SSMOps {
            region: region.to_string(),
            ssm_client: SsmClient::new(aws_region),
        }
    }

    pub fn get_parameters(&self, req: &SSMParametersRequest) -> Result<SSMParametersResult, SSMRequestError> {
        let input = GetParametersRequest {
            names: req.names.clone(),
            with_decryption: req.with_decryption,
        };
        debug!("Calling GetParameters API in {} for {} names", self.region, input.names.len());
        match self.ssm_client.get_parameters(input).sync() {
            Ok(output) => {
                let parameters = output
                    .parameters
                    .unwrap_or_default()
                    .into_iter()
                    .map(to_ssm_parameter)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SSMParametersResult {
                    parameters,
                    invalid_parameters: output.invalid_parameters.unwrap_or_default(),
                })
            }
            Err(err) => {
                error!("Encountered error while calling GetParameters API. Error: {}", err);
                Err(SSMRequestError::new(err.to_string()))
            }
        }
    }
}

impl ParameterStore for SSMOps {
    fn get_parameters(&self, req: &SSMParametersRequest) -> Result<SSMParametersResult, SSMRequestError> {
        SSMOps::get_parameters(self, req)
    }
}

/// Unknown names fall back to the default region, as rusoto itself does.
fn parse_region(region: &str) -> Region {
    region.parse::<Region>().unwrap_or_else(|err| {
        let fallback = Region::default();
        warn!("{}; using region {}", err, fallback.name());
        fallback
    })
}

fn to_ssm_parameter(p: Parameter) -> Result<SSMParameter, SSMRequestError> {
    let name = p
        .name
        .ok_or_else(|| SSMRequestError::new("Invalid format of GetParameters output: parameter without name"))?;
    let p_type = p.type_.unwrap_or_default().parse()?;
    Ok(SSMParameter {
        name,
        p_type,
        value: p.value.unwrap_or_default(),
        version: p.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssm_parameters::ParameterType;

    #[test]
    fn converts_service_parameter() {
        let p = Parameter {
            name: Some("/test/ssm_resolver/param1".to_string()),
            type_: Some("StringList".to_string()),
            value: Some("a,b".to_string()),
            version: Some(3),
            ..Default::default()
        };
        let converted = to_ssm_parameter(p).unwrap();
        assert_eq!(converted.name, "/test/ssm_resolver/param1");
        assert_eq!(converted.p_type, ParameterType::StringList);
        assert_eq!(converted.value, "a,b");
        assert_eq!(converted.version, Some(3));
    }

    #[test]
    fn rejects_unknown_type_and_missing_name() {
        let p = Parameter {
            name: Some("/x".to_string()),
            type_: Some("Blob".to_string()),
            ..Default::default()
        };
        assert!(to_ssm_parameter(p).is_err());

        let p = Parameter {
            type_: Some("String".to_string()),
            ..Default::default()
        };
        assert!(to_ssm_parameter(p).is_err());
    }

    #[test]
    fn misspelled_region_falls_back_to_default() {
        assert_eq!(parse_region("eu-west-1"), Region::EuWest1);
        assert_eq!(parse_region("eu-wset-1"), Region::default());
    }

    #[test]
    fn debug_shows_region_only() {
        let ssm = SSMOps::with_endpoint("us-east-1", Some("http://localhost:4583"));
        assert_eq!(format!("{:?}", ssm), "{ region: us-east-1 }");
    }

    // The tests below talk to AWS and need credentials plus the fixtures under /test/ssm_resolver.

    #[test]
    #[ignore]
    fn get_parameter() {
        let ssm = SSMOps::new("us-east-1");
        let names = vec!["/test/ssm_resolver/param1".to_string()];
        let result = ssm.get_parameters(&SSMParametersRequest { names, with_decryption: Some(true) });
        assert!(result.is_ok());
        let unw_result = result.unwrap();
        assert!(!unw_result.parameters.is_empty());
        assert!(unw_result.invalid_parameters.is_empty());
    }

    #[test]
    #[ignore]
    fn get_parameter_and_invalid() {
        let ssm = SSMOps::new("us-east-1");
        let names = vec!["/test/ssm_resolver/param1".to_string(), "/dev/asdasdasd".to_string()];
        let result = ssm.get_parameters(&SSMParametersRequest { names, with_decryption: Some(true) });
        assert!(result.is_ok());
        let unw_result = result.unwrap();
        assert_eq!(unw_result.parameters.len(), 1);
        assert_eq!(unw_result.invalid_parameters, vec!["/dev/asdasdasd".to_string()]);
    }
}
