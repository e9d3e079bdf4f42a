use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::errors::ResolveError;
use crate::input::{reshape, SsmInput};
use crate::pattern::{parameter_name, reference_pattern};
use crate::ssm_ops::ParameterStore;
use crate::ssm_parameters::{SSMParameter, SSMParametersRequest, SSMParametersResult};

/// Raw reference text, as found in the input, to the parameter it resolves to.
pub type ResolvedMap = HashMap<String, SSMParameter>;

/// A `{{ssm:name}}` occurrence found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub raw: String,
    pub name: String,
}

/// Resolves ssm parameters of the format `{{ssm:*}}` in a string or a list
/// of strings. Any other value comes back unchanged.
pub fn resolve<S>(store: &S, input: &Value, resolve_secure_string: bool) -> Result<Value, ResolveError>
where
    S: ParameterStore + ?Sized,
{
    match SsmInput::from_value(input) {
        Some(typed) => Ok(resolve_input(store, &typed, resolve_secure_string)?.into_value()),
        None => {
            debug!("Input is neither a string nor a list of strings, skipping ssm parameter resolution");
            Ok(input.clone())
        }
    }
}

/// Resolves the ssm parameters present in `input`, secure strings included.
pub fn resolve_secure_string<S>(store: &S, input: &str) -> Result<String, ResolveError>
where
    S: ParameterStore + ?Sized,
{
    let output = resolve(store, &Value::String(input.to_string()), true)?;
    reshape(output)
}

/// Same as `resolve_secure_string`, element by element.
pub fn resolve_secure_string_list<S>(store: &S, input: &[String]) -> Result<Vec<String>, ResolveError>
where
    S: ParameterStore + ?Sized,
{
    let output = resolve(store, &Value::from(input.to_vec()), true)?;
    reshape(output)
}

pub fn resolve_input<S>(store: &S, input: &SsmInput, resolve_secure_string: bool) -> Result<SsmInput, ResolveError>
where
    S: ParameterStore + ?Sized,
{
    let pattern = reference_pattern(None)?;

    let references = extract_references(input, &pattern);
    if references.is_empty() {
        return Ok(input.clone());
    }

    let resolved = get_parameter_values(store, &references, resolve_secure_string)?;

    Ok(replace_references(input, &pattern, &resolved))
}

/// Every reference in discovery order, duplicates kept.
pub fn extract_references(input: &SsmInput, pattern: &Regex) -> Vec<Reference> {
    input
        .elements()
        .into_iter()
        .flat_map(|element| pattern.find_iter(element))
        .filter_map(|m| {
            let raw = m.as_str();
            parameter_name(pattern, raw).map(|name| Reference {
                raw: raw.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Looks up all referenced names in one GetParameters call and maps each
/// raw reference to the parameter satisfying it.
pub fn get_parameter_values<S>(
    store: &S,
    references: &[Reference],
    resolve_secure_string: bool,
) -> Result<ResolvedMap, ResolveError>
where
    S: ParameterStore + ?Sized,
{
    info!("Resolving SSM parameters");

    let mut seen = HashSet::new();
    let names: Vec<String> = references
        .iter()
        .filter(|r| seen.insert(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect();

    let request = SSMParametersRequest {
        names,
        with_decryption: Some(true),
    };
    debug!("Calling GetParameters API with params - {:?}", request.names);
    let result = store.get_parameters(&request)?;

    reconcile(&request.names, &result)?;
    if !result.invalid_parameters.is_empty() {
        warn!("Leaving invalid ssm parameters unresolved: {:?}", result.invalid_parameters);
    }

    let mut resolved = ResolvedMap::new();
    for parameter in result.parameters {
        if !should_resolve(&parameter, resolve_secure_string) {
            debug!("Skipping secure parameter {}", parameter.name);
            continue;
        }

        let scoped = reference_pattern(Some(&parameter.name))?;
        for reference in references {
            if scoped.is_match(&reference.raw) {
                resolved.insert(reference.raw.clone(), parameter.clone());
            }
        }
    }

    Ok(resolved)
}

/// Secure parameters resolve only on explicit request.
pub fn should_resolve(parameter: &SSMParameter, resolve_secure_string: bool) -> bool {
    resolve_secure_string || !parameter.is_secure()
}

/// Every requested name must come back either as a parameter or as an
/// invalid name, and the counts must add up.
fn reconcile(names: &[String], result: &SSMParametersResult) -> Result<(), ResolveError> {
    let returned: HashSet<&str> = result
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .chain(result.invalid_parameters.iter().map(String::as_str))
        .collect();
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !returned.contains(name.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && names.len() == result.parameters.len() + result.invalid_parameters.len() {
        return Ok(());
    }

    let err = ResolveError::InvalidParameters {
        invalid: result.invalid_parameters.clone(),
        missing,
    };
    debug!("{}", err);
    Err(err)
}

/// Swaps each resolved reference for its value. Unresolved references stay.
pub fn replace_references(input: &SsmInput, pattern: &Regex, resolved: &ResolvedMap) -> SsmInput {
    input.map(|element| {
        pattern
            .replace_all(element, |caps: &Captures<'_>| {
                let raw = &caps[0];
                match resolved.get(raw) {
                    Some(parameter) => parameter.value.clone(),
                    None => raw.to_string(),
                }
            })
            .into_owned()
    })
}
