#[macro_use]
extern crate log;

use std::fs;
use std::io::{self, Write};
use std::process;

use structopt::StructOpt;

use ssm_resolver::{reshape, resolve_input, ParameterStore, ResolveError, SSMOps, SSMParametersRequest, SsmInput};

use args::*;

mod args;

/// AWS SSM Resolver
/// Command Line
/// --region, -r => Set region for lookups (or AWS_REGION)
/// --endpoint, -e => Custom SSM endpoint (or SSM_ENDPOINT)
/// --decrypt, -d => Decrypt values, resolve SecureString references
/// --quiet, -q => No unnecessary output
/// --fail-safe, -f => Print the unresolved input when resolution fails
/// resolve, r TEXT... => resolve references in TEXT, one line per TEXT
/// get, g PARAM => get param by name(path)
/// template, t, FILENAME_IN.tpl [FILENAME_OUT.ext] => resolve references in a template file
fn main() {
    // Will exit with error code 1 even for VersionDisplayed and HelpDisplayed
    let options = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(options) => options,
        Err(err) => {
            println!("{}", err.message);
            process::exit(1)
        }
    };

    init_logger(options.quiet);

    let ssm = SSMOps::with_endpoint(&options.region, options.endpoint.as_deref());

    let stdout = io::stdout();
    if let Err(err) = run(&options, &ssm, &mut stdout.lock()) {
        error!("{}", err);
        process::exit(1)
    }
}

fn init_logger(quiet: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(quiet))).init();
}

/// Default filter when RUST_LOG is unset.
fn log_level(quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        "info"
    }
}

fn run<S: ParameterStore, W: Write>(options: &Opt, ssm: &S, out: &mut W) -> Result<(), failure::Error> {
    match &options.cmd {
        Command::Resolve { text } => {
            let output = resolve_with_policy(ssm, &input_from_texts(text), options)?;
            for line in output.elements() {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Get { name } => {
            let result = ssm.get_parameters(&SSMParametersRequest {
                names: name.clone(),
                with_decryption: Some(options.decrypt),
            })?;
            for p in &result.parameters {
                writeln!(out, "{}", serde_json::to_string(p)?)?;
            }
            if !result.invalid_parameters.is_empty() {
                warn!("Invalid Parameters: {}", result.invalid_parameters.join(", "));
            }
        }
        Command::Template { templatein, templateout } => {
            let template = fs::read_to_string(templatein)?;
            let resolved = resolve_with_policy(ssm, &SsmInput::Scalar(template), options)?;
            let output: String = reshape(resolved.into_value())?;
            match templateout {
                Some(path) => {
                    fs::write(path, output)?;
                    info!("Template written to {}", path.display());
                }
                None => write!(out, "{}", output)?,
            }
        }
    }
    Ok(())
}

/// A single text resolves as a scalar, several as a list.
fn input_from_texts(texts: &[String]) -> SsmInput {
    match texts {
        [single] => SsmInput::Scalar(single.clone()),
        _ => SsmInput::List(texts.to_vec()),
    }
}

fn resolve_with_policy<S: ParameterStore>(ssm: &S, input: &SsmInput, options: &Opt) -> Result<SsmInput, ResolveError> {
    match resolve_input(ssm, input, options.decrypt) {
        Err(err) if options.fail_safe => {
            warn!("{}; using unresolved input", err);
            Ok(input.clone())
        }
        result => result,
    }
}
