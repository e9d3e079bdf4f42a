use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "ssm_resolver",
    about = "AWS Parameter Resolver - Substitutes {{ssm:name}} references with AWS SSM Parameter values, written in Rust."
)]
pub struct Opt {
    /// AWS Region
    #[structopt(short = "r", long = "region", default_value = "us-east-1", env = "AWS_REGION")]
    pub region: String,
    /// Custom SSM Endpoint URL
    #[structopt(short = "e", long = "endpoint", env = "SSM_ENDPOINT")]
    pub endpoint: Option<String>,
    /// Decrypt Parameter Value => Also resolves SecureString references
    #[structopt(short = "d", long = "decrypt")]
    pub decrypt: bool,
    /// Quiet Mode => Only Errors and Parameter Output
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,
    /// Fail Safe => On resolution errors output the unresolved input
    #[structopt(short = "f", long = "fail-safe")]
    pub fail_safe: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Resolve references in the given text(s), one output line per text
    #[structopt(name = "resolve", visible_alias = "r")]
    Resolve {
        /// Text containing {{ssm:name}} references
        #[structopt(required = true, min_values = 1)]
        text: Vec<String>,
    },
    /// Get Parameter by Name (or Path)
    #[structopt(name = "get", visible_alias = "g")]
    Get {
        /// Parameter Name
        #[structopt(required = true, min_values = 1, max_values = 10)]
        name: Vec<String>,
    },
    /// Template - Substitute references in <templatein> and write to <templateout> or STDOUT
    #[structopt(name = "template", visible_alias = "t")]
    Template {
        /// Input Template file
        #[structopt(parse(from_os_str))]
        templatein: PathBuf,
        /// Output Template file, stdout if not present
        #[structopt(parse(from_os_str))]
        templateout: Option<PathBuf>,
    },
}
