//! CLI argument definitions using clap
//!
//! Commands:
//! - schooldir list [--search <query>]
//! - schooldir add --name .. --address .. --city .. --state .. --contact .. --email .. --image <path>
//! - schooldir validate <same arguments as add>

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::errors::{CliError, CliResult};
use crate::schema::{ImageFile, SchoolInput};

/// schooldir - browse and add schools in a school directory
#[derive(Parser, Debug)]
#[command(name = "schooldir")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Origin of the school API (overrides the config file)
    #[arg(long, global = true, env = "SCHOOLDIR_BASE_URL")]
    pub base_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and list schools
    List {
        /// Only show schools whose name, city or address contains this text
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Validate and submit a new school
    Add(SchoolArgs),

    /// Validate a new school without submitting it
    Validate(SchoolArgs),
}

/// Form fields for a new school.
///
/// Every field defaults to empty so that validation, not clap, reports
/// what is missing.
#[derive(Args, Debug, Clone, Default)]
pub struct SchoolArgs {
    /// School name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    /// 10-digit contact number
    #[arg(long, default_value = "")]
    pub contact: String,

    /// Contact email address
    #[arg(long = "email", alias = "email-id", default_value = "")]
    pub email_id: String,

    /// Path to the school image
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// MIME type of the image (inferred from the extension by default)
    #[arg(long)]
    pub image_type: Option<String>,
}

impl SchoolArgs {
    /// Build the form input, reading the image from disk
    pub fn to_input(&self) -> CliResult<SchoolInput> {
        let image = match &self.image {
            Some(path) => Some(
                ImageFile::from_path(path, self.image_type.as_deref()).map_err(|e| {
                    CliError::io_error(format!("Failed to read image {}: {}", path.display(), e))
                })?,
            ),
            None => None,
        };

        Ok(SchoolInput {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            contact: self.contact.clone(),
            email_id: self.email_id.clone(),
            image,
        })
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
