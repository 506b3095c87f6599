//! Convert CLI - submit a diffusers checkpoint conversion from the terminal.
//!
//! Collects the form fields from flags, sends them to the conversion service,
//! and prints the busy, success, or error state as it changes.

mod render;
mod session;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use convert_core::config::{FormConfig, NetworkConfig};
use convert_core::{
    ClientOptions, ControllerOptions, FormField, FormStore, HttpConversionApi,
    SubmissionController, UnexpectedStatusPolicy,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "convert-cli")]
#[command(about = "Convert diffusers from a ckpt model on Hugging Face")]
struct Args {
    /// Hugging Face model ID (required by the service)
    #[arg(long, default_value = "")]
    model_id: String,

    /// Checkpoint file name, e.g. `sd-v1-4.ckpt` (required by the service)
    #[arg(long, default_value = "")]
    filename: String,

    /// Hugging Face access token
    #[arg(long, default_value = "")]
    hf_token: String,

    /// Reference model ID the pipeline configuration is taken from
    #[arg(long, default_value = FormConfig::DEFAULT_REFERENCE_MODEL)]
    reference_model: String,

    /// Conversion service root URL
    #[arg(long, default_value = NetworkConfig::DEFAULT_BASE_URL)]
    base_url: String,

    /// Refuse to submit when model ID or file name is blank
    #[arg(long)]
    require_fields: bool,

    /// Treat a reply without "success" status as a failure
    #[arg(long)]
    fail_on_unexpected_status: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            unexpected_status: if self.fail_on_unexpected_status {
                UnexpectedStatusPolicy::Fail
            } else {
                UnexpectedStatusPolicy::Ignore
            },
            validate_required: self.require_fields,
        }
    }

    fn fill_form(&self, form: &FormStore) {
        form.set_field(FormField::ModelId, self.model_id.as_str());
        form.set_field(FormField::Filename, self.filename.as_str());
        form.set_field(FormField::HfToken, self.hf_token.as_str());
        form.set_field(FormField::ReferenceModel, self.reference_model.as_str());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let form = FormStore::new();
    args.fill_form(&form);

    let api = HttpConversionApi::new(&ClientOptions {
        base_url: args.base_url.clone(),
    })?;
    let controller = SubmissionController::with_options(Arc::new(api), args.controller_options());
    info!("Submitting conversion to {}", args.base_url);

    let mut stdout = std::io::stdout();
    let state = tokio::select! {
        result = session::run_submission(&controller, &form, &mut stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            controller.dispose();
            warn!("Interrupted; the service may still finish the conversion");
            std::process::exit(130);
        }
    };

    std::process::exit(render::exit_code(&state));
}
