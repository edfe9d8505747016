use super::{load_target, write_records};
use crate::cli::ScanningArgs;
use crate::client::DesignServiceClient;
use crate::config::AppConfig;
use crate::error::Result;
use mutaplex::engine::config::ScanningConfigBuilder;
use mutaplex::workflows::{self, scanning};
use tracing::info;

pub async fn run(args: ScanningArgs, config: &AppConfig) -> Result<()> {
    let target = load_target(&args.io)?;

    let builder = ScanningConfigBuilder::new()
        .library_type(args.library.unwrap_or(config.library_type));
    let builder = match (args.full, args.start, args.end) {
        (false, Some(start), Some(end)) => builder.window(start, end),
        _ => builder.full_sequence(),
    };
    let request_config = builder.build()?;

    let variants = if args.submit.submit {
        let request = scanning::build_request(&target, &request_config)?;
        let client = DesignServiceClient::new(&config.service)?;
        let response = client.scanning(&request).await?;
        workflows::records_from_response(&response)?
    } else {
        scanning::expand(&target, &request_config)?
    };

    info!("Scanning library holds {} variant(s).", variants.len());
    write_records(&variants, args.io.output.as_deref())
}
