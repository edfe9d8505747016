use super::{fill_ledger, load_target, write_records};
use crate::cli::SaturationArgs;
use crate::client::DesignServiceClient;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, MutationArg};
use mutaplex::engine::config::SaturationConfigBuilder;
use mutaplex::engine::ledger::MutationLedger;
use mutaplex::workflows::{self, saturation};
use tracing::info;

pub async fn run(args: SaturationArgs, config: &AppConfig) -> Result<()> {
    let sites = args
        .sites
        .iter()
        .map(|spec| parser::parse_site(spec))
        .collect::<std::result::Result<Vec<MutationArg>, _>>()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let target = load_target(&args.io)?;
    let mut ledger = MutationLedger::saturation();
    let rejected = fill_ledger(&mut ledger, &target, &sites);
    if rejected > 0 {
        println!(
            "{} of {} site(s) rejected; continuing with {}.",
            rejected,
            sites.len(),
            ledger.len()
        );
    }

    // Flags can only switch these on; the config file decides otherwise.
    let request_config = SaturationConfigBuilder::new()
        .generation_mode(args.mode.unwrap_or(config.saturation.generation_mode))
        .exclude_stops(args.exclude_stops || config.saturation.exclude_stops)
        .include_original(args.include_original || config.saturation.include_original)
        .build()?;

    let variants = if args.submit.submit {
        let request = saturation::build_request(&target, &ledger, &request_config)?;
        let client = DesignServiceClient::new(&config.service)?;
        let response = client.saturation(&request).await?;
        workflows::records_from_response(&response)?
    } else {
        saturation::expand(&target, &ledger, &request_config)?
    };

    info!("Saturation library holds {} variant(s).", variants.len());
    write_records(&variants, args.io.output.as_deref())
}
