use super::{fill_ledger, load_target, write_records};
use crate::cli::CustomArgs;
use crate::client::DesignServiceClient;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, MutationArg};
use mutaplex::engine::config::CustomRequestConfigBuilder;
use mutaplex::engine::ledger::MutationLedger;
use mutaplex::workflows::{self, custom};
use tracing::info;

pub async fn run(args: CustomArgs, config: &AppConfig) -> Result<()> {
    let edits = args
        .mutations
        .iter()
        .map(|spec| parser::parse_mutation(spec))
        .collect::<std::result::Result<Vec<MutationArg>, _>>()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let target = load_target(&args.io)?;
    let mut ledger = MutationLedger::custom();
    let rejected = fill_ledger(&mut ledger, &target, &edits);
    if rejected > 0 {
        println!(
            "{} of {} mutation(s) rejected; continuing with {}.",
            rejected,
            edits.len(),
            ledger.len()
        );
    }

    let request_config = CustomRequestConfigBuilder::new()
        .generation_mode(args.mode.unwrap_or(config.custom_mode))
        .build()?;

    let variants = if args.submit.submit {
        let request = custom::build_request(&target, &ledger, &request_config)?;
        let client = DesignServiceClient::new(&config.service)?;
        let response = client.custom(&request).await?;
        workflows::records_from_response(&response)?
    } else {
        custom::expand(&target, &ledger, &request_config)?
    };

    info!("Custom library holds {} variant(s).", variants.len());
    write_records(&variants, args.io.output.as_deref())
}
