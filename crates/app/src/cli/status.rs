use bloom::status::{OrderStatus, next_status};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct NextStatusArgs {
    /// Current status, e.g. `processing`
    status: String,
}

pub(crate) fn run(args: &NextStatusArgs) -> Result<(), String> {
    let next = next_status(&args.status);

    match next.parse::<OrderStatus>() {
        Ok(status) => println!("{next} ({})", status.label()),
        Err(_) => println!("{next}"),
    }

    Ok(())
}
