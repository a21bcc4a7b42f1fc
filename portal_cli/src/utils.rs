use payment_form::api::payment::SubmitOutcome;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the outcome of a submission; anything but a success is an error
pub fn report_outcome(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Succeeded(result) => print_json(&serde_json::json!({
            "status": "succeeded",
            "transactionId": result.transaction_id(),
            "instrument": result.masked_instrument(),
            "result": result,
        })),
        SubmitOutcome::Invalid(errors) => {
            print_json(&serde_json::json!({ "status": "invalid", "errors": errors }))?;
            anyhow::bail!("{} field(s) need to be corrected", errors.len())
        }
        SubmitOutcome::Failed(message) => anyhow::bail!(message),
        SubmitOutcome::Ignored => anyhow::bail!("a payment is already in flight"),
    }
}
