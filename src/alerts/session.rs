//! One interactive run: prompt, toggle, status lines

use std::io::{BufRead, Write};

use super::prompt::{prompt_action, PromptError};
use super::report::ToggleReport;
use super::toggler::AlertToggler;
use crate::monitor::{LogSearchAlertClient, MetricAlertClient};

/// Ask for the action and apply it to every configured alert
///
/// Returns `Ok(None)` when the answer was rejected; no client is called in
/// that case. Alert failures end up in the report, only I/O on `input` or
/// `output` is an error.
pub async fn run_interactive<M, L, R, W>(
    toggler: &AlertToggler<M, L>,
    input: &mut R,
    output: &mut W,
) -> Result<Option<ToggleReport>, PromptError>
where
    M: MetricAlertClient,
    L: LogSearchAlertClient,
    R: BufRead,
    W: Write,
{
    let action = match prompt_action(input, output)? {
        Some(action) => action,
        None => return Ok(None),
    };

    writeln!(
        output,
        "Checking and {} alerts:",
        action.progressive().to_lowercase()
    )?;

    let report = toggler
        .run_with(action, |outcome| writeln!(output, "{}", outcome))
        .await?;

    writeln!(output, "{}", report.summary())?;
    output.flush()?;
    Ok(Some(report))
}
