use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::{BrowseError, HandlerSlot, LoadOutcome, Result, StatusReporter, View};

/// Runs one load on `slot`, turning errors and panics into a placeholder
/// view plus a single status message. The failure is still returned.
pub(crate) fn contain(
    slot: &mut HandlerSlot,
    path: &Path,
    reporter: &mut dyn StatusReporter,
) -> Result<()> {
    let name = slot.handler.name();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| slot.handler.load(path)))
        .unwrap_or_else(|payload| {
            Err(BrowseError::Panicked {
                handler: name.to_string(),
                message: panic_message(payload.as_ref()),
            })
        });

    match outcome {
        Ok(LoadOutcome::Rendered(view)) => {
            slot.view = view;
            Ok(())
        }
        Ok(LoadOutcome::Unchanged { notice }) => {
            log::warn!("{name}: {notice}");
            reporter.report(&notice);
            Ok(())
        }
        Err(error) => {
            slot.view = View::placeholder();
            reporter.report(&format!("failed to load {}:\n{error}", path.display()));
            Err(error)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
