use crate::core::errors::Result;
use crate::core::models::session::Session;
use crate::core::models::usage_log::{NewUsageLog, UsageLog};

/// Port for the remote usage-log resource.
///
/// Implementations live in `adapters::http`. Every call takes the session
/// explicitly and reports failures as a tagged `UselogError`.
pub trait LogApi {
    /// Fetch the full collection, in server order.
    fn list_logs(&self, session: &Session) -> Result<Vec<UsageLog>>;

    /// Create a log and return the server's echo of it.
    fn create_log(&self, session: &Session, log: &NewUsageLog) -> Result<UsageLog>;

    /// Fetch a single log by id.
    fn get_log(&self, session: &Session, id: i64) -> Result<UsageLog>;

    /// Delete a log by id, returning the deleted record.
    fn delete_log(&self, session: &Session, id: i64) -> Result<UsageLog>;
}
