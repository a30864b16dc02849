use crate::core::errors::Result;
use crate::core::models::session::Session;

/// Port for the locally persisted token.
pub trait SessionStore {
    /// Load the stored session, `None` when nobody is logged in.
    fn load(&self) -> Result<Option<Session>>;

    /// Persist a session, replacing any previous one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Forget the stored session.
    fn clear(&self) -> Result<()>;
}
