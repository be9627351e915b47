use std::sync::Arc;

use tokio::sync::Mutex;

use psyreport_bedrock::service::GenerationService;
use psyreport_export::styles::DocumentStyles;

use crate::session::IntakeSession;

/// Everything the intake commands share.
///
/// The session lock is only held for bookkeeping, never across a model call
/// or a file write.
pub struct IntakeState {
    pub session: Arc<Mutex<IntakeSession>>,
    pub generator: Arc<dyn GenerationService>,
    pub styles: DocumentStyles,
}

impl IntakeState {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self {
            session: Arc::new(Mutex::new(IntakeSession::default())),
            generator,
            styles: DocumentStyles::default(),
        }
    }
}
