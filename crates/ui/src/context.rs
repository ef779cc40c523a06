use std::sync::Arc;

use services::{PracticeService, SessionId, TableSource};

pub trait UiApp: Send + Sync {
    fn practice_service(&self) -> Arc<PracticeService>;
    /// The spreadsheet to open before the user uploads anything.
    fn default_source(&self) -> TableSource;
    /// The session this window practices under.
    fn session_id(&self) -> SessionId;
}

#[derive(Clone)]
pub struct AppContext {
    practice_service: Arc<PracticeService>,
    default_source: TableSource,
    session_id: SessionId,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            practice_service: app.practice_service(),
            default_source: app.default_source(),
            session_id: app.session_id(),
        }
    }

    #[must_use]
    pub fn practice_service(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice_service)
    }

    #[must_use]
    pub fn default_source(&self) -> TableSource {
        self.default_source.clone()
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
///
/// Called by the composition root (`crates/app`), which provides the result
/// as root context.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{StaticTableLoader, Storage};

    struct FixedApp {
        service: Arc<PracticeService>,
        session: SessionId,
    }

    impl UiApp for FixedApp {
        fn practice_service(&self) -> Arc<PracticeService> {
            Arc::clone(&self.service)
        }

        fn default_source(&self) -> TableSource {
            TableSource::path("homework.xlsx")
        }

        fn session_id(&self) -> SessionId {
            self.session
        }
    }

    #[test]
    fn context_carries_app_wiring() {
        let storage = Storage::with_loader(Arc::new(StaticTableLoader::new()));
        let service = Arc::new(PracticeService::from_storage(&storage));
        let session = SessionId::new();
        let app: Arc<dyn UiApp> = Arc::new(FixedApp {
            service: Arc::clone(&service),
            session,
        });

        let ctx = build_app_context(&app);
        assert_eq!(ctx.session_id(), session);
        assert_eq!(ctx.default_source().label(), "homework.xlsx");
        assert!(Arc::ptr_eq(&ctx.practice_service(), &service));
        assert_eq!(ctx.clone().session_id(), session);
    }
}
