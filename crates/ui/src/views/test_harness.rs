use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::Router;
use practice_core::model::Table;
use services::{LoadedTable, PracticeService, Sampler, SessionId, TableSource};
use storage::{StaticTableLoader, Storage};

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::PracticeTestHandles;

pub const DEFAULT_FILE: &str = "Chinese practice homework_250503.xlsx";

#[derive(Clone)]
struct TestApp {
    service: Arc<PracticeService>,
    session: SessionId,
}

impl UiApp for TestApp {
    fn practice_service(&self) -> Arc<PracticeService> {
        Arc::clone(&self.service)
    }

    fn default_source(&self) -> TableSource {
        TableSource::path(DEFAULT_FILE)
    }

    fn session_id(&self) -> SessionId {
        self.session
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: PracticeTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<Route> {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub service: Arc<PracticeService>,
    pub session: SessionId,
    pub handles: PracticeTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Hand a picked file's outcome to the page, as the file input would.
    pub async fn upload(&mut self, outcome: Result<TableSource, String>) {
        let accept_upload = self.handles.accept_upload();
        self.dom.in_runtime(|| accept_upload.call(outcome));
        drive_dom(&mut self.dom);
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn load_default(&self) -> LoadedTable {
        self.service
            .load_table(&TableSource::path(DEFAULT_FILE))
            .expect("load default table")
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness whose default file resolves to `table`, or is missing when `None`.
pub fn setup_view_harness(table: Option<Table>, sampler: Sampler) -> ViewHarness {
    let loader = match table {
        Some(table) => StaticTableLoader::new().with_table(DEFAULT_FILE, table),
        None => StaticTableLoader::new(),
    };
    setup_view_harness_with_loader(loader, sampler)
}

pub fn setup_view_harness_with_loader(loader: StaticTableLoader, sampler: Sampler) -> ViewHarness {
    let storage = Storage::with_loader(Arc::new(loader));
    let service = Arc::new(PracticeService::from_storage(&storage).with_sampler(sampler));
    let session = SessionId::new();
    let handles = PracticeTestHandles::default();

    let app = Arc::new(TestApp {
        service: Arc::clone(&service),
        session,
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        service,
        session,
        handles,
    }
}
