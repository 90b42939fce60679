//! Test doubles for the coordinator's collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::coordinator::{SaveCompletion, TabDownloadCoordinator};
use crate::download::{DownloadItem, DownloadManager, DownloadTabDelegate, PermissionQuery};
use crate::error::{Error, Result};
use crate::identifiers::{DownloadId, SaveId, TabId};
use crate::protocol::{SavableResourceLinks, SerializedHtmlData};
use crate::save::{SaveChoice, SaveOperation, SaveOutcome, SaveRequest, SaveService};
use crate::tab::TabContents;

/// Installs a test subscriber once. Filter with `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fixture
// ============================================================================

/// A coordinator wired to mock collaborators.
pub(crate) struct Fixture {
    pub tab: Arc<MockTab>,
    pub service: Arc<MockSaveService>,
    pub delegate: Arc<MockDelegate>,
    pub coordinator: TabDownloadCoordinator,
}

impl Fixture {
    /// Coordinator with an allowing, accepting delegate.
    pub fn new() -> Self {
        let fixture = Self::without_delegate();
        let delegate: Arc<dyn DownloadTabDelegate> = fixture.delegate.clone();
        fixture.coordinator.set_delegate(Some(&delegate));
        fixture
    }

    /// Coordinator whose delegate slot is empty.
    pub fn without_delegate() -> Self {
        init_tracing();

        let tab = MockTab::new(1);
        let service = Arc::new(MockSaveService::default());
        let tab_dyn: Arc<dyn TabContents> = tab.clone();
        let service_dyn: Arc<dyn SaveService> = service.clone();
        let coordinator = TabDownloadCoordinator::new(&tab_dyn, service_dyn);

        Self {
            tab,
            service,
            delegate: MockDelegate::allowing(),
            coordinator,
        }
    }
}

// ============================================================================
// MockTab
// ============================================================================

pub(crate) struct MockTab {
    id: TabId,
    title: Mutex<String>,
    url: Mutex<Option<Url>>,
    mime_type: Mutex<String>,
    stops: AtomicUsize,
    has_manager: AtomicBool,
    pub manager: Arc<MockDownloadManager>,
}

impl MockTab {
    pub fn new(id: u32) -> Arc<Self> {
        Arc::new(Self {
            id: TabId::new(id).expect("valid tab id"),
            title: Mutex::new("Example Domain".to_string()),
            url: Mutex::new(Url::parse("https://example.com/index.html").ok()),
            mime_type: Mutex::new("text/html".to_string()),
            stops: AtomicUsize::new(0),
            has_manager: AtomicBool::new(true),
            manager: Arc::new(MockDownloadManager::default()),
        })
    }

    pub fn set_title(&self, title: &str) {
        *self.title.lock() = title.to_string();
    }

    pub fn set_url(&self, url: Url) {
        *self.url.lock() = Some(url);
    }

    pub fn set_mime_type(&self, mime_type: &str) {
        *self.mime_type.lock() = mime_type.to_string();
    }

    /// Makes `download_manager()` return `None`.
    pub fn remove_download_manager(&self) {
        self.has_manager.store(false, Ordering::SeqCst);
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl TabContents for MockTab {
    fn tab_id(&self) -> TabId {
        self.id
    }

    fn title(&self) -> String {
        self.title.lock().clone()
    }

    fn url(&self) -> Option<Url> {
        self.url.lock().clone()
    }

    fn contents_mime_type(&self) -> String {
        self.mime_type.lock().clone()
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn download_manager(&self) -> Option<Arc<dyn DownloadManager>> {
        if self.has_manager.load(Ordering::SeqCst) {
            Some(self.manager.clone())
        } else {
            None
        }
    }
}

// ============================================================================
// MockDownloadManager
// ============================================================================

#[derive(Default)]
pub(crate) struct MockDownloadManager {
    downloads: Mutex<Vec<Url>>,
}

impl MockDownloadManager {
    pub fn downloads(&self) -> Vec<Url> {
        self.downloads.lock().clone()
    }
}

impl DownloadManager for MockDownloadManager {
    fn download_url(&self, url: &Url, _referrer: Option<&Url>, _tab_id: TabId) {
        self.downloads.lock().push(url.clone());
    }
}

// ============================================================================
// MockSaveService
// ============================================================================

#[derive(Default)]
pub(crate) struct MockSaveService {
    requests: Mutex<Vec<SaveRequest>>,
    completions: Mutex<Vec<SaveCompletion>>,
    operations: Mutex<Vec<Arc<MockOperation>>>,
    reject_next: Mutex<Option<String>>,
    complete_during_start: Mutex<Option<SaveOutcome>>,
}

impl MockSaveService {
    pub fn last_request(&self) -> Option<SaveRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Saves started and not yet finished.
    pub fn pending_completions(&self) -> usize {
        self.completions.lock().len()
    }

    pub fn last_operation(&self) -> Option<Arc<MockOperation>> {
        self.operations.lock().last().cloned()
    }

    /// Makes the next `start` fail.
    pub fn reject_next(&self, reason: &str) {
        *self.reject_next.lock() = Some(reason.to_string());
    }

    /// Makes the next `start` report `outcome` before returning.
    pub fn complete_during_start(&self, outcome: SaveOutcome) {
        *self.complete_during_start.lock() = Some(outcome);
    }

    /// Finishes the most recently started save.
    pub fn finish_last(&self, outcome: SaveOutcome) {
        let completion = self.completions.lock().pop().expect("a save is running");
        completion.finish(outcome);
    }
}

impl SaveService for MockSaveService {
    fn start(
        &self,
        request: SaveRequest,
        completion: SaveCompletion,
    ) -> Result<Arc<dyn SaveOperation>> {
        let id = request.id;
        self.requests.lock().push(request);

        let rejection = self.reject_next.lock().take();
        if let Some(reason) = rejection {
            return Err(Error::save_rejected(reason));
        }

        let operation = Arc::new(MockOperation::new(id));
        self.operations.lock().push(operation.clone());

        let immediate = self.complete_during_start.lock().take();
        match immediate {
            Some(outcome) => completion.finish(outcome),
            None => self.completions.lock().push(completion),
        }

        Ok(operation)
    }
}

// ============================================================================
// MockOperation
// ============================================================================

pub(crate) struct MockOperation {
    id: SaveId,
    links: Mutex<Vec<SavableResourceLinks>>,
    html: Mutex<Vec<String>>,
}

impl MockOperation {
    fn new(id: SaveId) -> Self {
        Self {
            id,
            links: Mutex::new(Vec::new()),
            html: Mutex::new(Vec::new()),
        }
    }

    pub fn link_batches(&self) -> usize {
        self.links.lock().len()
    }

    pub fn html_chunks(&self) -> Vec<String> {
        self.html.lock().clone()
    }
}

impl SaveOperation for MockOperation {
    fn id(&self) -> SaveId {
        self.id
    }

    fn on_savable_resource_links(&self, links: &SavableResourceLinks) {
        self.links.lock().push(links.clone());
    }

    fn on_serialized_html_data(&self, data: &SerializedHtmlData) {
        self.html.lock().push(data.data.clone());
    }
}

// ============================================================================
// MockDelegate
// ============================================================================

/// How [`MockDelegate`] answers save prompts.
#[derive(Debug, Clone)]
pub(crate) enum PromptResponse {
    Accept,
    Cancel,
    Replace(SaveChoice),
}

pub(crate) struct MockDelegate {
    allow: AtomicBool,
    queries: Mutex<Vec<PermissionQuery>>,
    started: Mutex<Vec<DownloadId>>,
    gestures: AtomicUsize,
    prompts: Mutex<Vec<SaveChoice>>,
    prompt_response: Mutex<PromptResponse>,
}

impl MockDelegate {
    fn with_decision(allow: bool) -> Arc<Self> {
        Arc::new(Self {
            allow: AtomicBool::new(allow),
            queries: Mutex::new(Vec::new()),
            started: Mutex::new(Vec::new()),
            gestures: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            prompt_response: Mutex::new(PromptResponse::Accept),
        })
    }

    pub fn allowing() -> Arc<Self> {
        Self::with_decision(true)
    }

    pub fn denying() -> Arc<Self> {
        Self::with_decision(false)
    }

    pub fn set_allow(&self, allow: bool) {
        self.allow.store(allow, Ordering::SeqCst);
    }

    pub fn respond_to_prompt(&self, response: PromptResponse) {
        *self.prompt_response.lock() = response;
    }

    pub fn queries(&self) -> Vec<PermissionQuery> {
        self.queries.lock().clone()
    }

    pub fn started(&self) -> Vec<DownloadId> {
        self.started.lock().clone()
    }

    pub fn gesture_count(&self) -> usize {
        self.gestures.load(Ordering::SeqCst)
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn last_suggestion(&self) -> Option<SaveChoice> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl DownloadTabDelegate for MockDelegate {
    async fn can_download(&self, query: PermissionQuery) -> bool {
        self.queries.lock().push(query);
        self.allow.load(Ordering::SeqCst)
    }

    fn on_start_download(&self, download: &DownloadItem, _tab_id: TabId) {
        self.started.lock().push(download.id);
    }

    fn on_user_gesture(&self, _tab_id: TabId) {
        self.gestures.fetch_add(1, Ordering::SeqCst);
    }

    fn choose_save_destination(&self, suggested: SaveChoice, _tab_id: TabId) -> Option<SaveChoice> {
        self.prompts.lock().push(suggested.clone());
        match self.prompt_response.lock().clone() {
            PromptResponse::Accept => Some(suggested),
            PromptResponse::Cancel => None,
            PromptResponse::Replace(choice) => Some(choice),
        }
    }
}

// ============================================================================
// GatedDelegate
// ============================================================================

/// Delegate whose permission answer arrives later through a channel.
pub(crate) struct GatedDelegate {
    gate: Mutex<Option<oneshot::Receiver<bool>>>,
    calls: AtomicUsize,
}

impl GatedDelegate {
    pub fn new() -> (Arc<Self>, oneshot::Sender<bool>) {
        let (tx, rx) = oneshot::channel();
        let delegate = Arc::new(Self {
            gate: Mutex::new(Some(rx)),
            calls: AtomicUsize::new(0),
        });
        (delegate, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DownloadTabDelegate for GatedDelegate {
    async fn can_download(&self, _query: PermissionQuery) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().take();
        match gate {
            Some(rx) => rx.await.unwrap_or(false),
            None => false,
        }
    }

    fn on_start_download(&self, _download: &DownloadItem, _tab_id: TabId) {}
}
