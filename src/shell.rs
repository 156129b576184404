use crate::credential::CredentialStore;
use crate::gateway::Gateway;
use crate::types::ToolKind;
use crate::view::ToolView;
use std::sync::Arc;

/// Shown above every tool while no credential is configured.
pub const MISSING_CREDENTIAL_BANNER: &str =
    "Welcome to Wanderer's Atelier! Please set your API Key in settings to start creating.";

/// Explanatory copy under the masked key field in the settings modal.
pub const SETTINGS_NOTICE: &str =
    "Your key is stored locally and used only for API requests.";

/// Application-wide UI state: login gate, tool selection, settings modal and
/// one [`ToolView`] per tool.
///
/// The login gate accepts any submission. It exists to mirror the product
/// flow and provides no security.
#[derive(Debug)]
pub struct Shell {
    credentials: Arc<CredentialStore>,
    authenticated: bool,
    current: ToolKind,
    settings_open: bool,
    settings_input: String,
    views: Vec<ToolView>,
}

impl Shell {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        let settings_input = credentials.get_credential();
        Self {
            credentials,
            authenticated: false,
            current: ToolKind::TextToImage,
            settings_open: false,
            settings_input,
            views: ToolKind::ALL.into_iter().map(ToolView::new).collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self) {
        self.authenticated = true;
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current
    }

    pub fn select_tool(&mut self, kind: ToolKind) {
        self.current = kind;
    }

    // `views` is built from `ToolKind::ALL`, whose order matches the enum's.
    pub fn view(&self, kind: ToolKind) -> &ToolView {
        &self.views[kind as usize]
    }

    pub fn view_mut(&mut self, kind: ToolKind) -> &mut ToolView {
        &mut self.views[kind as usize]
    }

    pub fn current_view(&self) -> &ToolView {
        self.view(self.current)
    }

    pub fn current_view_mut(&mut self) -> &mut ToolView {
        self.view_mut(self.current)
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    /// Opens the settings modal with the stored credential in the input field.
    pub fn open_settings(&mut self) {
        self.settings_input = self.credentials.get_credential();
        self.settings_open = true;
    }

    pub fn settings_input(&self) -> &str {
        &self.settings_input
    }

    pub fn set_settings_input(&mut self, value: impl Into<String>) {
        self.settings_input = value.into();
    }

    /// Closes the modal without saving.
    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    /// Persists the input field as the credential and closes the modal.
    pub fn save_settings(&mut self) {
        self.credentials.set_credential(&self.settings_input);
        self.settings_open = false;
    }

    pub fn has_credential(&self) -> bool {
        self.credentials.has_credential()
    }

    pub fn credential_banner(&self) -> Option<&'static str> {
        if self.has_credential() {
            None
        } else {
            Some(MISSING_CREDENTIAL_BANNER)
        }
    }

    /// Submits the selected tool's view and waits for it. Nothing is sent
    /// before login.
    ///
    /// This borrows the shell for the whole call. A host that must keep
    /// handling events while a request runs should take the request with
    /// `view_mut(kind).begin_submit()`, run `Gateway::generate` on its own
    /// task, and hand the outcome back through `view_mut(kind).complete()`.
    pub async fn generate_current(&mut self, gateway: &Gateway) -> bool {
        if !self.authenticated {
            return false;
        }
        self.current_view_mut().submit(gateway).await
    }
}
