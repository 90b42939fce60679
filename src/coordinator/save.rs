//! Save initiation: full page, single resource, explicit destination.

use std::path::PathBuf;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::SaveId;
use crate::prefs::SavePrefs;
use crate::save::naming;
use crate::save::{
    SaveChoice, SaveDestination, SaveOrigin, SavePageType, SaveRequest, SaveScope,
};
use crate::tab::TabContents;

use super::{SaveCompletion, TabDownloadCoordinator};

// ============================================================================
// TabDownloadCoordinator - Save
// ============================================================================

impl TabDownloadCoordinator {
    /// Saves the tab's current document.
    ///
    /// The destination comes from the save preferences and the tab title,
    /// confirmed through the delegate when prompting is enabled. Contents
    /// the save service cannot serialize are downloaded instead. Ignored
    /// while another save is in progress.
    pub fn on_save_page(&self) {
        if let Err(e) = self.save_current_page() {
            self.log_save_error("page", &e);
        }
    }

    /// Saves the single resource at `url`, which may be a sub-frame.
    ///
    /// Same destination resolution and concurrency rule as
    /// [`on_save_page`](Self::on_save_page).
    pub fn on_save_url(&self, url: &Url) {
        if let Err(e) = self.save_resource(url) {
            self.log_save_error("resource", &e);
        }
    }

    /// Saves the page to exactly `main_file` and `dir_path`.
    ///
    /// Bypasses prompting and file name sanitation, for deterministic
    /// automated use. Returns `true` once the save service accepted the
    /// operation, `false` if a save is already running or the service
    /// rejected the paths.
    pub fn save_page(
        &self,
        main_file: impl Into<PathBuf>,
        dir_path: impl Into<PathBuf>,
        save_type: SavePageType,
    ) -> bool {
        match self.try_save_page(main_file, dir_path, save_type) {
            Ok(_) => true,
            Err(e) => {
                self.log_save_error("explicit", &e);
                false
            }
        }
    }

    /// [`save_page`](Self::save_page) reporting why a save did not start.
    ///
    /// # Errors
    ///
    /// - [`Error::SaveInProgress`] if a save is already running
    /// - [`Error::TabClosed`] if the tab is gone
    /// - whatever the save service returns from `start`
    pub fn try_save_page(
        &self,
        main_file: impl Into<PathBuf>,
        dir_path: impl Into<PathBuf>,
        save_type: SavePageType,
    ) -> Result<SaveId> {
        let tab = self.tab()?;
        self.ensure_idle()?;
        tab.stop();

        let destination = SaveDestination::new(main_file, dir_path);
        self.start_save(
            SaveScope::Page,
            tab.url(),
            SaveChoice::new(destination, save_type),
            SaveOrigin::Explicit,
        )
    }

    /// Saves the page where the preferences say, without prompting.
    ///
    /// Returns the tab title the file name was derived from.
    ///
    /// # Errors
    ///
    /// As [`try_save_page`](Self::try_save_page).
    pub fn save_page_based_on_default_prefs(&self) -> Result<String> {
        let tab = self.tab()?;
        self.ensure_idle()?;
        tab.stop();

        let prefs = self.save_prefs();
        let title = tab.title();
        let url = tab.url();
        let choice = default_page_choice(&prefs, &title, url.as_ref());
        self.start_save(SaveScope::Page, url, choice, SaveOrigin::DefaultPrefs)?;
        Ok(title)
    }
}

// ============================================================================
// TabDownloadCoordinator - Internal
// ============================================================================

impl TabDownloadCoordinator {
    /// Full-page save. `Ok(None)` when the contents were downloaded instead.
    fn save_current_page(&self) -> Result<Option<SaveId>> {
        let tab = self.tab()?;
        self.ensure_idle()?;

        let mime_type = tab.contents_mime_type();
        if !naming::is_savable_mime_type(&mime_type) {
            self.download_instead(tab.as_ref(), mime_type)?;
            return Ok(None);
        }

        tab.stop();

        let prefs = self.save_prefs();
        let url = tab.url();
        let suggested = default_page_choice(&prefs, &tab.title(), url.as_ref());
        let (choice, origin) = self.resolve_choice(suggested, &prefs)?;

        if origin == SaveOrigin::Prompted && choice.save_type != prefs.save_type {
            debug!(tab_id = %self.tab_id, save_type = %choice.save_type, "Remembering save type");
            self.prefs.lock().save_type = choice.save_type;
        }

        self.start_save(SaveScope::Page, url, choice, origin).map(Some)
    }

    /// Single-resource save.
    fn save_resource(&self, url: &Url) -> Result<SaveId> {
        let tab = self.tab()?;
        self.ensure_idle()?;

        let prefs = self.save_prefs();
        let suggested = SaveChoice::new(
            naming::resource_destination(&prefs.default_directory, url),
            SavePageType::HtmlOnly,
        );
        let (choice, origin) = self.resolve_choice(suggested, &prefs)?;

        self.start_save(SaveScope::Resource(url.clone()), tab.url(), choice, origin)
    }

    /// Hands non-savable contents to the download manager.
    fn download_instead(&self, tab: &dyn TabContents, mime_type: String) -> Result<()> {
        let manager = tab.download_manager();
        let (Some(manager), Some(url)) = (manager, tab.url()) else {
            return Err(Error::not_savable(mime_type));
        };

        info!(tab_id = %self.tab_id, %url, %mime_type, "Contents not savable, downloading instead");
        manager.download_url(&url, None, self.tab_id);
        Ok(())
    }

    /// Applies the prompt, if enabled, to a suggested choice.
    ///
    /// Prompted file names are sanitized; with no delegate the suggestion
    /// is used as is.
    fn resolve_choice(
        &self,
        suggested: SaveChoice,
        prefs: &SavePrefs,
    ) -> Result<(SaveChoice, SaveOrigin)> {
        if !prefs.prompt_for_location {
            return Ok((suggested, SaveOrigin::DefaultPrefs));
        }

        let Some(delegate) = self.delegate() else {
            debug!(tab_id = %self.tab_id, "No delegate to prompt, using suggested destination");
            return Ok((suggested, SaveOrigin::DefaultPrefs));
        };

        let chosen = delegate
            .choose_save_destination(suggested, self.tab_id)
            .ok_or(Error::SaveCancelled)?;

        Ok((
            SaveChoice::new(
                naming::sanitize_destination(&chosen.destination),
                chosen.save_type,
            ),
            SaveOrigin::Prompted,
        ))
    }

    /// Reserves the slot, starts the operation, and installs it.
    fn start_save(
        &self,
        scope: SaveScope,
        page_url: Option<Url>,
        choice: SaveChoice,
        origin: SaveOrigin,
    ) -> Result<SaveId> {
        let save_id = SaveId::generate();
        self.active_save.reserve(save_id)?;

        info!(
            tab_id = %self.tab_id,
            save_id = %save_id,
            main_file = %choice.destination.main_file.display(),
            save_type = %choice.save_type,
            ?origin,
            "Starting save"
        );

        let request = SaveRequest {
            id: save_id,
            tab_id: self.tab_id,
            page_url,
            scope,
            destination: choice.destination,
            save_type: choice.save_type,
            origin,
        };
        let completion = SaveCompletion::new(save_id, &self.active_save);

        match self.save_service.start(request, completion) {
            Ok(operation) => {
                if !self.active_save.install(save_id, operation) {
                    debug!(tab_id = %self.tab_id, save_id = %save_id, "Save finished during start");
                }
                Ok(save_id)
            }
            Err(e) => {
                self.active_save.release(save_id);
                Err(e)
            }
        }
    }

    /// Logs a save that did not start.
    fn log_save_error(&self, kind: &str, error: &Error) {
        match error {
            Error::SaveInProgress { active } => {
                debug!(tab_id = %self.tab_id, kind, active = %active, "Save ignored, another is in progress");
            }
            Error::SaveCancelled => {
                debug!(tab_id = %self.tab_id, kind, "Save cancelled at prompt");
            }
            _ => {
                warn!(tab_id = %self.tab_id, kind, error = %error, "Save did not start");
            }
        }
    }
}

/// Suggested choice for a full-page save from preferences and tab state.
fn default_page_choice(prefs: &SavePrefs, title: &str, url: Option<&Url>) -> SaveChoice {
    let base_name = naming::suggested_base_name(title, url);
    SaveChoice::new(
        naming::page_destination(&prefs.default_directory, &base_name),
        prefs.save_type,
    )
}

// ============================================================================
// Tests
// ============================================================================
