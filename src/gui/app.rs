//! Main GUI application module.
//!
//! Contains the `GuiApp` struct, the per-view state types, job polling, and
//! the eframe update loop. Views render in their own modules under `views/`;
//! all background work goes through `AsyncJob` and is polled here once per
//! frame.

use std::collections::VecDeque;
use std::mem;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};

use crate::api::{ApiClient, DepositAction};
use crate::config::{self, Config, ENVIRONMENTS};
use crate::inflight::InFlightSet;
use crate::models::{Deposit, RequestStatus, Withdrawal};
use crate::operation_log;
use crate::paging::Pager;
use crate::session::Session;
use crate::user_settings::UserSettings;
use crate::utils;

use super::async_job::AsyncJob;
use super::notifications::NotificationEntry;
use super::theme::{configure_style, AppTheme};

/// Navigation sections of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiSection {
    Overview,
    Withdrawals,
    Deposits,
    Settings,
}

/// The two terminal decisions an admin can apply to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub(crate) fn verb(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

/// An in-flight decision for one request id. The id stays in the busy set
/// until this job completes; the poll loop is the single cleanup point for
/// both outcomes.
pub(crate) struct ActionJob {
    pub(crate) id: String,
    pub(crate) action: ReviewAction,
    /// Audit log line describing the decision.
    pub(crate) detail: String,
    pub(crate) job: AsyncJob<()>,
}

/// Approve-confirmation modal target.
pub(crate) struct ApproveModalState {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) amount: f64,
}

/// Reject-with-reason modal target.
pub(crate) struct RejectModalState {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) amount: f64,
    pub(crate) reason: String,
    pub(crate) error: Option<String>,
}

impl RejectModalState {
    /// The submit control stays disabled until the reason has substance.
    pub(crate) fn can_submit(&self) -> bool {
        !self.reason.trim().is_empty()
    }
}

pub(crate) struct WithdrawalsState {
    pub(crate) filter: Option<RequestStatus>,
    pub(crate) rows: Vec<Withdrawal>,
    pub(crate) loaded_once: bool,
    pub(crate) load_job: Option<AsyncJob<(u64, Vec<Withdrawal>)>>,
    /// Sequence number of the most recently issued fetch; completed fetches
    /// with an older sequence are discarded.
    pub(crate) load_seq: u64,
    pub(crate) load_error: Option<String>,
    pub(crate) pager: Pager,
    pub(crate) busy: InFlightSet,
    pub(crate) action_jobs: Vec<ActionJob>,
    pub(crate) approve_modal: Option<ApproveModalState>,
    pub(crate) reject_modal: Option<RejectModalState>,
}

impl WithdrawalsState {
    pub(crate) fn with_settings(settings: &UserSettings) -> Self {
        Self {
            filter: None,
            rows: Vec::new(),
            loaded_once: false,
            load_job: None,
            load_seq: 0,
            load_error: None,
            pager: Pager::new(settings.page_size),
            busy: InFlightSet::new(),
            action_jobs: Vec::new(),
            approve_modal: None,
            reject_modal: None,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.load_job.is_some()
    }

    /// Close the reject modal once the decision for its target succeeded.
    /// Keyed by id so a modal the admin reopened for a different request is
    /// left alone.
    pub(crate) fn clear_reject_modal_for(&mut self, id: &str) {
        let matches = self
            .reject_modal
            .as_ref()
            .map(|m| m.id == id)
            .unwrap_or(false);
        if matches {
            self.reject_modal = None;
        }
    }
}

/// Deposit decision modal: approve or reject with optional admin notes.
pub(crate) struct DepositModalState {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) amount: f64,
    pub(crate) action: ReviewAction,
    pub(crate) notes: String,
    pub(crate) error: Option<String>,
}

pub(crate) struct DepositsState {
    /// Client-side filter: deposits arrive as one superset.
    pub(crate) filter: Option<RequestStatus>,
    pub(crate) rows: Vec<Deposit>,
    pub(crate) loaded_once: bool,
    pub(crate) load_job: Option<AsyncJob<(u64, Vec<Deposit>)>>,
    pub(crate) load_seq: u64,
    pub(crate) load_error: Option<String>,
    pub(crate) pager: Pager,
    pub(crate) busy: InFlightSet,
    pub(crate) action_jobs: Vec<ActionJob>,
    pub(crate) modal: Option<DepositModalState>,
}

impl DepositsState {
    pub(crate) fn with_settings(settings: &UserSettings) -> Self {
        Self {
            filter: None,
            rows: Vec::new(),
            loaded_once: false,
            load_job: None,
            load_seq: 0,
            load_error: None,
            pager: Pager::new(settings.page_size),
            busy: InFlightSet::new(),
            action_jobs: Vec::new(),
            modal: None,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.load_job.is_some()
    }

    /// Rows matching the active filter, in server order.
    pub(crate) fn filtered(&self) -> Vec<&Deposit> {
        self.rows
            .iter()
            .filter(|d| self.filter.map(|f| d.status == f).unwrap_or(true))
            .collect()
    }
}

pub(crate) struct LogViewState {
    pub(crate) content: String,
    pub(crate) job: Option<AsyncJob<String>>,
    pub(crate) error: Option<String>,
    pub(crate) scroll_to_bottom: bool,
}

pub(crate) const EMPTY_LOG_PLACEHOLDER: &str =
    "No decisions recorded yet. Approve or reject a request to create entries.";

impl Default for LogViewState {
    fn default() -> Self {
        Self {
            content: EMPTY_LOG_PLACEHOLDER.to_string(),
            job: None,
            error: None,
            scroll_to_bottom: true,
        }
    }
}

#[derive(Default)]
pub(crate) struct OverviewState {
    pub(crate) ping_job: Option<AsyncJob<u64>>,
    pub(crate) latency_ms: Option<u64>,
    pub(crate) log_view: LogViewState,
}

#[derive(Default)]
pub(crate) struct LoginState {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) job: Option<AsyncJob<(String, String)>>,
    pub(crate) error: Option<String>,
}

impl LoginState {
    pub(crate) fn can_submit(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty() && self.job.is_none()
    }
}

/// State for the custom endpoint form in settings.
#[derive(Default)]
pub(crate) struct EndpointFormState {
    pub(crate) label: String,
    pub(crate) base_url: String,
    pub(crate) error: Option<String>,
    /// Base URL of the endpoint being edited, if any.
    pub(crate) editing: Option<String>,
}

impl EndpointFormState {
    pub(crate) fn clear(&mut self) {
        self.label.clear();
        self.base_url.clear();
        self.error = None;
        self.editing = None;
    }

    pub(crate) fn populate_from(&mut self, endpoint: &crate::user_settings::CustomEndpoint) {
        self.label = endpoint.label.clone();
        self.base_url = endpoint.base_url.clone();
        self.error = None;
        self.editing = Some(endpoint.base_url.clone());
    }
}

pub struct GuiApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) session: Session,
    pub(crate) theme: AppTheme,
    pub(crate) section: GuiSection,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) show_notifications_popup: bool,
    pub(crate) notification_toast_visible: bool,
    pub(crate) notification_toast_close_time: Option<Instant>,
    pub(crate) last_notification_count: usize,
    pub(crate) login: LoginState,
    pub(crate) withdrawals: WithdrawalsState,
    pub(crate) deposits: DepositsState,
    pub(crate) overview: OverviewState,
    pub(crate) endpoint_form: EndpointFormState,
    pub(crate) settings_pending_page_size: usize,
    pub(crate) settings_pending_refresh_secs: u64,
    pub(crate) last_auto_refresh: Instant,
}

impl GuiApp {
    fn new(fallback: Config, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let user_settings = UserSettings::load();
        let session = Session::load();
        let config = Self::resolve_config(&user_settings, fallback);

        let settings_pending_page_size = user_settings.page_size;
        let settings_pending_refresh_secs = user_settings.refresh_interval_secs;
        let withdrawals = WithdrawalsState::with_settings(&user_settings);
        let deposits = DepositsState::with_settings(&user_settings);

        Self {
            config,
            user_settings,
            session,
            theme,
            section: GuiSection::Withdrawals,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            notification_toast_visible: false,
            notification_toast_close_time: None,
            last_notification_count: 0,
            login: LoginState::default(),
            withdrawals,
            deposits,
            overview: OverviewState::default(),
            endpoint_form: EndpointFormState::default(),
            settings_pending_page_size,
            settings_pending_refresh_secs,
            last_auto_refresh: Instant::now(),
        }
    }

    /// Pick the active backend from user settings, falling back to the
    /// startup config when the saved selection no longer resolves.
    fn resolve_config(settings: &UserSettings, fallback: Config) -> Config {
        if let Some(env) = config::find_environment(&settings.selected_base_url) {
            return Config::from_environment(env);
        }
        if let Some(endpoint) = settings.get_custom_endpoint(&settings.selected_base_url) {
            let mut cfg = Config::new(endpoint.base_url.clone());
            cfg.label_override = Some(endpoint.label.clone());
            return cfg;
        }
        fallback
    }

    /// Fresh API client snapshotting the active backend and session token.
    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&self.config, &self.session)
    }

    // ----- fetches -------------------------------------------------------

    pub(crate) fn start_withdrawals_fetch(&mut self) {
        self.withdrawals.load_seq += 1;
        let seq = self.withdrawals.load_seq;
        let filter = self.withdrawals.filter;
        let client = self.client();
        self.withdrawals.load_error = None;
        // Replacing the previous job drops its channel, so a superseded
        // response can never land; the sequence check is the second fence.
        self.withdrawals.load_job = Some(AsyncJob::spawn(move || async move {
            let rows = client.list_withdrawals(filter).await?;
            Ok((seq, rows))
        }));
    }

    pub(crate) fn start_deposits_fetch(&mut self) {
        self.deposits.load_seq += 1;
        let seq = self.deposits.load_seq;
        let client = self.client();
        self.deposits.load_error = None;
        self.deposits.load_job = Some(AsyncJob::spawn(move || async move {
            let rows = client.list_deposits().await?;
            Ok((seq, rows))
        }));
    }

    // ----- actions -------------------------------------------------------

    pub(crate) fn start_withdrawal_action(
        &mut self,
        id: String,
        action: ReviewAction,
        reason: Option<String>,
        detail: String,
    ) {
        if !self.withdrawals.busy.begin(&id) {
            tracing::debug!(id = %id, "withdrawal action already in flight, ignoring");
            return;
        }
        let client = self.client();
        let job_id = id.clone();
        let job = AsyncJob::spawn(move || async move {
            match action {
                ReviewAction::Approve => client.approve_withdrawal(&job_id).await?,
                ReviewAction::Reject => {
                    client
                        .reject_withdrawal(&job_id, reason.as_deref().unwrap_or_default())
                        .await?
                }
            }
            Ok(())
        });
        self.withdrawals.action_jobs.push(ActionJob {
            id,
            action,
            detail,
            job,
        });
    }

    pub(crate) fn start_deposit_action(
        &mut self,
        id: String,
        action: ReviewAction,
        notes: String,
        detail: String,
    ) {
        if !self.deposits.busy.begin(&id) {
            tracing::debug!(id = %id, "deposit action already in flight, ignoring");
            return;
        }
        let client = self.client();
        let job_id = id.clone();
        let api_action = match action {
            ReviewAction::Approve => DepositAction::Approve,
            ReviewAction::Reject => DepositAction::Reject,
        };
        let job = AsyncJob::spawn(move || async move {
            client.deposit_action(&job_id, api_action, &notes).await?;
            Ok(())
        });
        self.deposits.action_jobs.push(ActionJob {
            id,
            action,
            detail,
            job,
        });
    }

    // ----- overview ------------------------------------------------------

    pub(crate) fn start_ping(&mut self) {
        if self.overview.ping_job.is_some() {
            return;
        }
        let client = self.client();
        self.overview.ping_job = Some(AsyncJob::spawn(move || async move {
            let latency = client.ping().await?;
            Ok(latency)
        }));
    }

    pub(crate) fn refresh_audit_log(&mut self) {
        if self.overview.log_view.job.is_none() {
            self.overview.log_view.scroll_to_bottom = true;
            self.overview.log_view.job = Some(AsyncJob::spawn(|| async move {
                match operation_log::read_log() {
                    Ok(content) if content.is_empty() => Ok(EMPTY_LOG_PLACEHOLDER.to_string()),
                    Ok(content) => Ok(content),
                    Err(e) => Err(anyhow!("Failed to read audit log: {}", e)),
                }
            }));
        }
    }

    // ----- session -------------------------------------------------------

    pub(crate) fn start_login(&mut self) {
        if !self.login.can_submit() {
            return;
        }
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        let client = self.client();
        self.login.error = None;
        self.login.job = Some(AsyncJob::spawn(move || async move {
            let token = client.login(&username, &password).await?;
            Ok((token, username))
        }));
    }

    pub(crate) fn sign_out(&mut self) {
        self.session.clear();
        self.reset_review_state();
        self.login = LoginState::default();
        self.section = GuiSection::Withdrawals;
        self.notifications
            .push_back(NotificationEntry::info("Signed out."));
    }

    /// Drop all loaded lists, modals, and in-flight markers. Used on logout
    /// and when switching backends.
    fn reset_review_state(&mut self) {
        self.withdrawals = WithdrawalsState::with_settings(&self.user_settings);
        self.deposits = DepositsState::with_settings(&self.user_settings);
        self.overview = OverviewState::default();
    }

    /// Switch the active backend and clear every cached list.
    pub(crate) fn apply_endpoint_selection(&mut self, base_url: String, label: Option<String>) {
        let mut cfg = Config::new(base_url);
        cfg.label_override = label;
        self.config = cfg;
        self.reset_review_state();

        self.user_settings.selected_base_url = self.config.base_url.clone();
        if let Err(e) = self.user_settings.save() {
            self.notifications.push_back(NotificationEntry::error(format!(
                "Failed to save settings: {}",
                e
            )));
        }
        self.notifications.push_back(NotificationEntry::info(format!(
            "Switched to {}",
            self.config.environment_label()
        )));
    }

    /// Apply a changed page size to both review tables.
    pub(crate) fn apply_page_size(&mut self, page_size: usize) {
        self.user_settings.page_size = page_size;
        self.withdrawals.pager.set_page_size(page_size);
        self.deposits.pager.set_page_size(page_size);
    }

    // ----- polling -------------------------------------------------------

    fn poll_jobs(&mut self) {
        self.poll_login();
        self.poll_withdrawals();
        self.poll_deposits();
        self.poll_overview();
        self.poll_auto_refresh();

        while self.notifications.len() > 50 {
            self.notifications.pop_front();
        }
    }

    fn poll_login(&mut self) {
        let result = self.login.job.as_mut().and_then(|j| j.poll());
        if let Some(res) = result {
            self.login.job = None;
            match res {
                Ok((token, username)) => {
                    self.session.establish(token, username.clone());
                    self.session.persist();
                    self.login.password.clear();
                    self.login.error = None;
                    self.notifications
                        .push_back(NotificationEntry::success(format!(
                            "Signed in as {}",
                            username
                        )));
                    self.section = GuiSection::Withdrawals;
                    self.start_withdrawals_fetch();
                }
                Err(e) => {
                    self.login.error = Some(e.to_string());
                }
            }
        }
    }

    fn poll_withdrawals(&mut self) {
        // List load
        let load_result = self.withdrawals.load_job.as_mut().and_then(|j| j.poll());
        if let Some(res) = load_result {
            self.withdrawals.load_job = None;
            self.withdrawals.loaded_once = true;
            match res {
                Ok((seq, rows)) => {
                    if seq == self.withdrawals.load_seq {
                        self.withdrawals.rows = rows;
                        self.withdrawals.load_error = None;
                        let count = self.withdrawals.rows.len();
                        self.withdrawals.pager.clamp(count);
                    } else {
                        tracing::debug!(
                            seq,
                            latest = self.withdrawals.load_seq,
                            "discarding stale withdrawal list response"
                        );
                    }
                }
                Err(e) => {
                    self.withdrawals.load_error = Some(e.to_string());
                    self.notifications.push_back(NotificationEntry::error(format!(
                        "Failed to load withdrawals: {}",
                        e
                    )));
                }
            }
        }

        // Row actions
        let jobs = mem::take(&mut self.withdrawals.action_jobs);
        let mut remaining = Vec::with_capacity(jobs.len());
        let mut reload = false;
        for mut aj in jobs {
            let Some(res) = aj.job.poll() else {
                remaining.push(aj);
                continue;
            };
            // Single cleanup point: the row becomes interactive again no
            // matter how the job ended.
            self.withdrawals.busy.finish(&aj.id);
            match res {
                Ok(()) => {
                    let title = match aj.action {
                        ReviewAction::Approve => "Withdrawal approved",
                        ReviewAction::Reject => "Withdrawal rejected",
                    };
                    self.notifications
                        .push_back(NotificationEntry::success(format!("{}.", title)));
                    if let Err(e) =
                        operation_log::append_log(title, &self.config.environment_label(), &aj.detail)
                    {
                        tracing::warn!("failed to write audit log: {}", e);
                    }
                    if aj.action == ReviewAction::Reject {
                        self.withdrawals.clear_reject_modal_for(&aj.id);
                    }
                    reload = true;
                }
                Err(e) => {
                    let message = e.to_string();
                    if aj.action == ReviewAction::Reject {
                        if let Some(modal) = self.withdrawals.reject_modal.as_mut() {
                            if modal.id == aj.id {
                                modal.error = Some(message.clone());
                            }
                        }
                    }
                    self.notifications.push_back(NotificationEntry::error(format!(
                        "Failed to {} withdrawal: {}",
                        aj.action.verb(),
                        message
                    )));
                }
            }
        }
        self.withdrawals.action_jobs = remaining;

        // Reload after any applied decision so server-side wallet effects
        // become visible; the row is never patched locally.
        if reload {
            self.start_withdrawals_fetch();
        }
    }

    fn poll_deposits(&mut self) {
        let load_result = self.deposits.load_job.as_mut().and_then(|j| j.poll());
        if let Some(res) = load_result {
            self.deposits.load_job = None;
            self.deposits.loaded_once = true;
            match res {
                Ok((seq, rows)) => {
                    if seq == self.deposits.load_seq {
                        self.deposits.rows = rows;
                        self.deposits.load_error = None;
                        let count = self.deposits.filtered().len();
                        self.deposits.pager.clamp(count);
                    } else {
                        tracing::debug!(
                            seq,
                            latest = self.deposits.load_seq,
                            "discarding stale deposit list response"
                        );
                    }
                }
                Err(e) => {
                    self.deposits.load_error = Some(e.to_string());
                    self.notifications.push_back(NotificationEntry::error(format!(
                        "Failed to load deposits: {}",
                        e
                    )));
                }
            }
        }

        let jobs = mem::take(&mut self.deposits.action_jobs);
        let mut remaining = Vec::with_capacity(jobs.len());
        let mut reload = false;
        for mut aj in jobs {
            let Some(res) = aj.job.poll() else {
                remaining.push(aj);
                continue;
            };
            self.deposits.busy.finish(&aj.id);
            match res {
                Ok(()) => {
                    let title = match aj.action {
                        ReviewAction::Approve => "Deposit approved",
                        ReviewAction::Reject => "Deposit rejected",
                    };
                    self.notifications
                        .push_back(NotificationEntry::success(format!("{}.", title)));
                    if let Err(e) =
                        operation_log::append_log(title, &self.config.environment_label(), &aj.detail)
                    {
                        tracing::warn!("failed to write audit log: {}", e);
                    }
                    let matches_modal = self
                        .deposits
                        .modal
                        .as_ref()
                        .map(|m| m.id == aj.id)
                        .unwrap_or(false);
                    if matches_modal {
                        self.deposits.modal = None;
                    }
                    reload = true;
                }
                Err(e) => {
                    let message = e.to_string();
                    if let Some(modal) = self.deposits.modal.as_mut() {
                        if modal.id == aj.id {
                            modal.error = Some(message.clone());
                        }
                    }
                    self.notifications.push_back(NotificationEntry::error(format!(
                        "Failed to {} deposit: {}",
                        aj.action.verb(),
                        message
                    )));
                }
            }
        }
        self.deposits.action_jobs = remaining;

        if reload {
            self.start_deposits_fetch();
        }
    }

    fn poll_overview(&mut self) {
        let ping_result = self.overview.ping_job.as_mut().and_then(|j| j.poll());
        if let Some(res) = ping_result {
            self.overview.ping_job = None;
            match res {
                Ok(latency) => self.overview.latency_ms = Some(latency),
                Err(e) => {
                    self.overview.latency_ms = None;
                    self.notifications.push_back(NotificationEntry::error(format!(
                        "Backend unreachable: {}",
                        e
                    )));
                }
            }
        }

        let log_result = self.overview.log_view.job.as_mut().and_then(|j| j.poll());
        if let Some(res) = log_result {
            self.overview.log_view.job = None;
            match res {
                Ok(content) => {
                    self.overview.log_view.content = content;
                    self.overview.log_view.error = None;
                    self.overview.log_view.scroll_to_bottom = true;
                }
                Err(e) => {
                    self.overview.log_view.error = Some(e.to_string());
                }
            }
        }
    }

    /// Periodic list refresh, when enabled in settings. Only the visible
    /// section refetches, and never while a fetch is already running.
    fn poll_auto_refresh(&mut self) {
        let interval = self.user_settings.refresh_interval_secs;
        if interval == 0 || !self.session.is_active() {
            return;
        }
        if self.last_auto_refresh.elapsed().as_secs() < interval {
            return;
        }
        match self.section {
            GuiSection::Withdrawals
                if self.withdrawals.loaded_once && !self.withdrawals.is_loading() =>
            {
                self.start_withdrawals_fetch();
                self.last_auto_refresh = Instant::now();
            }
            GuiSection::Deposits if self.deposits.loaded_once && !self.deposits.is_loading() => {
                self.start_deposits_fetch();
                self.last_auto_refresh = Instant::now();
            }
            _ => {}
        }
    }

    // ----- chrome --------------------------------------------------------

    pub(crate) fn render_section_header(&self, ui: &mut egui::Ui, title: &str) {
        ui.heading(RichText::new(title).color(self.theme.text_primary).strong());
        ui.add_space(self.theme.spacing_xs);
        ui.separator();
    }

    fn switch_section(&mut self, section: GuiSection) {
        self.section = section;
        match section {
            GuiSection::Withdrawals if !self.withdrawals.loaded_once => {
                self.start_withdrawals_fetch();
            }
            GuiSection::Deposits if !self.deposits.loaded_once => {
                self.start_deposits_fetch();
            }
            GuiSection::Overview => {
                self.refresh_audit_log();
            }
            _ => {}
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.heading(
                    RichText::new("SATADESK")
                        .size(22.0)
                        .color(self.theme.primary)
                        .strong(),
                );
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(11.0)
                        .color(self.theme.text_secondary),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Sign out + session chip (rightmost)
                    if ui.add(self.theme.button_secondary("Sign out")).clicked() {
                        self.sign_out();
                        return;
                    }
                    let admin = self.session.username().unwrap_or("admin");
                    ui.label(
                        RichText::new(format!("◉ {}", admin))
                            .color(self.theme.success)
                            .size(13.0),
                    );
                    ui.add_space(self.theme.spacing_md);

                    // Backend selector
                    let current = self.config.environment_label();
                    let mut selected: Option<(String, Option<String>)> = None;
                    egui::ComboBox::from_id_source("endpoint_selector")
                        .selected_text(current)
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            for env in ENVIRONMENTS {
                                let is_selected = self.config.base_url == env.base_url;
                                if ui.selectable_label(is_selected, env.label).clicked()
                                    && !is_selected
                                {
                                    selected = Some((env.base_url.to_string(), None));
                                }
                            }
                            if !self.user_settings.custom_endpoints.is_empty() {
                                ui.separator();
                                for endpoint in &self.user_settings.custom_endpoints {
                                    let is_selected = self.config.base_url == endpoint.base_url;
                                    if ui
                                        .selectable_label(is_selected, &endpoint.label)
                                        .clicked()
                                        && !is_selected
                                    {
                                        selected = Some((
                                            endpoint.base_url.clone(),
                                            Some(endpoint.label.clone()),
                                        ));
                                    }
                                }
                            }
                        });
                    if let Some((base_url, label)) = selected {
                        self.apply_endpoint_selection(base_url, label);
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn render_notification_overlay(&mut self, ctx: &egui::Context) {
        // New notification -> show the toast for a few seconds
        let current_count = self.notifications.len();
        if current_count > self.last_notification_count {
            self.notification_toast_visible = true;
            self.notification_toast_close_time = Some(Instant::now() + Duration::from_secs(5));
        }
        self.last_notification_count = current_count;

        if let Some(close_time) = self.notification_toast_close_time {
            if Instant::now() >= close_time {
                self.notification_toast_visible = false;
                self.notification_toast_close_time = None;
            }
        }

        let has_notifications = !self.notifications.is_empty();
        let latest = self
            .notifications
            .back()
            .map(|n| (n.message.clone(), n.level));

        egui::Area::new(egui::Id::new("notification_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .rounding(6.0)
                    .stroke(egui::Stroke::new(1.0, self.theme.primary))
                    .inner_margin(egui::Margin::symmetric(8.0, 6.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let icon_color = if has_notifications {
                                self.theme.primary
                            } else {
                                self.theme.text_secondary
                            };
                            if ui
                                .add(
                                    egui::Button::new(
                                        RichText::new("[!]").size(14.0).color(icon_color).strong(),
                                    )
                                    .fill(egui::Color32::TRANSPARENT)
                                    .stroke(egui::Stroke::NONE),
                                )
                                .on_hover_text("Click to view notification history")
                                .clicked()
                            {
                                self.show_notifications_popup = !self.show_notifications_popup;
                            }

                            if self.notification_toast_visible {
                                if let Some((message, level)) = &latest {
                                    ui.add_space(4.0);
                                    ui.label(
                                        RichText::new(utils::truncate(message, 48))
                                            .size(12.0)
                                            .color(self.theme.level_color(*level)),
                                    );
                                }
                            } else if has_notifications {
                                ui.add_space(2.0);
                                ui.label(
                                    RichText::new(self.notifications.len().to_string())
                                        .size(10.0)
                                        .color(self.theme.warning),
                                );
                            }
                        });
                    });
            });

        if self.show_notifications_popup {
            egui::Window::new("Notification History")
                .collapsible(false)
                .resizable(true)
                .default_width(440.0)
                .default_height(340.0)
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -50.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{} notifications", self.notifications.len()))
                                .color(self.theme.text_secondary),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.add(self.theme.button_secondary("Close")).clicked() {
                                self.show_notifications_popup = false;
                            }
                            if ui.add(self.theme.button_secondary("Clear")).clicked() {
                                self.notifications.clear();
                            }
                        });
                    });
                    ui.separator();

                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .max_height(270.0)
                        .show(ui, |ui| {
                            if self.notifications.is_empty() {
                                ui.label(
                                    RichText::new("No notifications yet.")
                                        .color(self.theme.text_secondary),
                                );
                            } else {
                                for entry in self.notifications.iter().rev() {
                                    ui.horizontal(|ui| {
                                        ui.label(
                                            RichText::new(format!("[{}]", entry.time_ago()))
                                                .size(11.0)
                                                .color(self.theme.text_secondary),
                                        );
                                        ui.label(
                                            RichText::new(&entry.message)
                                                .size(12.0)
                                                .color(self.theme.level_color(entry.level)),
                                        );
                                    });
                                    ui.add_space(3.0);
                                }
                            }
                        });
                });
        }
    }

    fn render_nav(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(170.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .stroke(egui::Stroke::new(1.0, self.theme.surface_active)),
            )
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_md);

                let nav_items = [
                    (GuiSection::Overview, "Overview"),
                    (GuiSection::Withdrawals, "Withdrawals"),
                    (GuiSection::Deposits, "Deposits"),
                    (GuiSection::Settings, "Settings"),
                ];

                let mut clicked: Option<GuiSection> = None;
                for (section, label) in nav_items {
                    let selected = self.section == section;
                    ui.horizontal(|ui| {
                        if selected {
                            ui.add_space(2.0);
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(3.0, 20.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 0.0, self.theme.primary);
                            ui.add_space(4.0);
                        } else {
                            ui.add_space(9.0);
                        }

                        let text_color = if selected {
                            self.theme.text_primary
                        } else {
                            self.theme.text_secondary
                        };
                        let response = ui.add(
                            egui::Button::new(RichText::new(label).size(13.0).color(text_color))
                                .fill(egui::Color32::TRANSPARENT)
                                .stroke(egui::Stroke::NONE)
                                .sense(egui::Sense::click()),
                        );
                        if response.clicked() {
                            clicked = Some(section);
                        }
                    });
                    ui.add_space(self.theme.spacing_xs);
                }
                if let Some(section) = clicked {
                    self.switch_section(section);
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();

        if !self.session.is_active() {
            self.view_login(ctx);
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        }

        self.render_top_bar(ctx);
        self.render_notification_overlay(ctx);
        self.render_nav(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing_md);
            egui::ScrollArea::vertical().show(ui, |ui| match self.section {
                GuiSection::Overview => self.view_overview(ui),
                GuiSection::Withdrawals => self.view_withdrawals(ui),
                GuiSection::Deposits => self.view_deposits(ui),
                GuiSection::Settings => self.view_settings(ui),
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub fn launch(config: Config) -> Result<()> {
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(config.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([1180.0, 760.0]);
    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Satadesk - Satashree Admin Console",
        native_options,
        Box::new(app_creator),
    )
    .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_modal(reason: &str) -> RejectModalState {
        RejectModalState {
            id: "W2".to_string(),
            username: "ravi".to_string(),
            email: "ravi@example.com".to_string(),
            amount: 500.0,
            reason: reason.to_string(),
            error: None,
        }
    }

    #[test]
    fn test_reject_submit_disabled_for_empty_reason() {
        assert!(!reject_modal("").can_submit());
    }

    #[test]
    fn test_reject_submit_disabled_for_whitespace_reason() {
        assert!(!reject_modal("   \t\n").can_submit());
    }

    #[test]
    fn test_reject_submit_enabled_for_real_reason() {
        assert!(reject_modal("Invalid UPI ID").can_submit());
    }

    #[test]
    fn test_login_submit_requires_both_fields() {
        let mut login = LoginState::default();
        assert!(!login.can_submit());
        login.username = "admin".to_string();
        assert!(!login.can_submit());
        login.password = "hunter2".to_string();
        assert!(login.can_submit());
    }

    #[test]
    fn test_deposits_filtered_respects_filter() {
        let settings = UserSettings::default();
        let mut state = DepositsState::with_settings(&settings);
        let body = r#"{
            "transactions": [
                {"_id": "d1", "user": {"_id": "u1", "username": "a", "email": "a@x"},
                 "amount": 10, "status": "pending", "paymentMethod": "upi",
                 "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"},
                {"_id": "d2", "user": {"_id": "u2", "username": "b", "email": "b@x"},
                 "amount": 20, "status": "completed", "paymentMethod": "upi",
                 "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"}
            ]
        }"#;
        let parsed: crate::models::DepositsResponse = serde_json::from_str(body).unwrap();
        state.rows = parsed.transactions;

        assert_eq!(state.filtered().len(), 2);
        state.filter = Some(RequestStatus::Pending);
        let filtered = state.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "d1");
    }

    #[test]
    fn test_reject_modal_clears_only_for_its_target() {
        let settings = UserSettings::default();
        let mut state = WithdrawalsState::with_settings(&settings);
        state.reject_modal = Some(reject_modal("Invalid UPI ID"));

        // A success for some other request leaves the modal (and its typed
        // reason) alone.
        state.clear_reject_modal_for("W9");
        assert!(state.reject_modal.is_some());

        // A success for the modal's own target closes it, dropping the
        // reason with it.
        state.clear_reject_modal_for("W2");
        assert!(state.reject_modal.is_none());
    }

    #[test]
    fn test_review_state_uses_settings_page_size() {
        let mut settings = UserSettings::default();
        settings.page_size = 25;
        let state = WithdrawalsState::with_settings(&settings);
        assert_eq!(state.pager.page_size(), 25);
        assert!(state.filter.is_none());
        assert!(!state.loaded_once);
    }
}
