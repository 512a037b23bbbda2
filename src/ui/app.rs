use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::MAX_PAGE_SIZE;
use crate::domain::{
    AdminProfile, FieldSpec, FormDraft, Price, PriceDraft, PriceFilter, Resource, Service,
    ServiceDraft, ServiceFilter, ValidationError,
};
use crate::store::{ListIntent, ListReducer, ListState};
use crate::ui::events::AppEvent;
use crate::ui::form::{FormDialogState, FormIntent, FormPurpose, FormReducer};
use crate::ui::mvi::Reducer;
use crate::ui::notifications::{
    Notice, NoticeLevel, NotificationIntent, NotificationReducer, NotificationState,
};
use crate::ui::worker::{WorkerCommand, WorkerSender};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tab {
    Prices,
    Services,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Prices, Tab::Services];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Prices => "Prices",
            Tab::Services => "Services",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Prices => 0,
            Tab::Services => 1,
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Prices => Tab::Services,
            Tab::Services => Tab::Prices,
        }
    }
}

/// Delete waiting for a y/n answer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingDelete {
    pub tab: Tab,
    pub id: String,
    pub prompt: String,
}

/// Startup values for the console.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub base_url: String,
    pub profile: Option<AdminProfile>,
    pub page_size: u32,
    pub toast_ticks: u32,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    tab: Tab,
    prices: ListState<Price>,
    services: ListState<Service>,
    /// Selected row per tab, indexed by `Tab::index`.
    selected: [usize; 2],
    form: FormDialogState,
    confirm: Option<PendingDelete>,
    notifications: NotificationState,
    profile: Option<AdminProfile>,
    base_url: String,
    toast_ticks: u32,
    size: Option<(u16, u16)>,
    commands: Option<WorkerSender>,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self {
            should_quit: false,
            tab: Tab::Prices,
            prices: ListState::with_limit(context.page_size),
            services: ListState::with_limit(context.page_size),
            selected: [0; 2],
            form: FormDialogState::default(),
            confirm: None,
            notifications: NotificationState::default(),
            profile: context.profile,
            base_url: context.base_url,
            toast_ticks: context.toast_ticks.max(1),
            size: None,
            commands: None,
        }
    }

    pub fn attach_worker(&mut self, commands: WorkerSender) {
        self.commands = Some(commands);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn prices(&self) -> &ListState<Price> {
        &self.prices
    }

    pub fn services(&self) -> &ListState<Service> {
        &self.services
    }

    pub fn selected(&self, tab: Tab) -> usize {
        self.selected[tab.index()]
    }

    pub fn form(&self) -> &FormDialogState {
        &self.form
    }

    pub fn confirm(&self) -> Option<&PendingDelete> {
        self.confirm.as_ref()
    }

    pub fn notifications(&self) -> &NotificationState {
        &self.notifications
    }

    pub fn profile(&self) -> Option<&AdminProfile> {
        self.profile.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Resize(cols, rows) => self.size = Some((cols, rows)),
            AppEvent::Loading(Tab::Prices) => {
                dispatch_mvi!(self, prices, ListReducer<Price>, ListIntent::FetchStarted);
            }
            AppEvent::Loading(Tab::Services) => {
                dispatch_mvi!(self, services, ListReducer<Service>, ListIntent::FetchStarted);
            }
            AppEvent::Prices(state) => {
                self.prices = state;
                self.clamp_selection(Tab::Prices);
            }
            AppEvent::Services(state) => {
                self.services = state;
                self.clamp_selection(Tab::Services);
            }
            AppEvent::Notice(level, text) => self.notify(level, text),
            AppEvent::Profile(profile) => self.profile = Some(profile),
        }
    }

    pub fn on_tick(&mut self) {
        dispatch_mvi!(self, notifications, NotificationReducer, NotificationIntent::Tick);
    }

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        let notice = Notice {
            level,
            text: text.into(),
            ttl: self.toast_ticks,
        };
        dispatch_mvi!(self, notifications, NotificationReducer, NotificationIntent::Push(notice));
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.request_quit();
            return;
        }
        if self.form.is_visible() {
            self.on_form_key(key);
        } else if self.confirm.is_some() {
            self.on_confirm_key(key);
        } else {
            self.on_list_key(key);
        }
    }

    fn on_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            KeyCode::Tab | KeyCode::BackTab => self.tab = self.tab.next(),
            KeyCode::Char('1') => self.tab = Tab::Prices,
            KeyCode::Char('2') => self.tab = Tab::Services,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('r') => self.send(WorkerCommand::Refresh(self.tab)),
            KeyCode::Char(']') => self.send(WorkerCommand::NextPage(self.tab)),
            KeyCode::Char('[') => self.send(WorkerCommand::PrevPage(self.tab)),
            KeyCode::Char('n') => self.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
            KeyCode::Char('f') => self.open_filter(),
            KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(),
            KeyCode::Char('t') => self.toggle_active(),
            KeyCode::Char('+') => self.resize_page(true),
            KeyCode::Char('-') => self.resize_page(false),
            KeyCode::Char('x') => {
                dispatch_mvi!(
                    self,
                    notifications,
                    NotificationReducer,
                    NotificationIntent::DismissAll
                );
            }
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        let intent = match key.code {
            KeyCode::Esc => FormIntent::Close,
            KeyCode::Enter => {
                self.submit_form();
                return;
            }
            KeyCode::Up | KeyCode::BackTab => FormIntent::MoveUp,
            KeyCode::Down | KeyCode::Tab => FormIntent::MoveDown,
            KeyCode::Backspace => FormIntent::Backspace,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormIntent::ClearField
            }
            KeyCode::Char(ch) => FormIntent::Input(ch),
            _ => return,
        };
        dispatch_mvi!(self, form, FormReducer, intent);
    }

    fn on_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(pending) = self.confirm.take() {
                    let command = match pending.tab {
                        Tab::Prices => WorkerCommand::DeletePrice { id: pending.id },
                        Tab::Services => WorkerCommand::DeleteService { id: pending.id },
                    };
                    self.send(command);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.confirm = None,
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.row_count(self.tab);
        if len == 0 {
            return;
        }
        let slot = &mut self.selected[self.tab.index()];
        *slot = slot.saturating_add_signed(delta).min(len - 1);
    }

    fn row_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Prices => self.prices.items.len(),
            Tab::Services => self.services.items.len(),
        }
    }

    fn clamp_selection(&mut self, tab: Tab) {
        let len = self.row_count(tab);
        let slot = &mut self.selected[tab.index()];
        *slot = (*slot).min(len.saturating_sub(1));
    }

    fn selected_price(&self) -> Option<&Price> {
        self.prices.items.get(self.selected(Tab::Prices))
    }

    fn selected_service(&self) -> Option<&Service> {
        self.services.items.get(self.selected(Tab::Services))
    }

    fn open_form(
        &mut self,
        purpose: FormPurpose,
        title: String,
        specs: &'static [FieldSpec],
        values: Vec<String>,
    ) {
        dispatch_mvi!(
            self,
            form,
            FormReducer,
            FormIntent::Open {
                purpose,
                title,
                specs,
                values,
            }
        );
    }

    fn open_create(&mut self) {
        match self.tab {
            Tab::Prices => self.open_form(
                FormPurpose::CreatePrice,
                "New price".to_string(),
                PriceDraft::fields(),
                Vec::new(),
            ),
            Tab::Services => self.open_form(
                FormPurpose::CreateService,
                "New service".to_string(),
                ServiceDraft::fields(),
                ServiceDraft::default().to_values(),
            ),
        }
    }

    fn open_edit(&mut self) {
        match self.tab {
            Tab::Prices => {
                let Some(price) = self.selected_price() else {
                    return;
                };
                let (id, values) = (price.id.clone(), price.to_draft().to_values());
                self.open_form(
                    FormPurpose::EditPrice { id },
                    "Edit price".to_string(),
                    PriceDraft::fields(),
                    values,
                );
            }
            Tab::Services => {
                let Some(service) = self.selected_service() else {
                    return;
                };
                let (id, values) = (service.id.clone(), service.to_draft().to_values());
                self.open_form(
                    FormPurpose::EditService { id },
                    "Edit service".to_string(),
                    ServiceDraft::fields(),
                    values,
                );
            }
        }
    }

    fn open_filter(&mut self) {
        match self.tab {
            Tab::Prices => {
                let values = self.prices.query.filter.to_values();
                self.open_form(
                    FormPurpose::FilterPrices,
                    "Filter prices".to_string(),
                    PriceFilter::fields(),
                    values,
                );
            }
            Tab::Services => {
                let values = self.services.query.filter.to_values();
                self.open_form(
                    FormPurpose::FilterServices,
                    "Filter services".to_string(),
                    ServiceFilter::fields(),
                    values,
                );
            }
        }
    }

    fn ask_delete(&mut self) {
        let pending = match self.tab {
            Tab::Prices => self.selected_price().map(|p| PendingDelete {
                tab: Tab::Prices,
                id: p.id.clone(),
                prompt: format!(
                    "Delete {} price {}-{} km at {}?",
                    p.vehicle_type, p.min_km, p.max_km, p.rate
                ),
            }),
            Tab::Services => self.selected_service().map(|s| PendingDelete {
                tab: Tab::Services,
                id: s.id.clone(),
                prompt: format!("Delete {} service in {}?", s.vehicle_type, s.city),
            }),
        };
        self.confirm = pending;
    }

    fn toggle_active(&mut self) {
        if self.tab != Tab::Services {
            return;
        }
        if let Some(service) = self.selected_service() {
            let command = WorkerCommand::SetServiceActive {
                id: service.id.clone(),
                active: !service.is_active,
            };
            self.send(command);
        }
    }

    /// Doubles or halves the page size of the current tab.
    fn resize_page(&mut self, grow: bool) {
        let current = match self.tab {
            Tab::Prices => self.prices.query.limit,
            Tab::Services => self.services.query.limit,
        };
        let limit = if grow {
            current.saturating_mul(2).min(MAX_PAGE_SIZE)
        } else {
            (current / 2).max(1)
        };
        if limit != current {
            self.send(WorkerCommand::PageSize { tab: self.tab, limit });
        }
    }

    /// Parse the form; invalid input stays in the dialog with messages.
    fn submit_form(&mut self) {
        let Some(purpose) = self.form.purpose().cloned() else {
            return;
        };
        let values = self.form.values();
        let command = match purpose {
            FormPurpose::CreatePrice => parse::<PriceDraft>(&values).map(WorkerCommand::CreatePrice),
            FormPurpose::EditPrice { id } => parse::<PriceDraft>(&values)
                .map(|draft| WorkerCommand::UpdatePrice { id, draft }),
            FormPurpose::FilterPrices => {
                parse::<PriceFilter>(&values).map(WorkerCommand::FilterPrices)
            }
            FormPurpose::CreateService => {
                parse::<ServiceDraft>(&values).map(WorkerCommand::CreateService)
            }
            FormPurpose::EditService { id } => parse::<ServiceDraft>(&values)
                .map(|draft| WorkerCommand::UpdateService { id, draft }),
            FormPurpose::FilterServices => {
                parse::<ServiceFilter>(&values).map(WorkerCommand::FilterServices)
            }
        };

        match command {
            Ok(command) => {
                dispatch_mvi!(self, form, FormReducer, FormIntent::Close);
                self.send(command);
            }
            Err(errors) => {
                dispatch_mvi!(self, form, FormReducer, FormIntent::Rejected(errors));
            }
        }
    }

    fn send(&mut self, command: WorkerCommand) {
        let delivered = self
            .commands
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok());
        if !delivered {
            tracing::error!("worker channel closed");
            self.notify(NoticeLevel::Error, "Background worker is not running");
        }
    }
}

fn parse<D: FormDraft>(values: &[String]) -> Result<D, ValidationError> {
    let draft = D::from_values(values)?;
    draft.validate()?;
    Ok(draft)
}
