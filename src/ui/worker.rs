//! Network side of the TUI.
//!
//! Commands are handled one at a time, in the order the user issued them.
//! After each one the affected list snapshot is sent back to the UI thread.

use std::sync::mpsc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiClient, ApiError, AuthApi, PriceApi, ServiceApi};
use crate::domain::{PriceDraft, PriceFilter, ServiceDraft, ServiceFilter};
use crate::session::SessionStore;
use crate::store::{ActionError, PriceStore, ServiceStore};
use crate::ui::app::Tab;
use crate::ui::events::AppEvent;
use crate::ui::notifications::NoticeLevel;

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    Refresh(Tab),
    NextPage(Tab),
    PrevPage(Tab),
    PageSize { tab: Tab, limit: u32 },
    FilterPrices(PriceFilter),
    FilterServices(ServiceFilter),
    CreatePrice(PriceDraft),
    UpdatePrice { id: String, draft: PriceDraft },
    DeletePrice { id: String },
    CreateService(ServiceDraft),
    UpdateService { id: String, draft: ServiceDraft },
    DeleteService { id: String },
    SetServiceActive { id: String, active: bool },
    LoadProfile,
}

pub type WorkerSender = UnboundedSender<WorkerCommand>;

pub struct Worker {
    prices: PriceStore,
    services: ServiceStore,
    auth: AuthApi,
    session: SessionStore,
    events: mpsc::Sender<AppEvent>,
}

impl Worker {
    pub fn new(
        client: ApiClient,
        page_size: u32,
        session: SessionStore,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            prices: PriceStore::new(PriceApi::new(client.clone()), page_size),
            services: ServiceStore::new(ServiceApi::new(client.clone()), page_size),
            auth: AuthApi::new(client),
            session,
            events,
        }
    }

    /// Spawn on the current tokio runtime. The task ends when every sender is dropped.
    pub fn spawn(self) -> WorkerSender {
        let (tx, rx) = unbounded_channel();
        tokio::spawn(self.run(rx));
        tx
    }

    async fn run(mut self, mut rx: UnboundedReceiver<WorkerCommand>) {
        while let Some(command) = rx.recv().await {
            tracing::debug!(?command, "worker command");
            self.handle(command).await;
        }
        tracing::debug!("worker stopped");
    }

    pub async fn handle(&mut self, command: WorkerCommand) {
        match command {
            WorkerCommand::Refresh(tab) => {
                self.emit(AppEvent::Loading(tab));
                match tab {
                    Tab::Prices => self.prices.fetch().await,
                    Tab::Services => self.services.fetch().await,
                }
                self.publish(tab);
            }
            WorkerCommand::NextPage(tab) => {
                self.emit(AppEvent::Loading(tab));
                match tab {
                    Tab::Prices => self.prices.next_page().await,
                    Tab::Services => self.services.next_page().await,
                }
                self.publish(tab);
            }
            WorkerCommand::PrevPage(tab) => {
                self.emit(AppEvent::Loading(tab));
                match tab {
                    Tab::Prices => self.prices.prev_page().await,
                    Tab::Services => self.services.prev_page().await,
                }
                self.publish(tab);
            }
            WorkerCommand::PageSize { tab, limit } => {
                self.emit(AppEvent::Loading(tab));
                match tab {
                    Tab::Prices => self.prices.set_limit(limit).await,
                    Tab::Services => self.services.set_limit(limit).await,
                }
                self.publish(tab);
            }
            WorkerCommand::FilterPrices(filter) => {
                self.emit(AppEvent::Loading(Tab::Prices));
                self.prices.set_filter(filter).await;
                self.publish(Tab::Prices);
            }
            WorkerCommand::FilterServices(filter) => {
                self.emit(AppEvent::Loading(Tab::Services));
                self.services.set_filter(filter).await;
                self.publish(Tab::Services);
            }
            WorkerCommand::CreatePrice(draft) => {
                self.emit(AppEvent::Loading(Tab::Prices));
                let result = self.prices.create(draft).await;
                self.report(result.map(|p| {
                    format!("Price for {} created", describe(&p.vehicle_type, &p.sub_type))
                }));
                self.publish(Tab::Prices);
            }
            WorkerCommand::UpdatePrice { id, draft } => {
                self.emit(AppEvent::Loading(Tab::Prices));
                let result = self.prices.update(&id, draft).await;
                self.report(result.map(|p| {
                    format!("Price for {} updated", describe(&p.vehicle_type, &p.sub_type))
                }));
                self.publish(Tab::Prices);
            }
            WorkerCommand::DeletePrice { id } => {
                self.emit(AppEvent::Loading(Tab::Prices));
                let result = self.prices.remove(&id).await;
                self.report(result.map(|_| "Price deleted".to_string()));
                self.publish(Tab::Prices);
            }
            WorkerCommand::CreateService(draft) => {
                self.emit(AppEvent::Loading(Tab::Services));
                let result = self.services.create(draft).await;
                self.report(result.map(|s| format!("Service in {} created", s.city)));
                self.publish(Tab::Services);
            }
            WorkerCommand::UpdateService { id, draft } => {
                self.emit(AppEvent::Loading(Tab::Services));
                let result = self.services.update(&id, draft).await;
                self.report(result.map(|s| format!("Service in {} updated", s.city)));
                self.publish(Tab::Services);
            }
            WorkerCommand::DeleteService { id } => {
                self.emit(AppEvent::Loading(Tab::Services));
                let result = self.services.remove(&id).await;
                self.report(result.map(|_| "Service deleted".to_string()));
                self.publish(Tab::Services);
            }
            WorkerCommand::SetServiceActive { id, active } => {
                self.emit(AppEvent::Loading(Tab::Services));
                let result = self.services.set_active(&id, active).await;
                self.report(result.map(|s| {
                    let status = if s.is_active { "activated" } else { "deactivated" };
                    format!("Service in {} {}", s.city, status)
                }));
                self.publish(Tab::Services);
            }
            WorkerCommand::LoadProfile => self.load_profile().await,
        }
    }

    async fn load_profile(&mut self) {
        if !self.auth_client_has_token() {
            return;
        }
        match self.auth.profile().await {
            Ok(profile) => {
                if let Err(err) = self.session.cache_profile(profile.clone()) {
                    tracing::warn!(error = %err, "could not cache admin profile");
                }
                self.emit(AppEvent::Profile(profile));
            }
            Err(ApiError::Unauthorized { .. }) => {
                self.emit(AppEvent::Notice(
                    NoticeLevel::Error,
                    "Session expired, run `fleetdesk login`".to_string(),
                ));
            }
            Err(err) => tracing::warn!(
                error = %err,
                error_type = err.error_type(),
                "profile refresh failed, keeping cached profile"
            ),
        }
    }

    fn auth_client_has_token(&self) -> bool {
        self.prices.api().client().has_token()
    }

    fn report(&self, result: Result<String, ActionError>) {
        let event = match result {
            Ok(message) => AppEvent::Notice(NoticeLevel::Success, message),
            Err(err) => AppEvent::Notice(NoticeLevel::Error, err.user_message()),
        };
        self.emit(event);
    }

    fn publish(&self, tab: Tab) {
        let event = match tab {
            Tab::Prices => AppEvent::Prices(self.prices.state().clone()),
            Tab::Services => AppEvent::Services(self.services.state().clone()),
        };
        self.emit(event);
    }

    fn emit(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("UI gone, dropping worker event");
        }
    }
}

fn describe(vehicle_type: &str, sub_type: &str) -> String {
    if sub_type.is_empty() {
        vehicle_type.to_string()
    } else {
        format!("{}/{}", vehicle_type, sub_type)
    }
}

