// src/panels/dashboard.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::{
        inventory::{IngredientUpdate, InventoryEvaluation, NewIngredient},
        orders::{Dish, NewOrder, TodayOverview},
        report::{QuickRange, ReportPreview},
    },
    panels::{
        analytics::{AnalyticsView, load_analytics_for_date},
        inventory::load_inventory,
        inventory_editor::InventoryEditor,
        orders::{load_dishes, load_today_overview, submit_order},
        reports::{load_report_preview, save_report},
        slot::{PanelSlot, Ticket},
    },
    services::{OrderService, ReportService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Dishes,
    Orders,
    Analytics,
    Inventory,
}

// Orquestra os painéis. Cada painel tem seu próprio slot e seu próprio
// timer; um painel lento ou quebrado não trava os outros.
pub struct Dashboard<B: ?Sized> {
    backend: Arc<B>,
    order_service: OrderService,
    report_service: ReportService,
    refresh_interval: Duration,
    analytics_date: RwLock<NaiveDate>,

    pub dishes: PanelSlot<Vec<Dish>>,
    pub orders: PanelSlot<TodayOverview>,
    pub analytics: PanelSlot<AnalyticsView>,
    pub inventory: PanelSlot<InventoryEvaluation>,
    pub report_preview: PanelSlot<ReportPreview>,
    pub editor: InventoryEditor<B>,
}

impl<B> Dashboard<B>
where
    B: DashboardBackend + ?Sized + 'static,
{
    pub fn new(backend: Arc<B>, order_service: OrderService, refresh_interval: Duration) -> Self {
        Self {
            editor: InventoryEditor::new(Arc::clone(&backend)),
            backend,
            order_service,
            report_service: ReportService::new(),
            refresh_interval,
            analytics_date: RwLock::new(Local::now().date_naive()),
            dishes: PanelSlot::new("dishes"),
            orders: PanelSlot::new("orders"),
            analytics: PanelSlot::new("analytics"),
            inventory: PanelSlot::new("inventory"),
            report_preview: PanelSlot::new("report_preview"),
        }
    }

    // ---
    // Recargas (cada uma pega uma senha nova no slot do painel)
    // ---

    pub async fn refresh_dishes(&self) -> bool {
        self.dishes.refresh(|| load_dishes(self.backend.as_ref())).await
    }

    pub async fn refresh_orders(&self) -> bool {
        self.orders
            .refresh(|| load_today_overview(self.backend.as_ref(), &self.order_service))
            .await
    }

    // A senha é emitida com a data travada: a ordem das senhas segue a
    // ordem em que as datas foram escolhidas.
    pub async fn refresh_analytics(&self) -> bool {
        let (ticket, date) = {
            let date = self.analytics_date.read().await;
            (self.analytics.begin(), *date)
        };
        self.apply_analytics(ticket, date).await
    }

    pub async fn refresh_inventory(&self) -> bool {
        self.inventory.refresh(|| load_inventory(self.backend.as_ref())).await
    }

    /// Troca a data da aba de análises e recarrega.
    pub async fn select_analytics_date(&self, date: NaiveDate) -> bool {
        let ticket = {
            let mut selected = self.analytics_date.write().await;
            *selected = date;
            self.analytics.begin()
        };
        self.apply_analytics(ticket, date).await
    }

    async fn apply_analytics(&self, ticket: Ticket, date: NaiveDate) -> bool {
        let result = load_analytics_for_date(self.backend.as_ref(), date).await;
        self.analytics.complete(ticket, result).await
    }

    pub async fn analytics_date(&self) -> NaiveDate {
        *self.analytics_date.read().await
    }

    // ---
    // Relatórios
    // ---

    /// Prévia do relatório do dia escolhido na aba de relatórios.
    pub async fn preview_report(&self, date: NaiveDate) -> bool {
        self.report_preview
            .refresh(|| load_report_preview(self.backend.as_ref(), date))
            .await
    }

    /// Atalhos "hoje" / "ontem": baixa o CSV do dia e grava em `dir`.
    pub async fn download_quick_report(&self, range: QuickRange, dir: &Path) -> anyhow::Result<PathBuf> {
        let date = self.report_service.report_date(range, Local::now().date_naive());
        save_report(self.backend.as_ref(), date, dir).await
    }

    /// Intervalo de datas: o backend só gera um dia, então baixa a data inicial.
    pub async fn download_report_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        dir: &Path,
    ) -> anyhow::Result<PathBuf> {
        let date = self.report_service.range_download_date(start, end)?;
        save_report(self.backend.as_ref(), date, dir).await
    }

    pub async fn refresh_panel(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Dishes => self.refresh_dishes().await,
            PanelKind::Orders => self.refresh_orders().await,
            PanelKind::Analytics => self.refresh_analytics().await,
            PanelKind::Inventory => self.refresh_inventory().await,
        }
    }

    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_dishes(),
            self.refresh_orders(),
            self.refresh_analytics(),
            self.refresh_inventory(),
        );
    }

    // ---
    // Mutações (seguidas da recarga dos painéis afetados)
    // ---

    pub async fn place_order(&self, order: &NewOrder) -> Result<(), AppError> {
        submit_order(self.backend.as_ref(), &self.order_service, order).await?;
        tokio::join!(self.refresh_orders(), self.refresh_analytics(), self.refresh_inventory());
        Ok(())
    }

    pub async fn save_ingredient(&self, id: i64, update: IngredientUpdate) -> Result<(), AppError> {
        self.editor.save(id, update).await?;
        self.refresh_inventory().await;
        Ok(())
    }

    pub async fn deliver_ingredient(&self, id: i64) -> Result<(), AppError> {
        self.editor.deliver(id).await?;
        self.refresh_inventory().await;
        Ok(())
    }

    pub async fn delete_ingredient(&self, id: i64) -> Result<(), AppError> {
        self.editor.delete(id).await?;
        self.refresh_inventory().await;
        Ok(())
    }

    pub async fn add_ingredient(&self, ingredient: NewIngredient) -> Result<i64, AppError> {
        let id = self.editor.add(ingredient).await?;
        self.refresh_inventory().await;
        Ok(id)
    }
}

impl<B> Dashboard<B>
where
    B: DashboardBackend + 'static,
{
    /// Um timer por painel, sem lock compartilhado entre eles.
    pub fn spawn_refresh_loops(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        [PanelKind::Orders, PanelKind::Analytics, PanelKind::Inventory]
            .into_iter()
            .map(|kind| self.spawn_loop(kind))
            .collect()
    }

    fn spawn_loop(self: &Arc<Self>, kind: PanelKind) -> JoinHandle<()> {
        let dashboard = Arc::clone(self);
        let period = self.refresh_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!("⏱️ Atualizando painel {:?}", kind);
                dashboard.refresh_panel(kind).await;
            }
        })
    }
}
