// src/panels/slot.rs

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Senha de uma busca: quanto maior, mais recente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

// O que o painel mostra agora. `data` é o último resultado bom;
// `error` é o banner da busca mais recente que falhou.
#[derive(Debug, Clone)]
pub struct PanelSnapshot<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub revision: u64,
}

impl<T> Default for PanelSnapshot<T> {
    fn default() -> Self {
        Self { data: None, error: None, revision: 0 }
    }
}

// Estado de um painel com "a mais recente vence": uma resposta lenta que
// chega depois de uma mais nova é descartada.
pub struct PanelSlot<T> {
    name: &'static str,
    issued: AtomicU64,
    state: RwLock<PanelSnapshot<T>>,
}

impl<T: Clone> PanelSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            issued: AtomicU64::new(0),
            state: RwLock::new(PanelSnapshot::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reserva a senha no momento em que a busca é disparada.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Aplica o resultado se a senha for mais nova que a última aplicada.
    /// Retorna `false` quando o resultado chegou atrasado e foi descartado.
    pub async fn complete(&self, ticket: Ticket, result: Result<T, AppError>) -> bool {
        let mut state = self.state.write().await;
        if ticket.0 <= state.revision {
            tracing::debug!(
                "Painel '{}': resposta #{} descartada (já exibindo #{})",
                self.name, ticket.0, state.revision
            );
            return false;
        }

        state.revision = ticket.0;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(e) => {
                tracing::warn!("Painel '{}' falhou: {}", self.name, e);
                state.error = Some(e.banner_message());
            }
        }
        true
    }

    /// Dispara a busca com uma senha nova e aplica o resultado.
    pub async fn refresh<F, Fut>(&self, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let ticket = self.begin();
        let result = fetch().await;
        self.complete(ticket, result).await
    }

    pub async fn snapshot(&self) -> PanelSnapshot<T> {
        self.state.read().await.clone()
    }

    pub async fn data(&self) -> Option<T> {
        self.state.read().await.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn late_older_response_is_discarded() {
        let slot: PanelSlot<&str> = PanelSlot::new("analytics");

        let a = slot.begin();
        let b = slot.begin();

        assert!(slot.complete(b, Ok("B")).await);
        assert!(!slot.complete(a, Ok("A")).await);

        let snap = slot.snapshot().await;
        assert_eq!(snap.data, Some("B"));
        assert_eq!(snap.revision, b.0);
    }

    #[tokio::test]
    async fn in_order_responses_apply() {
        let slot: PanelSlot<u32> = PanelSlot::new("orders");
        assert!(slot.refresh(|| async { Ok(1) }).await);
        assert!(slot.refresh(|| async { Ok(2) }).await);
        assert_eq!(slot.data().await, Some(2));
    }

    #[tokio::test]
    async fn failure_keeps_last_good_data() {
        let slot: PanelSlot<u32> = PanelSlot::new("inventory");
        slot.refresh(|| async { Ok(7) }).await;
        slot.refresh(|| async { Err(AppError::HttpStatus { status: 500, message: "boom".into() }) })
            .await;

        let snap = slot.snapshot().await;
        assert_eq!(snap.data, Some(7));
        assert!(snap.error.unwrap().contains("boom"));

        // Próximo sucesso limpa o banner
        slot.refresh(|| async { Ok(8) }).await;
        assert_eq!(slot.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn stale_failure_does_not_raise_banner() {
        let slot: PanelSlot<u32> = PanelSlot::new("inventory");
        let old = slot.begin();
        let new = slot.begin();
        slot.complete(new, Ok(3)).await;
        slot.complete(old, Err(AppError::ValidationError("x".into()))).await;
        assert_eq!(slot.snapshot().await.error, None);
    }
}
