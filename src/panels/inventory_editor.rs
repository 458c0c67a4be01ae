// src/panels/inventory_editor.rs

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::inventory::{Ingredient, IngredientUpdate, NewIngredient},
    services::InventoryStatusEvaluator,
};

// Editor de ingredientes (o modal). Guarda uma cópia transitória da lista
// enquanto está aberto; toda mutação descarta a cópia e busca de novo.
pub struct InventoryEditor<B: ?Sized> {
    backend: Arc<B>,
    evaluator: InventoryStatusEvaluator,
    state: Mutex<EditorState>,
}

// `session` muda a cada abertura e fechamento; uma recarga só grava a
// cópia se a sessão em que a mutação começou ainda estiver aberta.
#[derive(Default)]
struct EditorState {
    session: u64,
    ingredients: Option<Vec<Ingredient>>,
}

impl<B> InventoryEditor<B>
where
    B: DashboardBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            evaluator: InventoryStatusEvaluator::new(),
            state: Mutex::new(EditorState::default()),
        }
    }

    pub async fn open(&self) -> Result<Vec<Ingredient>, AppError> {
        let ingredients = self.backend.get_ingredients().await?;
        let mut state = self.state.lock().await;
        state.session += 1;
        state.ingredients = Some(ingredients.clone());
        Ok(ingredients)
    }

    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.session += 1;
        state.ingredients = None;
    }

    pub async fn snapshot(&self) -> Option<Vec<Ingredient>> {
        self.state.lock().await.ingredients.clone()
    }

    // ---
    // Mutações
    // ---

    pub async fn save(&self, id: i64, update: IngredientUpdate) -> Result<(), AppError> {
        // 1. Valida localmente (nome vazio nunca vira requisição)
        let update = self.evaluator.validate_update(update)?;
        let session = self.ensure_known(id).await?;

        // 2. Envia
        self.backend.update_ingredient(id, &update).await?;
        tracing::info!("✅ Ingrediente {} atualizado", id);

        // 3. Recarrega
        self.reload(session).await;
        Ok(())
    }

    /// Entrega completa: o backend repõe o estoque até o teto (100).
    pub async fn deliver(&self, id: i64) -> Result<(), AppError> {
        let session = self.ensure_known(id).await?;
        self.backend.deliver_ingredient(id).await?;
        tracing::info!("🚚 Ingrediente {} reabastecido", id);
        self.reload(session).await;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let session = self.ensure_known(id).await?;
        self.backend.delete_ingredient(id).await?;
        tracing::info!("Ingrediente {} removido", id);
        self.reload(session).await;
        Ok(())
    }

    pub async fn add(&self, ingredient: NewIngredient) -> Result<i64, AppError> {
        let ingredient = self.evaluator.validate_new(ingredient)?;
        let session = self.open_session().await;
        let id = self.backend.add_ingredient(&ingredient).await?;
        tracing::info!("✅ Ingrediente '{}' criado (id {})", ingredient.name, id);
        self.reload(session).await;
        Ok(id)
    }

    // Sessão atual, se o editor estiver aberto
    async fn open_session(&self) -> Option<u64> {
        let state = self.state.lock().await;
        state.ingredients.as_ref().map(|_| state.session)
    }

    // Com o editor aberto, só aceita ids que estão na lista exibida
    async fn ensure_known(&self, id: i64) -> Result<Option<u64>, AppError> {
        let state = self.state.lock().await;
        match state.ingredients.as_ref() {
            Some(list) if !list.iter().any(|ing| ing.id == id) => Err(AppError::ValidationError(
                format!("ingrediente {} não está na lista carregada", id),
            )),
            Some(_) => Ok(Some(state.session)),
            None => Ok(None),
        }
    }

    // A mutação já foi aceita; editor fechado não tem cópia para recarregar.
    // Se a recarga falhar o editor fica sem cópia até a próxima abertura.
    async fn reload(&self, session: Option<u64>) {
        let Some(session) = session else { return };

        {
            let mut state = self.state.lock().await;
            if state.session != session {
                return;
            }
            state.ingredients = None;
        }

        match self.backend.get_ingredients().await {
            Ok(fresh) => {
                let mut state = self.state.lock().await;
                if state.session == session {
                    state.ingredients = Some(fresh);
                } else {
                    tracing::debug!("Editor fechado durante a recarga; cópia descartada");
                }
            }
            Err(e) => tracing::warn!("Falha ao recarregar ingredientes após mutação: {}", e),
        }
    }
}
