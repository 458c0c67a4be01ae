pub mod analytics;
pub mod dashboard;
pub use dashboard::{Dashboard, PanelKind};
pub mod inventory;
pub mod inventory_editor;
pub use inventory_editor::InventoryEditor;
pub mod orders;
pub mod reports;
pub mod slot;
pub use slot::{PanelSlot, PanelSnapshot};
