// src/panels/reports.rs

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::{analytics::DailyMetrics, report::ReportPreview},
    services::ReportService,
};

pub async fn load_report_preview<B>(backend: &B, date: NaiveDate) -> Result<ReportPreview, AppError>
where
    B: DashboardBackend + ?Sized,
{
    let metrics = backend
        .get_analytics_for_date(date)
        .await?
        .unwrap_or_else(|| DailyMetrics::empty(date));
    Ok(ReportService::new().preview(&metrics))
}

/// Baixa o CSV do dia e grava em `dir`. Retorna o caminho do arquivo.
pub async fn save_report<B>(backend: &B, date: NaiveDate, dir: &Path) -> anyhow::Result<PathBuf>
where
    B: DashboardBackend + ?Sized,
{
    let report = backend.download_report(date).await?;

    // Nunca deixa o nome vindo do servidor escapar do diretório
    let file_name = Path::new(&report.file_name)
        .file_name()
        .map(|n| n.to_owned())
        .unwrap_or_else(|| ReportService::new().default_file_name(date).into());

    let path = dir.join(file_name);
    tokio::fs::write(&path, &report.bytes).await?;
    tracing::info!("📄 Relatório de {} salvo em {}", date, path.display());
    Ok(path)
}
