use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse, Responder,
};
use chrono::Utc;

use crate::{entities::portfolio_data::PortfolioData, use_cases::extractors::AdminSession, AppState};

/// The full dataset as a `portfolio-data-YYYY-MM-DD.json` download.
pub async fn export_data(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    let file_name = PortfolioData::export_file_name(Utc::now().date_naive());
    tracing::info!(file_name = %file_name, "Exporting portfolio data");

    HttpResponse::Ok()
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .json(state.content.export())
}
