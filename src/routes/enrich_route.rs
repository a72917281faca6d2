use actix_multipart::form::{bytes::Bytes, MultipartForm};
use actix_web::{
    http::{
        header::{ContentDisposition, DispositionParam, DispositionType},
        StatusCode,
    },
    post, web, HttpResponse,
};
use askama::Template;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::Deserialize;

use crate::{
    domain::{
        company::EnrichedRecord,
        table::{parse_companies, write_table, OUTPUT_FILENAME},
    },
    services::EnrichmentPipeline,
};

use super::{default_route::IndexTemplate, render};

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    records: Vec<EnrichedRecord>,
    /// Base64 of the exported table, so a browser cannot rewrite its line breaks.
    encoded_csv: String,
    download_name: &'static str,
}

#[derive(MultipartForm)]
struct UploadForm {
    #[multipart(limit = "10MB")]
    file: Bytes,
}

#[post("/enrich")]
pub async fn enrich(
    pipeline: web::Data<EnrichmentPipeline>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> HttpResponse {
    let companies = match parse_companies(&form.file.data) {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Rejected upload {:?}: {:#}", form.file.file_name, e);
            return render(
                StatusCode::BAD_REQUEST,
                IndexTemplate {
                    error: Some(format!("{:#}", e)),
                },
            );
        }
    };

    let records = pipeline.run(&companies).await;

    let csv = match write_table(&records) {
        Ok(csv) => csv,
        Err(e) => {
            log::error!("Failed to write enriched table: {:#}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    render(
        StatusCode::OK,
        ResultsTemplate {
            records,
            encoded_csv: URL_SAFE.encode(csv),
            download_name: OUTPUT_FILENAME,
        },
    )
}

#[derive(Deserialize)]
struct DownloadForm {
    csv: String,
}

/// Decodes the table rendered by `/enrich` and sends it back as a file download.
#[post("/download")]
pub async fn download(form: web::Form<DownloadForm>) -> HttpResponse {
    let csv = match URL_SAFE.decode(form.into_inner().csv.trim()) {
        Ok(csv) => csv,
        Err(e) => {
            log::error!("Rejected download with malformed table: {}", e);
            return HttpResponse::BadRequest().body("Malformed download request");
        }
    };

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(OUTPUT_FILENAME.to_string())],
        })
        .body(csv)
}
