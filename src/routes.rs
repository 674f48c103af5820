use keyword_tables::{ARCHIVE_FILE_NAME, ExtractOptions};
use serde::Serialize;
use worker::{Context, Env, FormEntry, Request, Response, Result, RouteContext, Router};

use crate::config::AppConfig;
use crate::csv_pipeline::{self, Upload};
use crate::error::ApiError;
use crate::models::{
    ARCHIVE_CONTENT_TYPE, ExtractionSummaryResponse, KEYWORD_FIELD, TABLE_COUNT_HEADER,
    UPLOAD_FIELD,
};

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let config = AppConfig::from_env(&env);

    Router::with_data(config)
        .get("/", form_route)
        .post_async("/api/v1/extract", extract_route)
        .post_async("/api/v1/extract/summary", summary_route)
        .run(req, env)
        .await
}

fn form_route(req: Request, ctx: RouteContext<AppConfig>) -> Result<Response> {
    let url = req.url()?;
    let keyword = url
        .query_pairs()
        .find(|(key, _)| key == KEYWORD_FIELD)
        .map(|(_, value)| value.into_owned());
    let keyword = csv_pipeline::resolve_keyword(keyword, &ctx.data.default_keyword);

    let mut response = Response::from_html(render_form(&keyword))?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

async fn extract_route(mut req: Request, ctx: RouteContext<AppConfig>) -> Result<Response> {
    match extract_response(&mut req, &ctx.data).await {
        Ok(response) => Ok(response),
        Err(error) => error.into_response(),
    }
}

async fn summary_route(mut req: Request, ctx: RouteContext<AppConfig>) -> Result<Response> {
    match summary_response(&mut req, &ctx.data).await {
        Ok(summary) => json_response(&summary),
        Err(error) => error.into_response(),
    }
}

async fn extract_response(req: &mut Request, config: &AppConfig) -> Result<Response, ApiError> {
    let (options, uploads) = read_submission(req, config).await?;
    let results = csv_pipeline::run_extraction(uploads, &options);
    csv_pipeline::log_results(&results);

    let download = csv_pipeline::build_download(results, &options.keyword)?;
    worker::console_log!(
        "archived {} table(s) containing '{}'",
        download.table_count,
        options.keyword
    );

    let mut response = Response::from_bytes(download.bytes)?;
    response
        .headers_mut()
        .set("Content-Type", ARCHIVE_CONTENT_TYPE)?;
    response
        .headers_mut()
        .set("Content-Disposition", &attachment_disposition(ARCHIVE_FILE_NAME))?;
    response
        .headers_mut()
        .set(TABLE_COUNT_HEADER, &download.table_count.to_string())?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

async fn summary_response(
    req: &mut Request,
    config: &AppConfig,
) -> Result<ExtractionSummaryResponse, ApiError> {
    let (options, uploads) = read_submission(req, config).await?;
    let results = csv_pipeline::run_extraction(uploads, &options);
    csv_pipeline::log_results(&results);
    Ok(csv_pipeline::summarize(&results, &options.keyword))
}

async fn read_submission(
    req: &mut Request,
    config: &AppConfig,
) -> Result<(ExtractOptions, Vec<Upload>), ApiError> {
    let form = req
        .form_data()
        .await
        .map_err(|error| ApiError::BadRequest(format!("expected multipart form data: {error}")))?;
    let keyword = csv_pipeline::resolve_keyword(form.get_field(KEYWORD_FIELD), &config.default_keyword);

    let mut uploads = Vec::new();
    for entry in form.get_all(UPLOAD_FIELD).unwrap_or_default() {
        let FormEntry::File(file) = entry else {
            continue;
        };
        let bytes = file.bytes().await?;
        // Browsers submit an empty part when no file was picked.
        if bytes.is_empty() {
            continue;
        }
        uploads.push(Upload {
            name: file.name(),
            bytes,
        });
    }

    if uploads.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "upload at least one PDF in the '{UPLOAD_FIELD}' field"
        )));
    }
    csv_pipeline::check_upload_size(&uploads, config)?;

    Ok((csv_pipeline::extract_options(keyword, config), uploads))
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

pub fn attachment_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_form(keyword: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PDF table extractor</title>
</head>
<body>
<h1>Extract PDF tables by keyword</h1>
<form method="post" action="/api/v1/extract" enctype="multipart/form-data">
<p><label>PDF files <input type="file" name="{UPLOAD_FIELD}" accept="application/pdf,.pdf" multiple required></label></p>
<p><label>Keyword <input type="text" name="{KEYWORD_FIELD}" value="{keyword}"></label></p>
<p><button type="submit">Extract and download {ARCHIVE_FILE_NAME}</button>
<button type="submit" formaction="/api/v1/extract/summary">Show summary</button></p>
</form>
</body>
</html>
"#,
        keyword = escape_html(keyword),
    )
}
