use std::io;
use std::sync::Arc;

use ntex::http::StatusCode;
use ntex::web;
use serde::Deserialize;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::error::PublishError;
use crate::form_token::FormToken;
use crate::publish::{Publisher, PublishResult};
use crate::view::upload_renderer::{UploadRenderer, DEFAULT_TEMPLATE};

const UPLOAD_TEMPLATE: &str = "upload.tpl";

pub struct AppState {
    publisher: Publisher,
    renderer: UploadRenderer,
    form_token: FormToken,
}

impl AppState {
    pub fn new(config: &Config, publisher: Publisher) -> io::Result<AppState> {
        Ok(AppState {
            publisher,
            renderer: load_renderer(config)?,
            form_token: FormToken::generate(&config.server.secret_key),
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct UploadForm {
    file: Option<String>,
    form_token: Option<String>,
}

fn load_renderer(config: &Config) -> io::Result<UploadRenderer> {
    let tpl_src = match config.paths.template_dir {
        Some(ref tpl_dir) => {
            let tpl_path = tpl_dir.join(UPLOAD_TEMPLATE);
            std::fs::read_to_string(&tpl_path).map_err(|e| io::Error::new(
                e.kind(), format!("Error loading upload template {}: {}", tpl_path.display(), e)))?
        }
        None => DEFAULT_TEMPLATE.to_string(),
    };
    UploadRenderer::new(tpl_src)
}

fn render_page(state: &AppState, status: StatusCode, selected: Option<&str>, result: Option<&PublishResult>) -> web::HttpResponse {
    // The listing is read again on every render so the page shows what is on disk now
    let files = match state.publisher.list_files() {
        Ok(files) => files,
        Err(e) => {
            error!("Error listing {}: {}", state.publisher.markdown_dir().display(), e);
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing markdown files: {}", e));
        }
    };

    let rendered = state.renderer.render(&files, selected, result, state.form_token.as_str());
    web::HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(rendered)
}

fn status_of(err: &PublishError) -> StatusCode {
    match err {
        PublishError::InvalidFile(_) => StatusCode::BAD_REQUEST,
        PublishError::MissingTitle(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PublishError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    render_page(&state, StatusCode::OK, None, None)
}

#[web::post("/")]
async fn upload(form: web::types::Form<UploadForm>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let form = form.into_inner();

    if !state.form_token.verify(form.form_token.as_deref()) {
        warn!("Rejected upload with an invalid form token");
        return web::HttpResponse::Forbidden()
            .body("Invalid form token. Please reload the page and try again.");
    }

    let Some(file_name) = form.file.filter(|f| !f.is_empty()) else {
        let result = PublishResult {
            success: false,
            message: "No file selected".to_string(),
        };
        return render_page(&state, StatusCode::BAD_REQUEST, None, Some(&result));
    };

    info!("Upload requested for {}", file_name);
    match state.publisher.publish(&file_name).await {
        Ok(result) => render_page(&state, StatusCode::OK, Some(&file_name), Some(&result)),
        Err(err) => {
            warn!("Upload of {} failed: {}", file_name, err);
            let result = PublishResult {
                success: false,
                message: err.to_string(),
            };
            render_page(&state, status_of(&err), Some(&file_name), Some(&result))
        }
    }
}

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(upload);
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let files = crate::file_list::list_markdown_files(&config.paths.markdown_dir)?;
    info!("Found {} markdown files in {}", files.len(), config.paths.markdown_dir.display());
    for file in files.iter() {
        info!("Markdown file: {}", file);
    }

    let publisher = Publisher::from_config(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Error creating HTTP client: {}", e)))?;

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState::new(&config, publisher)?);

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .configure(configure_app)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
