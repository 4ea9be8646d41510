use swagger_handler::config::Config;
use swagger_handler::{logger, server, spec, SwaggerUi};

const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    if let Some(ref doc_file) = cfg.swagger.doc_file {
        spec::register(&cfg.swagger.instance_name, spec::FileDoc::new(doc_file))?;
    } else {
        logger::log_warning("swagger.doc_file is not set, doc.json will answer 500");
    }

    let mut ui_config = cfg.swagger.ui.clone().unwrap_or_default();
    if ui_config.instance_name.is_empty() {
        ui_config.instance_name.clone_from(&cfg.swagger.instance_name);
    }
    let swagger = SwaggerUi::try_new(cfg.swagger.route.clone(), Some(ui_config))?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(server::run(cfg, swagger))
}
