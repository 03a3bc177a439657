#[cfg(target_arch = "wasm32")]
fn main() {
    yew::start_app::<notes_frontend::web::Model>();
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use notes_frontend::session::FileStorage;
    use notes_frontend::router::Router;
    use notes_frontend::{logging, shell, ApiClient, App, Config, SessionStore};

    logging::init();
    let config = Config::load()?;

    let session = SessionStore::new(FileStorage::new(&config.session_file));
    // Like opening a URL: the optional first argument is the path to start on.
    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let start = Router::from_path(&path).current();

    let api = ApiClient::new(&config.api_base_url, session);
    shell::run(App::new(api, start)).await
}
