//! Shared harness for API integration tests: a real server on an ephemeral
//! port, backed by temp directories and wiremock upstreams.

use marquee::config::Config;
use marquee::server;

pub struct TestHarness {
    pub base_url: String,
    pub client: reqwest::Client,
    _data_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start a server wired to the given upstream base URLs.
    pub async fn start(radarr_url: &str, tvdb_url: &str) -> Self {
        let data_dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.radarr.url = radarr_url.to_string();
        config.radarr.api_key = "test-key".to_string();
        config.tvdb.base_url = tvdb_url.to_string();
        config.tvdb.api_key = "tvdb-key".to_string();
        config.cache.dir = data_dir.path().join("cache");
        config.cache.poster_dir = data_dir.path().join("posters");
        config.lists.dir = data_dir.path().join("lists");

        let ctx = server::build_context(config).unwrap();
        let app = server::create_router(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            _data_dir: data_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
