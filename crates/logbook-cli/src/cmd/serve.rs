use anyhow::Result;
use logbook_core::Roadmap;

pub fn run(roadmap: Roadmap, port: u16, no_open: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        let url = format!("http://127.0.0.1:{}", listener.local_addr()?.port());
        println!("{}", banner(&roadmap, &url));

        tokio::select! {
            res = logbook_server::serve_on(roadmap, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down roadmap server.");
                Ok(())
            }
        }
    })
}

/// The one line that announces where the dashboard lives.
fn banner(roadmap: &Roadmap, url: &str) -> String {
    let label = if roadmap.is_multi() {
        format!("{} projects", roadmap.sources().len())
    } else {
        "single project".to_string()
    };
    format!("Logbook roadmap ({label}) → {url}")
}
