// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ontolens CLI entrypoint.
//!
//! By default this runs the interactive TUI and serves MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp`.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations).

use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use axum::Router;
use ontolens::exec::{load_into, Explorer};
use ontolens::export::FolderExportSink;
use ontolens::mcp::OntolensMcp;
use ontolens::store::OntologySource;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;
const DEFAULT_ONTOLOGY_PATH: &str = "ontology.json";
const LOG_ENV: &str = "ONTOLENS_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<ontology>] [--export-dir <dir>] [--log-file <path>] [--mcp-http-port <port>]\n  {program} [--ontology <path|url>] [--export-dir <dir>] [--log-file <path>] [--mcp-http-port <port>]\n  {program} --demo [--export-dir <dir>] [--mcp-http-port <port>]\n  {program} [--ontology <path|url>] --mcp\n  {program} --demo --mcp\n\nTUI mode (default) serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\nThe ontology is a JSON file path or an http(s) URL; if omitted, ./{DEFAULT_ONTOLOGY_PATH} is used.\n--demo uses the built-in supply-chain ontology and cannot be combined with an ontology argument.\n\n--export-dir is where selection.json and screenshots are written (default: current directory).\n--log-file receives tracing output; {LOG_ENV} sets the filter (default: warn).\nWithout --log-file, logs go to stderr in --mcp mode and are discarded while the TUI runs."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    demo: bool,
    ontology: Option<String>,
    mcp_http_port: Option<u16>,
    export_dir: Option<String>,
    log_file: Option<String>,
}

impl CliOptions {
    fn source(&self) -> OntologySource {
        if self.demo {
            return OntologySource::Demo;
        }
        OntologySource::from_arg(self.ontology.as_deref().unwrap_or(DEFAULT_ONTOLOGY_PATH))
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--ontology" => {
                if options.ontology.is_some() {
                    return Err(());
                }
                options.ontology = Some(args.next().ok_or(())?);
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            "--export-dir" => {
                if options.export_dir.is_some() {
                    return Err(());
                }
                options.export_dir = Some(args.next().ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.ontology.is_some() {
                    return Err(());
                }
                options.ontology = Some(arg);
            }
        }
    }

    if options.demo && options.ontology.is_some() {
        return Err(());
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

/// Installs the tracing subscriber; the TUI owns stderr, so it only logs to a file.
///
/// Returns whether a subscriber was installed.
fn init_logging(options: &CliOptions) -> Result<bool, Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // `try_init` reports `Box<dyn Error + Send + Sync>`, which `?` will not widen on its own.
    let installed = match options.log_file.as_deref() {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(std::sync::Mutex::new(file)).try_init()
        }
        None if options.mcp => builder.with_writer(std::io::stderr).try_init(),
        None => return Ok(false),
    };
    installed.map_err(|err| err as Box<dyn Error>)?;
    Ok(true)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "ontolens".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(&options)?;

        let source = options.source();
        let export_dir = options.export_dir.clone().unwrap_or_else(|| ".".to_owned());
        let explorer =
            Arc::new(Mutex::new(Explorer::new(Box::new(FolderExportSink::new(export_dir)))));
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.mcp {
            let mcp = OntolensMcp::with_shared(explorer.clone());
            runtime.block_on(async move {
                if !load_into(&explorer, &source).await {
                    tracing::warn!(%source, "serving MCP without a loaded ontology");
                }
                mcp.serve_stdio().await
            })?;
            return Ok(());
        }

        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);
        let mcp = OntolensMcp::with_shared(explorer.clone());
        let handle = runtime.handle().clone();

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;
            tracing::info!(addr = %listener.local_addr()?, "MCP HTTP listening");

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    tracing::error!(error = %err, "MCP HTTP server error");
                }
            });

            // The TUI renders "Loading" until this completes.
            let load = {
                let explorer = explorer.clone();
                let source = source.clone();
                tokio::spawn(async move {
                    load_into(&explorer, &source).await;
                })
            };

            let tui_explorer = explorer.clone();
            let tui_join = tokio::task::spawn_blocking(move || {
                ontolens::tui::run(tui_explorer, || {
                    let explorer = explorer.clone();
                    let source = source.clone();
                    handle.spawn(async move {
                        load_into(&explorer, &source).await;
                    });
                })
                .map_err(|err| err.to_string())
            })
            .await;

            shutdown_token.cancel();
            load.abort();
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("ontolens: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use ontolens::store::OntologySource;
    use rstest::rstest;

    use super::{init_logging, parse_options, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
        assert_eq!(options.source(), OntologySource::File("ontology.json".into()));
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert!(options.demo);
        assert!(!options.mcp);
        assert_eq!(options.source(), OntologySource::Demo);
    }

    #[test]
    fn parses_ontology_url() {
        let options = parse_options(args(&["--ontology", "https://example.com/o.json"]))
            .expect("parse options");
        assert_eq!(options.source(), OntologySource::Http("https://example.com/o.json".to_owned()));
    }

    #[test]
    fn parses_positional_ontology_with_mcp() {
        let options = parse_options(args(&["data/o.json", "--mcp"])).expect("parse options");
        assert_eq!(options.ontology.as_deref(), Some("data/o.json"));
        assert!(options.mcp);
        assert!(!options.demo);
    }

    #[test]
    fn parses_export_dir_log_file_and_port() {
        let options = parse_options(args(&[
            "--export-dir",
            "out",
            "--log-file",
            "ontolens.log",
            "--mcp-http-port",
            "1234",
        ]))
        .expect("parse options");
        assert_eq!(options.export_dir.as_deref(), Some("out"));
        assert_eq!(options.log_file.as_deref(), Some("ontolens.log"));
        assert_eq!(options.mcp_http_port, Some(1234));
    }

    #[rstest]
    #[case(&["--nope"])]
    #[case(&["--demo", "--demo"])]
    #[case(&["--mcp", "--mcp"])]
    #[case(&["--demo", "o.json"])]
    #[case(&["--demo", "--ontology", "o.json"])]
    #[case(&["--ontology", "a.json", "b.json"])]
    #[case(&["one.json", "two.json"])]
    #[case(&["--mcp", "--mcp-http-port", "0"])]
    #[case(&["--mcp-http-port", "not-a-port"])]
    #[case(&["--export-dir", "a", "--export-dir", "b"])]
    #[case(&["--log-file"])]
    #[case(&["--ontology"])]
    fn rejects_invalid_args(#[case] raw: &[&str]) {
        parse_options(args(raw)).unwrap_err();
    }

    #[test]
    fn tui_without_log_file_installs_no_subscriber() {
        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert!(!init_logging(&options).expect("init logging"));
    }

    // Installs the process-wide subscriber, so it is the only test that may succeed at it.
    #[test]
    fn log_file_receives_tracing_output() {
        let path = std::env::temp_dir()
            .join(format!("ontolens-log-{}-{}.log", std::process::id(), line!()));
        let options =
            parse_options(args(&["--demo", "--log-file", path.to_str().expect("utf-8 path")]))
                .expect("parse options");

        assert!(init_logging(&options).expect("init logging"));
        tracing::error!("log file check");
        let written = std::fs::read_to_string(&path).expect("read log file");
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("log file check"));
    }

    #[test]
    fn parses_demo_and_mcp_in_any_order() {
        let options = parse_options(args(&["--demo", "--mcp"])).expect("parse options");
        assert!(options.demo && options.mcp);

        let options = parse_options(args(&["--mcp", "--demo"])).expect("parse options");
        assert!(options.demo && options.mcp);
    }
}
