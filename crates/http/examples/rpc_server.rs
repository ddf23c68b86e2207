use http::header::UPGRADE;
use http::{Method, StatusCode};
use std::error::Error;

use tokio::net::{TcpListener, TcpStream};

use micro_rpc_http::config::ServerConfig;
use micro_rpc_http::connection::HttpServer;
use micro_rpc_http::io::TokioTransport;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = match ServerConfig::builder().allow_origin("*").credentials("alice", "secret").build() {
        Ok(config) => config,
        Err(e) => {
            error!(cause = %e, "invalid server config");
            return;
        }
    };

    info!(port = 6800, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:6800").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        let server = HttpServer::with_config(config.clone());
        tokio::spawn(async move {
            match serve(server, tcp_stream).await {
                Ok(()) => {
                    info!("finished process, connection shutdown");
                }
                Err(e) => {
                    error!("service has error, cause {}, connection shutdown", e);
                }
            }
        });
    }
}

async fn serve(mut server: HttpServer, stream: TcpStream) -> Result<(), Box<dyn Error + Send + Sync>> {
    loop {
        let header = loop {
            stream.readable().await?;
            match server.receive_request(&mut TokioTransport::new(&stream)) {
                Ok(Some(header)) => break header,
                Ok(None) => {}
                Err(e) if e.is_peer_closed() => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        };

        while !server.receive_body(&mut TokioTransport::new(&stream))? {
            stream.readable().await?;
        }

        let mut upgraded = false;
        if !server.authenticate() {
            server.feed_response(StatusCode::UNAUTHORIZED, "WWW-Authenticate: Basic realm=\"rpc\"\r\n", "", "");
        } else if let Some(protocol) = header.header_str(UPGRADE).filter(|p| p.eq_ignore_ascii_case("websocket")) {
            // no frames are spoken here, the connection ends once switched
            server.feed_upgrade_response(protocol, "");
            upgraded = true;
        } else {
            match (header.method(), header.path()) {
                (&Method::GET, "/") => server.feed_ok("rpc endpoint is up\r\n", "text/plain"),
                (&Method::POST, path) if path.starts_with("/jsonrpc") => {
                    let body = server.take_body();
                    server.feed_ok(body, "application/json-rpc");
                }
                _ => server.feed_response(StatusCode::NOT_FOUND, "", "", ""),
            }
        }

        while !server.send_buffer_is_empty() {
            stream.writable().await?;
            server.send_response(&mut TokioTransport::new(&stream))?;
        }

        if upgraded || !server.supports_persistent_connection() {
            return Ok(());
        }
    }
}
