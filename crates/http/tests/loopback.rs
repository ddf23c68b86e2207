use micro_rpc_http::connection::HttpServer;
use micro_rpc_http::io::NonBlockingIo;
use micro_rpc_http::protocol::HttpError;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

fn wait() {
    thread::sleep(Duration::from_millis(1));
}

/// Serves one connection until the client or the negotiation ends it, answering every
/// request with "<method> <path> <body>". Returns the number of requests answered.
fn serve(stream: TcpStream) -> Result<usize, HttpError> {
    stream.set_nonblocking(true)?;
    let mut io = NonBlockingIo::new(stream);
    let mut server = HttpServer::new();
    let mut served = 0;

    loop {
        let header = loop {
            match server.receive_request(&mut io)? {
                Some(header) => break header,
                None => wait(),
            }
        };
        while !server.receive_body(&mut io)? {
            wait();
        }

        let answer = format!("{} {} {}", header.method(), header.path(), String::from_utf8_lossy(server.body()));
        server.feed_ok(answer, "text/plain");
        while !server.send_buffer_is_empty() {
            if server.send_response(&mut io)? == 0 {
                wait();
            }
        }

        served += 1;
        if !server.supports_persistent_connection() {
            return Ok(served);
        }
    }
}

fn spawn_server() -> (SocketAddr, JoinHandle<Result<usize, HttpError>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept()?;
        serve(stream)
    });
    (addr, handle)
}

struct ParsedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    consumed: usize,
}

impl ParsedResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

fn parse_response(bytes: &[u8]) -> ParsedResponse {
    let mut headers = [httparse::EMPTY_HEADER; 16];
    let mut response = httparse::Response::new(&mut headers);
    let httparse::Status::Complete(head_len) = response.parse(bytes).expect("valid response") else {
        panic!("incomplete response head");
    };

    let headers = response
        .headers
        .iter()
        .map(|h| (h.name.to_owned(), String::from_utf8_lossy(h.value).into_owned()))
        .collect::<Vec<_>>();
    let mut parsed = ParsedResponse { status: response.code.expect("status code"), headers, body: Vec::new(), consumed: 0 };

    let length: usize = parsed.header("Content-Length").expect("content length").parse().expect("numeric length");
    parsed.body = bytes[head_len..head_len + length].to_vec();
    parsed.consumed = head_len + length;
    parsed
}

#[test]
fn http_10_request_with_split_body() {
    let (addr, server) = spawn_server();

    let mut client = TcpStream::connect(addr).unwrap();
    client.write_all(b"POST /jsonrpc HTTP/1.0\r\nContent-Length: 11\r\n\r\nhello").unwrap();
    client.flush().unwrap();
    thread::sleep(Duration::from_millis(20));
    client.write_all(b" world").unwrap();

    assert_eq!(server.join().unwrap().unwrap(), 1);

    let mut received = Vec::new();
    client.read_to_end(&mut received).unwrap();
    let response = parse_response(&received);

    assert_eq!(response.status, 200);
    assert_eq!(response.header("Connection"), Some("close"));
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Cache-Control"), Some("no-cache"));
    assert_eq!(response.header("Date"), response.header("Expires"));
    assert_eq!(response.body, b"POST /jsonrpc hello world");
    assert_eq!(response.consumed, received.len());
}

#[test]
fn pipelined_keep_alive_requests() {
    let (addr, server) = spawn_server();

    let mut client = TcpStream::connect(addr).unwrap();
    client
        .write_all(
            b"POST /first HTTP/1.1\r\nContent-Length: 3\r\n\r\nonePOST /second HTTP/1.1\r\nConnection: close\r\nContent-Length: 3\r\n\r\ntwo",
        )
        .unwrap();

    assert_eq!(server.join().unwrap().unwrap(), 2);

    let mut received = Vec::new();
    client.read_to_end(&mut received).unwrap();

    let first = parse_response(&received);
    assert_eq!(first.status, 200);
    assert_eq!(first.header("Connection"), None);
    assert_eq!(first.body, b"POST /first one");

    let second = parse_response(&received[first.consumed..]);
    assert_eq!(second.header("Connection"), Some("close"));
    assert_eq!(second.body, b"POST /second two");
    assert_eq!(first.consumed + second.consumed, received.len());
}

#[test]
fn client_hanging_up_is_reported_as_peer_closed() {
    let (addr, server) = spawn_server();

    let client = TcpStream::connect(addr).unwrap();
    drop(client);

    let err = server.join().unwrap().unwrap_err();
    assert!(err.is_peer_closed(), "unexpected error {err}");
}
