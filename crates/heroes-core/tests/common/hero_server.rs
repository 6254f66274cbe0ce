//! Minimal HTTP/1.1 heroes API for integration tests.
//!
//! Serves `/heros` from an in-memory list: list, `?name=` substring filter,
//! get/put/delete by id, and post with server-assigned ids. One request per
//! connection.

use heroes_core::Hero;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

struct Store {
    heroes: Vec<Hero>,
    next_id: i64,
}

/// Starts the server in a background thread seeded with `heroes`. Returns the
/// collection URL (e.g. "http://127.0.0.1:12345/heros").
pub fn start(heroes: Vec<Hero>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let next_id = heroes.iter().map(|h| h.id).max().unwrap_or(0) + 1;
    let store = Arc::new(Mutex::new(Store { heroes, next_id }));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let store = Arc::clone(&store);
            thread::spawn(move || handle(stream, &store));
        }
    });
    format!("http://127.0.0.1:{}/heros", port)
}

/// Connection lifecycle reported by [`start_stalled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallEvent {
    /// A full request arrived and is being held without a reply.
    Holding,
    /// The client hung up on a held request.
    Closed,
}

/// Starts a server that reads each request and never answers it. Every
/// connection is reported on the returned channel when it is held and again
/// when the client closes it.
pub fn start_stalled() -> (String, mpsc::Receiver<StallEvent>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let tx = tx.clone();
            thread::spawn(move || {
                if read_request(&mut stream).is_none() {
                    return;
                }
                let _ = tx.send(StallEvent::Holding);
                let mut buf = [0u8; 256];
                // Blocks until the peer closes; nothing is ever written back.
                while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
                let _ = tx.send(StallEvent::Closed);
            });
        }
    });
    (format!("http://127.0.0.1:{}/heros", port), rx)
}

pub fn hero(id: i64, name: &str) -> Hero {
    Hero {
        id,
        name: name.to_string(),
    }
}

fn handle(mut stream: TcpStream, store: &Mutex<Store>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some((method, target, body)) = read_request(&mut stream) else {
        return;
    };
    let (status, payload) = route(&method, &target, &body, store);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        payload.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(payload.as_bytes());
}

/// Reads the request line, headers and a Content-Length body.
fn read_request(stream: &mut TcpStream) -> Option<(String, String, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = std::str::from_utf8(&data[..header_end]).ok()?.to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let body = data[header_end..].to_vec();
    Some((method, target, body))
}

fn route(method: &str, target: &str, body: &[u8], store: &Mutex<Store>) -> (&'static str, String) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let id = path
        .strip_prefix("/heros/")
        .and_then(|s| s.parse::<i64>().ok());
    let mut store = store.lock().unwrap();

    match (method, path, id) {
        ("GET", "/heros", None) => {
            let name = url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == "name")
                .map(|(_, v)| v.to_lowercase());
            let matching: Vec<&Hero> = store
                .heroes
                .iter()
                .filter(|h| match &name {
                    Some(n) => h.name.to_lowercase().contains(n.as_str()),
                    None => true,
                })
                .collect();
            ("200 OK", serde_json::to_string(&matching).unwrap())
        }
        ("POST", "/heros", None) => {
            let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
                return ("400 Bad Request", "{}".to_string());
            };
            let name = value["name"].as_str().unwrap_or_default().to_string();
            let created = Hero {
                id: store.next_id,
                name,
            };
            store.next_id += 1;
            store.heroes.push(created.clone());
            ("201 Created", serde_json::to_string(&created).unwrap())
        }
        ("GET", _, Some(id)) => match store.heroes.iter().find(|h| h.id == id) {
            Some(h) => ("200 OK", serde_json::to_string(h).unwrap()),
            None => ("404 Not Found", "{}".to_string()),
        },
        ("PUT", _, Some(id)) => {
            let Ok(updated) = serde_json::from_slice::<Hero>(body) else {
                return ("400 Bad Request", "{}".to_string());
            };
            match store.heroes.iter_mut().find(|h| h.id == id) {
                Some(h) => {
                    h.name = updated.name;
                    ("200 OK", serde_json::to_string(h).unwrap())
                }
                None => ("404 Not Found", "{}".to_string()),
            }
        }
        ("DELETE", _, Some(id)) => {
            let before = store.heroes.len();
            store.heroes.retain(|h| h.id != id);
            if store.heroes.len() < before {
                ("200 OK", "{}".to_string())
            } else {
                ("404 Not Found", "{}".to_string())
            }
        }
        _ => ("405 Method Not Allowed", "{}".to_string()),
    }
}
