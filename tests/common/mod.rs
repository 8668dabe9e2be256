use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Builds an A4 PDF in memory, one page per entry; items are `(x, y, text)`
/// baselines in 12pt Courier.
pub fn digest_pdf_bytes(pages: &[&[(i64, i64, &str)]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for items in pages {
        let operations: Vec<Operation> = items
            .iter()
            .flat_map(|(x, y, text)| {
                [
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![(*x).into(), (*y).into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            })
            .collect();
        let content = Content { operations }.encode().expect("encode content");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(Object::from(page_id));
    }

    let count = i64::try_from(kids.len()).expect("page count fits");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

/// Two pages: a title block over three columns, then three committee columns.
pub fn sample_digest() -> Vec<u8> {
    digest_pdf_bytes(&[
        &[
            (230, 790, "Daily Digest"),
            (40, 600, "Senate"),
            (40, 580, "Chamber Action"),
            (220, 600, "House"),
            (400, 600, "Committee Meetings"),
            (280, 40, "Page D1"),
        ],
        &[
            (250, 830, "Digest"),
            (40, 700, "Agriculture"),
            (220, 700, "Judiciary"),
            (400, 700, "Rules"),
        ],
    ])
}

/// Serves one canned HTTP response per expected request, then stops.
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn start(status_line: &'static str, body: Vec<u8>, requests: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let mut stream = stream.expect("accept connection");
                let mut request = Vec::new();
                let mut chunk = [0_u8; 512];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    let read = stream.read(&mut chunk).expect("read request");
                    if read == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..read]);
                }

                let head = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/pdf\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                // The client may hang up early on error statuses.
                let _ = stream
                    .write_all(head.as_bytes())
                    .and_then(|()| stream.write_all(&body))
                    .and_then(|()| stream.flush());
            }
        });

        Self { base_url, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub fn join(self) {
        self.handle.join().expect("stub server thread");
    }
}
