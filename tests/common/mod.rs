#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, header};
use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use rxing::qrcode::QRCodeWriter;
use rxing::{BarcodeFormat, Writer};
use std::io::Cursor;

pub const BOUNDARY: &str = "qrdecode-test-boundary";

/// White canvas to draw symbols on.
pub fn blank_canvas(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([255]))
}

/// Render a QR code for `text` into `canvas` with its top-left at
/// `(left, top)`. `size` includes the quiet zone.
pub fn draw_qr(canvas: &mut GrayImage, text: &str, size: u32, left: u32, top: u32) {
    let matrix = QRCodeWriter {}
        .encode(text, &BarcodeFormat::QR_CODE, size as i32, size as i32)
        .expect("encode qr");
    for y in 0..size {
        for x in 0..size {
            if matrix.get(x, y) {
                canvas.put_pixel(left + x, top + y, Luma([0]));
            }
        }
    }
}

pub fn png_bytes(image: GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode png");
    bytes
}

/// A single "HELLO" QR code, 7px per module.
pub fn hello_png() -> Vec<u8> {
    let mut canvas = blank_canvas(203, 203);
    draw_qr(&mut canvas, "HELLO", 203, 0, 0);
    png_bytes(canvas)
}

/// Two QR codes side by side with different module sizes.
pub fn two_symbols_png() -> Vec<u8> {
    let mut canvas = blank_canvas(420, 240);
    draw_qr(&mut canvas, "A1", 203, 10, 10);
    draw_qr(&mut canvas, "B2", 174, 230, 30);
    png_bytes(canvas)
}

/// Binary PGM with a full white raster.
pub fn pgm_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = format!("P5\n{width} {height}\n255\n").into_bytes();
    bytes.resize(bytes.len() + (width as usize) * (height as usize), 255);
    bytes
}

/// Multipart body with a single file part.
pub fn multipart_body(file_name: &str, file: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Multipart body with no parts at all.
pub fn empty_multipart_body() -> Vec<u8> {
    format!("--{BOUNDARY}--\r\n").into_bytes()
}

pub fn decode_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/decode")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}
