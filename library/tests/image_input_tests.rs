//! Integration tests for the image input node.
//!
//! Fixtures are generated into a temporary input folder; remote fetches go
//! through an in-memory fetcher.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, Rgb, RgbImage, Rgba, RgbaImage};

use node_pack::LibraryError;
use node_pack::builtin::InputImage;
use node_pack::folder_paths::InputFolders;
use node_pack::model::reference::ImageReference;
use node_pack::model::tensor::MaskTensor;
use node_pack::model::value::{NodeInputs, NodeValue, Validation};
use node_pack::plugin::NodePlugin;
use node_pack::resolve::{ContentFetcher, ImageResolver};

/// Serves canned bodies by URL and records every request.
#[derive(Default)]
struct FakeFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl ContentFetcher for FakeFetcher {
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LibraryError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| LibraryError::RemoteFetch(format!("GET {} returned 404 Not Found", url)))
    }
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("input")).unwrap();
        fs::create_dir(dir.path().join("output")).unwrap();
        fs::create_dir(dir.path().join("temp")).unwrap();
        Self { dir }
    }

    fn folders(&self) -> InputFolders {
        let root = self.dir.path();
        InputFolders::new(root.join("input"), root.join("output"), root.join("temp"))
    }

    fn input_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("input").join(name)
    }

    fn node(&self, fetcher: Arc<dyn ContentFetcher>, emit_mask: bool) -> InputImage {
        InputImage::new(self.folders(), fetcher, emit_mask)
    }
}

fn write_rgb(path: &Path) {
    let img = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 50) as u8, (y * 100) as u8, 7]));
    img.save(path).unwrap();
}

/// 4x2, alpha increasing left to right: 0, 51, 204, 255.
fn write_rgba(path: &Path) {
    let alphas = [0u8, 51, 204, 255];
    let img = RgbaImage::from_fn(4, 2, |x, _| Rgba([255, 128, 0, alphas[x as usize]]));
    img.save(path).unwrap();
}

/// Big-endian TIFF block holding a single Orientation (0x0112) entry.
fn exif_orientation(value: u8) -> Vec<u8> {
    let mut tiff = b"MM\x00\x2A\x00\x00\x00\x08".to_vec();
    tiff.extend_from_slice(&[0x00, 0x01]);
    tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    tiff.extend_from_slice(&[0x00, value, 0x00, 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    tiff
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| Rgb([(x * 30) as u8, 90, 200]));
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 95)
        .encode(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// APP1 "Exif" segment placed right after SOI.
fn with_jpeg_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\x00\x00".to_vec();
    payload.extend_from_slice(tiff);
    let len = (payload.len() + 2) as u16;

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= b as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
        }
    }
    !crc
}

/// eXIf chunk inserted directly after IHDR (signature 8 + IHDR 25 bytes).
fn with_png_exif(png: &[u8], tiff: &[u8]) -> Vec<u8> {
    let mut chunk = (tiff.len() as u32).to_be_bytes().to_vec();
    let mut body = b"eXIf".to_vec();
    body.extend_from_slice(tiff);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32(&body).to_be_bytes());

    let mut out = png[..33].to_vec();
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[33..]);
    out
}

fn image_inputs(value: NodeValue) -> NodeInputs {
    NodeInputs::from([("image".to_string(), value)])
}

#[test]
fn test_relative_name_resolves_from_input_folder() {
    let fx = Fixture::new();
    write_rgb(&fx.input_path("photo.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let out = node.run(&image_inputs(NodeValue::from("photo.png"))).unwrap();

    assert_eq!(out.values.len(), 2);
    let image = out.values[0].as_image().unwrap();
    assert_eq!(image.shape(), [1, 3, 5, 3]);
    let [r, g, b] = image.pixel(0, 2, 4);
    assert!((r - 200.0 / 255.0).abs() < 1e-6);
    assert!((g - 200.0 / 255.0).abs() < 1e-6);
    assert!((b - 7.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_image_without_alpha_gets_empty_mask() {
    let fx = Fixture::new();
    write_rgb(&fx.input_path("photo.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let out = node.run(&image_inputs(NodeValue::from("photo.png"))).unwrap();
    assert_eq!(out.values[1].as_mask().unwrap(), &MaskTensor::empty());
}

#[test]
fn test_alpha_becomes_inverted_mask() {
    let fx = Fixture::new();
    write_rgba(&fx.input_path("cutout.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let out = node.run(&image_inputs(NodeValue::from("cutout.png"))).unwrap();
    let mask = out.values[1].as_mask().unwrap();
    assert_eq!(mask.shape(), [1, 2, 4]);
    let expected = [1.0, 0.8, 0.2, 0.0];
    for y in 0..2 {
        for (x, want) in expected.iter().enumerate() {
            assert!((mask.value(0, y, x) - want).abs() < 1e-6, "mask at ({x},{y})");
        }
    }
    // RGB 出力にはアルファが含まれない
    assert_eq!(out.values[0].as_image().unwrap().shape(), [1, 2, 4, 3]);
}

#[test]
fn test_minimal_output_shape_omits_mask() {
    let fx = Fixture::new();
    write_rgba(&fx.input_path("cutout.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), false);

    let out = node.run(&image_inputs(NodeValue::from("cutout.png"))).unwrap();
    assert_eq!(out.values.len(), 1);
    assert_eq!(node.definition().return_types(), vec!["IMAGE".to_string()]);
}

#[test]
fn test_path_and_bytes_decode_identically() {
    let fx = Fixture::new();
    let path = fx.input_path("cutout.png");
    write_rgba(&path);
    let resolver = ImageResolver::new(fx.folders(), Arc::new(FakeFetcher::default()));

    let from_path = resolver.resolve(ImageReference::AbsolutePath(&path)).unwrap();
    let bytes = fs::read(&path).unwrap();
    let from_bytes = resolver.resolve(ImageReference::RawBytes(&bytes)).unwrap();

    assert_eq!(from_path, from_bytes);
}

#[test]
fn test_annotated_name_reads_other_folder() {
    let fx = Fixture::new();
    write_rgb(&fx.dir.path().join("output").join("render.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let inputs = image_inputs(NodeValue::from("render.png [output]"));
    assert!(node.validate(&inputs).is_ok());
    assert!(node.run(&inputs).is_ok());
}

#[test]
fn test_remote_url_is_fetched_once() {
    let fx = Fixture::new();
    let path = fx.input_path("remote.png");
    write_rgb(&path);
    let url = "https://cdn.example.com/remote.png";
    let fetcher = Arc::new(FakeFetcher {
        bodies: HashMap::from([(url.to_string(), fs::read(&path).unwrap())]),
        ..FakeFetcher::default()
    });
    let node = fx.node(fetcher.clone(), true);

    let out = node.run(&image_inputs(NodeValue::from(url))).unwrap();
    assert_eq!(out.values[0].as_image().unwrap().shape(), [1, 3, 5, 3]);
    assert_eq!(*fetcher.requests.lock().unwrap(), vec![url.to_string()]);
}

#[test]
fn test_remote_failure_propagates() {
    let fx = Fixture::new();
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let err = node
        .run(&image_inputs(NodeValue::from("https://cdn.example.com/gone.png")))
        .unwrap_err();
    assert!(matches!(err, LibraryError::RemoteFetch(_)));
}

#[test]
fn test_undecodable_bytes_fail() {
    let fx = Fixture::new();
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let err = node
        .run(&image_inputs(NodeValue::Bytes(b"GIF? no".to_vec())))
        .unwrap_err();
    assert!(matches!(err, LibraryError::Decode(_)));
}

#[test]
fn test_unsupported_value_shape() {
    let fx = Fixture::new();
    let node = fx.node(Arc::new(FakeFetcher::default()), true);
    let inputs = image_inputs(NodeValue::Float(0.5));

    assert!(matches!(
        node.run(&inputs),
        Err(LibraryError::UnsupportedSource(_))
    ));
    assert_eq!(node.changed(&inputs).unwrap(), None);
}

#[test]
fn test_validation_of_missing_upload() {
    let fx = Fixture::new();
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    match node.validate(&image_inputs(NodeValue::from("missing.png"))) {
        Validation::Rejected(reason) => assert!(reason.contains("missing.png")),
        Validation::Ok => panic!("missing upload accepted"),
    }
    assert!(
        node.validate(&image_inputs(NodeValue::from("https://x/y.png")))
            .is_ok()
    );
}

#[test]
fn test_change_key_follows_file_content() {
    let fx = Fixture::new();
    let path = fx.input_path("photo.png");
    write_rgb(&path);
    let node = fx.node(Arc::new(FakeFetcher::default()), true);
    let inputs = image_inputs(NodeValue::from("photo.png"));

    let first = node.changed(&inputs).unwrap().unwrap();
    assert_eq!(Some(first.clone()), node.changed(&inputs).unwrap());

    write_rgba(&path);
    assert_ne!(Some(first), node.changed(&inputs).unwrap());

    // 同じバイト列なら、パス指定でもバイト列指定でも同じキーになる
    let by_path = node
        .changed(&image_inputs(NodeValue::from(path.to_str().unwrap())))
        .unwrap();
    let by_bytes = node
        .changed(&image_inputs(NodeValue::Bytes(fs::read(&path).unwrap())))
        .unwrap();
    assert_eq!(by_path, by_bytes);
}

#[test]
fn test_url_change_key_is_the_url() {
    let fx = Fixture::new();
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let key = node
        .changed(&image_inputs(NodeValue::from("https://x/y.png")))
        .unwrap()
        .unwrap();
    assert_eq!(key.as_str(), "https://x/y.png");
}

#[test]
fn test_definition_lists_uploads() {
    let fx = Fixture::new();
    write_rgb(&fx.input_path("b.png"));
    write_rgb(&fx.input_path("a.png"));
    let node = fx.node(Arc::new(FakeFetcher::default()), true);

    let def = node.definition();
    let pin = &def.inputs[0];
    assert_eq!(pin.name, "image");
    assert!(pin.image_upload);
    assert_eq!(pin.choices, vec!["a.png".to_string(), "b.png".to_string()]);
    assert_eq!(
        def.return_types(),
        vec!["IMAGE".to_string(), "MASK".to_string()]
    );
}

#[test]
fn test_exif_orientation_from_jpeg_metadata() {
    let fx = Fixture::new();
    let resolver = ImageResolver::new(fx.folders(), Arc::new(FakeFetcher::default()));
    let plain = jpeg_bytes(8, 4);
    let rotated = with_jpeg_exif(&plain, &exif_orientation(6));

    let as_stored = resolver.resolve(ImageReference::RawBytes(&plain)).unwrap();
    assert_eq!(as_stored.image.shape(), [1, 4, 8, 3]);

    let from_bytes = resolver.resolve(ImageReference::RawBytes(&rotated)).unwrap();
    assert_eq!(from_bytes.image.shape(), [1, 8, 4, 3]);

    let path = fx.input_path("portrait.jpg");
    fs::write(&path, &rotated).unwrap();
    let from_path = resolver.resolve(ImageReference::AbsolutePath(&path)).unwrap();
    assert_eq!(from_path, from_bytes);
}

#[test]
fn test_exif_orientation_keeps_mask_on_its_pixels() {
    // 左: 不透明の赤, 右: 透明の青
    let img = RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 0]) }
    });
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let bytes = with_png_exif(&png, &exif_orientation(6));

    let fx = Fixture::new();
    let resolver = ImageResolver::new(fx.folders(), Arc::new(FakeFetcher::default()));
    let resolved = resolver.resolve(ImageReference::RawBytes(&bytes)).unwrap();

    assert_eq!(resolved.image.shape(), [1, 2, 1, 3]);
    assert_eq!(resolved.mask.shape(), [1, 2, 1]);
    assert_eq!(resolved.image.pixel(0, 0, 0), [1.0, 0.0, 0.0]);
    assert_eq!(resolved.mask.value(0, 0, 0), 0.0);
    assert_eq!(resolved.image.pixel(0, 1, 0), [0.0, 0.0, 1.0]);
    assert_eq!(resolved.mask.value(0, 1, 0), 1.0);
}
