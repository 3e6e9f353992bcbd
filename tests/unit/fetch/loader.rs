use super::*;
use crate::fetch::source::MemorySource;
use crate::view::slots::{CountingRedraw, RedrawSignal};

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn loader_with(
    entries: &[(&str, Vec<u8>)],
) -> (Loader, Arc<SlotBoard>, Arc<CountingRedraw>) {
    let mut source = MemorySource::new();
    for (url, bytes) in entries {
        source.insert(*url, bytes.clone());
    }
    let slots = Arc::new(SlotBoard::new());
    let redraw = Arc::new(CountingRedraw::new());
    let loader = Loader::new(
        BackendKind::Direct,
        8.0,
        Arc::new(source),
        Arc::clone(&slots),
        Arc::clone(&redraw) as Arc<dyn RedrawSignal>,
    );
    (loader, slots, redraw)
}

#[test]
fn absent_url_issues_nothing() {
    let (loader, slots, redraw) = loader_with(&[]);
    loader.request_image(None, SlotSide::Left);
    loader.join_pending();
    assert!(!slots.is_occupied(SlotSide::Left));
    assert_eq!(redraw.count(), 0);
}

#[test]
fn successful_fetch_stores_and_signals_once() {
    let (loader, slots, redraw) =
        loader_with(&[("l.png", png_bytes(32, 32, [255, 0, 0, 255]))]);
    assert_eq!(loader.backend().kind(), BackendKind::Direct);
    loader.request_image(Some("l.png"), SlotSide::Left);
    loader.join_pending();

    assert!(slots.is_occupied(SlotSide::Left));
    assert!(!slots.is_occupied(SlotSide::Right));
    assert_eq!(redraw.count(), 1);
}

#[test]
fn fetch_failure_leaves_slot_unchanged() {
    let (loader, slots, redraw) = loader_with(&[("bad.png", vec![1, 2, 3])]);
    loader.request_image(Some("missing.png"), SlotSide::Left);
    loader.request_image(Some("bad.png"), SlotSide::Right);
    loader.join_pending();

    assert!(!slots.is_occupied(SlotSide::Left));
    assert!(!slots.is_occupied(SlotSide::Right));
    assert_eq!(redraw.count(), 0);
}

#[test]
fn failure_on_one_slot_does_not_disturb_the_other() {
    let (loader, slots, redraw) = loader_with(&[
        ("good.png", png_bytes(16, 16, [0, 255, 0, 255])),
        ("bad.png", vec![9, 9, 9]),
    ]);
    loader.request_image(Some("good.png"), SlotSide::Right);
    loader.join_pending();
    let before = slots.snapshot(SlotSide::Right).unwrap();

    loader.request_image(Some("bad.png"), SlotSide::Left);
    loader.join_pending();

    assert!(!slots.is_occupied(SlotSide::Left));
    let after = slots.snapshot(SlotSide::Right).unwrap();
    assert_eq!(before.pixels(), after.pixels());
    assert_eq!(redraw.count(), 1);
}

#[test]
fn dispose_drops_later_deliveries() {
    let (loader, slots, redraw) =
        loader_with(&[("l.png", png_bytes(8, 8, [1, 1, 1, 255]))]);
    loader.dispose();
    loader.request_image(Some("l.png"), SlotSide::Left);
    loader.join_pending();

    assert!(!slots.is_occupied(SlotSide::Left));
    assert_eq!(redraw.count(), 0);
}

#[test]
fn second_request_overwrites_slot() {
    let (loader, slots, _redraw) = loader_with(&[
        ("a.png", png_bytes(8, 8, [255, 0, 0, 255])),
        ("b.png", png_bytes(8, 8, [0, 0, 255, 255])),
    ]);
    loader.request_image(Some("a.png"), SlotSide::Left);
    loader.join_pending();
    loader.request_image(Some("b.png"), SlotSide::Left);
    loader.join_pending();

    let bmp = slots.snapshot(SlotSide::Left).unwrap();
    let c = bmp.width() / 2;
    assert_eq!(bmp.pixel(c, c).b, 255);
}
