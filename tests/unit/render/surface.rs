use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> Bitmap {
    let mut bytes = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for _ in 0..width * height {
        bytes.extend_from_slice(&px);
    }
    Bitmap::from_premul_rgba8(width, height, bytes).unwrap()
}

fn red_shader(anchor: Point) -> ClampShader {
    ClampShader::new(solid(4, 4, [255, 0, 0, 255]), anchor)
}

#[test]
fn clear_fills_every_pixel() {
    let mut s = Surface::new(3, 2);
    s.clear(Some(Rgba8Premul::from_straight_rgba(10, 20, 30, 255)));
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(s.pixel(x, y).b, 30);
        }
    }
    s.clear(None);
    assert_eq!(s.pixel(2, 1), Rgba8Premul::transparent());
}

#[test]
fn circle_fill_covers_interior_and_misses_exterior() {
    let mut s = Surface::new(40, 40);
    let center = Point::new(20.0, 20.0);
    s.fill_circle_shaded(center, 10.0, &red_shader(center));

    // Interior pixel at full coverage.
    assert_eq!(s.pixel(20, 20).r, 255);
    assert_eq!(s.pixel(20, 20).a, 255);
    // Well outside the radius: untouched.
    assert_eq!(s.pixel(2, 2).a, 0);
    assert_eq!(s.pixel(20, 34).a, 0);
}

#[test]
fn circle_edge_is_antialiased() {
    let mut s = Surface::new(40, 40);
    let center = Point::new(20.0, 20.0);
    s.fill_circle_shaded(center, 10.0, &red_shader(center));

    // Pixel centered just inside the circumference gets partial coverage.
    let edge = s.pixel(29, 20);
    assert!(edge.a > 0 && edge.a < 255, "edge alpha was {}", edge.a);
}

#[test]
fn non_positive_radius_draws_nothing() {
    let mut s = Surface::new(8, 8);
    let center = Point::new(4.0, 4.0);
    s.fill_circle_shaded(center, 0.0, &red_shader(center));
    s.fill_circle_shaded(center, -5.0, &red_shader(center));
    s.fill_circle_shaded(center, f64::NAN, &red_shader(center));
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn circle_clips_to_surface_bounds() {
    let mut s = Surface::new(8, 8);
    let center = Point::new(0.0, 0.0);
    s.fill_circle_shaded(center, 100.0, &red_shader(center));
    assert_eq!(s.pixel(7, 7).r, 255);
}

#[test]
fn bitmap_blit_places_top_left_and_clips() {
    let mut s = Surface::new(8, 8);
    let bmp = solid(4, 4, [0, 255, 0, 255]);

    s.draw_bitmap(&bmp, Point::new(6.0, 6.0));
    assert_eq!(s.pixel(7, 7).g, 255);
    assert_eq!(s.pixel(5, 5).a, 0);

    s.draw_bitmap(&bmp, Point::new(-2.0, -2.0));
    assert_eq!(s.pixel(0, 0).g, 255);
    assert_eq!(s.pixel(2, 2).a, 0);
}

#[test]
fn over_blends_premultiplied_source() {
    let dst = [0, 0, 0, 255];
    let src = [128, 0, 0, 128];
    let out = over(dst, src, 1.0);
    assert_eq!(out[0], 128);
    assert_eq!(out[3], 255);

    // Transparent source and zero opacity leave dst alone.
    assert_eq!(over(dst, [9, 9, 9, 0], 1.0), dst);
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn transparent_corners_do_not_overwrite_circle() {
    // Blitting a bitmap with transparent pixels over painted content must
    // leave that content visible (source-over, not replace).
    let mut s = Surface::new(4, 4);
    let center = Point::new(2.0, 2.0);
    s.fill_circle_shaded(center, 2.0, &red_shader(center));
    let before = s.pixel(2, 2);

    let clear_bmp = solid(4, 4, [0, 0, 0, 0]);
    s.draw_bitmap(&clear_bmp, Point::new(0.0, 0.0));
    assert_eq!(s.pixel(2, 2), before);
}
